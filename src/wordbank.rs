use crate::error::ConfigError;
use crate::word::Word;
use log::{debug, info};
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

#[derive(Clone, Debug, Default)]
pub struct WordSource {
    words: Vec<String>,
}

impl WordSource {
    pub fn new(words: Vec<String>) -> Self {
        Self { words }
    }

    pub fn embedded() -> Self {
        Self::new(load_wordbank_from_str(EMBEDDED_WORDBANK))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn eligible_count(&self) -> usize {
        self.words.iter().filter(|w| Word::parse(w).is_ok()).count()
    }

    /// Fails unless at least one entry is a valid six-letter word.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.words.iter().any(|w| Word::parse(w).is_ok()) {
            Ok(())
        } else {
            Err(ConfigError::NoEligibleWords {
                total: self.words.len(),
            })
        }
    }

    pub fn choose_secret<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Word, ConfigError> {
        self.validate()?;

        let mut draws = 0usize;
        loop {
            draws += 1;
            let Some(candidate) = self.words.choose(rng) else {
                return Err(ConfigError::NoEligibleWords { total: 0 });
            };
            match Word::parse(candidate) {
                Ok(word) => {
                    debug!("Secret word drawn after {draws} draw(s)");
                    return Ok(word);
                }
                Err(e) => debug!("Skipping '{candidate}' as a secret: {e}"),
            }
        }
    }
}

fn normalize_line(line: &str) -> Option<String> {
    let word = line.trim();
    if word.is_empty() {
        None
    } else {
        Some(word.to_uppercase())
    }
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(normalize_line).collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ConfigError> {
    let path = path.as_ref();
    let io_error = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_error)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = normalize_line(&line.map_err(io_error)?) {
            words.push(word);
        }
    }
    info!("Loaded {} words from {}", words.len(), path.display());
    Ok(words)
}
