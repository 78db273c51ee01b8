use crate::error::WordError;
use std::fmt;
use std::str::FromStr;

/// Number of letters in every secret word and every guess.
pub const WORD_LENGTH: usize = 6;

/// Number of guesses a player gets per game.
pub const MAX_ATTEMPTS: usize = 6;

/// Returns true for the letters a word may contain (unaccented `A`..`Z`, either case).
pub fn is_word_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

/// A complete six-letter word, stored uppercase.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Word {
    letters: [u8; WORD_LENGTH],
}

impl Word {
    /// Parse a word, uppercasing it. Any length other than
    /// [`WORD_LENGTH`] or any non `A`..`Z` character is rejected.
    pub fn parse(text: &str) -> Result<Self, WordError> {
        if let Some(bad) = text.chars().find(|&c| !is_word_letter(c)) {
            return Err(WordError::InvalidCharacter(bad));
        }
        let len = text.len();
        if len != WORD_LENGTH {
            return Err(WordError::InvalidLength { len });
        }

        let mut letters = [0u8; WORD_LENGTH];
        for (slot, byte) in letters.iter_mut().zip(text.bytes()) {
            *slot = byte.to_ascii_uppercase();
        }
        Ok(Self { letters })
    }

    pub fn letters(&self) -> [char; WORD_LENGTH] {
        self.letters.map(char::from)
    }

    pub fn letter(&self, index: usize) -> char {
        char::from(self.letters[index])
    }

    pub fn first_letter(&self) -> char {
        self.letter(0)
    }
}

impl FromStr for Word {
    type Err = WordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.letters() {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl PartialEq<str> for Word {
    fn eq(&self, other: &str) -> bool {
        other.len() == WORD_LENGTH
            && self
                .letters
                .iter()
                .zip(other.bytes())
                .all(|(a, b)| *a == b.to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_uppercases() {
        let word = Word::parse("jardin").unwrap();
        assert_eq!(word.to_string(), "JARDIN");
        assert_eq!(word.first_letter(), 'J');
        assert_eq!(word.letters(), ['J', 'A', 'R', 'D', 'I', 'N']);
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            Word::parse("AMOUR"),
            Err(WordError::InvalidLength { len: 5 })
        );
        assert_eq!(
            Word::parse("JARDINS"),
            Err(WordError::InvalidLength { len: 7 })
        );
        assert_eq!(Word::parse(""), Err(WordError::InvalidLength { len: 0 }));
    }

    #[test]
    fn test_parse_rejects_non_letters() {
        assert_eq!(
            Word::parse("JARD1N"),
            Err(WordError::InvalidCharacter('1'))
        );
        assert_eq!(
            Word::parse("GÂTEAU"),
            Err(WordError::InvalidCharacter('Â'))
        );
        assert_eq!(
            Word::parse("JAR IN"),
            Err(WordError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_from_str_and_compare() {
        let word: Word = "maison".parse().unwrap();
        assert!(word == *"MAISON");
        assert!(word == *"maison");
        assert!(word != *"MAISONS");
        assert!(word != *"SAISON");
    }
}
