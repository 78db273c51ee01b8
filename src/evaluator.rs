use crate::word::{WORD_LENGTH, Word};

/// Verdict for one letter of a guess.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum LetterStatus {
    /// Right letter, right position.
    Correct,
    /// Letter appears at another, still unmatched position of the secret.
    Present,
    /// No unmatched occurrence left in the secret.
    Absent,
}

impl LetterStatus {
    /// One-character code: `G` (correct), `Y` (present), `X` (absent).
    pub fn to_char(self) -> char {
        match self {
            Self::Correct => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }
}

/// Per-letter verdicts, index-aligned with the guess that produced them.
pub type Feedback = [LetterStatus; WORD_LENGTH];

/// Render feedback as its `G`/`Y`/`X` pattern, e.g. `GGGYGX`.
pub fn feedback_pattern(feedback: &Feedback) -> String {
    feedback.iter().map(|s| s.to_char()).collect()
}

pub fn is_solved(feedback: &Feedback) -> bool {
    feedback.iter().all(|s| *s == LetterStatus::Correct)
}

/// Compare `guess` against `secret`.
///
/// Exact matches are resolved first and consume their secret letter. Only then
/// are the remaining guess letters matched, left to right, against the first
/// unconsumed occurrence in the secret, so a letter is never reported more
/// times than the secret contains it.
pub fn evaluate(secret: &Word, guess: &Word) -> Feedback {
    let mut feedback = [LetterStatus::Absent; WORD_LENGTH];
    let mut secret_letters: [Option<char>; WORD_LENGTH] = secret.letters().map(Some);
    let mut guess_letters: [Option<char>; WORD_LENGTH] = guess.letters().map(Some);

    // First pass: exact matches
    for i in 0..WORD_LENGTH {
        if guess_letters[i] == secret_letters[i] {
            feedback[i] = LetterStatus::Correct;
            secret_letters[i] = None;
            guess_letters[i] = None;
        }
    }

    // Second pass: displaced matches
    for i in 0..WORD_LENGTH {
        let Some(letter) = guess_letters[i] else {
            continue;
        };
        if let Some(pos) = secret_letters.iter().position(|&c| c == Some(letter)) {
            feedback[i] = LetterStatus::Present;
            secret_letters[pos] = None;
        }
    }

    feedback
}
