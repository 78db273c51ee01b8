use std::path::PathBuf;

use thiserror::Error;

/// Reasons a string cannot be used as a [`Word`](crate::word::Word).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("word must have exactly 6 letters, got {len}")]
    InvalidLength { len: usize },
    #[error("'{0}' is not a letter from A to Z")]
    InvalidCharacter(char),
}

/// Caller-contract violations on a running session.
///
/// These are rejected without touching the session and are never fatal: the
/// game loop reports them to the player and carries on.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("guesses are at most 6 letters, got {len}")]
    InputTooLong { len: usize },
    #[error("only letters are allowed ('{0}' is not a letter)")]
    InvalidCharacter(char),
    #[error("guess must be exactly 6 letters, got {len}")]
    IncompleteGuess { len: usize },
    #[error("the game is over, start a new one")]
    GameOver,
    #[error("the previous guess is still being revealed")]
    RevealInProgress,
}

/// Word source problems. Unrecoverable without fixing the word list.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("word source has no 6-letter word (checked {total} entries)")]
    NoEligibleWords { total: usize },
    #[error("failed to read word list '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
