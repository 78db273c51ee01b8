// Library interface for motus
// The binary and the integration tests both build on these modules

pub mod cli;
pub mod error;
pub mod evaluator;
pub mod game_state;
pub mod logging;
pub mod reveal;
pub mod tui;
pub mod word;
pub mod wordbank;

pub use error::{ConfigError, GameError, WordError};
pub use evaluator::{Feedback, LetterStatus, evaluate, feedback_pattern};
pub use game_state::{
    Attempt, GameInterface, GameOptions, GameSession, GameStatus, GameSummary, UserAction,
    game_loop,
};
pub use word::{MAX_ATTEMPTS, WORD_LENGTH, Word};
pub use wordbank::{WordSource, load_wordbank_from_file, load_wordbank_from_str};
