use crate::error::GameError;
use crate::evaluator::feedback_pattern;
use crate::game_state::{GameInterface, GameOptions, GameSession, UserAction, game_over_message};
use crate::logging::{LogDestination, default_log_path};
use crate::reveal::{RevealProgress, RevealStep, RevealTiming};
use crate::word::{MAX_ATTEMPTS, WORD_LENGTH};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Motus: guess the six-letter word in six attempts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Play in plain line mode instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Do not show the first letter of the word as a hint
    #[arg(long)]
    pub no_hint: bool,

    /// Delay between revealed letters, in milliseconds (0 reveals at once)
    #[arg(long, default_value_t = 300)]
    pub reveal_delay_ms: u64,

    /// Log file used by the full-screen interface
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Seed for the secret word draw, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            first_letter_hint: !self.no_hint,
            reveal: RevealTiming::from_letter_delay_ms(self.reveal_delay_ms),
        }
    }

    /// Plain mode logs to stderr; the full-screen interface needs a file.
    pub fn log_destination(&self) -> Option<LogDestination> {
        if self.plain {
            return Some(LogDestination::Stderr);
        }
        self.log_file
            .clone()
            .or_else(default_log_path)
            .map(LogDestination::File)
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map one line of plain-mode input (already trimmed and uppercased) to an action.
pub fn parse_command(input: &str, game_over: bool) -> Option<UserAction> {
    match input {
        "EXIT" => Some(UserAction::Exit),
        "NEXT" => Some(UserAction::NewGame),
        "RESET" => Some(UserAction::ResetAll),
        "" if game_over => Some(UserAction::NewGame),
        "" => None,
        guess => Some(UserAction::Guess(guess.to_string())),
    }
}

pub fn format_status(session: &GameSession) -> String {
    format!(
        "Score: {} | Attempts left: {}/{}",
        session.score(),
        session.attempts_remaining(),
        MAX_ATTEMPTS
    )
}

/// One grid row: the letters, with the `G`/`Y`/`X` pattern once submitted.
pub fn format_row(session: &GameSession, row: usize) -> String {
    let letters: String = (0..WORD_LENGTH)
        .map(|col| session.cell_letter(row, col).unwrap_or('.'))
        .collect();
    match session.attempts()[row].feedback {
        Some(feedback) => format!("{letters}  {}", feedback_pattern(&feedback)),
        None => letters,
    }
}

fn flush_stdout() {
    if let Err(e) = io::stdout().flush() {
        log::debug!("stdout flush failed: {e}");
    }
}

/// Line-oriented front end over any `BufRead`.
pub struct CliInterface<R: BufRead> {
    reader: R,
    game_over: bool,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            game_over: false,
        }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn render(&mut self, session: &GameSession) {
        // Rows are printed as they are revealed; only the prompt context goes here.
        if !self.game_over {
            println!("\n{}", format_status(session));
        }
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if self.game_over {
            println!("Press ENTER (or type 'next') to play again, 'reset' to also reset the score, 'exit' to quit:");
        } else {
            println!("Enter your guess (6 letters, or 'next', 'reset', 'exit'):");
        }

        let mut input = String::new();
        match self.reader.read_line(&mut input) {
            Ok(0) => return Some(UserAction::Exit),
            Ok(_) => {}
            Err(e) => {
                log::warn!("Failed to read input: {e}");
                return Some(UserAction::Exit);
            }
        }
        parse_command(&input.trim().to_uppercase(), self.game_over)
    }

    fn play_reveal(
        &mut self,
        session: &GameSession,
        mut reveal: RevealProgress,
        timing: &RevealTiming,
    ) -> Option<UserAction> {
        let row = reveal.attempt_index();
        let guess = &session.attempts()[row].guess;
        print!("{guess}  ");
        while let RevealStep::Letter { status, .. } = reveal.tick() {
            print!("{}", status.to_char());
            flush_stdout();
            if !timing.letter_delay.is_zero() {
                std::thread::sleep(timing.letter_delay);
            }
        }
        println!();
        if !timing.final_pause.is_zero() {
            std::thread::sleep(timing.final_pause);
        }
        None
    }

    fn display_rejection(&mut self, error: &GameError) {
        println!("Invalid: {error}.");
    }

    fn display_game_over(&mut self, session: &GameSession) {
        self.game_over = true;
        if let Some(message) = game_over_message(session) {
            println!("{message}");
        }
        println!("Score: {}", session.score());
    }

    fn display_new_game(&mut self, session: &GameSession) {
        self.game_over = false;
        println!("New game: find the {WORD_LENGTH}-letter word in {MAX_ATTEMPTS} attempts.");
        println!("{}", format_row(session, 0));
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }
}
