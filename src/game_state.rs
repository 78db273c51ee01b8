use crate::error::{ConfigError, GameError};
use crate::evaluator::{Feedback, evaluate, feedback_pattern, is_solved};
use crate::reveal::{RevealProgress, RevealTiming, RevealToken};
use crate::word::{MAX_ATTEMPTS, WORD_LENGTH, Word, is_word_letter};
use crate::wordbank::WordSource;
use log::{debug, info, warn};
use rand::Rng;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attempt {
    pub guess: String,
    pub feedback: Option<Feedback>,
}

impl Attempt {
    pub fn is_submitted(&self) -> bool {
        self.feedback.is_some()
    }
}

#[derive(Clone, Debug)]
pub struct Submission {
    pub attempt_index: usize,
    pub feedback: Feedback,
    pub status: GameStatus,
    pub token: RevealToken,
}

impl Submission {
    pub fn reveal(&self) -> RevealProgress {
        RevealProgress::new(self.token, self.feedback)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameOptions {
    pub first_letter_hint: bool,
    pub reveal: RevealTiming,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            first_letter_hint: true,
            reveal: RevealTiming::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameSession {
    secret: Word,
    attempts: [Attempt; MAX_ATTEMPTS],
    current_attempt: usize,
    current_input: String,
    score: u32,
    status: GameStatus,
    first_letter_hint: bool,
    generation: u64,
    pending_reveal: Option<RevealToken>,
}

impl GameSession {
    pub fn new(secret: Word, score: u32, first_letter_hint: bool) -> Self {
        Self {
            secret,
            attempts: Default::default(),
            current_attempt: 0,
            current_input: String::new(),
            score,
            status: GameStatus::InProgress,
            first_letter_hint,
            generation: 0,
            pending_reveal: None,
        }
    }

    pub fn start<R: Rng + ?Sized>(
        source: &WordSource,
        rng: &mut R,
        options: &GameOptions,
    ) -> Result<Self, ConfigError> {
        let secret = source.choose_secret(rng)?;
        info!("New session started");
        Ok(Self::new(secret, 0, options.first_letter_hint))
    }

    pub fn secret(&self) -> &Word {
        &self.secret
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn current_attempt(&self) -> usize {
        self.current_attempt
    }

    pub fn current_input(&self) -> &str {
        &self.current_input
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_revealing(&self) -> bool {
        self.pending_reveal.is_some()
    }

    pub fn submitted_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.is_submitted()).count()
    }

    pub fn attempts_remaining(&self) -> usize {
        MAX_ATTEMPTS - self.submitted_count()
    }

    pub fn hint(&self) -> Option<char> {
        self.first_letter_hint.then(|| self.secret.first_letter())
    }

    pub fn cell_letter(&self, row: usize, col: usize) -> Option<char> {
        let typed = self.attempts.get(row)?.guess.chars().nth(col);
        match typed {
            Some(c) => Some(c),
            None if row == 0 && col == 0 => self.hint(),
            None => None,
        }
    }

    fn ensure_accepting(&self) -> Result<(), GameError> {
        if self.status.is_terminal() {
            return Err(GameError::GameOver);
        }
        if self.pending_reveal.is_some() {
            return Err(GameError::RevealInProgress);
        }
        Ok(())
    }

    pub fn update_current_input(&mut self, text: &str) -> Result<(), GameError> {
        self.ensure_accepting()?;
        if let Some(bad) = text.chars().find(|&c| !is_word_letter(c)) {
            return Err(GameError::InvalidCharacter(bad));
        }
        let len = text.len();
        if len > WORD_LENGTH {
            return Err(GameError::InputTooLong { len });
        }

        let text = text.to_ascii_uppercase();
        self.attempts[self.current_attempt].guess.clone_from(&text);
        self.current_input = text;
        debug!(
            "Input for attempt {} is now '{}'",
            self.current_attempt + 1,
            self.current_input
        );
        Ok(())
    }

    pub fn push_letter(&mut self, letter: char) -> Result<(), GameError> {
        let mut text = self.current_input.clone();
        text.push(letter);
        self.update_current_input(&text)
    }

    pub fn pop_letter(&mut self) -> Result<(), GameError> {
        let mut text = self.current_input.clone();
        text.pop();
        self.update_current_input(&text)
    }

    /// On success, input stays blocked until `complete_reveal` gets the returned token.
    pub fn submit_guess(&mut self) -> Result<Submission, GameError> {
        self.ensure_accepting()?;
        let guess = Word::parse(&self.current_input).map_err(|_| GameError::IncompleteGuess {
            len: self.current_input.len(),
        })?;

        let attempt_index = self.current_attempt;
        let feedback = evaluate(&self.secret, &guess);
        self.attempts[attempt_index] = Attempt {
            guess: guess.to_string(),
            feedback: Some(feedback),
        };

        if is_solved(&feedback) {
            self.status = GameStatus::Won;
            self.score = self.score.saturating_add(1);
            info!(
                "Guess {} '{guess}' found the word, score is now {}",
                attempt_index + 1,
                self.score
            );
        } else {
            self.current_attempt += 1;
            self.current_input.clear();
            if self.current_attempt == MAX_ATTEMPTS {
                self.status = GameStatus::Lost;
                info!("Attempts exhausted, the word was {}", self.secret);
            } else {
                debug!(
                    "Guess {} '{guess}' scored {}",
                    attempt_index + 1,
                    feedback_pattern(&feedback)
                );
            }
        }

        let token = RevealToken {
            generation: self.generation,
            attempt_index,
        };
        self.pending_reveal = Some(token);

        Ok(Submission {
            attempt_index,
            feedback,
            status: self.status,
            token,
        })
    }

    /// Completion callback of the staged reveal. Returns false, and changes
    /// nothing, when the token does not belong to the pending reveal of this
    /// session (for instance after a reset).
    pub fn complete_reveal(&mut self, token: RevealToken) -> bool {
        if self.pending_reveal == Some(token) {
            self.pending_reveal = None;
            true
        } else {
            debug!(
                "Discarding stale reveal for attempt {} (generation {}, current {})",
                token.attempt_index + 1,
                token.generation,
                self.generation
            );
            false
        }
    }

    pub fn reset_game<R: Rng + ?Sized>(
        &mut self,
        source: &WordSource,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        // Draw first: a source error leaves this session untouched
        let secret = source.choose_secret(rng)?;
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::new(secret, self.score, self.first_letter_hint)
        };
        info!("Game reset (generation {generation}), score {}", self.score);
        Ok(())
    }

    pub fn reset_game_and_score<R: Rng + ?Sized>(
        &mut self,
        source: &WordSource,
        rng: &mut R,
    ) -> Result<(), ConfigError> {
        self.reset_game(source, rng)?;
        self.score = 0;
        info!("Score reset");
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAction {
    Input(String),
    Letter(char),
    Backspace,
    Submit,
    Guess(String),
    NewGame,
    ResetAll,
    Exit,
}

/// Front end seam: the loop owns the session, the interface renders it and
/// turns raw input into [`UserAction`]s.
pub trait GameInterface {
    fn render(&mut self, session: &GameSession);

    fn read_action(&mut self) -> Option<UserAction>;

    /// Show the staged reveal of the last submission. Returns an action that
    /// interrupted the reveal (reset or exit), if any.
    fn play_reveal(
        &mut self,
        session: &GameSession,
        reveal: RevealProgress,
        timing: &RevealTiming,
    ) -> Option<UserAction>;

    fn display_rejection(&mut self, error: &GameError);

    fn display_game_over(&mut self, session: &GameSession);

    fn display_new_game(&mut self, session: &GameSession);

    fn display_exit_message(&mut self);
}

pub const WIN_MESSAGE: &str = "Bravo! Vous avez trouvé le mot.";

pub fn game_over_message(session: &GameSession) -> Option<String> {
    match session.status() {
        GameStatus::InProgress => None,
        GameStatus::Won => Some(WIN_MESSAGE.to_string()),
        GameStatus::Lost => Some(format!("Dommage! Le mot était: {}", session.secret())),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub games_played: usize,
}

enum Flow {
    Continue,
    Exit,
}

struct GameLoop<'a, I, R: ?Sized> {
    source: &'a WordSource,
    interface: &'a mut I,
    rng: &'a mut R,
    options: &'a GameOptions,
    session: GameSession,
    games_played: usize,
}

impl<I: GameInterface, R: Rng + ?Sized> GameLoop<'_, I, R> {
    fn handle(&mut self, action: UserAction) -> Result<Flow, ConfigError> {
        debug!("Handling {action:?}");
        let result = match action {
            UserAction::Exit => return Ok(Flow::Exit),
            UserAction::NewGame => return self.new_game(false),
            UserAction::ResetAll => return self.new_game(true),
            UserAction::Input(text) => self.session.update_current_input(&text),
            UserAction::Letter(c) => self.session.push_letter(c),
            UserAction::Backspace => self.session.pop_letter(),
            UserAction::Submit => return self.submit(),
            UserAction::Guess(text) => match self.session.update_current_input(&text) {
                Ok(()) => return self.submit(),
                Err(e) => Err(e),
            },
        };
        if let Err(e) = result {
            self.reject(&e);
        }
        Ok(Flow::Continue)
    }

    fn reject(&mut self, error: &GameError) {
        debug!("Rejected: {error}");
        self.interface.display_rejection(error);
    }

    fn new_game(&mut self, reset_score: bool) -> Result<Flow, ConfigError> {
        if reset_score {
            self.session.reset_game_and_score(self.source, &mut *self.rng)?;
        } else {
            self.session.reset_game(self.source, &mut *self.rng)?;
        }
        self.games_played += 1;
        self.interface.display_new_game(&self.session);
        Ok(Flow::Continue)
    }

    fn submit(&mut self) -> Result<Flow, ConfigError> {
        let submission = match self.session.submit_guess() {
            Ok(submission) => submission,
            Err(e) => {
                self.reject(&e);
                return Ok(Flow::Continue);
            }
        };

        let interrupt =
            self.interface
                .play_reveal(&self.session, submission.reveal(), &self.options.reveal);
        let mut flow = Flow::Continue;
        if let Some(action) = interrupt {
            info!("Reveal interrupted by {action:?}");
            flow = self.handle(action)?;
        }

        let completed = self.session.complete_reveal(submission.token);
        if completed && matches!(flow, Flow::Continue) && self.session.status().is_terminal() {
            self.interface.display_game_over(&self.session);
        }
        Ok(flow)
    }
}

pub fn game_loop<I: GameInterface, R: Rng + ?Sized>(
    source: &WordSource,
    interface: &mut I,
    rng: &mut R,
    options: &GameOptions,
) -> Result<GameSummary, ConfigError> {
    let session = GameSession::start(source, rng, options)?;
    let mut game = GameLoop {
        source,
        interface,
        rng,
        options,
        session,
        games_played: 1,
    };
    game.interface.display_new_game(&game.session);

    loop {
        game.interface.render(&game.session);
        let Some(action) = game.interface.read_action() else {
            continue;
        };
        if let Flow::Exit = game.handle(action)? {
            break;
        }
    }

    game.interface.display_exit_message();
    if game.session.is_revealing() {
        warn!("Exiting with a reveal still pending");
    }
    Ok(GameSummary {
        score: game.session.score(),
        games_played: game.games_played,
    })
}
