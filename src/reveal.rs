//! Staged reveal of a submitted guess.
//!
//! The feedback is already final when a guess is submitted; this only tracks
//! how many of its cells the front end has shown so far. Timing is left to the
//! front end, which ticks the progress on its own clock and hands the token
//! back to the session once the last cell and the final pause are done.

use crate::evaluator::{Feedback, LetterStatus};
use crate::word::WORD_LENGTH;
use std::time::Duration;

pub const DEFAULT_LETTER_DELAY: Duration = Duration::from_millis(300);
pub const DEFAULT_FINAL_PAUSE: Duration = Duration::from_millis(500);

/// Identifies the submission a reveal belongs to. A reset session bumps its
/// generation, which turns every token handed out before into a stale one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RevealToken {
    pub generation: u64,
    pub attempt_index: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct RevealTiming {
    pub letter_delay: Duration,
    pub final_pause: Duration,
}

impl RevealTiming {
    pub fn instant() -> Self {
        Self {
            letter_delay: Duration::ZERO,
            final_pause: Duration::ZERO,
        }
    }

    /// Per-letter delay in milliseconds; the final pause scales with it so a
    /// zero delay disables the staging entirely.
    pub fn from_letter_delay_ms(ms: u64) -> Self {
        if ms == 0 {
            return Self::instant();
        }
        let letter_delay = Duration::from_millis(ms);
        Self {
            letter_delay,
            final_pause: DEFAULT_FINAL_PAUSE.mul_f64(ms as f64 / 300.0),
        }
    }

    pub fn is_instant(&self) -> bool {
        self.letter_delay.is_zero() && self.final_pause.is_zero()
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            letter_delay: DEFAULT_LETTER_DELAY,
            final_pause: DEFAULT_FINAL_PAUSE,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RevealStep {
    /// Cell `index` is now shown with `status`.
    Letter { index: usize, status: LetterStatus },
    /// Every cell is shown.
    Finished,
}

#[derive(Clone, Debug)]
pub struct RevealProgress {
    token: RevealToken,
    feedback: Feedback,
    revealed: usize,
}

impl RevealProgress {
    pub fn new(token: RevealToken, feedback: Feedback) -> Self {
        Self {
            token,
            feedback,
            revealed: 0,
        }
    }

    pub fn attempt_index(&self) -> usize {
        self.token.attempt_index
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_complete(&self) -> bool {
        self.revealed == WORD_LENGTH
    }

    /// Status to draw for `index`, or `None` while the cell is still hidden.
    pub fn visible_status(&self, index: usize) -> Option<LetterStatus> {
        (index < self.revealed).then(|| self.feedback[index])
    }

    pub fn tick(&mut self) -> RevealStep {
        if self.is_complete() {
            return RevealStep::Finished;
        }
        let index = self.revealed;
        self.revealed += 1;
        RevealStep::Letter {
            index,
            status: self.feedback[index],
        }
    }

    pub fn finish(&mut self) {
        self.revealed = WORD_LENGTH;
    }
}
