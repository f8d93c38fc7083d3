//! Win/loss evaluation.
//!
//! The evaluator is a pure function of the session counters. It is consulted
//! from exactly two places in the turn cycle: right after a mismatch is
//! scored, and after a match is confirmed.
//!
//! ## Ordering
//!
//! 1. A status that is already terminal is returned unchanged.
//! 2. All pairs matched → `Won`.
//! 3. Score at or below the score threshold, or moves above the move cap → `Lost`.
//! 4. Otherwise `InProgress`.

use serde::{Deserialize, Serialize};

/// Where a session stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Reveals are accepted.
    #[default]
    InProgress,
    /// Every pair was found.
    Won,
    /// A loss threshold was crossed.
    Lost,
}

impl GameStatus {
    /// Is the session over?
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GameStatus::InProgress => "in progress",
            GameStatus::Won => "won",
            GameStatus::Lost => "lost",
        };
        f.write_str(label)
    }
}

/// The counters the evaluator looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tally {
    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub score: i32,
    pub moves: u32,
}

/// Loss thresholds and the evaluation rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationEvaluator {
    /// A score at or below this loses.
    pub loss_score_threshold: i32,

    /// More moves than this loses.
    pub loss_move_threshold: u32,
}

impl Default for TerminationEvaluator {
    fn default() -> Self {
        Self {
            loss_score_threshold: -16,
            loss_move_threshold: 25,
        }
    }
}

impl TerminationEvaluator {
    /// Create an evaluator with custom thresholds.
    #[must_use]
    pub const fn new(loss_score_threshold: i32, loss_move_threshold: u32) -> Self {
        Self {
            loss_score_threshold,
            loss_move_threshold,
        }
    }

    /// Decide the status that follows `current` given `tally`.
    #[must_use]
    pub fn evaluate(&self, current: GameStatus, tally: &Tally) -> GameStatus {
        if current.is_terminal() {
            return current;
        }
        if tally.matched_pairs >= tally.total_pairs {
            return GameStatus::Won;
        }
        if self.is_lost(tally) {
            return GameStatus::Lost;
        }
        GameStatus::InProgress
    }

    /// Has either loss threshold been crossed?
    #[must_use]
    pub fn is_lost(&self, tally: &Tally) -> bool {
        tally.score <= self.loss_score_threshold || tally.moves > self.loss_move_threshold
    }

    /// Moves left before the move cap trips. Negative once it has.
    #[must_use]
    pub fn remaining_moves(&self, moves: u32) -> i64 {
        i64::from(self.loss_move_threshold) - i64::from(moves)
    }
}
