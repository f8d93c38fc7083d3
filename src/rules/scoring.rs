//! Score deltas for resolved moves.

use serde::{Deserialize, Serialize};

/// Points awarded for a match and taken for a mismatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    /// Added to the score when two revealed cards match.
    pub match_points: i32,

    /// Added to the score when they do not (normally negative).
    pub mismatch_points: i32,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            match_points: 5,
            mismatch_points: -2,
        }
    }
}

impl ScoringPolicy {
    /// Create a policy with custom deltas.
    #[must_use]
    pub const fn new(match_points: i32, mismatch_points: i32) -> Self {
        Self {
            match_points,
            mismatch_points,
        }
    }

    /// Score change for a move.
    #[must_use]
    pub const fn delta(&self, matched: bool) -> i32 {
        if matched {
            self.match_points
        } else {
            self.mismatch_points
        }
    }
}
