//! Outcome records, streaks, and the end-of-game message.
//!
//! History lists are ordered most-recent-first. A streak counts the leading
//! run of records sharing the finishing game's result, plus one for the
//! finishing game itself (which is not in the list yet when this runs).

use serde::{Deserialize, Serialize};

/// The result of one completed session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Did the session end in a win?
    pub won: bool,

    /// Final score.
    pub score: i32,
}

impl OutcomeRecord {
    /// Create a new record.
    #[must_use]
    pub const fn new(won: bool, score: i32) -> Self {
        Self { won, score }
    }
}

/// Which message the finished game earns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageTier {
    /// Won, and the previous game was a win too.
    RepeatWin,
    /// Won after a loss (or with no history).
    FirstWin,
    /// Third loss in a row or worse.
    SevereLoss,
    /// Second loss in a row.
    ModerateLoss,
    /// A single loss.
    PlainLoss,
}

impl MessageTier {
    /// Default text for the tier.
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            MessageTier::RepeatWin => "Good, now do something productive",
            MessageTier::FirstWin => "Good job!",
            MessageTier::SevereLoss => "Even monkeys play better than you",
            MessageTier::ModerateLoss => "Get back to school",
            MessageTier::PlainLoss => "WASTED",
        }
    }
}

/// Streak arithmetic and message selection over a most-recent-first history.
pub struct OutcomeHistory;

impl OutcomeHistory {
    /// Length of the streak the finishing game extends.
    ///
    /// ```
    /// use memory_match::history::{OutcomeHistory, OutcomeRecord};
    ///
    /// let history = [OutcomeRecord::new(false, -16), OutcomeRecord::new(true, 30)];
    /// assert_eq!(OutcomeHistory::streak_length(&history, false), 2);
    /// assert_eq!(OutcomeHistory::streak_length(&history, true), 1);
    /// ```
    #[must_use]
    pub fn streak_length(history: &[OutcomeRecord], won: bool) -> u32 {
        let prior = history.iter().take_while(|r| r.won == won).count();
        u32::try_from(prior).unwrap_or(u32::MAX).saturating_add(1)
    }

    /// Pick the message tier for a finishing game.
    #[must_use]
    pub fn tier(won: bool, history: &[OutcomeRecord]) -> MessageTier {
        let streak = Self::streak_length(history, won);
        match (won, streak) {
            (true, s) if s > 1 => MessageTier::RepeatWin,
            (true, _) => MessageTier::FirstWin,
            (false, s) if s >= 3 => MessageTier::SevereLoss,
            (false, 2) => MessageTier::ModerateLoss,
            (false, _) => MessageTier::PlainLoss,
        }
    }

    /// Message text for a finishing game.
    #[must_use]
    pub fn message(won: bool, history: &[OutcomeRecord]) -> &'static str {
        Self::tier(won, history).text()
    }
}
