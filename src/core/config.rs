//! Game configuration.
//!
//! Everything the turn cycle treats as a tunable lives here:
//! - the symbol set dealt into the deck
//! - scoring deltas and loss thresholds
//! - deferred-action delays
//! - how much outcome history is kept
//!
//! Configs are plain data (serde) and built with consuming `with_*` methods.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, EngineResult};
use crate::cards::Symbol;
use crate::rules::{ScoringPolicy, TerminationEvaluator};

/// The eight sticker symbols the game ships with.
pub const DEFAULT_SYMBOLS: [&str; 8] = ["🍜", "🍱", "🎌", "🎎", "🍙", "🌸", "⛩️", "🏮"];

/// Delay before a matched pair is confirmed, in milliseconds.
pub const DEFAULT_MATCH_DELAY_MS: u64 = 500;

/// Delay before a mismatched pair is turned face-down again, in milliseconds.
pub const DEFAULT_MISMATCH_DELAY_MS: u64 = 1000;

/// How many entries of each persisted history list are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryLimits {
    /// Maximum length of the recent-scores list.
    pub recent_scores: usize,

    /// Maximum length of the recent-results list.
    pub recent_results: usize,
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self {
            recent_scores: 5,
            recent_results: 10,
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Symbols dealt into the deck, two cards each.
    pub symbols: Vec<Symbol>,

    /// Score deltas for matches and mismatches.
    pub scoring: ScoringPolicy,

    /// Loss thresholds.
    pub termination: TerminationEvaluator,

    /// Delay before a match is confirmed (D1).
    pub match_delay_ms: u64,

    /// Delay before a mismatch is concealed (D2).
    pub mismatch_delay_ms: u64,

    /// Persisted history lengths.
    pub history: HistoryLimits,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|s| Symbol::new(*s)).collect(),
            scoring: ScoringPolicy::default(),
            termination: TerminationEvaluator::default(),
            match_delay_ms: DEFAULT_MATCH_DELAY_MS,
            mismatch_delay_ms: DEFAULT_MISMATCH_DELAY_MS,
            history: HistoryLimits::default(),
        }
    }
}

impl GameConfig {
    /// Replace the symbol set.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Set the scoring policy.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringPolicy) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the loss thresholds.
    #[must_use]
    pub fn with_termination(mut self, termination: TerminationEvaluator) -> Self {
        self.termination = termination;
        self
    }

    /// Set both deferred-action delays.
    #[must_use]
    pub fn with_delays(mut self, match_delay_ms: u64, mismatch_delay_ms: u64) -> Self {
        self.match_delay_ms = match_delay_ms;
        self.mismatch_delay_ms = mismatch_delay_ms;
        self
    }

    /// Set the persisted history lengths.
    #[must_use]
    pub fn with_history(mut self, history: HistoryLimits) -> Self {
        self.history = history;
        self
    }

    /// Number of pairs a session dealt from this config contains.
    #[must_use]
    pub fn total_pairs(&self) -> usize {
        self.symbols.len()
    }

    /// Check the config can deal and record a game.
    pub fn validate(&self) -> EngineResult<()> {
        Symbol::check_unique(&self.symbols)?;
        if self.history.recent_scores == 0 || self.history.recent_results == 0 {
            return Err(EngineError::InvalidConfiguration(
                "history limits must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
