//! Outcome history: streaks, messages, and persistence.
//!
//! - `outcome`: `OutcomeRecord`, streak arithmetic, message tiers
//! - `recorder`: `HistoryRecorder`, which writes finished sessions to a store

pub mod outcome;
pub mod recorder;

pub use outcome::{MessageTier, OutcomeHistory, OutcomeRecord};
pub use recorder::HistoryRecorder;
