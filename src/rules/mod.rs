//! Game rules: scoring deltas and win/loss evaluation.
//!
//! Both are pure and carry only their tunables, so they live inside
//! `GameConfig` and are copied into every session.

pub mod scoring;
pub mod termination;

pub use scoring::ScoringPolicy;
pub use termination::{GameStatus, TerminationEvaluator, Tally};
