//! Core engine types: configuration, RNG, errors.
//!
//! This module contains the building blocks every other module leans on.
//! Games tune behaviour via `GameConfig` rather than modifying the rules.

pub mod config;
pub mod error;
pub mod rng;

pub use config::{
    GameConfig, HistoryLimits, DEFAULT_MATCH_DELAY_MS, DEFAULT_MISMATCH_DELAY_MS, DEFAULT_SYMBOLS,
};
pub use error::{EngineError, EngineResult, StoreError};
pub use rng::GameRng;
