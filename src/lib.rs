//! # memory-match
//!
//! Game-state engine for a pair-matching memory card game.
//!
//! ## Design Principles
//!
//! 1. **Host-Driven Time**: Deferred steps (confirming a match, concealing a
//!    mismatch) sit in a timer queue. Nothing fires until the host advances
//!    the clock, so a whole game replays deterministically.
//!
//! 2. **Generation Tokens**: Every session carries a generation. Timers
//!    scheduled by a replaced session can never touch its successor.
//!
//! 3. **Configuration Over Convention**: Symbols, scoring, loss thresholds,
//!    delays, and history sizes all live in `GameConfig`.
//!
//! ## Architecture
//!
//! - **Single Writer**: All mutation goes through `&mut` on the caller's
//!   thread. Presentation reads an owned `SessionSnapshot`.
//!
//! - **Persistent Data Structures**: O(1) snapshot clones via `im-rs`.
//!
//! - **Pluggable Storage**: History goes through `KeyValueStore`, with
//!   in-memory and JSON file backends.
//!
//! ## Modules
//!
//! - `core`: configuration, RNG, errors
//! - `cards`: card types and deck dealing
//! - `rules`: scoring and win/loss evaluation
//! - `timers`: virtual-clock queue of deferred actions
//! - `session`: the reveal state machine and its snapshot
//! - `history`: outcome records, streak messages, persistence
//! - `store`: key-value storage backends
//! - `game`: `MemoryGame`, the facade a host drives

pub mod core;
pub mod cards;
pub mod rules;
pub mod timers;
pub mod session;
pub mod history;
pub mod store;
pub mod game;

// Re-export commonly used types
pub use crate::core::{EngineError, EngineResult, GameConfig, GameRng, HistoryLimits, StoreError};

pub use crate::cards::{Card, CardId, DeckFactory, Symbol};

pub use crate::rules::{GameStatus, ScoringPolicy, TerminationEvaluator};

pub use crate::timers::{Generation, TimerQueue};

pub use crate::session::{DeferredAction, GameSession, IgnoreReason, RevealOutcome, SessionSnapshot};

pub use crate::history::{HistoryRecorder, MessageTier, OutcomeHistory, OutcomeRecord};

pub use crate::store::{JsonFileStore, KeyValueStore, MemoryStore};

pub use crate::game::{GameOver, MemoryGame, MemoryGameBuilder};
