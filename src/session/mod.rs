//! Game sessions: one dealt table and its turn cycle.
//!
//! A session is created fresh for every game and thrown away on reset.
//! Deferred steps reach it through the timer queue and are checked against
//! the session's generation before they touch anything.

mod snapshot;
mod state;

pub use snapshot::SessionSnapshot;
pub use state::{DeferredAction, GameSession, IgnoreReason, RevealOutcome};
