//! Deferred actions.
//!
//! The turn cycle has two delayed steps: confirming a match and turning a
//! mismatch face-down again. Both are queued here as explicit timers instead
//! of closures, each carrying the generation of the session that scheduled
//! it. All mutation stays on the caller's thread; the host drives the clock.
//!
//! ## Stale Timers
//!
//! Starting a new game bumps the generation and cancels the replaced
//! session's timers. A timer that still reaches a session with a different
//! generation is ignored by that session.

mod queue;

pub use queue::{Generation, Timer, TimerId, TimerQueue};
