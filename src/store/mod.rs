//! Persistent key-value storage for scores and results.
//!
//! The engine only ever talks to `KeyValueStore`; which backend holds the
//! data is the host's choice. Values are JSON-encoded strings, so a browser
//! `localStorage`, a file, or a map all fit behind the same trait.
//!
//! ## Backends
//!
//! - [`MemoryStore`]: in-process map, for tests and ephemeral hosts
//! - [`JsonFileStore`]: a single JSON object on disk, rewritten atomically

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use crate::core::error::StoreError;

/// Key holding the best score ever recorded.
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Key holding the most-recent-first list of final scores.
pub const RECENT_SCORES_KEY: &str = "recentScores";

/// Key holding the most-recent-first list of outcome records.
pub const RECENT_RESULTS_KEY: &str = "recentResults";

/// Abstract get/set store.
///
/// Implementations must make each `set` atomic per key. There is a single
/// writer, so no further locking is expected.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
