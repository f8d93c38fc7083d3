//! Persisting finished sessions.
//!
//! The recorder mirrors the three persisted values in memory, reading them
//! once when loaded and writing them back when a session ends. Reads that
//! fail or do not parse fall back to defaults; writes are best-effort and
//! only logged on failure.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use super::outcome::OutcomeRecord;
use crate::core::config::HistoryLimits;
use crate::core::error::StoreError;
use crate::rules::GameStatus;
use crate::session::GameSession;
use crate::store::{KeyValueStore, HIGH_SCORE_KEY, RECENT_RESULTS_KEY, RECENT_SCORES_KEY};

/// Writes terminal outcomes to a store and keeps in-memory mirrors.
#[derive(Debug)]
pub struct HistoryRecorder<S> {
    store: S,
    limits: HistoryLimits,
    high_score: i32,
    recent_scores: Vec<i32>,
    recent_results: Vec<OutcomeRecord>,
}

impl<S: KeyValueStore> HistoryRecorder<S> {
    /// Load persisted history from `store`.
    pub fn load(store: S, limits: HistoryLimits) -> Self {
        let high_score: i32 = read_or_default(&store, HIGH_SCORE_KEY);
        let mut recent_scores: Vec<i32> = read_or_default(&store, RECENT_SCORES_KEY);
        let mut recent_results: Vec<OutcomeRecord> = read_or_default(&store, RECENT_RESULTS_KEY);
        recent_scores.truncate(limits.recent_scores);
        recent_results.truncate(limits.recent_results);

        Self {
            store,
            limits,
            high_score,
            recent_scores,
            recent_results,
        }
    }

    /// Record a finished session.
    ///
    /// Returns the record written, or `None` if the session is still running
    /// or was already recorded.
    pub fn record(&mut self, session: &mut GameSession) -> Option<OutcomeRecord> {
        if !session.claim_recording() {
            return None;
        }

        let record = OutcomeRecord::new(session.status() == GameStatus::Won, session.score());
        self.push(record);
        info!(
            won = record.won,
            score = record.score,
            high_score = self.high_score,
            generation = %session.generation(),
            "outcome recorded"
        );
        Some(record)
    }

    /// Best score ever recorded.
    #[must_use]
    pub fn high_score(&self) -> i32 {
        self.high_score
    }

    /// Best score to show on the scoreboard: the stored high score or any
    /// recent score above it.
    #[must_use]
    pub fn display_high_score(&self) -> i32 {
        self.recent_scores
            .iter()
            .copied()
            .fold(self.high_score, i32::max)
    }

    /// Final scores, most recent first.
    #[must_use]
    pub fn recent_scores(&self) -> &[i32] {
        &self.recent_scores
    }

    /// Outcomes, most recent first.
    #[must_use]
    pub fn recent_results(&self) -> &[OutcomeRecord] {
        &self.recent_results
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give back the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn push(&mut self, record: OutcomeRecord) {
        self.recent_scores.insert(0, record.score);
        self.recent_scores.truncate(self.limits.recent_scores);
        write_best_effort(&mut self.store, RECENT_SCORES_KEY, &self.recent_scores);

        self.recent_results.insert(0, record);
        self.recent_results.truncate(self.limits.recent_results);
        write_best_effort(&mut self.store, RECENT_RESULTS_KEY, &self.recent_results);

        if record.score > self.high_score {
            self.high_score = record.score;
            write_best_effort(&mut self.store, HIGH_SCORE_KEY, &self.high_score);
        }
    }
}

fn read_or_default<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore,
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
            warn!(key, %err, "stored value is corrupt, using default");
            T::default()
        }),
        Ok(None) => T::default(),
        Err(err) => {
            warn!(key, %err, "store read failed, using default");
            T::default()
        }
    }
}

fn write_best_effort<S, T>(store: &mut S, key: &str, value: &T)
where
    S: KeyValueStore,
    T: Serialize + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(StoreError::from)
        .and_then(|json| store.set(key, json));
    if let Err(err) = result {
        warn!(key, %err, "store write failed");
    }
}
