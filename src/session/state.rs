//! The reveal → evaluate → resolve state machine.
//!
//! ## Turn Cycle
//!
//! 1. `reveal` turns a hidden card face-up and adds it to `pending`.
//! 2. The second reveal counts a move and compares symbols:
//!    - match: score now, confirm the pair after the match delay
//!    - mismatch: score now, evaluate for a loss now, conceal the pair
//!      after the mismatch delay
//! 3. `resolve` applies a deferred step when its timer fires.
//!
//! While two cards are pending no further reveal is accepted, so a deferred
//! step never races a reveal.
//!
//! ## Terminal Status
//!
//! `Won` and `Lost` freeze every counter. The one exception is the mismatch
//! conceal: it still turns the losing pair face-down so the table looks
//! settled.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info};

use super::snapshot::SessionSnapshot;
use crate::cards::{Card, CardId};
use crate::core::config::GameConfig;
use crate::rules::{GameStatus, ScoringPolicy, Tally, TerminationEvaluator};
use crate::timers::{Generation, Timer, TimerQueue};

/// A step scheduled to run after a delay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Mark the pair matched and check for a win.
    ConfirmMatch { first: CardId, second: CardId },
    /// Turn the pair face-down again.
    ConcealMismatch { first: CardId, second: CardId },
}

/// Why a reveal was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IgnoreReason {
    /// The session already ended.
    SessionOver,
    /// No card has this id.
    UnknownCard,
    /// The card is already face-up or matched.
    AlreadyRevealed,
    /// Two cards are waiting to be resolved.
    PairPending,
}

/// What a call to `reveal` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Nothing changed.
    Ignored(IgnoreReason),
    /// First card of a pair turned over.
    Revealed,
    /// Second card matched; confirmation is scheduled.
    Matched,
    /// Second card did not match; concealment is scheduled.
    /// `status` is the status right after scoring, which may be `Lost`.
    Mismatched { status: GameStatus },
}

impl RevealOutcome {
    /// Did the reveal change anything?
    #[must_use]
    pub fn is_ignored(&self) -> bool {
        matches!(self, RevealOutcome::Ignored(_))
    }
}

/// One dealt game.
///
/// Uses an `im` vector for the cards so snapshots clone in O(1).
#[derive(Clone, Debug)]
pub struct GameSession {
    cards: Vector<Card>,
    pending: SmallVec<[CardId; 2]>,
    matched_pairs: u32,
    moves: u32,
    wrong_moves: u32,
    score: i32,
    status: GameStatus,
    generation: Generation,
    recorded: bool,

    scoring: ScoringPolicy,
    termination: TerminationEvaluator,
    match_delay_ms: u64,
    mismatch_delay_ms: u64,
}

impl GameSession {
    /// Start a session over a dealt deck, taking rules and delays from `config`.
    pub fn new(cards: Vec<Card>, generation: Generation, config: &GameConfig) -> Self {
        Self {
            cards: cards.into_iter().collect(),
            pending: SmallVec::new(),
            matched_pairs: 0,
            moves: 0,
            wrong_moves: 0,
            score: 0,
            status: GameStatus::InProgress,
            generation,
            recorded: false,
            scoring: config.scoring,
            termination: config.termination,
            match_delay_ms: config.match_delay_ms,
            mismatch_delay_ms: config.mismatch_delay_ms,
        }
    }

    // === Read Access ===

    /// All cards in table order.
    #[must_use]
    pub fn cards(&self) -> &Vector<Card> {
        &self.cards
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Cards revealed and not yet resolved, in reveal order.
    #[must_use]
    pub fn pending(&self) -> &[CardId] {
        &self.pending
    }

    #[must_use]
    pub fn matched_pairs(&self) -> u32 {
        self.matched_pairs
    }

    /// Number of pairs on the table.
    #[must_use]
    pub fn total_pairs(&self) -> u32 {
        u32::try_from(self.cards.len() / 2).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn wrong_moves(&self) -> u32 {
        self.wrong_moves
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Has this session's outcome been written to history?
    #[must_use]
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    /// Counters as seen by the termination evaluator.
    #[must_use]
    pub fn tally(&self) -> Tally {
        Tally {
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs(),
            score: self.score,
            moves: self.moves,
        }
    }

    /// Owned read-only view for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cards: self.cards.clone(),
            pending: self.pending.to_vec(),
            matched_pairs: self.matched_pairs,
            total_pairs: self.total_pairs(),
            moves: self.moves,
            wrong_moves: self.wrong_moves,
            score: self.score,
            status: self.status,
            generation: self.generation,
            move_limit: self.termination.loss_move_threshold,
        }
    }

    // === Turn Cycle ===

    /// Turn a card face-up. Disallowed reveals change nothing.
    pub fn reveal(&mut self, id: CardId, timers: &mut TimerQueue<DeferredAction>) -> RevealOutcome {
        if let Err(reason) = self.check_reveal(id) {
            debug!(card = %id, ?reason, generation = %self.generation, "reveal ignored");
            return RevealOutcome::Ignored(reason);
        }

        if let Some(card) = self.card_mut(id) {
            card.revealed = true;
        }
        self.pending.push(id);

        let (first, second) = match self.pending[..] {
            [first, second] => (first, second),
            _ => return RevealOutcome::Revealed,
        };

        self.moves += 1;
        let matched = match (self.card(first), self.card(second)) {
            (Some(a), Some(b)) => a.symbol == b.symbol,
            _ => false,
        };

        self.score += self.scoring.delta(matched);

        if matched {
            debug!(%first, %second, score = self.score, moves = self.moves, "pair matched");
            timers.schedule(
                self.match_delay_ms,
                self.generation,
                DeferredAction::ConfirmMatch { first, second },
            );
            return RevealOutcome::Matched;
        }

        self.wrong_moves += 1;
        debug!(%first, %second, score = self.score, moves = self.moves, "pair mismatched");
        self.settle_status();
        timers.schedule(
            self.mismatch_delay_ms,
            self.generation,
            DeferredAction::ConcealMismatch { first, second },
        );
        RevealOutcome::Mismatched { status: self.status }
    }

    /// Apply a fired timer. Returns false if it was stale or had nothing to do.
    pub fn resolve(&mut self, timer: &Timer<DeferredAction>) -> bool {
        if timer.generation != self.generation {
            debug!(timer = ?timer.id, stale = %timer.generation, current = %self.generation, "stale timer dropped");
            return false;
        }

        match timer.action {
            DeferredAction::ConfirmMatch { first, second } => {
                if self.status.is_terminal() {
                    return false;
                }
                for id in [first, second] {
                    if let Some(card) = self.card_mut(id) {
                        card.revealed = true;
                        card.matched = true;
                    }
                }
                self.matched_pairs += 1;
                self.pending.clear();
                self.settle_status();
                true
            }
            DeferredAction::ConcealMismatch { first, second } => {
                for id in [first, second] {
                    if let Some(card) = self.card_mut(id) {
                        if !card.matched {
                            card.revealed = false;
                        }
                    }
                }
                self.pending.clear();
                true
            }
        }
    }

    /// Claim the right to record this session's outcome. True exactly once,
    /// and only after the session has ended.
    pub(crate) fn claim_recording(&mut self) -> bool {
        if !self.status.is_terminal() || self.recorded {
            return false;
        }
        self.recorded = true;
        true
    }

    // === Internals ===

    fn check_reveal(&self, id: CardId) -> Result<(), IgnoreReason> {
        if self.status.is_terminal() {
            return Err(IgnoreReason::SessionOver);
        }
        let card = self.card(id).ok_or(IgnoreReason::UnknownCard)?;
        if card.revealed || card.matched {
            return Err(IgnoreReason::AlreadyRevealed);
        }
        if self.pending.len() >= 2 {
            return Err(IgnoreReason::PairPending);
        }
        Ok(())
    }

    fn card_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    fn settle_status(&mut self) {
        let previous = self.status;
        self.status = self.termination.evaluate(previous, &self.tally());
        if self.status != previous {
            info!(
                status = %self.status,
                score = self.score,
                moves = self.moves,
                wrong_moves = self.wrong_moves,
                generation = %self.generation,
                "session ended"
            );
        }
    }
}
