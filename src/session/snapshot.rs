//! Read-only session view for rendering.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::rules::GameStatus;
use crate::timers::Generation;

/// Everything the presentation layer needs to draw a session.
///
/// Owned and serializable so it can cross a thread or process boundary.
/// Cloning is cheap: the card list is a persistent vector shared with the
/// live session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Cards in table order.
    pub cards: Vector<Card>,

    /// Revealed but unresolved cards, in reveal order.
    pub pending: Vec<CardId>,

    pub matched_pairs: u32,
    pub total_pairs: u32,
    pub moves: u32,
    pub wrong_moves: u32,
    pub score: i32,
    pub status: GameStatus,

    /// Generation of the session this view was taken from.
    pub generation: Generation,

    /// Moves allowed before the move cap trips.
    pub move_limit: u32,
}

impl SessionSnapshot {
    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    /// Moves left before the cap. Negative once exceeded.
    #[must_use]
    pub fn remaining_moves(&self) -> i64 {
        i64::from(self.move_limit) - i64::from(self.moves)
    }

    /// Moves that found a pair.
    #[must_use]
    pub fn lucky_moves(&self) -> u32 {
        self.moves.saturating_sub(self.wrong_moves)
    }

    /// Is the session over?
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}
