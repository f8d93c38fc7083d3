//! Cards on the table.
//!
//! A `Card` is one face of a pair: it carries the symbol it shows and the
//! two flags the turn cycle flips (`revealed`, `matched`). Cards are created
//! once per session and never removed.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineError, EngineResult};

/// Unique identifier for a card within one session.
///
/// Ids are assigned `0..2N` in creation order, before shuffling, so an id
/// says nothing about a card's position on the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The token printed on a card. Two cards match when their symbols are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Create a new symbol.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The symbol's token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reject empty or repeated symbol sets.
    pub(crate) fn check_unique(symbols: &[Symbol]) -> EngineResult<()> {
        if symbols.is_empty() {
            return Err(EngineError::InvalidConfiguration("symbol set is empty".into()));
        }
        let mut seen = HashSet::with_capacity(symbols.len());
        for symbol in symbols {
            if !seen.insert(symbol) {
                return Err(EngineError::InvalidConfiguration(format!(
                    "symbol {symbol} appears more than once"
                )));
            }
        }
        Ok(())
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for Symbol {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A card in a dealt session.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique id within the session.
    pub id: CardId,

    /// Symbol shown when face-up.
    pub symbol: Symbol,

    /// Face-up, either pending resolution or matched.
    pub revealed: bool,

    /// Part of a confirmed pair. Always implies `revealed`.
    pub matched: bool,
}

impl Card {
    /// Create a face-down card.
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            revealed: false,
            matched: false,
        }
    }

    /// Can this card still be turned over?
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        !self.revealed && !self.matched
    }
}
