//! Deck construction.
//!
//! Two cards per symbol, ids assigned in creation order, then a uniform
//! shuffle from the caller's RNG. The same seed always deals the same table.

use tracing::debug;

use super::card::{Card, CardId, Symbol};
use crate::core::error::EngineResult;
use crate::core::rng::GameRng;

/// Builds shuffled decks.
pub struct DeckFactory;

impl DeckFactory {
    /// Deal `2 × symbols.len()` face-down cards in random order.
    ///
    /// Fails with `InvalidConfiguration` when `symbols` is empty or repeats
    /// a symbol.
    ///
    /// ```
    /// use memory_match::cards::{DeckFactory, Symbol};
    /// use memory_match::core::GameRng;
    ///
    /// let symbols = [Symbol::new("a"), Symbol::new("b")];
    /// let deck = DeckFactory::build(&symbols, &mut GameRng::new(1)).unwrap();
    /// assert_eq!(deck.len(), 4);
    /// ```
    pub fn build(symbols: &[Symbol], rng: &mut GameRng) -> EngineResult<Vec<Card>> {
        Symbol::check_unique(symbols)?;
        Ok(Self::deal(symbols, rng))
    }

    /// Deal from a symbol set already known to be non-empty and unique.
    pub(crate) fn deal(symbols: &[Symbol], rng: &mut GameRng) -> Vec<Card> {
        let mut cards = Vec::with_capacity(symbols.len() * 2);
        let mut next_id = 0u32;
        for symbol in symbols {
            for _ in 0..2 {
                cards.push(Card::new(CardId::new(next_id), symbol.clone()));
                next_id += 1;
            }
        }

        rng.shuffle(&mut cards);

        debug!(cards = cards.len(), seed = rng.seed(), "dealt deck");
        cards
    }
}
