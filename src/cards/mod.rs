//! Card system: cards, symbols, and deck construction.
//!
//! ## Key Types
//!
//! - `CardId`: Per-session card identifier
//! - `Symbol`: The token two matching cards share
//! - `Card`: Runtime card state (revealed, matched)
//! - `DeckFactory`: Deals a shuffled deck of pairs

pub mod card;
pub mod deck;

pub use card::{Card, CardId, Symbol};
pub use deck::DeckFactory;
