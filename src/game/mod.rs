//! The playable game.
//!
//! `MemoryGame` ties the pieces together for a host:
//! - deals sessions through `DeckFactory`
//! - routes reveals to the live `GameSession`
//! - drives the timer queue when the host lets time pass
//! - records finished sessions and keeps the scoreboard
//!
//! ```
//! use memory_match::game::MemoryGameBuilder;
//! use memory_match::store::MemoryStore;
//!
//! let mut game = MemoryGameBuilder::new().seed(7).build(MemoryStore::new()).unwrap();
//! let first = game.snapshot().cards[0].id;
//! game.reveal(first);
//! assert_eq!(game.snapshot().pending, vec![first]);
//! ```

mod memory;

pub use memory::{GameOver, MemoryGame, MemoryGameBuilder};
