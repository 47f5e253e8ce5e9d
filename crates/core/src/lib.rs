//! Card-drawn initiative and round lifecycle logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod deck;
pub mod events;
pub mod history;
pub mod host;
pub mod order;
pub mod rng;
pub mod select;

pub use cards::*;
pub use combat::*;
pub use combatant::*;
pub use config::*;
pub use deck::*;
pub use events::*;
pub use history::*;
pub use host::*;
pub use order::*;
pub use rng::*;
pub use select::*;
