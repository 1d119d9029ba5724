//! Card system: card records and hands.
//!
//! ## Key Types
//!
//! - `Card`: one physical card, addressed by its deck `order`
//! - `Hand`: the ordered card orders a player holds
//!
//! Hands store orders, not cards. The card records live in the game's
//! deck so that per-card flags survive a card moving between zones.

pub mod card;
pub mod hand;

pub use card::Card;
pub use hand::{Hand, TouchedCards};
