//! A reference table that drives the character hooks end to end.
//!
//! The table implements just enough of the base game to exercise every
//! hook in its documented order:
//! - Clues spend a token and must touch at least one card
//! - Plays go to their stack, or strike on a misplay
//! - Discards regain a token
//! - Removed cards are replaced from the deck
//! - The final round starts when the deck runs out
//!
//! Supports 2-6 players.

mod pipeline;

pub use pipeline::{standard_deck, ActionOutcome, Table, TableBuilder, TableError};
