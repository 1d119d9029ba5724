//! Error types.
//!
//! There are exactly two failure classes:
//! - `CharacterError`: bad configuration at game setup. The game must not
//!   start with characters enabled.
//! - `RuleViolation`: a character rule rejected a candidate action. Not
//!   fatal; the message is shown to the acting player, nothing was
//!   mutated, and they may try another action.

use thiserror::Error;

use crate::characters::CharacterId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharacterError {
    #[error("there are {assignments} predefined characters, but there are {players} players in the game")]
    AssignmentCountMismatch { assignments: usize, players: usize },
    #[error("unknown character: {0}")]
    UnknownCharacter(String),
    #[error("only {available} characters can be drawn for {players} players")]
    NotEnoughCharacters { players: usize, available: usize },
}

/// A rejected action, with a reason suitable for direct display.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct RuleViolation {
    /// The character whose rule was violated (the actor's or the target's).
    pub character: CharacterId,
    pub reason: String,
}

impl RuleViolation {
    pub fn new(character: CharacterId, reason: impl Into<String>) -> Self {
        Self {
            character,
            reason: reason.into(),
        }
    }
}
