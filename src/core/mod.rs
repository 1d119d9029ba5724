//! Core engine types: players, RNG, configuration, actions, state, errors.
//!
//! These are the records the character rules consume. The base game owns
//! them; character hooks read and mutate them in place.

pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod state;
pub mod error;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, RandomSource};
pub use config::{CustomCharacterAssignment, GameOptions, Variant};
pub use action::{Action, ActionKind, Clue, ClueKind, GameAction};
pub use state::{EndCondition, GameState, Player};
pub use error::{CharacterError, RuleViolation};
