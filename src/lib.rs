//! # detrimental-characters
//!
//! Rule engine for "detrimental characters": per-player handicaps layered
//! on a cooperative card game of clues, plays and discards.
//!
//! ## Design Principles
//!
//! 1. **Hooks, not a fork**: The base game stays in charge of its own turn
//!    loop. Characters contribute validators, mutators and queries that the
//!    loop calls at fixed points.
//!
//! 2. **N-Player First**: Every API takes the seating as context.
//!    Direction, neighbours and end-of-game timing are computed from it.
//!
//! 3. **Disabled means absent**: With characters turned off every hook is a
//!    no-op and every validator allows everything.
//!
//! ## Modules
//!
//! - `core`: Players, RNG, options, actions, game state, errors
//! - `cards`: Card records and hands
//! - `characters`: The character table and every hook
//! - `table`: A reference turn loop driving the hooks end to end
//!
//! ## Example
//!
//! ```
//! use detrimental_characters::{Action, CustomCharacterAssignment, GameOptions, PlayerId, Table};
//!
//! let options = GameOptions::new(2)
//!     .with_detrimental_characters()
//!     .with_custom_assignments([
//!         CustomCharacterAssignment::new("Miser", -1),
//!         CustomCharacterAssignment::new("Greedy", -1),
//!     ]);
//! let mut table = Table::builder(options).build().unwrap();
//!
//! // Miser may only clue with 4 or more tokens available.
//! table.state_mut().clue_tokens = 3;
//! let target = PlayerId::new(1);
//! let rank = table.state().deck[table.state().hand(target).orders()[0]].rank;
//! assert!(table.process_action(PlayerId::new(0), Action::rank_clue(target, rank)).is_err());
//! ```

pub mod core;
pub mod cards;
pub mod characters;
pub mod table;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use crate::core::{
    PlayerId, PlayerMap,
    GameRng, RandomSource,
    GameOptions, Variant, CustomCharacterAssignment,
    Action, ActionKind, Clue, ClueKind, GameAction,
    EndCondition, GameState, Player,
    CharacterError, RuleViolation,
};

pub use crate::cards::{Card, Hand};

pub use crate::characters::{
    CharacterDef, CharacterId, CharacterRegistry, Hook, MetadataKind,
    CharacterMetadata, PlayerCharacterState,
    TableNotifier,
};

pub use crate::table::{ActionOutcome, Table, TableBuilder, TableError};
