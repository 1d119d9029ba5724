//! Detrimental characters: per-player handicaps layered on the base game.
//!
//! ## Pipeline
//!
//! 1. `assign_characters` once at game start.
//! 2. Before applying an action: `check_action` (or the individual
//!    validators). Rejection carries a display message and changes nothing.
//! 3. After the base game applies it: `post_clue`, `post_remove_card` for
//!    each card that left a hand, `post_action`, then `needs_second_turn`.
//! 4. When advancing: `next_player`, `adjust_end_turn` on the last draw,
//!    `has_taken_last_turn`, `check_softlock`.
//! 5. When sending card information: `sees_card`, `hide_drawn_card`,
//!    `send_card_identity_of_slot2` after each draw.
//!
//! Every hook is a no-op when characters are disabled or unassigned.

pub mod registry;
pub mod metadata;
pub mod assignment;
pub mod validate;
pub mod mutate;
pub mod turn_flow;
pub mod visibility;
pub mod softlock;

pub use registry::{CharacterDef, CharacterId, CharacterRegistry, Hook, MetadataKind};
pub use metadata::{CharacterMetadata, PlayerCharacterState};
pub use assignment::{assign_characters, assign_characters_from_seed};
pub use validate::{
    check_action, check_discard, check_play, should_misplay, validate_action, validate_clue,
    validate_second_action,
};
pub use mutate::{needs_second_turn, post_action, post_clue, post_remove_card};
pub use turn_flow::{adjust_end_turn, has_taken_last_turn, next_player, CONTRARIAN_FINAL_TURNS};
pub use visibility::{hide_drawn_card, sees_card, send_card_identity_of_slot2, TableNotifier};
pub use softlock::check_softlock;
