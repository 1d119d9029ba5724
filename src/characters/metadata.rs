//! Per-player character state.
//!
//! Each seat carries a `PlayerCharacterState`: which character it plays
//! and a `CharacterMetadata` value. The variant that is live for a seat is
//! determined by the character's `MetadataKind`; `Inactive` means no
//! ability window is open.
//!
//! Game records store metadata as a single integer (`-1` = inactive).
//! `from_raw` and `to_raw` convert at that boundary.

use serde::{Deserialize, Serialize};

use super::registry::{CharacterId, MetadataKind};
use crate::core::{ActionKind, ClueKind, PlayerId};

/// Character-specific stored state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterMetadata {
    /// No ability window is open.
    #[default]
    Inactive,
    /// A toggle ability is currently in force.
    Active,
    /// Fixed colour index drawn at assignment.
    Color(u8),
    /// Fixed rank drawn at assignment.
    Rank(u8),
    /// The clue type this player gave last.
    LastClue(ClueKind),
    /// A second clue is owed to this seat.
    SecondClueTarget(PlayerId),
    /// The most recent action at the table.
    LastAction(ActionKind),
}

impl CharacterMetadata {
    /// Wire sentinel for `Inactive`.
    pub const SENTINEL: i32 = -1;

    #[must_use]
    pub fn is_active(self) -> bool {
        self != Self::Inactive
    }

    /// Decode a wire value for a character with the given metadata kind.
    ///
    /// Values that do not decode for the kind are treated as inactive.
    /// A toggle is active only for `0`, its encoded `Active` value.
    ///
    /// ```
    /// use detrimental_characters::characters::{CharacterMetadata, MetadataKind};
    /// use detrimental_characters::core::PlayerId;
    ///
    /// assert_eq!(CharacterMetadata::from_raw(MetadataKind::Flag, 0), CharacterMetadata::Active);
    /// assert_eq!(
    ///     CharacterMetadata::from_raw(MetadataKind::SecondClueTarget, 2),
    ///     CharacterMetadata::SecondClueTarget(PlayerId::new(2)),
    /// );
    /// assert_eq!(CharacterMetadata::from_raw(MetadataKind::FixedRank, -1), CharacterMetadata::Inactive);
    /// ```
    #[must_use]
    pub fn from_raw(kind: MetadataKind, raw: i32) -> Self {
        if raw == Self::SENTINEL {
            return Self::Inactive;
        }
        let small = u8::try_from(raw).ok();
        let decoded = match kind {
            MetadataKind::Unused => None,
            MetadataKind::Flag => (raw == 0).then_some(Self::Active),
            MetadataKind::FixedColor => small.map(Self::Color),
            MetadataKind::FixedRank => small.map(Self::Rank),
            MetadataKind::LastClue => ClueKind::from_raw(raw).map(Self::LastClue),
            MetadataKind::SecondClueTarget => small.map(|p| Self::SecondClueTarget(PlayerId::new(p))),
            MetadataKind::LastAction => ActionKind::from_raw(raw).map(Self::LastAction),
        };
        decoded.unwrap_or(Self::Inactive)
    }

    /// Encode to the wire integer.
    #[must_use]
    pub fn to_raw(self) -> i32 {
        match self {
            Self::Inactive => Self::SENTINEL,
            Self::Active => 0,
            Self::Color(c) => i32::from(c),
            Self::Rank(r) => i32::from(r),
            Self::LastClue(kind) => kind as i32,
            Self::SecondClueTarget(p) => i32::from(p.0),
            Self::LastAction(kind) => kind as i32,
        }
    }
}

/// One seat's character and its stored state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerCharacterState {
    pub player: PlayerId,
    pub character: CharacterId,
    pub metadata: CharacterMetadata,
}

impl PlayerCharacterState {
    #[must_use]
    pub fn new(player: PlayerId, character: CharacterId, metadata: CharacterMetadata) -> Self {
        Self {
            player,
            character,
            metadata,
        }
    }

    /// Build from a game-record pair, decoding metadata by the character's kind.
    #[must_use]
    pub fn from_raw(player: PlayerId, character: CharacterId, raw: i32) -> Self {
        let metadata = CharacterMetadata::from_raw(character.def().metadata, raw);
        Self::new(player, character, metadata)
    }

    /// Close the ability window.
    pub fn reset(&mut self) {
        self.metadata = CharacterMetadata::Inactive;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.metadata.is_active()
    }
}
