//! Action representation: commands coming in, log entries going out.
//!
//! An `Action` is what a player asks to do: a kind plus a target and,
//! for clues, a value. For plays and discards the target is a card order;
//! for clues it is the seat being clued.
//!
//! `GameAction` is what the table records in its action log and sends to
//! participants.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// The kind of a player action.
///
/// The discriminants are the wire encoding used in game records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Play = 0,
    Discard = 1,
    ColorClue = 2,
    RankClue = 3,
}

impl ActionKind {
    /// Decode a wire value.
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Play),
            1 => Some(Self::Discard),
            2 => Some(Self::ColorClue),
            3 => Some(Self::RankClue),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_clue(self) -> bool {
        matches!(self, Self::ColorClue | Self::RankClue)
    }

    /// Whether two actions are the same "kind" for repetition rules.
    ///
    /// Colour and rank clues count as the same kind.
    #[must_use]
    pub fn same_kind_as(self, other: ActionKind) -> bool {
        self == other || (self.is_clue() && other.is_clue())
    }
}

/// The two clue types.
///
/// The discriminants are the wire encoding used in game records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClueKind {
    Color = 0,
    Rank = 1,
}

impl ClueKind {
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        match raw {
            0 => Some(Self::Color),
            1 => Some(Self::Rank),
            _ => None,
        }
    }
}

/// A candidate action submitted by a player.
///
/// ## Example
///
/// ```
/// use detrimental_characters::core::{Action, ActionKind, PlayerId};
///
/// let play = Action::play(12);
/// assert_eq!(play.kind, ActionKind::Play);
///
/// let clue = Action::rank_clue(PlayerId::new(1), 5);
/// assert_eq!(clue.clue().unwrap().target, PlayerId::new(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,

    /// Card order (play/discard) or seat index (clues).
    pub target: usize,

    /// Clue value: colour index or rank. Zero for plays and discards.
    #[serde(default)]
    pub value: u8,
}

impl Action {
    #[must_use]
    pub fn play(order: usize) -> Self {
        Self {
            kind: ActionKind::Play,
            target: order,
            value: 0,
        }
    }

    #[must_use]
    pub fn discard(order: usize) -> Self {
        Self {
            kind: ActionKind::Discard,
            target: order,
            value: 0,
        }
    }

    #[must_use]
    pub fn color_clue(target: PlayerId, color: u8) -> Self {
        Self {
            kind: ActionKind::ColorClue,
            target: target.index(),
            value: color,
        }
    }

    #[must_use]
    pub fn rank_clue(target: PlayerId, rank: u8) -> Self {
        Self {
            kind: ActionKind::RankClue,
            target: target.index(),
            value: rank,
        }
    }

    /// The clue this action gives. `None` for plays and discards, and for
    /// a clue whose target does not fit a seat number.
    #[must_use]
    pub fn clue(&self) -> Option<Clue> {
        let kind = match self.kind {
            ActionKind::ColorClue => ClueKind::Color,
            ActionKind::RankClue => ClueKind::Rank,
            ActionKind::Play | ActionKind::Discard => return None,
        };
        Some(Clue {
            kind,
            value: self.value,
            target: self.clue_target()?,
        })
    }

    /// The seat targeted by a clue action.
    #[must_use]
    pub fn clue_target(&self) -> Option<PlayerId> {
        if !self.kind.is_clue() {
            return None;
        }
        u8::try_from(self.target).ok().map(PlayerId::new)
    }
}

/// A clue derived from a clue action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clue {
    pub kind: ClueKind,
    /// Colour index or rank.
    pub value: u8,
    pub target: PlayerId,
}

/// Entries in the game's action log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameAction {
    Draw {
        player: PlayerId,
        order: usize,
    },
    Clue {
        giver: PlayerId,
        clue: Clue,
        touched: Vec<usize>,
    },
    Play {
        player: PlayerId,
        order: usize,
    },
    Discard {
        player: PlayerId,
        order: usize,
        /// True when the card was misplayed rather than discarded.
        failed: bool,
    },
    /// Reveals a card's identity to everyone.
    CardIdentity {
        player: PlayerId,
        order: usize,
        suit_index: usize,
        rank: u8,
    },
    Turn {
        turn: u32,
        current_player: PlayerId,
    },
}
