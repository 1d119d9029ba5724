//! Character registry: the static table of character definitions.
//!
//! Every character is a `CharacterId` variant mapped to a `CharacterDef`
//! capability record: display name, rule text, which hook points it takes
//! part in, where it is ineligible, and what its metadata means. Rule
//! dispatch matches on the id; nothing compares names after lookup.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Character identifier.
///
/// Discriminants are the stable numeric ids used in game records. Gaps
/// belong to characters this engine does not implement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CharacterId {
    Fuming = 0,
    Dumbfounded = 1,
    Inept = 2,
    Awkward = 3,
    Conservative = 4,
    Greedy = 5,
    Picky = 6,
    Spiteful = 7,
    Insolent = 8,
    Vindictive = 9,
    Miser = 10,
    Compulsive = 11,
    MoodSwings = 12,
    Insistent = 13,
    Vulnerable = 14,
    ColorBlind = 15,
    Impulsive = 17,
    Indolent = 18,
    Hesitant = 19,
    Anxious = 21,
    Traumatized = 22,
    Wasteful = 23,
    Genius = 24,
    Panicky = 26,
    Contrarian = 27,
    Stubborn = 28,
    BlindSpot = 29,
    Oblivious = 30,
    Follower = 31,
    SlowWitted = 33,
}

impl CharacterId {
    /// Stable numeric id.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        CharacterRegistry::standard().get(self).name
    }

    /// Full definition.
    #[must_use]
    pub fn def(self) -> &'static CharacterDef {
        CharacterRegistry::standard().get(self)
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Extension points in the action pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Checked before any action.
    PrimaryAction,
    /// Checked when a forced follow-up action is owed.
    SecondaryAction,
    /// Checked when this character gives a clue.
    GiveClue,
    /// Checked when this character receives a clue.
    ReceiveClue,
    Play,
    Misplay,
    Discard,
    PostClue,
    PostRemoveCard,
    PostAction,
    SecondTurn,
    TurnFlow,
    Visibility,
    RevealSlot2,
    Softlock,
}

/// What a character's metadata holds while its ability is live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataKind {
    /// Always inactive.
    Unused,
    /// Inactive / active toggle.
    Flag,
    /// A colour index fixed at assignment.
    FixedColor,
    /// A rank fixed at assignment.
    FixedRank,
    /// The clue type this player gave last.
    LastClue,
    /// The seat a pending second clue must go to.
    SecondClueTarget,
    /// The kind of the most recent action at the table.
    LastAction,
}

/// Static capability record for one character.
#[derive(Clone, Debug)]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: &'static str,
    pub description: &'static str,
    /// Player counts at which the character may not be drawn.
    pub excluded_player_counts: &'static [usize],
    pub hooks: &'static [Hook],
    pub metadata: MetadataKind,
}

impl CharacterDef {
    #[must_use]
    pub fn participates(&self, hook: Hook) -> bool {
        self.hooks.contains(&hook)
    }

    #[must_use]
    pub fn eligible_at(&self, player_count: usize) -> bool {
        !self.excluded_player_counts.contains(&player_count)
    }
}

const NOT_2P: &[usize] = &[2];

macro_rules! character {
    ($id:ident, $name:literal, $desc:literal, $excluded:expr, $meta:ident, [$($hook:ident),*]) => {
        CharacterDef {
            id: CharacterId::$id,
            name: $name,
            description: $desc,
            excluded_player_counts: $excluded,
            hooks: &[$(Hook::$hook),*],
            metadata: MetadataKind::$meta,
        }
    };
}

/// All characters, in id order.
static DEFINITIONS: [CharacterDef; 30] = [
    character!(Fuming, "Fuming", "Cannot give color clues of one particular color.", &[], FixedColor, [GiveClue]),
    character!(Dumbfounded, "Dumbfounded", "Cannot give rank clues of one particular rank.", &[], FixedRank, [GiveClue]),
    character!(Inept, "Inept", "Cannot give any clues that touch cards of one particular suit.", &[], FixedColor, [GiveClue]),
    character!(Awkward, "Awkward", "Cannot give any clues that touch cards of one particular rank.", &[], FixedRank, [GiveClue]),
    character!(Conservative, "Conservative", "Can only give clues that touch a single card.", &[], Unused, [GiveClue]),
    character!(Greedy, "Greedy", "Can only give clues that touch 2 or more cards.", &[], Unused, [GiveClue]),
    character!(Picky, "Picky", "Can only clue odd ranks or odd colors.", &[], Unused, [GiveClue]),
    character!(Spiteful, "Spiteful", "Cannot clue the player to their left.", NOT_2P, Unused, [GiveClue]),
    character!(Insolent, "Insolent", "Cannot clue the player to their right.", NOT_2P, Unused, [GiveClue]),
    character!(Vindictive, "Vindictive", "Must clue if they received a clue since their last turn.", &[], Flag, [PrimaryAction, PostClue, PostAction, Softlock]),
    character!(Miser, "Miser", "Can only clue if there are 4 or more clues available.", &[], Unused, [GiveClue]),
    character!(Compulsive, "Compulsive", "Can only clue if it touches the newest or oldest card in a hand.", &[], Unused, [GiveClue]),
    character!(MoodSwings, "Mood Swings", "Clues given must alternate between color and rank.", &[], LastClue, [GiveClue, PostClue]),
    character!(Insistent, "Insistent", "Must continue to clue cards until one of them is played or discarded.", &[], Flag, [PrimaryAction, GiveClue, PostClue, PostRemoveCard, Softlock]),
    character!(Vulnerable, "Vulnerable", "Cannot receive a rank 2 or rank 5 clue.", &[], Unused, [ReceiveClue]),
    character!(ColorBlind, "Color-Blind", "Cannot receive a color clue.", &[], Unused, [ReceiveClue]),
    character!(Impulsive, "Impulsive", "Must play slot 1 if it has been clued.", &[], Flag, [PrimaryAction, PostClue, PostAction]),
    character!(Indolent, "Indolent", "Cannot play a card if they played on the last round.", &[], Flag, [PrimaryAction, PostAction]),
    character!(Hesitant, "Hesitant", "Cannot play cards from slot 1.", &[], Unused, [Play]),
    character!(Anxious, "Anxious", "Cannot discard if there is an even number of clues available (including 0).", &[], Unused, [Discard]),
    character!(Traumatized, "Traumatized", "Cannot discard if there is an odd number of clues available.", &[], Unused, [Discard]),
    character!(Wasteful, "Wasteful", "Cannot discard if there are 2 or more clues available.", &[], Unused, [Discard]),
    character!(Genius, "Genius", "Must clue both a color and a rank to the same player (uses two clues).", &[], SecondClueTarget, [GiveClue, SecondaryAction, SecondTurn]),
    character!(Panicky, "Panicky", "When discarding, discards twice if there are 4 clues or less.", &[], Flag, [SecondaryAction, SecondTurn]),
    character!(Contrarian, "Contrarian", "Play order inverts after taking a turn; the final round is extended.", NOT_2P, Unused, [PostAction, TurnFlow]),
    character!(Stubborn, "Stubborn", "Must perform a different kind of action than the player before them.", &[], LastAction, [PrimaryAction, PostAction]),
    character!(BlindSpot, "Blind Spot", "Cannot see the cards of the player to their left.", NOT_2P, Unused, [Visibility]),
    character!(Oblivious, "Oblivious", "Cannot see the cards of the player to their right.", NOT_2P, Unused, [Visibility]),
    character!(Follower, "Follower", "Cannot play a card unless two cards of the same rank have already been played.", &[], Unused, [Misplay]),
    character!(SlowWitted, "Slow-Witted", "Cannot see cards in slot 1 until they move to slot 2.", &[], Unused, [Visibility, RevealSlot2]),
];

/// Lookup over the static character table.
///
/// ## Example
///
/// ```
/// use detrimental_characters::characters::{CharacterId, CharacterRegistry};
///
/// let registry = CharacterRegistry::standard();
/// assert_eq!(registry.lookup("Mood Swings"), Some(CharacterId::MoodSwings));
/// assert!(!registry.eligible(CharacterId::Contrarian, 2));
/// assert!(registry.eligible(CharacterId::Contrarian, 3));
/// ```
#[derive(Debug)]
pub struct CharacterRegistry {
    by_id: FxHashMap<CharacterId, &'static CharacterDef>,
    by_name: FxHashMap<&'static str, CharacterId>,
}

impl CharacterRegistry {
    /// The process-wide registry, built on first use.
    pub fn standard() -> &'static CharacterRegistry {
        static REGISTRY: OnceLock<CharacterRegistry> = OnceLock::new();
        REGISTRY.get_or_init(Self::build)
    }

    fn build() -> Self {
        let mut by_id = FxHashMap::default();
        let mut by_name = FxHashMap::default();
        for def in &DEFINITIONS {
            if by_id.insert(def.id, def).is_some() {
                panic!("Character {:?} defined twice", def.id);
            }
            by_name.insert(def.name, def.id);
        }
        Self { by_id, by_name }
    }

    /// Get a definition by id.
    #[must_use]
    pub fn get(&self, id: CharacterId) -> &'static CharacterDef {
        self.by_id[&id]
    }

    /// Resolve a display name (case-sensitive).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<CharacterId> {
        self.by_name.get(name).copied()
    }

    /// Whether `id` may be drawn at `player_count`.
    #[must_use]
    pub fn eligible(&self, id: CharacterId, player_count: usize) -> bool {
        self.get(id).eligible_at(player_count)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        DEFINITIONS.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        DEFINITIONS.is_empty()
    }

    /// All definitions in id order.
    pub fn iter(&self) -> impl Iterator<Item = &'static CharacterDef> {
        DEFINITIONS.iter()
    }

    /// All ids in id order.
    pub fn ids(&self) -> impl Iterator<Item = CharacterId> {
        DEFINITIONS.iter().map(|def| def.id)
    }

    /// Definitions taking part in a hook.
    pub fn with_hook(&self, hook: Hook) -> impl Iterator<Item = &'static CharacterDef> {
        DEFINITIONS.iter().filter(move |def| def.participates(hook))
    }
}
