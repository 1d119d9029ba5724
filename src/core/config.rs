//! Game configuration types.
//!
//! Games configure the engine at table creation by providing:
//! - `Variant`: suit/colour counts and clue-token accounting
//! - `CustomCharacterAssignment`: explicit per-seat characters (replays)
//! - `GameOptions`: combines all configuration
//!
//! All types deserialize from the table's JSON options.

use serde::{Deserialize, Serialize};

/// Variant parameters that character rules depend on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Human-readable name (for display).
    pub name: String,

    /// Number of suits (play stacks).
    pub suit_count: usize,

    /// Number of distinct colour clues available.
    pub clue_color_count: usize,

    /// Clue-starved variants track tokens in halves.
    #[serde(default)]
    pub clue_starved: bool,

    /// Maximum number of clue tokens (in adjusted units).
    pub max_clue_tokens: u32,
}

impl Variant {
    /// The standard five-suit variant.
    #[must_use]
    pub fn no_variant() -> Self {
        Self {
            name: "No Variant".to_string(),
            suit_count: 5,
            clue_color_count: 5,
            clue_starved: false,
            max_clue_tokens: 8,
        }
    }

    /// Mark the variant as clue-starved.
    #[must_use]
    pub fn clue_starved(mut self) -> Self {
        self.clue_starved = true;
        self.max_clue_tokens *= 2;
        self
    }

    /// Convert a whole-token count into this variant's token units.
    ///
    /// ```
    /// use detrimental_characters::core::Variant;
    ///
    /// assert_eq!(Variant::no_variant().adjusted_clue_tokens(4), 4);
    /// assert_eq!(Variant::no_variant().clue_starved().adjusted_clue_tokens(4), 8);
    /// ```
    #[must_use]
    pub fn adjusted_clue_tokens(&self, tokens: u32) -> u32 {
        if self.clue_starved {
            tokens * 2
        } else {
            tokens
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Self::no_variant()
    }
}

/// An explicit character for one seat, as stored in a game record.
///
/// `metadata` uses the wire encoding (`-1` = no stored state).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomCharacterAssignment {
    pub name: String,
    pub metadata: i32,
}

impl CustomCharacterAssignment {
    pub fn new(name: impl Into<String>, metadata: i32) -> Self {
        Self {
            name: name.into(),
            metadata,
        }
    }
}

/// Complete per-game configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOptions {
    /// Number of players (1-255).
    pub player_count: usize,

    /// Game seed; character draws are derived from it.
    #[serde(default)]
    pub seed: u64,

    /// Whether detrimental characters are in play.
    #[serde(default)]
    pub detrimental_characters: bool,

    /// Explicit assignments, one per seat. Used for replays and tests.
    #[serde(default)]
    pub custom_character_assignments: Option<Vec<CustomCharacterAssignment>>,

    #[serde(default)]
    pub variant: Variant,
}

impl GameOptions {
    /// Create options for a plain game with no characters.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            seed: 0,
            detrimental_characters: false,
            custom_character_assignments: None,
            variant: Variant::default(),
        }
    }

    /// Enable detrimental characters.
    #[must_use]
    pub fn with_detrimental_characters(mut self) -> Self {
        self.detrimental_characters = true;
        self
    }

    /// Set the game seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Supply explicit per-seat characters.
    #[must_use]
    pub fn with_custom_assignments(
        mut self,
        assignments: impl IntoIterator<Item = CustomCharacterAssignment>,
    ) -> Self {
        self.custom_character_assignments = Some(assignments.into_iter().collect());
        self
    }

    /// Set the variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Explicit assignments, treating an empty list as absent.
    #[must_use]
    pub fn explicit_assignments(&self) -> Option<&[CustomCharacterAssignment]> {
        self.custom_character_assignments
            .as_deref()
            .filter(|list| !list.is_empty())
    }
}
