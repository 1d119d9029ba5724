//! Game state: the subset of a table that character rules read and write.
//!
//! ## GameState
//!
//! - Options (variant, character flag, seed)
//! - Players and their hands
//! - The deck (every card record, indexed by order) and draw pointer
//! - Play stacks and the shared clue-token pool
//! - Turn counters: turn, end turn, direction, active player
//! - End condition
//! - Per-player character state (absent until assigned)
//! - The action log

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::GameAction;
use super::config::GameOptions;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, Hand};
use crate::characters::{CharacterId, PlayerCharacterState};

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCondition {
    Normal,
    Strikeout,
    /// A forced character ability can no longer be satisfied.
    CharacterSoftlock,
}

/// A seated player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub hand: Hand,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Hand::new(),
        }
    }
}

/// Full game state.
///
/// Uses an `im` vector for the action log so snapshots stay O(1) to clone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub options: GameOptions,

    pub players: PlayerMap<Player>,

    /// Every card, indexed by order.
    pub deck: Vec<Card>,

    /// Order of the next card to draw.
    pub deck_index: usize,

    /// Highest rank played per suit (0 = empty stack).
    pub stacks: Vec<u8>,

    /// Clue tokens, in variant-adjusted units.
    pub clue_tokens: u32,

    pub strikes: u8,

    /// Turn number (starts at 0).
    pub turn: u32,

    /// Last turn of the game. `None` until the final round is scheduled.
    pub end_turn: Option<u32>,

    /// True while play proceeds counter-clockwise.
    pub turns_inverted: bool,

    pub active_player: PlayerId,

    pub end_condition: Option<EndCondition>,

    /// The player responsible for the end condition, if any.
    pub end_player: Option<PlayerId>,

    /// Per-player characters; `None` until assignment succeeds.
    pub characters: Option<PlayerMap<PlayerCharacterState>>,

    pub actions: Vector<GameAction>,
}

impl GameState {
    /// Create a new game state with empty hands.
    ///
    /// Players are named "Player N"; use `with_player_names` to override.
    #[must_use]
    pub fn new(options: GameOptions, deck: Vec<Card>) -> Self {
        let player_count = options.player_count;
        let suit_count = options.variant.suit_count;
        let clue_tokens = options.variant.max_clue_tokens;

        Self {
            options,
            players: PlayerMap::new(player_count, |p| Player::new(format!("Player {}", p.0))),
            deck,
            deck_index: 0,
            stacks: vec![0; suit_count],
            clue_tokens,
            strikes: 0,
            turn: 0,
            end_turn: None,
            turns_inverted: false,
            active_player: PlayerId::new(0),
            end_condition: None,
            end_player: None,
            characters: None,
            actions: Vector::new(),
        }
    }

    /// Rename players in seat order.
    #[must_use]
    pub fn with_player_names<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        for ((_, player), name) in self.players.iter_mut().zip(names) {
            player.name = name.into();
        }
        self
    }

    /// Get player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    // === Characters ===

    /// Whether character rules apply to this game.
    ///
    /// Requires both the option and a successful assignment. A game whose
    /// assignment was aborted runs as if characters were disabled.
    #[must_use]
    pub fn characters_active(&self) -> bool {
        self.options.detrimental_characters && self.characters.is_some()
    }

    /// A player's character state, if character rules apply.
    #[must_use]
    pub fn character_of(&self, player: PlayerId) -> Option<&PlayerCharacterState> {
        if !self.options.detrimental_characters {
            return None;
        }
        self.characters.as_ref().map(|chars| &chars[player])
    }

    /// Mutable character state, if character rules apply.
    pub fn character_of_mut(&mut self, player: PlayerId) -> Option<&mut PlayerCharacterState> {
        if !self.options.detrimental_characters {
            return None;
        }
        self.characters.as_mut().map(|chars| &mut chars[player])
    }

    /// Whether `player` is playing as `character`.
    #[must_use]
    pub fn is_character(&self, player: PlayerId, character: CharacterId) -> bool {
        self.character_of(player)
            .is_some_and(|state| state.character == character)
    }

    /// The first seat holding `character`, if any.
    #[must_use]
    pub fn find_character(&self, character: CharacterId) -> Option<PlayerId> {
        PlayerId::all(self.player_count()).find(|&p| self.is_character(p, character))
    }

    // === Cards ===

    #[must_use]
    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.players[player].hand
    }

    #[must_use]
    pub fn card(&self, order: usize) -> Option<&Card> {
        self.deck.get(order)
    }

    /// Cards left to draw.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.deck.len().saturating_sub(self.deck_index)
    }

    /// Draw the next card into a player's hand.
    ///
    /// Returns the drawn order, or `None` if the deck is exhausted.
    pub fn draw_card(&mut self, player: PlayerId) -> Option<usize> {
        if self.deck_index >= self.deck.len() {
            return None;
        }
        let order = self.deck_index;
        self.deck_index += 1;
        self.players[player].hand.push(order);
        self.actions.push_back(GameAction::Draw { player, order });
        Some(order)
    }

    /// Deal `hand_size` cards to every player, seat by seat.
    pub fn deal(&mut self, hand_size: usize) {
        for _ in 0..hand_size {
            for player in PlayerId::all(self.player_count()) {
                self.draw_card(player);
            }
        }
    }

    // === Clue tokens ===

    /// Variant-adjusted token threshold.
    #[must_use]
    pub fn adjusted_clue_tokens(&self, tokens: u32) -> u32 {
        self.options.variant.adjusted_clue_tokens(tokens)
    }

    // === Progression ===

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.end_condition.is_some()
    }

    /// End the game.
    pub fn end(&mut self, condition: EndCondition, player: Option<PlayerId>) {
        self.end_condition = Some(condition);
        self.end_player = player;
    }
}
