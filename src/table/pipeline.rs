//! Action pipeline.

use thiserror::Error;
use tracing::debug;

use crate::cards::Card;
use crate::characters::{
    self, adjust_end_turn, assign_characters_from_seed, has_taken_last_turn, next_player,
    TableNotifier,
};
use crate::core::{
    Action, ActionKind, CharacterError, EndCondition, GameAction, GameOptions, GameRng,
    GameState, PlayerId, RuleViolation,
};

/// Copies of each rank in every suit.
const RANK_COPIES: [u8; 10] = [1, 1, 1, 2, 2, 3, 3, 4, 4, 5];

const MAX_RANK: u8 = 5;
const MAX_STRIKES: u8 = 3;

/// Raw tokens regained by a discard or a completed suit. Clue-starved
/// variants count half tokens, so this is half a clue there.
const REGAINED_TOKENS: u32 = 1;

/// An unshuffled deck, rank-major: every suit's copy of a rank before the
/// next copy. Orders follow deck position.
///
/// ```
/// use detrimental_characters::table::standard_deck;
///
/// let deck = standard_deck(5);
/// assert_eq!(deck.len(), 50);
/// assert_eq!((deck[0].suit_index, deck[0].rank), (0, 1));
/// assert_eq!((deck[49].suit_index, deck[49].rank), (4, 5));
/// ```
#[must_use]
pub fn standard_deck(suit_count: usize) -> Vec<Card> {
    RANK_COPIES
        .iter()
        .flat_map(|&rank| (0..suit_count).map(move |suit| (suit, rank)))
        .enumerate()
        .map(|(order, (suit, rank))| Card::new(order, suit, rank))
        .collect()
}

/// Why the table refused an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("the game is over")]
    GameOver,
    #[error("it is not {0}'s turn")]
    NotYourTurn(PlayerId),
    #[error("card {0} is not in your hand")]
    CardNotInHand(usize),
    #[error("invalid clue target")]
    InvalidClueTarget,
    #[error("there are no clue tokens available")]
    NoClueTokens,
    #[error("clues must touch at least one card")]
    ClueTouchesNothing,
    #[error("you cannot discard while at the maximum number of clues")]
    DiscardAtMaxClues,
    #[error(transparent)]
    Character(#[from] RuleViolation),
}

/// What happened when an action was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionOutcome {
    /// A play that went to the discard pile as a strike.
    pub misplayed: bool,
    /// The same player must act again before the turn advances.
    pub second_action_owed: bool,
    /// The acting player will not get another turn.
    pub final_turn_taken: bool,
    pub game_over: Option<EndCondition>,
}

/// Builder for a `Table`.
pub struct TableBuilder {
    options: GameOptions,
    hand_size: Option<usize>,
    deck: Option<Vec<Card>>,
}

impl TableBuilder {
    pub fn new(options: GameOptions) -> Self {
        assert!(
            (2..=6).contains(&options.player_count),
            "Player count must be 2-6"
        );
        Self {
            options,
            hand_size: None,
            deck: None,
        }
    }

    pub fn hand_size(mut self, size: usize) -> Self {
        self.hand_size = Some(size);
        self
    }

    /// Use a fixed deck instead of a shuffled standard one. Card orders
    /// are renumbered to deck position.
    pub fn deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Build with a notifier for table events.
    ///
    /// Fails when character assignment fails; the game must not start.
    pub fn build_with<N: TableNotifier>(self, notifier: N) -> Result<Table<N>, CharacterError> {
        let seed = self.options.seed;
        let player_count = self.options.player_count;
        let mut deck = match self.deck {
            Some(deck) => deck,
            None => {
                let mut deck = standard_deck(self.options.variant.suit_count);
                GameRng::new(seed).shuffle(&mut deck);
                deck
            }
        };
        for (order, card) in deck.iter_mut().enumerate() {
            card.order = order;
        }

        let mut state = GameState::new(self.options, deck);
        assign_characters_from_seed(&mut state)?;

        let hand_size = self.hand_size.unwrap_or(match player_count {
            2 | 3 => 5,
            4 | 5 => 4,
            _ => 3,
        });
        state.deal(hand_size);

        Ok(Table {
            state,
            notifier,
            second_action_owed: false,
        })
    }

    pub fn build(self) -> Result<Table<()>, CharacterError> {
        self.build_with(())
    }
}

/// A game in progress.
pub struct Table<N: TableNotifier = ()> {
    state: GameState,
    notifier: N,
    second_action_owed: bool,
}

impl Table<()> {
    pub fn builder(options: GameOptions) -> TableBuilder {
        TableBuilder::new(options)
    }
}

impl<N: TableNotifier> Table<N> {
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for setting up scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    #[must_use]
    pub fn second_action_owed(&self) -> bool {
        self.second_action_owed
    }

    /// The cards of `owner`'s hand as `viewer` sees them, oldest first.
    ///
    /// Players never see their own cards.
    #[must_use]
    pub fn visible_hand(&self, viewer: PlayerId, owner: PlayerId) -> Vec<Option<&Card>> {
        self.state
            .hand(owner)
            .orders()
            .iter()
            .map(|&order| {
                let visible = viewer != owner && characters::sees_card(&self.state, viewer, owner, order);
                visible.then(|| self.state.card(order)).flatten()
            })
            .collect()
    }

    /// The identity of a card just drawn by `drawer`, as sent to `viewer`.
    #[must_use]
    pub fn visible_draw(&self, drawer: PlayerId, order: usize, viewer: PlayerId) -> Option<&Card> {
        if viewer == drawer || characters::hide_drawn_card(&self.state, drawer, viewer) {
            return None;
        }
        self.state.card(order)
    }

    /// Validate and apply one action.
    ///
    /// Rejected actions leave the table untouched.
    pub fn process_action(
        &mut self,
        player: PlayerId,
        action: Action,
    ) -> Result<ActionOutcome, TableError> {
        self.check_base_rules(player, &action)?;
        characters::check_action(&self.state, player, &action, self.second_action_owed)?;

        let misplayed = self.apply(player, &action);
        characters::post_action(&mut self.state, player, &action);
        let second_action_owed = characters::needs_second_turn(&mut self.state, player, &action);
        self.second_action_owed = second_action_owed;

        self.check_end();

        let mut final_turn_taken = false;
        if !second_action_owed && !self.state.is_over() {
            final_turn_taken = has_taken_last_turn(&self.state);
            self.advance_turn();
        }
        if !self.state.is_over() {
            let active = self.state.active_player;
            characters::check_softlock(&mut self.state, active);
        }

        Ok(ActionOutcome {
            misplayed,
            second_action_owed,
            final_turn_taken,
            game_over: self.state.end_condition,
        })
    }

    fn check_base_rules(&self, player: PlayerId, action: &Action) -> Result<(), TableError> {
        let state = &self.state;
        if state.is_over() {
            return Err(TableError::GameOver);
        }
        if player != state.active_player {
            return Err(TableError::NotYourTurn(player));
        }

        if action.kind.is_clue() && action.clue().is_none() {
            return Err(TableError::InvalidClueTarget);
        }
        match action.clue() {
            Some(clue) => {
                if clue.target == player || clue.target.index() >= state.player_count() {
                    return Err(TableError::InvalidClueTarget);
                }
                if state.clue_tokens < state.adjusted_clue_tokens(1) {
                    return Err(TableError::NoClueTokens);
                }
                if state.hand(clue.target).touched_by(&clue, &state.deck).is_empty() {
                    return Err(TableError::ClueTouchesNothing);
                }
            }
            None => {
                if !state.hand(player).contains(action.target) {
                    return Err(TableError::CardNotInHand(action.target));
                }
                if action.kind == ActionKind::Discard
                    && state.clue_tokens >= state.options.variant.max_clue_tokens
                {
                    return Err(TableError::DiscardAtMaxClues);
                }
            }
        }
        Ok(())
    }

    /// Apply the base effect and the per-kind mutators. Returns whether a
    /// play misplayed.
    fn apply(&mut self, player: PlayerId, action: &Action) -> bool {
        if let Some(clue) = action.clue() {
            let touched = self.state.hand(clue.target).touched_by(&clue, &self.state.deck);
            self.state.clue_tokens -= self.state.adjusted_clue_tokens(1);
            self.state.actions.push_back(GameAction::Clue {
                giver: player,
                clue,
                touched: touched.to_vec(),
            });
            characters::post_clue(&mut self.state, player, action);
            return false;
        }

        let order = action.target;
        self.state.players[player].hand.remove(order);

        let mut misplayed = false;
        match action.kind {
            ActionKind::Play => {
                let Some(card) = self.state.card(order).cloned() else {
                    return false;
                };
                // A suit outside the variant has no stack and always misplays.
                let playable = self
                    .state
                    .stacks
                    .get(card.suit_index)
                    .is_some_and(|&top| top + 1 == card.rank);
                misplayed = !playable || characters::should_misplay(&self.state, player, &card);
                if misplayed {
                    self.state.strikes += 1;
                    self.state.actions.push_back(GameAction::Discard {
                        player,
                        order,
                        failed: true,
                    });
                } else {
                    self.state.stacks[card.suit_index] = card.rank;
                    if card.rank == MAX_RANK {
                        self.regain_tokens();
                    }
                    self.state.actions.push_back(GameAction::Play { player, order });
                }
            }
            ActionKind::Discard => {
                self.regain_tokens();
                self.state.actions.push_back(GameAction::Discard {
                    player,
                    order,
                    failed: false,
                });
            }
            ActionKind::ColorClue | ActionKind::RankClue => {}
        }

        characters::post_remove_card(&mut self.state, player, order);
        self.replace_card(player);
        misplayed
    }

    fn regain_tokens(&mut self) {
        let max = self.state.options.variant.max_clue_tokens;
        self.state.clue_tokens = (self.state.clue_tokens + REGAINED_TOKENS).min(max);
    }

    fn replace_card(&mut self, player: PlayerId) {
        if self.state.draw_card(player).is_none() {
            return;
        }
        characters::send_card_identity_of_slot2(&mut self.state, player, &mut self.notifier);

        if self.state.cards_remaining() == 0 && self.state.end_turn.is_none() {
            let turn = self.state.turn;
            self.state.end_turn = Some(turn + self.state.player_count() as u32);
            adjust_end_turn(&mut self.state);
            debug!(turn, end_turn = ?self.state.end_turn, "final round scheduled");
        }
    }

    fn check_end(&mut self) {
        if self.state.strikes >= MAX_STRIKES {
            self.state.end(EndCondition::Strikeout, None);
        } else if self.state.stacks.iter().all(|&top| top == MAX_RANK) {
            self.state.end(EndCondition::Normal, None);
        }
    }

    fn advance_turn(&mut self) {
        let next = next_player(&self.state);
        self.state.turn += 1;
        self.state.active_player = next;
        self.state.actions.push_back(GameAction::Turn {
            turn: self.state.turn,
            current_player: next,
        });

        if self.state.end_turn.is_some_and(|end| self.state.turn > end) {
            self.state.end(EndCondition::Normal, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CustomCharacterAssignment, Variant};

    fn plain(players: usize) -> Table {
        Table::builder(GameOptions::new(players))
            .deck(standard_deck(5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_deals_by_player_count() {
        let table = plain(2);
        assert_eq!(table.state().hand(PlayerId::new(0)).len(), 5);

        let table = Table::builder(GameOptions::new(4)).build().unwrap();
        assert_eq!(table.state().hand(PlayerId::new(3)).len(), 4);
        assert_eq!(table.state().cards_remaining(), 34);
    }

    #[test]
    fn test_builder_rejects_bad_assignment() {
        let options = GameOptions::new(3)
            .with_detrimental_characters()
            .with_custom_assignments([CustomCharacterAssignment::new("Miser", -1)]);
        assert!(matches!(
            Table::builder(options).build(),
            Err(CharacterError::AssignmentCountMismatch { .. })
        ));
    }

    #[test]
    fn test_base_rules() {
        let mut table = plain(2);
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(
            table.process_action(p1, Action::discard(1)),
            Err(TableError::NotYourTurn(p1))
        );
        assert_eq!(
            table.process_action(p0, Action::play(1)),
            Err(TableError::CardNotInHand(1))
        );
        assert_eq!(
            table.process_action(p0, Action::discard(0)),
            Err(TableError::DiscardAtMaxClues)
        );
        assert_eq!(
            table.process_action(p0, Action::rank_clue(p0, 1)),
            Err(TableError::InvalidClueTarget)
        );
        // Player 1 holds only rank 1s.
        assert_eq!(
            table.process_action(p0, Action::rank_clue(p1, 5)),
            Err(TableError::ClueTouchesNothing)
        );
        assert_eq!(table.state().turn, 0);
    }

    #[test]
    fn test_play_and_turn_advance() {
        let mut table = plain(2);
        let p0 = PlayerId::new(0);

        // Order 0 is suit 0 rank 1.
        let outcome = table.process_action(p0, Action::play(0)).unwrap();
        assert!(!outcome.misplayed);
        assert_eq!(table.state().stacks[0], 1);
        assert_eq!(table.state().turn, 1);
        assert_eq!(table.state().active_player, PlayerId::new(1));
        assert_eq!(table.state().hand(p0).len(), 5);
    }

    #[test]
    fn test_misplay_strikes() {
        let mut table = plain(2);
        let p0 = PlayerId::new(0);

        // Order 0 and its replacement, order 10, are both suit 0 rank 1.
        table.process_action(p0, Action::play(0)).unwrap();
        assert_eq!(table.state().hand(p0).newest(), Some(10));
        table
            .process_action(PlayerId::new(1), Action::rank_clue(p0, 1))
            .unwrap();

        let outcome = table.process_action(p0, Action::play(10)).unwrap();
        assert!(outcome.misplayed);
        assert_eq!(table.state().strikes, 1);
        assert_eq!(table.state().stacks[0], 1);
        assert_eq!(
            table.state().actions.iter().rev().find(|a| matches!(a, GameAction::Discard { .. })),
            Some(&GameAction::Discard { player: p0, order: 10, failed: true })
        );
    }

    #[test]
    fn test_clue_starved_discard_stays_under_max() {
        let options = GameOptions::new(2).with_variant(Variant::no_variant().clue_starved());
        let mut table = Table::builder(options).deck(standard_deck(5)).build().unwrap();
        table.state_mut().clue_tokens = 15;

        let order = table.state().hand(PlayerId::new(0)).oldest().unwrap();
        table.process_action(PlayerId::new(0), Action::discard(order)).unwrap();
        assert_eq!(table.state().clue_tokens, 16);
    }

    #[test]
    fn test_unknown_suit_misplays() {
        let mut deck = standard_deck(5);
        deck[0].suit_index = 7;
        let mut table = Table::builder(GameOptions::new(2)).deck(deck).build().unwrap();

        let outcome = table.process_action(PlayerId::new(0), Action::play(0)).unwrap();
        assert!(outcome.misplayed);
        assert_eq!(table.state().strikes, 1);
        assert!(table.state().stacks.iter().all(|&top| top == 0));
    }

    #[test]
    fn test_final_round() {
        let deck: Vec<Card> = standard_deck(5).into_iter().take(12).collect();
        let mut table = Table::builder(GameOptions::new(2)).deck(deck).build().unwrap();
        table.state_mut().clue_tokens = 0;

        // Two discards exhaust the remaining two cards.
        let discard_oldest = |table: &mut Table| {
            let player = table.state().active_player;
            let order = table.state().hand(player).oldest().unwrap();
            table.process_action(player, Action::discard(order)).unwrap()
        };

        discard_oldest(&mut table);
        assert_eq!(table.state().end_turn, None);
        discard_oldest(&mut table);
        assert_eq!(table.state().end_turn, Some(3));

        let third = discard_oldest(&mut table);
        assert_eq!(third.game_over, None);
        let fourth = discard_oldest(&mut table);
        assert_eq!(fourth.game_over, Some(EndCondition::Normal));
        assert_eq!(
            table.process_action(PlayerId::new(0), Action::discard(0)),
            Err(TableError::GameOver)
        );
    }
}
