//! Shared fixtures for unit tests.

use crate::cards::Card;
use crate::characters::{CharacterId, PlayerCharacterState};
use crate::core::{GameOptions, GameState, PlayerId, PlayerMap};

/// The unshuffled five-suit deck.
pub fn standard_deck() -> Vec<Card> {
    crate::table::standard_deck(5)
}

/// A dealt game with characters enabled and the given characters in seat
/// order, all with inactive metadata.
pub fn table_with(characters: &[CharacterId]) -> GameState {
    let options = GameOptions::new(characters.len()).with_detrimental_characters();
    let mut state = GameState::new(options, standard_deck());
    state.deal(if characters.len() <= 3 { 5 } else { 4 });
    state.characters = Some(PlayerMap::from_vec(
        characters
            .iter()
            .enumerate()
            .map(|(seat, &id)| PlayerCharacterState::new(PlayerId::new(seat as u8), id, Default::default()))
            .collect(),
    ));
    state
}

/// Rewrite a player's hand to hold exactly `cards` (suit, rank), oldest
/// first. Reuses the hand's orders, drawing more if needed.
///
/// Returns the hand's orders, oldest first.
pub fn give_hand(state: &mut GameState, player: PlayerId, cards: &[(usize, u8)]) -> Vec<usize> {
    while state.hand(player).len() < cards.len() {
        state.draw_card(player).expect("deck exhausted while building hand");
    }
    let mut orders = state.hand(player).orders().to_vec();
    for extra in orders.split_off(cards.len()) {
        state.players[player].hand.remove(extra);
    }
    for (&order, &(suit, rank)) in orders.iter().zip(cards) {
        state.deck[order].suit_index = suit;
        state.deck[order].rank = rank;
    }
    orders
}
