//! What each player is allowed to see.
//!
//! Consulted whenever card identities are sent to a player. Blind Spot
//! and Oblivious lose sight of a neighbour's hand; Slow-Witted cannot see
//! slot 1 at all, so whenever a card moves into slot 2 its identity is
//! announced to the table.

use super::registry::CharacterId;
use crate::core::{GameAction, GameState, PlayerId};

/// Receives table-level notifications.
///
/// Implemented by the transport layer; the engine only says "something
/// was appended to the action log".
pub trait TableNotifier {
    fn notify_game_action(&mut self, action: &GameAction);
}

/// Discards notifications.
impl TableNotifier for () {
    fn notify_game_action(&mut self, _action: &GameAction) {}
}

/// Collects notifications, for tests and offline replays.
impl TableNotifier for Vec<GameAction> {
    fn notify_game_action(&mut self, action: &GameAction) {
        self.push(action.clone());
    }
}

/// Whether `viewer` may see the card `order` in `owner`'s hand.
#[must_use]
pub fn sees_card(state: &GameState, viewer: PlayerId, owner: PlayerId, order: usize) -> bool {
    let Some(me) = state.character_of(viewer) else {
        return true;
    };
    let player_count = state.player_count();

    match me.character {
        CharacterId::BlindSpot if owner == viewer.next(player_count) => false,
        CharacterId::Oblivious if owner == viewer.previous(player_count) => false,
        CharacterId::SlowWitted if state.hand(owner).slot_of(order) == Some(1) => false,
        _ => true,
    }
}

/// Whether the identity of a card just drawn by `drawer` must be hidden
/// from `viewer`.
///
/// A Slow-Witted viewer never sees a card at draw time; it is revealed by
/// `send_card_identity_of_slot2` once it reaches slot 2.
#[must_use]
pub fn hide_drawn_card(state: &GameState, drawer: PlayerId, viewer: PlayerId) -> bool {
    let Some(me) = state.character_of(viewer) else {
        return false;
    };
    let player_count = state.player_count();

    match me.character {
        CharacterId::BlindSpot => drawer == viewer.next(player_count),
        CharacterId::Oblivious => drawer == viewer.previous(player_count),
        CharacterId::SlowWitted => true,
        _ => false,
    }
}

/// After `drawer` draws, announce the identity of their slot 2 card if a
/// Slow-Witted player is seated.
///
/// Appends a `CardIdentity` entry to the action log and notifies the
/// table. Returns the appended entry.
pub fn send_card_identity_of_slot2(
    state: &mut GameState,
    drawer: PlayerId,
    notifier: &mut impl TableNotifier,
) -> Option<GameAction> {
    if !state.characters_active() {
        return None;
    }
    state.find_character(CharacterId::SlowWitted)?;

    let order = state.hand(drawer).order_in_slot(2)?;
    let card = state.card(order)?;
    let entry = GameAction::CardIdentity {
        player: drawer,
        order,
        suit_index: card.suit_index,
        rank: card.rank,
    };

    state.actions.push_back(entry.clone());
    notifier.notify_game_action(&entry);
    Some(entry)
}
