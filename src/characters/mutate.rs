//! State mutators.
//!
//! Called only after the base game has committed an action. These are the
//! only places character metadata and the per-card Insistent mark change,
//! apart from `needs_second_turn`, which both answers and records whether
//! a forced follow-up is owed.

use tracing::trace;

use super::metadata::CharacterMetadata;
use super::registry::CharacterId;
use crate::core::{Action, ActionKind, GameState, PlayerId};

/// After a clue: record what the giver did and what the receiver got.
pub fn post_clue(state: &mut GameState, giver: PlayerId, action: &Action) {
    if !state.characters_active() {
        return;
    }
    let Some(clue) = action.clue() else {
        return;
    };
    if clue.target.index() >= state.player_count() {
        return;
    }

    let hand = &state.players[clue.target].hand;
    let touched = hand.touched_by(&clue, &state.deck);
    let slot_one_touched = hand.newest_touched_by(&clue, &state.deck);

    let GameState {
        characters, deck, ..
    } = state;
    let Some(characters) = characters.as_mut() else {
        return;
    };

    let me = &mut characters[giver];
    match (me.character, me.metadata) {
        (CharacterId::MoodSwings, _) => me.metadata = CharacterMetadata::LastClue(clue.kind),
        // Already insisting: the marked cards stay as they are.
        (CharacterId::Insistent, CharacterMetadata::Inactive) => {
            for &order in &touched {
                if let Some(card) = deck.get_mut(order) {
                    card.insistent_touched = true;
                }
            }
            me.metadata = CharacterMetadata::Active;
        }
        _ => {}
    }

    let receiver = &mut characters[clue.target];
    match receiver.character {
        CharacterId::Vindictive => receiver.metadata = CharacterMetadata::Active,
        CharacterId::Impulsive if slot_one_touched => receiver.metadata = CharacterMetadata::Active,
        _ => {}
    }
}

/// After a card leaves `player`'s hand by play or discard.
///
/// Removing a card marked by an Insistent clue clears the mark from the
/// rest of that hand and releases the Insistent player.
pub fn post_remove_card(state: &mut GameState, player: PlayerId, order: usize) {
    if !state.characters_active() {
        return;
    }
    if !state.card(order).is_some_and(|card| card.insistent_touched) {
        return;
    }

    let GameState {
        players,
        deck,
        characters,
        ..
    } = state;

    for &held in players[player].hand.orders().iter().chain(std::iter::once(&order)) {
        if let Some(card) = deck.get_mut(held) {
            card.insistent_touched = false;
        }
    }

    // Only one seat can hold the ability.
    if let Some(insistent) = characters
        .as_mut()
        .and_then(|chars| chars.iter_mut().find(|(_, c)| c.character == CharacterId::Insistent))
    {
        insistent.1.reset();
    }
}

/// After any committed action by `player`.
pub fn post_action(state: &mut GameState, player: PlayerId, action: &Action) {
    if !state.characters_active() {
        return;
    }

    let mut invert = false;
    if let Some(me) = state.character_of_mut(player) {
        match me.character {
            // Abilities that only last a single go-around of the table.
            CharacterId::Vindictive | CharacterId::Impulsive => me.reset(),
            CharacterId::Indolent => {
                me.metadata = if action.kind == ActionKind::Play {
                    CharacterMetadata::Active
                } else {
                    CharacterMetadata::Inactive
                };
            }
            CharacterId::Contrarian => invert = true,
            _ => {}
        }
    }

    if invert {
        state.turns_inverted = !state.turns_inverted;
        trace!(%player, inverted = state.turns_inverted, "turn order inverted");
    }

    if let Some(characters) = state.characters.as_mut() {
        for (_, observer) in characters.iter_mut() {
            if observer.character == CharacterId::Stubborn {
                observer.metadata = CharacterMetadata::LastAction(action.kind);
            }
        }
    }
}

/// Whether `player` must act again immediately after `action`.
///
/// Call once per committed action, after the base game has applied it.
/// A Genius colour clue opens the window and stores the clue target;
/// the rank clue that follows closes it. A Panicky discard that leaves
/// 4 or fewer clues opens the window; the forced second discard closes it.
pub fn needs_second_turn(state: &mut GameState, player: PlayerId, action: &Action) -> bool {
    if !state.characters_active() {
        return false;
    }
    let threshold = state.adjusted_clue_tokens(4);
    let tokens = state.clue_tokens;
    let Some(me) = state.character_of_mut(player) else {
        return false;
    };

    match (me.character, action.kind) {
        (CharacterId::Genius, ActionKind::ColorClue) => match action.clue_target() {
            Some(target) => {
                me.metadata = CharacterMetadata::SecondClueTarget(target);
                true
            }
            None => false,
        },
        (CharacterId::Genius, ActionKind::RankClue) => {
            me.reset();
            false
        }
        (CharacterId::Panicky, ActionKind::Discard) => match me.metadata {
            CharacterMetadata::Inactive if tokens <= threshold => {
                me.metadata = CharacterMetadata::Active;
                true
            }
            CharacterMetadata::Inactive => false,
            _ => {
                me.reset();
                false
            }
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{give_hand, table_with};

    fn metadata(state: &GameState, player: u8) -> CharacterMetadata {
        state.character_of(PlayerId::new(player)).unwrap().metadata
    }

    #[test]
    fn test_mood_swings_records_clue_type() {
        let mut state = table_with(&[CharacterId::MoodSwings, CharacterId::Greedy]);
        post_clue(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(1), 1));
        assert_eq!(metadata(&state, 0), CharacterMetadata::LastClue(crate::core::ClueKind::Rank));
    }

    #[test]
    fn test_insistent_marks_touched_cards_once() {
        let mut state = table_with(&[CharacterId::Insistent, CharacterId::Greedy]);
        let orders = give_hand(&mut state, PlayerId::new(1), &[(0, 1), (1, 1), (2, 3)]);

        post_clue(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(1), 1));
        assert_eq!(metadata(&state, 0), CharacterMetadata::Active);
        assert!(state.deck[orders[0]].insistent_touched);
        assert!(state.deck[orders[1]].insistent_touched);
        assert!(!state.deck[orders[2]].insistent_touched);

        // A second clue while insisting does not extend the marking.
        post_clue(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(1), 3));
        assert!(!state.deck[orders[2]].insistent_touched);
    }

    #[test]
    fn test_receiver_flags() {
        let mut state = table_with(&[CharacterId::Greedy, CharacterId::Vindictive, CharacterId::Impulsive]);
        give_hand(&mut state, PlayerId::new(2), &[(0, 2), (1, 4)]);

        post_clue(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(1), 1));
        assert_eq!(metadata(&state, 1), CharacterMetadata::Active);

        // Slot 1 not touched.
        post_clue(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(2), 2));
        assert_eq!(metadata(&state, 2), CharacterMetadata::Inactive);

        post_clue(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(2), 4));
        assert_eq!(metadata(&state, 2), CharacterMetadata::Active);
    }

    #[test]
    fn test_removing_marked_card_clears_hand_and_releases_insistent() {
        let mut state = table_with(&[CharacterId::Insistent, CharacterId::Greedy]);
        let orders = give_hand(&mut state, PlayerId::new(1), &[(0, 1), (1, 1), (2, 3)]);
        post_clue(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(1), 1));

        state.players[PlayerId::new(1)].hand.remove(orders[0]);
        post_remove_card(&mut state, PlayerId::new(1), orders[0]);

        assert!(orders.iter().all(|&o| !state.deck[o].insistent_touched));
        assert_eq!(metadata(&state, 0), CharacterMetadata::Inactive);
    }

    #[test]
    fn test_removing_unmarked_card_keeps_state() {
        let mut state = table_with(&[CharacterId::Insistent, CharacterId::Greedy]);
        let orders = give_hand(&mut state, PlayerId::new(1), &[(0, 1), (2, 3)]);
        post_clue(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(1), 1));

        state.players[PlayerId::new(1)].hand.remove(orders[1]);
        post_remove_card(&mut state, PlayerId::new(1), orders[1]);

        assert!(state.deck[orders[0]].insistent_touched);
        assert_eq!(metadata(&state, 0), CharacterMetadata::Active);
    }

    #[test]
    fn test_post_action_go_around_flags() {
        let mut state = table_with(&[CharacterId::Vindictive, CharacterId::Indolent, CharacterId::Impulsive]);
        for p in 0..3 {
            state.character_of_mut(PlayerId::new(p)).unwrap().metadata = CharacterMetadata::Active;
        }

        post_action(&mut state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(1), 1));
        assert_eq!(metadata(&state, 0), CharacterMetadata::Inactive);

        post_action(&mut state, PlayerId::new(1), &Action::play(3));
        assert_eq!(metadata(&state, 1), CharacterMetadata::Active);
        post_action(&mut state, PlayerId::new(1), &Action::discard(3));
        assert_eq!(metadata(&state, 1), CharacterMetadata::Inactive);

        post_action(&mut state, PlayerId::new(2), &Action::play(4));
        assert_eq!(metadata(&state, 2), CharacterMetadata::Inactive);
    }

    #[test]
    fn test_contrarian_toggles_direction() {
        let mut state = table_with(&[CharacterId::Contrarian, CharacterId::Greedy, CharacterId::Miser]);
        post_action(&mut state, PlayerId::new(0), &Action::discard(0));
        assert!(state.turns_inverted);
        post_action(&mut state, PlayerId::new(1), &Action::discard(1));
        assert!(state.turns_inverted);
        post_action(&mut state, PlayerId::new(0), &Action::discard(2));
        assert!(!state.turns_inverted);
    }

    #[test]
    fn test_stubborn_observes_every_action() {
        let mut state = table_with(&[CharacterId::Greedy, CharacterId::Stubborn]);
        post_action(&mut state, PlayerId::new(0), &Action::discard(0));
        assert_eq!(metadata(&state, 1), CharacterMetadata::LastAction(ActionKind::Discard));
        post_action(&mut state, PlayerId::new(1), &Action::play(1));
        assert_eq!(metadata(&state, 1), CharacterMetadata::LastAction(ActionKind::Play));
    }

    #[test]
    fn test_genius_second_turn_cycle() {
        let mut state = table_with(&[CharacterId::Genius, CharacterId::Greedy, CharacterId::Miser]);
        let me = PlayerId::new(0);

        assert!(needs_second_turn(&mut state, me, &Action::color_clue(PlayerId::new(1), 2)));
        assert_eq!(metadata(&state, 0), CharacterMetadata::SecondClueTarget(PlayerId::new(1)));

        assert!(!needs_second_turn(&mut state, me, &Action::rank_clue(PlayerId::new(1), 2)));
        assert_eq!(metadata(&state, 0), CharacterMetadata::Inactive);
    }

    #[test]
    fn test_panicky_second_discard() {
        let mut state = table_with(&[CharacterId::Panicky, CharacterId::Greedy]);
        let me = PlayerId::new(0);

        state.clue_tokens = 5;
        assert!(!needs_second_turn(&mut state, me, &Action::discard(0)));

        state.clue_tokens = 4;
        assert!(needs_second_turn(&mut state, me, &Action::discard(0)));
        assert_eq!(metadata(&state, 0), CharacterMetadata::Active);

        state.clue_tokens = 3;
        assert!(!needs_second_turn(&mut state, me, &Action::discard(2)));
        assert_eq!(metadata(&state, 0), CharacterMetadata::Inactive);

        assert!(!needs_second_turn(&mut state, me, &Action::play(4)));
    }
}
