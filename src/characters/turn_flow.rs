//! Turn flow under direction inversion.
//!
//! A Contrarian inverts the direction of play after each of their turns.
//! That makes "who plays next" and "has the final round finished"
//! depend on the seating, so the base turn loop asks here instead of
//! counting seats itself.

use tracing::debug;

use super::registry::CharacterId;
use crate::core::{GameState, PlayerId};

/// Turns the Contrarian end game lasts past the last draw: the usual two,
/// plus one more to cover the direction changes.
pub const CONTRARIAN_FINAL_TURNS: u32 = 3;

/// The seat that acts after the active player, honoring inversion.
#[must_use]
pub fn next_player(state: &GameState) -> PlayerId {
    state
        .active_player
        .step(state.player_count(), state.turns_inverted)
}

/// Reschedule the final round when a Contrarian is seated.
///
/// The base game calls this when the deck runs out; it only rewrites
/// `end_turn` if a Contrarian is present.
pub fn adjust_end_turn(state: &mut GameState) {
    if !state.characters_active() {
        return;
    }
    if state.find_character(CharacterId::Contrarian).is_some() {
        let end_turn = state.turn + CONTRARIAN_FINAL_TURNS;
        debug!(turn = state.turn, end_turn, "final round extended for Contrarian");
        state.end_turn = Some(end_turn);
    }
}

/// Whether the active player has just taken their last turn.
///
/// Walks the remaining scheduled turns from `turn + 1` to `end_turn`,
/// following the direction of play and flipping it whenever the walk
/// lands on a Contrarian. If the walk comes back to the active player
/// they still have a turn to take.
#[must_use]
pub fn has_taken_last_turn(state: &GameState) -> bool {
    let Some(end_turn) = state.end_turn else {
        return false;
    };

    let player_count = state.player_count();
    let original = state.active_player;
    let mut pointer = original;
    let mut inverted = state.turns_inverted;

    for _ in state.turn + 1..=end_turn {
        pointer = pointer.step(player_count, inverted);
        if pointer == original {
            return false;
        }
        if state.is_character(pointer, CharacterId::Contrarian) {
            inverted = !inverted;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::table_with;

    #[test]
    fn test_next_player_follows_direction() {
        let mut state = table_with(&[CharacterId::Greedy, CharacterId::Miser, CharacterId::Picky]);
        assert_eq!(next_player(&state), PlayerId::new(1));
        state.turns_inverted = true;
        assert_eq!(next_player(&state), PlayerId::new(2));
    }

    #[test]
    fn test_adjust_end_turn_needs_contrarian() {
        let mut state = table_with(&[CharacterId::Greedy, CharacterId::Miser, CharacterId::Picky]);
        state.turn = 20;
        adjust_end_turn(&mut state);
        assert_eq!(state.end_turn, None);

        let mut state = table_with(&[CharacterId::Greedy, CharacterId::Contrarian, CharacterId::Picky]);
        state.turn = 20;
        adjust_end_turn(&mut state);
        assert_eq!(state.end_turn, Some(23));
    }

    #[test]
    fn test_no_end_turn_means_not_last() {
        let state = table_with(&[CharacterId::Greedy, CharacterId::Miser]);
        assert!(!has_taken_last_turn(&state));
    }

    #[test]
    fn test_walk_without_return_is_last_turn() {
        let mut state = table_with(&[
            CharacterId::Greedy,
            CharacterId::Miser,
            CharacterId::Picky,
            CharacterId::Contrarian,
        ]);
        state.turn = 10;
        state.end_turn = Some(13);
        // 1, 2, 3: never back to seat 0.
        assert!(has_taken_last_turn(&state));
    }

    #[test]
    fn test_contrarian_bounces_turn_back() {
        let mut state = table_with(&[
            CharacterId::Greedy,
            CharacterId::Contrarian,
            CharacterId::Picky,
            CharacterId::Miser,
        ]);
        state.turn = 10;
        state.end_turn = Some(13);
        // Seat 1 inverts the order, so seat 0 plays again.
        assert!(!has_taken_last_turn(&state));
    }

    #[test]
    fn test_inverted_walk() {
        let mut state = table_with(&[
            CharacterId::Contrarian,
            CharacterId::Miser,
            CharacterId::Picky,
            CharacterId::Greedy,
        ]);
        state.turn = 10;
        state.end_turn = Some(13);
        state.turns_inverted = true;
        // 3, 2, 1.
        assert!(has_taken_last_turn(&state));

        state.end_turn = Some(14);
        assert!(!has_taken_last_turn(&state));
    }
}
