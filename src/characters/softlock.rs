//! Softlock detection.
//!
//! Vindictive and Insistent can be forced to give a clue. With no clue
//! tokens left that is impossible, and no other action is legal for them,
//! so the game ends.

use tracing::info;

use super::registry::CharacterId;
use crate::core::{EndCondition, GameState, PlayerId};

/// End the game if `player` is forced to clue but cannot.
///
/// Returns true when the game was ended.
pub fn check_softlock(state: &mut GameState, player: PlayerId) -> bool {
    if !state.characters_active() || state.is_over() {
        return false;
    }
    if state.clue_tokens >= state.adjusted_clue_tokens(1) {
        return false;
    }
    let Some(me) = state.character_of(player) else {
        return false;
    };
    let forced_to_clue = matches!(me.character, CharacterId::Vindictive | CharacterId::Insistent)
        && me.is_active();
    if !forced_to_clue {
        return false;
    }

    info!(%player, character = %me.character, "character softlock");
    state.end(EndCondition::CharacterSoftlock, Some(player));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::CharacterMetadata;
    use crate::testing::table_with;

    #[test]
    fn test_softlock_when_forced_without_tokens() {
        let mut state = table_with(&[CharacterId::Greedy, CharacterId::Vindictive]);
        state.character_of_mut(PlayerId::new(1)).unwrap().metadata = CharacterMetadata::Active;
        state.clue_tokens = 0;

        assert!(check_softlock(&mut state, PlayerId::new(1)));
        assert_eq!(state.end_condition, Some(EndCondition::CharacterSoftlock));
        assert_eq!(state.end_player, Some(PlayerId::new(1)));
    }

    #[test]
    fn test_no_softlock_with_tokens_or_inactive() {
        let mut state = table_with(&[CharacterId::Insistent, CharacterId::Greedy]);
        state.clue_tokens = 0;
        assert!(!check_softlock(&mut state, PlayerId::new(0)));

        state.character_of_mut(PlayerId::new(0)).unwrap().metadata = CharacterMetadata::Active;
        state.clue_tokens = 1;
        assert!(!check_softlock(&mut state, PlayerId::new(0)));
        assert!(!check_softlock(&mut state, PlayerId::new(1)));
        assert!(state.end_condition.is_none());
    }

    #[test]
    fn test_clue_starved_floor() {
        let mut state = table_with(&[CharacterId::Insistent, CharacterId::Greedy]);
        state.options.variant = state.options.variant.clone().clue_starved();
        state.character_of_mut(PlayerId::new(0)).unwrap().metadata = CharacterMetadata::Active;

        // One half-token is not enough for a clue.
        state.clue_tokens = 1;
        assert!(check_softlock(&mut state, PlayerId::new(0)));
    }
}
