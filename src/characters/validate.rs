//! Action validators.
//!
//! Pure checks run before an action is applied. Each returns `Ok(())` when
//! the action is allowed or a `RuleViolation` naming the reason. None of
//! them touch state, and all of them allow everything when character rules
//! are not active for the game.

use tracing::debug;

use super::metadata::CharacterMetadata;
use super::registry::CharacterId;
use crate::cards::Card;
use crate::core::{Action, ActionKind, ClueKind, GameState, PlayerId, RuleViolation};

type Verdict = Result<(), RuleViolation>;

fn reject(player: PlayerId, character: CharacterId, reason: String) -> Verdict {
    debug!(%player, %character, %reason, "action rejected");
    Err(RuleViolation::new(character, reason))
}

/// Run every check that applies to `action`, in pipeline order.
///
/// `second_action_owed` is the result of the previous
/// `needs_second_turn` call for this player.
pub fn check_action(
    state: &GameState,
    player: PlayerId,
    action: &Action,
    second_action_owed: bool,
) -> Verdict {
    validate_action(state, player, action)?;
    if second_action_owed {
        validate_second_action(state, player, action)?;
    }
    match action.kind {
        ActionKind::ColorClue | ActionKind::RankClue => validate_clue(state, player, action),
        ActionKind::Play => check_play(state, player, action),
        ActionKind::Discard => check_discard(state, player),
    }
}

/// Constraints that apply whatever kind of action is taken.
pub fn validate_action(state: &GameState, player: PlayerId, action: &Action) -> Verdict {
    let Some(me) = state.character_of(player) else {
        return Ok(());
    };
    let character = me.character;

    match (character, me.metadata) {
        (CharacterId::Vindictive, CharacterMetadata::Active) if !action.kind.is_clue() => reject(
            player,
            character,
            format!("You are {character}, so you must give a clue if you have been given a clue on this go-around."),
        ),
        (CharacterId::Insistent, metadata) if metadata.is_active() && !action.kind.is_clue() => reject(
            player,
            character,
            format!("You are {character}, so you must continue to clue the same card until it is played or discarded."),
        ),
        (CharacterId::Impulsive, CharacterMetadata::Active)
            if action.kind != ActionKind::Play
                || state.hand(player).newest() != Some(action.target) =>
        {
            reject(
                player,
                character,
                format!("You are {character}, so you must play your slot 1 card after it has been clued."),
            )
        }
        (CharacterId::Indolent, CharacterMetadata::Active) if action.kind == ActionKind::Play => reject(
            player,
            character,
            format!("You are {character}, so you cannot play a card if you played one in the last round."),
        ),
        (CharacterId::Stubborn, CharacterMetadata::LastAction(previous))
            if action.kind.same_kind_as(previous) =>
        {
            reject(
                player,
                character,
                format!("You are {character}, so you cannot perform the same kind of action that the previous player did."),
            )
        }
        _ => Ok(()),
    }
}

/// Constraints on a forced follow-up action.
pub fn validate_second_action(state: &GameState, player: PlayerId, action: &Action) -> Verdict {
    let Some(me) = state.character_of(player) else {
        return Ok(());
    };
    let character = me.character;

    match (character, me.metadata) {
        (_, CharacterMetadata::Inactive) => Ok(()),
        (CharacterId::Genius, CharacterMetadata::SecondClueTarget(target)) => {
            if action.kind != ActionKind::RankClue {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you must now give a rank clue."),
                );
            }
            if action.clue_target() != Some(target) {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you must give the second clue to the same player."),
                );
            }
            Ok(())
        }
        (CharacterId::Panicky, _) if action.kind != ActionKind::Discard => reject(
            player,
            character,
            format!("You are {character}, so you must discard again since there are 4 or less clues available."),
        ),
        _ => Ok(()),
    }
}

/// Clue restrictions from the giver's and the receiver's characters.
pub fn validate_clue(state: &GameState, player: PlayerId, action: &Action) -> Verdict {
    if !state.characters_active() {
        return Ok(());
    }
    let Some(clue) = action.clue() else {
        return Ok(());
    };
    if clue.target.index() >= state.player_count() {
        return Ok(());
    }

    let hand = state.hand(clue.target);
    let touched = hand.touched_by(&clue, &state.deck);
    let touched_cards = || touched.iter().filter_map(|&order| state.card(order));
    let player_count = state.player_count();

    if let Some(me) = state.character_of(player) {
        let character = me.character;
        match (character, me.metadata) {
            (CharacterId::Fuming, metadata)
                if clue.kind == ClueKind::Color && metadata == CharacterMetadata::Color(clue.value) =>
            {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you can not give that type of clue."),
                );
            }
            (CharacterId::Dumbfounded, metadata)
                if clue.kind == ClueKind::Rank && metadata == CharacterMetadata::Rank(clue.value) =>
            {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you can not give that type of clue."),
                );
            }
            (CharacterId::Inept, CharacterMetadata::Color(suit))
                if touched_cards().any(|c| c.suit_index == usize::from(suit)) =>
            {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you cannot give clues that touch a specific suit."),
                );
            }
            (CharacterId::Awkward, CharacterMetadata::Rank(rank))
                if touched_cards().any(|c| c.rank == rank) =>
            {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you cannot give clues that touch cards with a rank of {rank}."),
                );
            }
            (CharacterId::Conservative, _) if touched.len() != 1 => {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you can only give clues that touch a single card."),
                );
            }
            (CharacterId::Greedy, _) if touched.len() < 2 => {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you can only give clues that touch 2+ cards."),
                );
            }
            (CharacterId::Picky, _)
                if (clue.kind == ClueKind::Rank && clue.value % 2 == 0)
                    || (clue.kind == ClueKind::Color && (clue.value + 1) % 2 == 0) =>
            {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you can only clue odd numbers or odd colors."),
                );
            }
            (CharacterId::Spiteful, _) if clue.target == player.next(player_count) => {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you cannot clue the player to your left."),
                );
            }
            (CharacterId::Insolent, _) if clue.target == player.previous(player_count) => {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you cannot clue the player to your right."),
                );
            }
            (CharacterId::Miser, _) if state.clue_tokens < state.adjusted_clue_tokens(4) => {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you cannot give a clue unless there are 4 or more clues available."),
                );
            }
            (CharacterId::Compulsive, _)
                if !hand.newest_touched_by(&clue, &state.deck)
                    && !hand.oldest_touched_by(&clue, &state.deck) =>
            {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you can only give a clue if it touches either the newest or oldest card in a hand."),
                );
            }
            (CharacterId::MoodSwings, CharacterMetadata::LastClue(previous)) if previous == clue.kind => {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so cannot give the same clue type twice in a row."),
                );
            }
            (CharacterId::Insistent, metadata)
                if metadata.is_active() && !touched_cards().any(|c| c.insistent_touched) =>
            {
                return reject(
                    player,
                    character,
                    format!("You are {character}, so you must continue to clue a card until it is played or discarded."),
                );
            }
            (CharacterId::Genius, CharacterMetadata::Inactive) => {
                if state.clue_tokens < state.adjusted_clue_tokens(2) {
                    return reject(
                        player,
                        character,
                        format!("You are {character}, so there needs to be at least two clues available for you to give a clue."),
                    );
                }
                if clue.kind != ClueKind::Color {
                    return reject(
                        player,
                        character,
                        format!("You are {character}, so you must give a color clue first."),
                    );
                }
            }
            _ => {}
        }
    }

    if let Some(receiver) = state.character_of(clue.target) {
        let character = receiver.character;
        match character {
            CharacterId::Vulnerable
                if clue.kind == ClueKind::Rank && (clue.value == 2 || clue.value == 5) =>
            {
                return reject(
                    player,
                    character,
                    format!("You cannot give a number 2 or number 5 clue to a {character} character."),
                );
            }
            CharacterId::ColorBlind if clue.kind == ClueKind::Color => {
                return reject(
                    player,
                    character,
                    format!("You cannot give that color clue to a {character} character."),
                );
            }
            _ => {}
        }
    }

    Ok(())
}

/// Whether the player may attempt to play the targeted card.
pub fn check_play(state: &GameState, player: PlayerId, action: &Action) -> Verdict {
    let Some(me) = state.character_of(player) else {
        return Ok(());
    };
    let character = me.character;

    if character == CharacterId::Hesitant && state.hand(player).slot_of(action.target) == Some(1) {
        return reject(
            player,
            character,
            format!("You cannot play that card since you are a {character} character."),
        );
    }
    Ok(())
}

/// Whether a play by `player` must fail regardless of the stacks.
///
/// A Follower's card misplays unless at least two stacks already reach
/// the card's rank.
#[must_use]
pub fn should_misplay(state: &GameState, player: PlayerId, card: &Card) -> bool {
    if !state.is_character(player, CharacterId::Follower) {
        return false;
    }
    let played_at_rank = state.stacks.iter().filter(|&&top| top >= card.rank).count();
    played_at_rank < 2
}

/// Whether the player may discard at the current token count.
pub fn check_discard(state: &GameState, player: PlayerId) -> Verdict {
    let Some(me) = state.character_of(player) else {
        return Ok(());
    };
    let character = me.character;
    let tokens = state.clue_tokens;

    match character {
        CharacterId::Anxious if tokens % 2 == 0 => reject(
            player,
            character,
            format!("You are {character}, so you cannot discard when there is an even number of clues available."),
        ),
        CharacterId::Traumatized if tokens % 2 == 1 => reject(
            player,
            character,
            format!("You are {character}, so you cannot discard when there is an odd number of clues available."),
        ),
        CharacterId::Wasteful if tokens >= state.adjusted_clue_tokens(2) => reject(
            player,
            character,
            format!("You are {character}, so you cannot discard if there are 2 or more clues available."),
        ),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characters::PlayerCharacterState;
    use crate::core::{GameOptions, PlayerMap};
    use crate::testing::{standard_deck, table_with};

    fn set_metadata(state: &mut GameState, player: u8, metadata: CharacterMetadata) {
        state.character_of_mut(PlayerId::new(player)).unwrap().metadata = metadata;
    }

    #[test]
    fn test_disabled_allows_everything() {
        let mut state = GameState::new(GameOptions::new(2), standard_deck());
        state.deal(5);
        state.characters = Some(PlayerMap::new(2, |p| {
            PlayerCharacterState::new(p, CharacterId::ColorBlind, CharacterMetadata::Inactive)
        }));
        state.clue_tokens = 0;

        let clue = Action::color_clue(PlayerId::new(1), 0);
        assert!(check_action(&state, PlayerId::new(0), &clue, false).is_ok());
        assert!(check_action(&state, PlayerId::new(0), &Action::discard(0), true).is_ok());
    }

    #[test]
    fn test_vindictive_must_clue() {
        let mut state = table_with(&[CharacterId::Vindictive, CharacterId::Greedy]);
        set_metadata(&mut state, 0, CharacterMetadata::Active);

        let err = validate_action(&state, PlayerId::new(0), &Action::discard(0)).unwrap_err();
        assert_eq!(err.character, CharacterId::Vindictive);
        assert!(validate_action(&state, PlayerId::new(0), &Action::rank_clue(PlayerId::new(1), 1)).is_ok());

        set_metadata(&mut state, 0, CharacterMetadata::Inactive);
        assert!(validate_action(&state, PlayerId::new(0), &Action::discard(0)).is_ok());
    }

    #[test]
    fn test_impulsive_must_play_slot_one() {
        let mut state = table_with(&[CharacterId::Impulsive, CharacterId::Greedy]);
        set_metadata(&mut state, 0, CharacterMetadata::Active);
        let hand = state.hand(PlayerId::new(0)).clone();
        let slot1 = hand.newest().unwrap();
        let slot2 = hand.order_in_slot(2).unwrap();

        assert!(validate_action(&state, PlayerId::new(0), &Action::play(slot1)).is_ok());
        assert!(validate_action(&state, PlayerId::new(0), &Action::play(slot2)).is_err());
        assert!(validate_action(&state, PlayerId::new(0), &Action::discard(slot1)).is_err());
    }

    #[test]
    fn test_indolent_cannot_play_twice() {
        let mut state = table_with(&[CharacterId::Indolent, CharacterId::Greedy]);
        set_metadata(&mut state, 0, CharacterMetadata::Active);
        assert!(validate_action(&state, PlayerId::new(0), &Action::play(0)).is_err());
        assert!(validate_action(&state, PlayerId::new(0), &Action::discard(0)).is_ok());
    }

    #[test]
    fn test_stubborn_treats_clues_alike() {
        let mut state = table_with(&[CharacterId::Stubborn, CharacterId::Greedy]);
        set_metadata(&mut state, 0, CharacterMetadata::LastAction(ActionKind::ColorClue));

        let rank = Action::rank_clue(PlayerId::new(1), 1);
        assert!(validate_action(&state, PlayerId::new(0), &rank).is_err());
        assert!(validate_action(&state, PlayerId::new(0), &Action::play(0)).is_ok());

        set_metadata(&mut state, 0, CharacterMetadata::LastAction(ActionKind::Discard));
        assert!(validate_action(&state, PlayerId::new(0), &Action::discard(0)).is_err());
        assert!(validate_action(&state, PlayerId::new(0), &rank).is_ok());
    }

    #[test]
    fn test_genius_second_clue() {
        let mut state = table_with(&[CharacterId::Genius, CharacterId::Greedy, CharacterId::Miser]);
        set_metadata(&mut state, 0, CharacterMetadata::SecondClueTarget(PlayerId::new(1)));
        let me = PlayerId::new(0);

        let wrong_kind = Action::color_clue(PlayerId::new(1), 0);
        assert_eq!(
            validate_second_action(&state, me, &wrong_kind).unwrap_err().reason,
            "You are Genius, so you must now give a rank clue."
        );

        let wrong_target = Action::rank_clue(PlayerId::new(2), 1);
        assert_eq!(
            validate_second_action(&state, me, &wrong_target).unwrap_err().reason,
            "You are Genius, so you must give the second clue to the same player."
        );

        assert!(validate_second_action(&state, me, &Action::rank_clue(PlayerId::new(1), 1)).is_ok());
    }

    #[test]
    fn test_panicky_must_discard_again() {
        let mut state = table_with(&[CharacterId::Panicky, CharacterId::Greedy]);
        assert!(validate_second_action(&state, PlayerId::new(0), &Action::play(0)).is_ok());

        set_metadata(&mut state, 0, CharacterMetadata::Active);
        assert!(validate_second_action(&state, PlayerId::new(0), &Action::play(0)).is_err());
        assert!(validate_second_action(&state, PlayerId::new(0), &Action::discard(0)).is_ok());
    }

    #[test]
    fn test_hesitant_slot_one() {
        let state = table_with(&[CharacterId::Hesitant, CharacterId::Greedy]);
        let hand = state.hand(PlayerId::new(0));
        let slot1 = hand.newest().unwrap();
        let slot5 = hand.oldest().unwrap();

        assert!(check_play(&state, PlayerId::new(0), &Action::play(slot1)).is_err());
        assert!(check_play(&state, PlayerId::new(0), &Action::play(slot5)).is_ok());
    }

    #[test]
    fn test_follower_misplay() {
        let mut state = table_with(&[CharacterId::Follower, CharacterId::Greedy]);
        let three = Card::new(99, 0, 3);

        state.stacks = vec![3, 0, 0, 0, 0];
        assert!(should_misplay(&state, PlayerId::new(0), &three));

        state.stacks = vec![3, 4, 0, 0, 0];
        assert!(!should_misplay(&state, PlayerId::new(0), &three));

        assert!(!should_misplay(&state, PlayerId::new(1), &Card::new(98, 0, 5)));
    }

    #[test]
    fn test_discard_parity_and_threshold() {
        let mut state = table_with(&[CharacterId::Anxious, CharacterId::Traumatized, CharacterId::Wasteful]);

        state.clue_tokens = 4;
        assert!(check_discard(&state, PlayerId::new(0)).is_err());
        assert!(check_discard(&state, PlayerId::new(1)).is_ok());
        assert!(check_discard(&state, PlayerId::new(2)).is_err());

        state.clue_tokens = 1;
        assert!(check_discard(&state, PlayerId::new(0)).is_ok());
        assert!(check_discard(&state, PlayerId::new(1)).is_err());
        assert!(check_discard(&state, PlayerId::new(2)).is_ok());

        state.clue_tokens = 0;
        assert!(check_discard(&state, PlayerId::new(0)).is_err());
    }
}
