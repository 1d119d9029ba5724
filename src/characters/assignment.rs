//! Character assignment at game start.
//!
//! Two paths:
//! - **Explicit**: one `{name, metadata}` pair per seat, taken verbatim
//!   (replays, tests). No eligibility or uniqueness checks.
//! - **Seeded**: for each seat in order, draw uniformly from the whole
//!   table, rejecting characters already taken or ineligible at this
//!   player count, then draw any fixed starting metadata.
//!
//! The random source is a parameter. `assign_characters_from_seed` builds
//! the game's own generator from its seed so that replays reproduce the
//! same draws.

use tracing::{debug, error};

use super::metadata::{CharacterMetadata, PlayerCharacterState};
use super::registry::{CharacterId, CharacterRegistry};
use crate::core::{CharacterError, GameRng, GameState, PlayerId, PlayerMap, RandomSource};

/// Assign characters using a fresh generator seeded from the game seed.
pub fn assign_characters_from_seed(state: &mut GameState) -> Result<(), CharacterError> {
    let mut rng = GameRng::new(state.options.seed);
    assign_characters(state, &mut rng)
}

/// Assign one character per seat.
///
/// Does nothing when characters are disabled. On error nothing is
/// assigned; the caller must not start the game with characters enabled.
pub fn assign_characters(
    state: &mut GameState,
    rng: &mut impl RandomSource,
) -> Result<(), CharacterError> {
    if !state.options.detrimental_characters {
        return Ok(());
    }

    let assigned = match state.options.explicit_assignments() {
        Some(_) => explicit_assignment(state)?,
        None => seeded_assignment(state, rng)?,
    };

    for character in assigned.values() {
        debug!(
            player = %state.players[character.player].name,
            character = %character.character,
            metadata = character.metadata.to_raw(),
            "assigned character"
        );
    }
    state.characters = Some(assigned);
    Ok(())
}

fn explicit_assignment(state: &GameState) -> Result<PlayerMap<PlayerCharacterState>, CharacterError> {
    let list = state.options.explicit_assignments().unwrap_or_default();
    let players = state.player_count();

    if list.len() != players {
        error!(
            "There are {} predefined characters, but there are {} players in the game.",
            list.len(),
            players
        );
        return Err(CharacterError::AssignmentCountMismatch {
            assignments: list.len(),
            players,
        });
    }

    let registry = CharacterRegistry::standard();
    let states = PlayerId::all(players)
        .zip(list)
        .map(|(player, entry)| {
            let character = registry.lookup(&entry.name).ok_or_else(|| {
                error!(name = %entry.name, "unknown predefined character");
                CharacterError::UnknownCharacter(entry.name.clone())
            })?;
            Ok(PlayerCharacterState::from_raw(player, character, entry.metadata))
        })
        .collect::<Result<Vec<_>, CharacterError>>()?;

    Ok(PlayerMap::from_vec(states))
}

fn seeded_assignment(
    state: &GameState,
    rng: &mut impl RandomSource,
) -> Result<PlayerMap<PlayerCharacterState>, CharacterError> {
    let registry = CharacterRegistry::standard();
    let players = state.player_count();
    let table: Vec<CharacterId> = registry.ids().collect();

    let available = table.iter().filter(|&&id| registry.eligible(id, players)).count();
    if players > available {
        error!(players, available, "not enough eligible characters");
        return Err(CharacterError::NotEnoughCharacters { players, available });
    }

    let mut states: Vec<PlayerCharacterState> = Vec::with_capacity(players);
    for player in PlayerId::all(players) {
        let character = loop {
            let candidate = table[rng.below(table.len())];
            if states.iter().any(|s| s.character == candidate) {
                continue;
            }
            if !registry.eligible(candidate, players) {
                continue;
            }
            break candidate;
        };

        let metadata = starting_metadata(character, state, rng);
        states.push(PlayerCharacterState::new(player, character, metadata));
    }

    Ok(PlayerMap::from_vec(states))
}

/// Fixed per-game values for the characters that have one.
fn starting_metadata(
    character: CharacterId,
    state: &GameState,
    rng: &mut impl RandomSource,
) -> CharacterMetadata {
    match character {
        CharacterId::Fuming | CharacterId::Inept => {
            let colors = state.options.variant.clue_color_count.max(1);
            CharacterMetadata::Color(rng.below(colors) as u8)
        }
        CharacterId::Dumbfounded | CharacterId::Awkward => {
            CharacterMetadata::Rank(rng.below(4) as u8 + 1)
        }
        _ => CharacterMetadata::Inactive,
    }
}
