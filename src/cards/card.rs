//! Card records.

use serde::{Deserialize, Serialize};

use crate::core::{Clue, ClueKind};

/// A card in the deck.
///
/// `order` is the card's position in the shuffled deck and doubles as its
/// identity for the whole game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub order: usize,
    pub suit_index: usize,
    pub rank: u8,

    /// Marked by an Insistent clue; the giver must keep touching it until
    /// it leaves the hand.
    #[serde(default)]
    pub insistent_touched: bool,
}

impl Card {
    #[must_use]
    pub fn new(order: usize, suit_index: usize, rank: u8) -> Self {
        Self {
            order,
            suit_index,
            rank,
            insistent_touched: false,
        }
    }

    /// Whether `clue` touches this card.
    ///
    /// ```
    /// use detrimental_characters::cards::Card;
    /// use detrimental_characters::core::{Clue, ClueKind, PlayerId};
    ///
    /// let card = Card::new(0, 2, 5);
    /// let clue = Clue { kind: ClueKind::Rank, value: 5, target: PlayerId::new(1) };
    /// assert!(card.touched_by(&clue));
    /// ```
    #[must_use]
    pub fn touched_by(&self, clue: &Clue) -> bool {
        match clue.kind {
            ClueKind::Color => self.suit_index == usize::from(clue.value),
            ClueKind::Rank => self.rank == clue.value,
        }
    }
}
