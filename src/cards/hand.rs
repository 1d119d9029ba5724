//! Hands and slot arithmetic.
//!
//! Cards are stored oldest first. Slots are numbered from the newest card:
//! slot 1 is the card drawn most recently, slot `len` is the oldest.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Card;
use crate::core::Clue;

/// Card orders touched by a clue, oldest first.
pub type TouchedCards = SmallVec<[usize; 6]>;

/// A player's hand: card orders, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    orders: Vec<usize>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hand from orders, oldest first.
    #[must_use]
    pub fn from_orders(orders: impl IntoIterator<Item = usize>) -> Self {
        Self {
            orders: orders.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Card orders, oldest first.
    #[must_use]
    pub fn orders(&self) -> &[usize] {
        &self.orders
    }

    #[must_use]
    pub fn contains(&self, order: usize) -> bool {
        self.orders.contains(&order)
    }

    /// Add a freshly drawn card; it becomes slot 1.
    pub fn push(&mut self, order: usize) {
        self.orders.push(order);
    }

    /// Remove a card. Returns false if it was not in this hand.
    pub fn remove(&mut self, order: usize) -> bool {
        match self.orders.iter().position(|&o| o == order) {
            Some(index) => {
                self.orders.remove(index);
                true
            }
            None => false,
        }
    }

    /// The 1-based slot of a card, if it is in this hand.
    ///
    /// ```
    /// use detrimental_characters::cards::Hand;
    ///
    /// let hand = Hand::from_orders([10, 11, 12]);
    /// assert_eq!(hand.slot_of(12), Some(1));
    /// assert_eq!(hand.slot_of(10), Some(3));
    /// assert_eq!(hand.slot_of(99), None);
    /// ```
    #[must_use]
    pub fn slot_of(&self, order: usize) -> Option<usize> {
        self.orders
            .iter()
            .position(|&o| o == order)
            .map(|index| self.orders.len() - index)
    }

    /// The card order in a 1-based slot.
    #[must_use]
    pub fn order_in_slot(&self, slot: usize) -> Option<usize> {
        if slot == 0 || slot > self.orders.len() {
            return None;
        }
        Some(self.orders[self.orders.len() - slot])
    }

    /// Slot 1.
    #[must_use]
    pub fn newest(&self) -> Option<usize> {
        self.orders.last().copied()
    }

    #[must_use]
    pub fn oldest(&self) -> Option<usize> {
        self.orders.first().copied()
    }

    /// Orders of every card in this hand that `clue` touches.
    #[must_use]
    pub fn touched_by(&self, clue: &Clue, deck: &[Card]) -> TouchedCards {
        self.orders
            .iter()
            .copied()
            .filter(|&order| deck.get(order).is_some_and(|c| c.touched_by(clue)))
            .collect()
    }

    /// Whether `clue` touches slot 1.
    #[must_use]
    pub fn newest_touched_by(&self, clue: &Clue, deck: &[Card]) -> bool {
        self.newest()
            .and_then(|order| deck.get(order))
            .is_some_and(|c| c.touched_by(clue))
    }

    /// Whether `clue` touches the oldest card.
    #[must_use]
    pub fn oldest_touched_by(&self, clue: &Clue, deck: &[Card]) -> bool {
        self.oldest()
            .and_then(|order| deck.get(order))
            .is_some_and(|c| c.touched_by(clue))
    }
}
