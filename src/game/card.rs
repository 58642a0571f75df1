//! Cards and the slots that hold them

use serde::{Deserialize, Serialize};

/// Stable card identity, unique within a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

/// A numbered card
///
/// Cards are never rebuilt when they move between slots, only when a
/// container is dealt again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    id: CardId,
    value: u32,
}

impl Card {
    pub fn new(id: CardId, value: u32) -> Self {
        Self { id, value }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

/// One position in a container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub index: usize,
    pub occupant: Option<Card>,
}

impl Slot {
    pub fn empty(index: usize) -> Self {
        Self {
            index,
            occupant: None,
        }
    }

    pub fn with_card(index: usize, card: Card) -> Self {
        Self {
            index,
            occupant: Some(card),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    pub fn value(&self) -> Option<u32> {
        self.occupant.map(|c| c.value())
    }
}

/// Hands out card ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardIds {
    next: u32,
}

impl CardIds {
    pub fn next_id(&mut self) -> CardId {
        let id = CardId(self.next);
        self.next += 1;
        id
    }
}
