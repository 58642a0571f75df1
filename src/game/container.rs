//! Card container: a row of slots and the win state machine
//!
//! A container starts `Unlocked` and accepts moves. After every move the
//! order is checked; once every slot is filled and the values are monotonic
//! for the configured mode the container becomes `Won` and never accepts
//! another move. The board replaces it with a freshly dealt one.

use serde::{Deserialize, Serialize};

use super::card::{Card, CardIds, Slot};
use super::rng::NumberGenerator;
use crate::consts::*;
use crate::error::{ConfigError, MoveError};
use crate::settings::{ContainerSettings, WinningMode};

/// Validated container configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    pub total_cards: usize,
    pub min_range: u32,
    pub max_range: u32,
    pub mode: WinningMode,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            total_cards: DEFAULT_TOTAL_CARDS,
            min_range: DEFAULT_MIN_RANGE,
            max_range: DEFAULT_MAX_RANGE,
            mode: WinningMode::Ascending,
        }
    }
}

impl ContainerConfig {
    pub fn new(
        total_cards: usize,
        min_range: u32,
        max_range: u32,
        mode: WinningMode,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            total_cards,
            min_range,
            max_range,
            mode,
        };
        config.to_settings().validate()?;
        Ok(config)
    }

    pub fn from_settings(settings: &ContainerSettings) -> Result<Self, ConfigError> {
        Self::new(
            settings.cards,
            settings.min_range,
            settings.max_range,
            settings.winning_mode,
        )
    }

    pub fn to_settings(&self) -> ContainerSettings {
        ContainerSettings::new(self.total_cards, self.min_range, self.max_range, self.mode)
    }

    /// Build from element-style attributes (`total-cards`, `min-range`,
    /// `max-range`, `winning-mode`)
    ///
    /// Absent or unparseable attributes take their defaults; the result is
    /// then validated like any other config.
    pub fn from_attributes<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let number = |name: &str| get(name).and_then(|v| v.trim().parse::<u32>().ok());

        let total_cards = number("total-cards")
            .map(|n| n as usize)
            .unwrap_or(defaults.total_cards);
        let min_range = number("min-range").unwrap_or(defaults.min_range);
        let max_range = number("max-range").unwrap_or(defaults.max_range);
        let mode = get("winning-mode")
            .and_then(|m| WinningMode::from_str(&m))
            .unwrap_or(defaults.mode);

        Self::new(total_cards, min_range, max_range, mode)
    }

    /// Attribute pairs matching `from_attributes`
    pub fn attributes(&self) -> [(&'static str, String); 4] {
        [
            ("total-cards", self.total_cards.to_string()),
            ("min-range", self.min_range.to_string()),
            ("max-range", self.max_range.to_string()),
            ("winning-mode", self.mode.as_str().to_string()),
        ]
    }
}

/// Lifecycle of a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerPhase {
    /// Accepting moves
    Unlocked,
    /// Sorted; terminal
    Won,
}

/// Values read from a full container and whether they won
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResult {
    pub values: Vec<u32>,
    pub mode: WinningMode,
    pub is_winner: bool,
}

/// Outcome of an order check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderCheck {
    /// At least one slot is empty; nothing evaluated
    Incomplete,
    /// Container was already won; nothing evaluated
    AlreadyWon,
    /// Full but out of order
    Unordered(OrderResult),
    /// Full and in order; container is now locked
    Won(OrderResult),
}

impl OrderCheck {
    /// The evaluated result, if the check ran
    pub fn result(&self) -> Option<&OrderResult> {
        match self {
            OrderCheck::Unordered(r) | OrderCheck::Won(r) => Some(r),
            _ => None,
        }
    }

    pub fn is_win(&self) -> bool {
        matches!(self, OrderCheck::Won(_))
    }
}

/// What a move did to the slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Card moved into an empty slot
    Relocated,
    /// Two cards traded places
    Swapped,
    /// Dropped back on its own slot
    Unchanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub kind: MoveKind,
    pub check: OrderCheck,
}

/// Summary shown under a container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerStats {
    pub count: usize,
    pub min: u32,
    pub max: u32,
}

/// True if `values` never break `mode` between neighbours
pub fn is_ordered(values: &[u32], mode: WinningMode) -> bool {
    values.windows(2).all(|w| mode.in_order(w[0], w[1]))
}

/// A fixed-size row of card slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    config: ContainerConfig,
    slots: Vec<Slot>,
    /// Values as generated, before dealing
    original_numbers: Vec<u32>,
    phase: ContainerPhase,
}

impl Container {
    /// Generate fresh values and deal them into the slots
    ///
    /// A deal that would already be solved is reshuffled, so a new round
    /// never starts won unless every value is equal.
    pub fn deal(
        config: ContainerConfig,
        rng: &mut NumberGenerator,
        ids: &mut CardIds,
    ) -> Result<Self, ConfigError> {
        let original = rng.generate(config.total_cards, config.min_range, config.max_range)?;
        let mut arrangement = original.clone();

        let distinct = original.iter().any(|v| *v != original[0]);
        if distinct {
            let mut attempts = 0;
            loop {
                rng.shuffle(&mut arrangement);
                attempts += 1;
                if !is_ordered(&arrangement, config.mode) {
                    break;
                }
                if attempts >= MAX_DEAL_ATTEMPTS {
                    // Sorted one way reads unsorted the other way
                    arrangement.reverse();
                    break;
                }
            }
        }

        let mut container = Self::from_values(config, &arrangement, ids);
        container.original_numbers = original;
        Ok(container)
    }

    /// Lay `values` out left to right; slots beyond `values` stay empty
    pub fn from_values(config: ContainerConfig, values: &[u32], ids: &mut CardIds) -> Self {
        let slots = (0..config.total_cards)
            .map(|index| match values.get(index) {
                Some(&value) => Slot::with_card(index, Card::new(ids.next_id(), value)),
                None => Slot::empty(index),
            })
            .collect();
        Self {
            config,
            slots,
            original_numbers: values.iter().copied().take(config.total_cards).collect(),
            phase: ContainerPhase::Unlocked,
        }
    }

    /// Rebuild a saved container
    ///
    /// Returns `None` unless `current_order` is a rearrangement of
    /// `original_numbers` and both fill every slot. Cards never leave a
    /// container, so a short save could never be completed.
    pub fn restore(
        config: ContainerConfig,
        original_numbers: &[u32],
        current_order: &[u32],
        is_winner: bool,
        ids: &mut CardIds,
    ) -> Option<Self> {
        if original_numbers.len() != config.total_cards || current_order.len() != original_numbers.len() {
            return None;
        }
        let mut pool = original_numbers.to_vec();
        for value in current_order {
            let pos = pool.iter().position(|v| v == value)?;
            pool.swap_remove(pos);
        }

        let mut container = Self::from_values(config, current_order, ids);
        container.original_numbers = original_numbers.to_vec();

        if is_winner {
            match container.full_values() {
                Some(values) if is_ordered(&values, config.mode) => {
                    container.phase = ContainerPhase::Won;
                }
                _ => log::warn!("Saved container marked as won is not sorted; unlocking it"),
            }
        }
        Some(container)
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    pub fn mode(&self) -> WinningMode {
        self.config.mode
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn phase(&self) -> ContainerPhase {
        self.phase
    }

    pub fn is_winner(&self) -> bool {
        self.phase == ContainerPhase::Won
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(|s| !s.is_empty())
    }

    pub fn card_at(&self, index: usize) -> Option<&Card> {
        self.slots.get(index).and_then(|s| s.occupant.as_ref())
    }

    pub fn original_numbers(&self) -> &[u32] {
        &self.original_numbers
    }

    /// Occupied values in slot order (empty slots skipped)
    pub fn current_order(&self) -> Vec<u32> {
        self.slots.iter().filter_map(Slot::value).collect()
    }

    /// Every slot's value, or `None` if any slot is empty
    fn full_values(&self) -> Option<Vec<u32>> {
        self.slots.iter().map(Slot::value).collect()
    }

    /// Evaluate the current arrangement and lock the container if it wins
    pub fn check_order(&mut self) -> OrderCheck {
        if self.phase == ContainerPhase::Won {
            return OrderCheck::AlreadyWon;
        }
        let Some(values) = self.full_values() else {
            return OrderCheck::Incomplete;
        };

        let mode = self.config.mode;
        let is_winner = is_ordered(&values, mode);
        let result = OrderResult {
            values,
            mode,
            is_winner,
        };
        if is_winner {
            self.phase = ContainerPhase::Won;
            log::info!("Container won: {:?} ({})", result.values, mode.as_str());
            OrderCheck::Won(result)
        } else {
            OrderCheck::Unordered(result)
        }
    }

    /// Move the card in `from` to `to`, swapping if `to` is occupied
    pub fn move_card(&mut self, from: usize, to: usize) -> Result<MoveOutcome, MoveError> {
        if self.phase == ContainerPhase::Won {
            return Err(MoveError::Locked);
        }
        let len = self.slots.len();
        for index in [from, to] {
            if index >= len {
                return Err(MoveError::SlotOutOfRange { index, len });
            }
        }
        if self.slots[from].is_empty() {
            return Err(MoveError::EmptySource { index: from });
        }

        let kind = if from == to {
            MoveKind::Unchanged
        } else {
            let moving = self.slots[from].occupant.take();
            let displaced = std::mem::replace(&mut self.slots[to].occupant, moving);
            self.slots[from].occupant = displaced;
            if displaced.is_some() {
                MoveKind::Swapped
            } else {
                MoveKind::Relocated
            }
        };
        log::debug!("Moved slot {} -> {} ({:?})", from, to, kind);

        Ok(MoveOutcome {
            kind,
            check: self.check_order(),
        })
    }

    pub fn stats(&self) -> Option<ContainerStats> {
        let values = self.current_order();
        Some(ContainerStats {
            count: values.len(),
            min: *values.iter().min()?,
            max: *values.iter().max()?,
        })
    }
}
