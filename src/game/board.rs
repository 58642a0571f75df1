//! Board: the root controller
//!
//! Owns the settings, one lane per configured container, the coin bag and the
//! event bus. Every state change on the page goes through here so events are
//! published from one place.

use super::card::CardIds;
use super::container::{Container, ContainerConfig, MoveOutcome, OrderCheck};
use super::events::{EventBus, GameEvent};
use super::rng::NumberGenerator;
use crate::coins::CoinBag;
use crate::consts::WIN_REWARD;
use crate::error::{ConfigError, MoveError};
use crate::persistence::{ContainerRecord, PersistedGameState};
use crate::settings::Settings;

/// A position on the page: the round in play plus every round won there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lane {
    active: Container,
    history: Vec<Container>,
}

impl Lane {
    fn new(active: Container) -> Self {
        Self {
            active,
            history: Vec::new(),
        }
    }

    pub fn active(&self) -> &Container {
        &self.active
    }

    /// Won containers, oldest first
    pub fn history(&self) -> &[Container] {
        &self.history
    }

    pub fn rounds_won(&self) -> usize {
        self.history.len()
    }
}

#[derive(Debug)]
pub struct Board {
    settings: Settings,
    lanes: Vec<Lane>,
    rng: NumberGenerator,
    ids: CardIds,
    coins: CoinBag,
    bus: EventBus,
}

impl Board {
    /// Deal a fresh board
    pub fn new(settings: Settings, seed: u64) -> Result<Self, ConfigError> {
        settings.validate()?;
        let mut board = Self {
            settings: Settings::default(),
            lanes: Vec::new(),
            rng: NumberGenerator::new(seed),
            ids: CardIds::default(),
            coins: CoinBag::default(),
            bus: EventBus::new(),
        };
        board.lanes = board.deal_lanes(&settings)?;
        board.settings = settings;
        log::info!(
            "Board dealt with seed {} ({} lane(s))",
            seed,
            board.lanes.len()
        );
        Ok(board)
    }

    /// Rebuild from a saved game, or deal defaults if there is none
    pub fn from_saved(saved: Option<&PersistedGameState>, seed: u64) -> Result<Self, ConfigError> {
        match saved {
            Some(state) => Self::restore(state, seed),
            None => Self::new(Settings::default(), seed),
        }
    }

    /// Rebuild from a saved game
    ///
    /// Saved containers that cannot be rebuilt are dropped; a lane left
    /// without a round in play gets a freshly dealt one.
    pub fn restore(state: &PersistedGameState, seed: u64) -> Result<Self, ConfigError> {
        let settings = match state.settings.validate() {
            Ok(()) => state.settings.clone(),
            Err(err) => {
                log::warn!("Saved settings rejected ({}), using defaults", err);
                Settings::default()
            }
        };
        let mut board = Self::new(settings, seed)?;

        let lane_configs = board
            .settings
            .active()
            .iter()
            .map(ContainerConfig::from_settings)
            .collect::<Result<Vec<_>, _>>()?;

        for (index, lane_config) in lane_configs.into_iter().enumerate() {
            let mut active = None;
            let mut history = Vec::new();
            for record in state.containers.iter().filter(|r| r.lane == index) {
                let Some(container) = board.restore_container(record, lane_config) else {
                    log::warn!("Dropping unreadable saved container in lane {}", index);
                    continue;
                };
                if container.is_winner() {
                    history.push(container);
                } else if active.replace(container).is_some() {
                    log::warn!("Lane {} had more than one round in play; keeping the last", index);
                }
            }

            let lane = &mut board.lanes[index];
            lane.history = history;
            if let Some(active) = active {
                lane.active = active;
            }
        }

        let dropped = state
            .containers
            .iter()
            .filter(|r| r.lane >= board.lanes.len())
            .count();
        if dropped > 0 {
            log::warn!("Ignored {} saved container(s) outside the configured lanes", dropped);
        }
        log::info!("Board restored ({} lane(s))", board.lanes.len());
        Ok(board)
    }

    fn restore_container(&mut self, record: &ContainerRecord, lane_config: ContainerConfig) -> Option<Container> {
        // Saves from before attributes were recorded use the lane's settings
        if !record.attributes.is_empty() {
            let saved = record.config().ok()?;
            if saved != lane_config {
                log::warn!("Saved container {:?} does not match its lane {:?}", saved, lane_config);
                return None;
            }
        }
        Container::restore(
            lane_config,
            &record.original_numbers,
            &record.current_order,
            record.is_winner,
            &mut self.ids,
        )
    }

    fn deal_lanes(&mut self, settings: &Settings) -> Result<Vec<Lane>, ConfigError> {
        settings
            .active()
            .iter()
            .map(|container| {
                let config = ContainerConfig::from_settings(container)?;
                Ok(Lane::new(Container::deal(config, &mut self.rng, &mut self.ids)?))
            })
            .collect()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn lane(&self, index: usize) -> Option<&Lane> {
        self.lanes.get(index)
    }

    pub fn coins(&self) -> &CoinBag {
        &self.coins
    }

    /// Install a loaded balance without announcing it
    pub fn set_coin_bag(&mut self, coins: CoinBag) {
        self.coins = coins;
    }

    pub fn reset_coins(&mut self) {
        let change = self.coins.reset();
        self.bus.publish(GameEvent::CoinsChanged(change));
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.bus.subscribe(listener);
    }

    /// Whether the card at `slot` of `lane` can be picked up
    pub fn can_drag(&self, lane: usize, slot: usize) -> bool {
        self.lanes
            .get(lane)
            .map(|l| !l.active.is_winner() && l.active.card_at(slot).is_some())
            .unwrap_or(false)
    }

    /// Replace every lane with a fresh deal for `settings`
    pub fn apply_settings(&mut self, settings: Settings) -> Result<(), ConfigError> {
        settings.validate()?;
        self.lanes = self.deal_lanes(&settings)?;
        self.settings = settings;
        log::info!("Settings applied, {} lane(s) dealt", self.lanes.len());
        self.bus
            .publish(GameEvent::SettingsApplied(self.settings.clone()));
        Ok(())
    }

    /// Move a card within the round in play on `lane`
    ///
    /// A winning move pays out coins and deals the next round into the lane;
    /// the won container moves to the lane's history.
    pub fn move_card(&mut self, lane: usize, from: usize, to: usize) -> Result<MoveOutcome, MoveError> {
        let current = self
            .lanes
            .get_mut(lane)
            .ok_or(MoveError::UnknownLane { lane })?;
        let outcome = current.active.move_card(from, to)?;

        if let Some(result) = outcome.check.result() {
            self.bus.publish(GameEvent::CardsOrdered {
                lane,
                result: result.clone(),
            });
        }
        if let OrderCheck::Won(_) = outcome.check {
            let change = self.coins.add(WIN_REWARD);
            self.bus.publish(GameEvent::CoinsChanged(change));
            self.next_round(lane);
        }
        Ok(outcome)
    }

    fn next_round(&mut self, lane: usize) {
        let config = *self.lanes[lane].active.config();
        match Container::deal(config, &mut self.rng, &mut self.ids) {
            Ok(fresh) => {
                let current = &mut self.lanes[lane];
                let won = std::mem::replace(&mut current.active, fresh);
                current.history.push(won);
                log::info!(
                    "Lane {} starts round {}",
                    lane,
                    current.history.len() + 1
                );
            }
            Err(err) => log::error!("Could not deal next round in lane {}: {}", lane, err),
        }
    }

    /// Everything needed to rebuild the page, history first within each lane
    pub fn snapshot(&self, timestamp: f64) -> PersistedGameState {
        let containers = self
            .lanes
            .iter()
            .enumerate()
            .flat_map(|(index, lane)| {
                lane.history
                    .iter()
                    .chain(std::iter::once(&lane.active))
                    .map(move |c| ContainerRecord::from_container(c, index))
            })
            .collect();
        PersistedGameState::new(self.settings.clone(), containers, timestamp)
    }
}
