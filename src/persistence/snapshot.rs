//! Saved game schema
//!
//! Stored as JSON under `orderGameState`. A save that does not parse, lacks
//! `settings` or `containers`, or carries invalid settings loads as absent and
//! the caller starts from defaults; nothing is partially restored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::store::KeyValueStore;
use crate::consts::{GAME_STATE_KEY, STATE_VERSION};
use crate::error::{ConfigError, StorageError};
use crate::game::{Container, ContainerConfig};
use crate::settings::Settings;

/// One container as saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRecord {
    /// Values as generated
    pub original_numbers: Vec<u32>,
    /// Values in slot order at save time
    pub current_order: Vec<u32>,
    /// Element attributes (`total-cards`, `min-range`, `max-range`, `winning-mode`)
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub is_winner: bool,
    /// Page position the container was dealt in
    #[serde(default)]
    pub lane: usize,
}

impl ContainerRecord {
    pub fn from_container(container: &Container, lane: usize) -> Self {
        Self {
            original_numbers: container.original_numbers().to_vec(),
            current_order: container.current_order(),
            attributes: container
                .config()
                .attributes()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            is_winner: container.is_winner(),
            lane,
        }
    }

    /// Parse the saved attributes, defaulting what is missing
    pub fn config(&self) -> Result<ContainerConfig, ConfigError> {
        ContainerConfig::from_attributes(|name| self.attributes.get(name).cloned())
    }
}

/// Everything needed to rebuild the page after a reload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedGameState {
    pub settings: Settings,
    pub containers: Vec<ContainerRecord>,
    /// Milliseconds since the epoch
    #[serde(default)]
    pub timestamp: f64,
    #[serde(default)]
    pub version: String,
}

impl PersistedGameState {
    pub fn new(settings: Settings, containers: Vec<ContainerRecord>, timestamp: f64) -> Self {
        Self {
            settings,
            containers,
            timestamp,
            version: STATE_VERSION.to_string(),
        }
    }
}

/// Write the snapshot
pub fn save_game_state(
    store: &mut dyn KeyValueStore,
    state: &PersistedGameState,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(state)?;
    store.set(GAME_STATE_KEY, &json)?;
    log::info!("Game state saved ({} containers)", state.containers.len());
    Ok(())
}

/// Read the snapshot, or `None` if absent or unusable
pub fn load_game_state(store: &dyn KeyValueStore) -> Option<PersistedGameState> {
    let json = match store.get(GAME_STATE_KEY) {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::info!("No saved game found");
            return None;
        }
        Err(err) => {
            log::error!("Failed to load game state: {}", err);
            return None;
        }
    };

    let state: PersistedGameState = match serde_json::from_str(&json) {
        Ok(state) => state,
        Err(err) => {
            log::warn!("Saved game is malformed, ignoring it: {}", err);
            return None;
        }
    };
    if let Err(err) = state.settings.validate() {
        log::warn!("Saved game has invalid settings, ignoring it: {}", err);
        return None;
    }

    log::info!(
        "Loaded saved game (version {:?}, {} containers)",
        state.version,
        state.containers.len()
    );
    Some(state)
}

pub fn clear_game_state(store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
    store.remove(GAME_STATE_KEY)?;
    log::info!("Saved game cleared");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CardIds;
    use crate::consts::MAX_CARDS;
    use crate::persistence::MemoryStore;
    use crate::settings::{ContainerSettings, WinningMode};
    use proptest::prelude::*;

    fn sample_state() -> PersistedGameState {
        let settings = Settings::new(vec![
            ContainerSettings::new(3, 0, 10, WinningMode::Ascending),
            ContainerSettings::new(4, 0, 50, WinningMode::Descending),
        ]);
        let mut ids = CardIds::default();
        let won = ContainerConfig::new(3, 0, 10, WinningMode::Ascending).unwrap();
        let won = Container::restore(won, &[7, 2, 4], &[2, 4, 7], true, &mut ids).unwrap();
        let open = ContainerConfig::new(4, 0, 50, WinningMode::Descending).unwrap();
        let open = Container::from_values(open, &[10, 40, 30, 20], &mut ids);
        PersistedGameState::new(
            settings,
            vec![
                ContainerRecord::from_container(&won, 0),
                ContainerRecord::from_container(&open, 1),
            ],
            1_700_000_000_000.0,
        )
    }

    #[test]
    fn test_empty_store_loads_nothing() {
        assert_eq!(load_game_state(&MemoryStore::new()), None);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let mut store = MemoryStore::new();
        let state = sample_state();
        save_game_state(&mut store, &state).unwrap();
        assert_eq!(load_game_state(&store), Some(state));
    }

    #[test]
    fn test_saved_json_shape() {
        let json = serde_json::to_value(sample_state()).unwrap();
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["settings"]["numberOfContainers"], 2);
        let first = &json["containers"][0];
        assert_eq!(first["originalNumbers"], serde_json::json!([7, 2, 4]));
        assert_eq!(first["currentOrder"], serde_json::json!([2, 4, 7]));
        assert_eq!(first["isWinner"], true);
        assert_eq!(first["attributes"]["winning-mode"], "asc");
        assert_eq!(first["attributes"]["total-cards"], "3");
    }

    #[test]
    fn test_missing_required_fields_load_as_absent() {
        let mut store = MemoryStore::new();
        store
            .set(GAME_STATE_KEY, r#"{"containers":[],"timestamp":1}"#)
            .unwrap();
        assert_eq!(load_game_state(&store), None);

        store
            .set(GAME_STATE_KEY, r#"{"settings":{"numberOfContainers":1,"containers":[{"cards":5,"minRange":0,"maxRange":100}]}}"#)
            .unwrap();
        assert_eq!(load_game_state(&store), None);

        store.set(GAME_STATE_KEY, "not json").unwrap();
        assert_eq!(load_game_state(&store), None);
    }

    #[test]
    fn test_invalid_settings_load_as_absent() {
        let mut store = MemoryStore::new();
        store
            .set(
                GAME_STATE_KEY,
                r#"{"settings":{"numberOfContainers":3,"containers":[{"cards":5,"minRange":0,"maxRange":100}]},"containers":[]}"#,
            )
            .unwrap();
        assert_eq!(load_game_state(&store), None);
    }

    #[test]
    fn test_older_shape_gets_defaults() {
        let mut store = MemoryStore::new();
        store
            .set(
                GAME_STATE_KEY,
                r#"{"settings":{"numberOfContainers":1,"containers":[{"cards":3,"minRange":0,"maxRange":9,"winningMode":"desc"}]},
                   "containers":[{"originalNumbers":[1,2,3],"currentOrder":[3,2,1],"isWinner":false}]}"#,
            )
            .unwrap();
        let state = load_game_state(&store).unwrap();
        assert_eq!(state.version, "");
        assert_eq!(state.containers[0].lane, 0);
        assert_eq!(state.containers[0].config(), Ok(ContainerConfig::default()));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut store = MemoryStore::read_only();
        assert!(save_game_state(&mut store, &sample_state()).is_err());
        assert!(clear_game_state(&mut store).is_err());
    }

    #[test]
    fn test_clear() {
        let mut store = MemoryStore::new();
        save_game_state(&mut store, &sample_state()).unwrap();
        clear_game_state(&mut store).unwrap();
        assert_eq!(load_game_state(&store), None);
    }

    fn container_settings() -> impl Strategy<Value = ContainerSettings> {
        (1usize..=MAX_CARDS, 0u32..500, 0u32..500, any::<bool>()).prop_map(
            |(cards, min, span, descending)| {
                let mode = if descending { WinningMode::Descending } else { WinningMode::Ascending };
                ContainerSettings::new(cards, min, min + span, mode)
            },
        )
    }

    fn record(lanes: usize) -> impl Strategy<Value = ContainerRecord> {
        (container_settings(), 0..lanes, any::<bool>()).prop_flat_map(|(settings, lane, is_winner)| {
            let values = prop::collection::vec(settings.min_range..=settings.max_range, settings.cards);
            (values, Just(settings), Just(lane), Just(is_winner))
        })
        .prop_flat_map(|(values, settings, lane, is_winner)| {
            (Just(values.clone()), Just(values).prop_shuffle(), Just(settings), Just(lane), Just(is_winner))
        })
        .prop_map(|(original_numbers, current_order, settings, lane, is_winner)| {
            let attributes = ContainerConfig::from_settings(&settings)
                .unwrap()
                .attributes()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect();
            ContainerRecord {
                original_numbers,
                current_order,
                attributes,
                is_winner,
                lane,
            }
        })
    }

    fn game_state() -> impl Strategy<Value = PersistedGameState> {
        prop::collection::vec(container_settings(), 1..4)
            .prop_flat_map(|containers| {
                let len = containers.len();
                (Just(containers), 1..=len, prop::collection::vec(record(len), 0..6), 0u64..4_000_000_000_000)
            })
            .prop_map(|(containers, count, records, timestamp)| {
                let mut settings = Settings::new(containers);
                settings.number_of_containers = count;
                PersistedGameState::new(settings, records, timestamp as f64)
            })
    }

    proptest! {
        #[test]
        fn saved_games_load_back_unchanged(state in game_state()) {
            let mut store = MemoryStore::new();
            save_game_state(&mut store, &state).unwrap();
            prop_assert_eq!(load_game_state(&store), Some(state));
        }
    }
}
