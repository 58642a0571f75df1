//! Coin rewards
//!
//! Persisted under its own key so coins survive a cleared saved game.

use serde::{Deserialize, Serialize};

use crate::consts::COINS_KEY;
use crate::error::StorageError;
use crate::persistence::KeyValueStore;

/// Payload of a coin balance change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinsChanged {
    /// Balance after the change
    pub coins: u64,
    /// Amount added, if this was a reward
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<u64>,
    /// Set when the balance was reset to zero
    #[serde(default)]
    pub reset: bool,
}

/// The player's coin balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoinBag {
    coins: u64,
}

impl CoinBag {
    pub fn new(coins: u64) -> Self {
        Self { coins }
    }

    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Add a reward
    pub fn add(&mut self, amount: u64) -> CoinsChanged {
        self.coins = self.coins.saturating_add(amount);
        CoinsChanged {
            coins: self.coins,
            added: Some(amount),
            reset: false,
        }
    }

    /// Overwrite the balance
    pub fn set(&mut self, coins: u64) -> CoinsChanged {
        self.coins = coins;
        CoinsChanged {
            coins,
            added: None,
            reset: false,
        }
    }

    pub fn reset(&mut self) -> CoinsChanged {
        self.coins = 0;
        CoinsChanged {
            coins: 0,
            added: None,
            reset: true,
        }
    }

    /// Load the balance; anything missing or unreadable counts as zero
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(COINS_KEY) {
            Ok(Some(raw)) => match raw.trim().parse::<u64>() {
                Ok(coins) => {
                    log::info!("Loaded {} coins", coins);
                    Self::new(coins)
                }
                Err(_) => {
                    log::warn!("Stored coin balance {:?} is not a number, starting at 0", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No coins found, starting fresh");
                Self::default()
            }
            Err(err) => {
                log::error!("Failed to load coins: {}", err);
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(COINS_KEY, &self.coins.to_string())?;
        log::debug!("Coins saved ({})", self.coins);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_add_set_reset() {
        let mut bag = CoinBag::default();
        assert_eq!(
            bag.add(10),
            CoinsChanged {
                coins: 10,
                added: Some(10),
                reset: false
            }
        );
        bag.add(10);
        assert_eq!(bag.coins(), 20);
        assert_eq!(bag.set(5).coins, 5);
        let change = bag.reset();
        assert!(change.reset);
        assert_eq!(bag.coins(), 0);
    }

    #[test]
    fn test_saturates() {
        let mut bag = CoinBag::new(u64::MAX - 1);
        assert_eq!(bag.add(10).coins, u64::MAX);
    }

    #[test]
    fn test_load_and_save() {
        let mut store = MemoryStore::new();
        assert_eq!(CoinBag::load(&store).coins(), 0);

        CoinBag::new(30).save(&mut store).unwrap();
        assert_eq!(store.get(COINS_KEY).unwrap().as_deref(), Some("30"));
        assert_eq!(CoinBag::load(&store).coins(), 30);

        store.set(COINS_KEY, "lots").unwrap();
        assert_eq!(CoinBag::load(&store).coins(), 0);
    }

    #[test]
    fn test_event_json_omits_missing_amount() {
        let json = serde_json::to_string(&CoinBag::new(3).set(3)).unwrap();
        assert_eq!(json, r#"{"coins":3,"reset":false}"#);
    }
}
