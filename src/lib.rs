//! Card Order - drag numbered cards into order
//!
//! Core modules:
//! - `game`: Seeded, platform-free game logic (cards, containers, drag, board)
//! - `settings`: Typed game settings and the settings panel model
//! - `persistence`: Key-value storage, saved game schema, save scheduling
//! - `coins`: Coin rewards for won rounds
//! - `theme`: Light/dark theme preference
//! - `platform`: Browser/native platform abstraction

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod coins;
pub mod error;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod theme;

pub use coins::{CoinBag, CoinsChanged};
pub use error::{ConfigError, MoveError, StorageError};
pub use game::{Board, Container, GameEvent};
pub use settings::{ContainerSettings, Settings, SettingsPanel, WinningMode};
pub use theme::Theme;

/// Game configuration constants
pub mod consts {
    /// Most cards a single container can hold
    pub const MAX_CARDS: usize = 8;
    /// Fewest cards a container can be configured with
    pub const MIN_CARDS: usize = 1;

    /// Container attribute defaults (`total-cards`, `min-range`, `max-range`)
    pub const DEFAULT_TOTAL_CARDS: usize = 5;
    pub const DEFAULT_MIN_RANGE: u32 = 0;
    pub const DEFAULT_MAX_RANGE: u32 = 100;

    /// Coins awarded for each won round
    pub const WIN_REWARD: u64 = 10;

    /// Quiet period before a settle point is written (ms)
    pub const SAVE_DEBOUNCE_MS: f64 = 500.0;
    /// Periodic backup save interval (ms)
    pub const BACKUP_INTERVAL_MS: f64 = 30_000.0;

    /// Shuffle attempts before accepting an already-solved deal
    pub const MAX_DEAL_ATTEMPTS: u32 = 8;

    /// Storage keys
    pub const GAME_STATE_KEY: &str = "orderGameState";
    pub const THEME_KEY: &str = "theme";
    pub const COINS_KEY: &str = "gameCoins";

    /// Saved game schema version
    pub const STATE_VERSION: &str = "1.0.0";
}
