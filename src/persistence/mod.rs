//! Save/load persistence
//!
//! Features:
//! - Key-value store abstraction (LocalStorage on web, in-memory elsewhere)
//! - Versioned JSON snapshot of settings and card arrangement
//! - Debounced settle-point saves plus periodic backups
//! - Malformed saves treated as absent

pub mod scheduler;
pub mod snapshot;
pub mod store;

pub use scheduler::{SaveReason, SaveScheduler};
pub use snapshot::{
    ContainerRecord, PersistedGameState, clear_game_state, load_game_state, save_game_state,
};
#[cfg(target_arch = "wasm32")]
pub use store::LocalStore;
pub use store::{KeyValueStore, MemoryStore};
