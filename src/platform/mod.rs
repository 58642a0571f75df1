//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time
//! - Storage (LocalStorage on web, memory on native)
//! - Seeds for the card generator

use crate::error::StorageError;
use crate::persistence::KeyValueStore;

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

/// Seed for a new board
pub fn clock_seed() -> u64 {
    now_ms() as u64
}

/// The page's persistent store
#[cfg(target_arch = "wasm32")]
pub fn open_store() -> Result<Box<dyn KeyValueStore>, StorageError> {
    Ok(Box::new(crate::persistence::LocalStore::open()?))
}

/// Native runs keep everything in memory
#[cfg(not(target_arch = "wasm32"))]
pub fn open_store() -> Result<Box<dyn KeyValueStore>, StorageError> {
    Ok(Box::new(crate::persistence::MemoryStore::new()))
}
