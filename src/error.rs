//! Error types
//!
//! Nothing here is fatal: callers log storage failures and carry on with the
//! in-memory state, reject bad settings while keeping the previous ones, and
//! ignore rejected moves.

use thiserror::Error;

/// Invalid settings or container configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("card count {count} is outside 1..=8")]
    CardCount { count: usize },
    #[error("min range {min} is greater than max range {max}")]
    InvertedRange { min: u32, max: u32 },
    #[error("container count {requested} must be between 1 and {available}")]
    ContainerCount { requested: usize, available: usize },
}

/// Persistent store failure
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("failed to encode stored value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A move that was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("container is locked after a win")]
    Locked,
    #[error("slot {index} is out of range (container has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },
    #[error("slot {index} has no card to move")]
    EmptySource { index: usize },
    #[error("lane {lane} does not exist")]
    UnknownLane { lane: usize },
}
