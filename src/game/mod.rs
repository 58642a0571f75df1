//! Game logic
//!
//! Everything the page needs to play, with no browser dependencies:
//! - Seeded card generation
//! - Containers and the win state machine
//! - Drag sessions over a slot layout
//! - The board controller and its events

pub mod board;
pub mod card;
pub mod container;
pub mod drag;
pub mod events;
pub mod rng;

pub use board::{Board, Lane};
pub use card::{Card, CardId, CardIds, Slot};
pub use container::{
    Container, ContainerConfig, ContainerPhase, ContainerStats, MoveKind, MoveOutcome, OrderCheck,
    OrderResult, is_ordered,
};
pub use drag::{
    DragController, DragFeedback, DragSession, PointerInput, PointerPhase, PointerSource,
    SlotLayout, SlotRef,
};
pub use events::{EventBus, GameEvent};
pub use rng::NumberGenerator;
