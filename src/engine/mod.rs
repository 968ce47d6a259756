//! Perception, classification, and the critter state machine

pub mod classifier;
pub mod controller;
pub mod critter;
pub mod events;
pub mod perception;
pub mod state;

pub use classifier::classify;
pub use controller::CritterController;
pub use critter::Critter;
pub use events::{TickChannel, TransitionBus, TransitionEvent};
pub use perception::{look_at, Observer, Sighting};
pub use state::{CritterState, CritterStateKind, MovementIntent, StateAction};
