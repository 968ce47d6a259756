//! Concrete species policies injected into the generic state machine

pub mod robot;
pub mod spinner;

pub use robot::{robot_controller, ROBOT_SPECIES};
pub use spinner::{spinner_controller, SPINNER_SPECIES};
