//! Spinner species policy
//!
//! Spins in place by default, backs off walls, and charges foes while
//! spinning faster.

use crate::core::error::Result;
use crate::engine::controller::CritterController;
use crate::engine::state::{CritterState, CritterStateKind, MovementIntent, StateAction};

/// Species name carried by every spinner
pub const SPINNER_SPECIES: &str = "spinner";

/// Normal: just spin, as the name suggests
struct SpinnerNormal;

impl StateAction for SpinnerNormal {
    fn act(&mut self) -> MovementIntent {
        MovementIntent::new(0.0, 5.0)
    }
}

/// Ally: same as Normal
struct SpinnerAlly;

impl StateAction for SpinnerAlly {
    fn act(&mut self) -> MovementIntent {
        MovementIntent::new(0.0, 5.0)
    }
}

/// Wall: back away and try to stop spinning
struct SpinnerWall;

impl StateAction for SpinnerWall {
    fn act(&mut self) -> MovementIntent {
        MovementIntent::new(-5.0, -5.0)
    }
}

/// Attack: zoom toward the other critter, spinning quickly
struct SpinnerAttack;

impl StateAction for SpinnerAttack {
    fn act(&mut self) -> MovementIntent {
        MovementIntent::new(10.0, 20.0)
    }
}

/// Build a fully wired spinner controller
pub fn spinner_controller() -> Result<CritterController> {
    let mut controller = CritterController::new();
    controller.attach_states(
        CritterState::new(CritterStateKind::Normal, Box::new(SpinnerNormal)),
        CritterState::new(CritterStateKind::Ally, Box::new(SpinnerAlly)),
        CritterState::new(CritterStateKind::Wall, Box::new(SpinnerWall)),
        CritterState::new(CritterStateKind::Attack, Box::new(SpinnerAttack)),
    )?;
    Ok(controller)
}
