//! Robot species policy
//!
//! Wanders with random steering, backs away from allies and walls, and
//! spins aggressively at foes.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::core::error::Result;
use crate::engine::controller::CritterController;
use crate::engine::state::{CritterState, CritterStateKind, MovementIntent, StateAction};

/// Species name carried by every robot
pub const ROBOT_SPECIES: &str = "robot";

/// Normal: move forward, randomly veering left or right (left 1 in 4)
struct RobotNormal {
    rng: ChaCha8Rng,
}

impl StateAction for RobotNormal {
    fn act(&mut self) -> MovementIntent {
        if self.rng.gen_range(0..4) == 0 {
            MovementIntent::new(150.0, -3.0)
        } else {
            MovementIntent::new(150.0, 3.0)
        }
    }
}

/// Ally: back away slowly
struct RobotAlly;

impl StateAction for RobotAlly {
    fn act(&mut self) -> MovementIntent {
        MovementIntent::new(-10.0, -1.0)
    }
}

/// Wall: back away while turning
struct RobotWall;

impl StateAction for RobotWall {
    fn act(&mut self) -> MovementIntent {
        MovementIntent::new(-10.0, 5.0)
    }
}

/// Attack: spin in place in hopes the opposing critter dies
struct RobotAttack;

impl StateAction for RobotAttack {
    fn act(&mut self) -> MovementIntent {
        MovementIntent::new(0.0, 150.0)
    }
}

/// Build a fully wired robot controller
///
/// The seed drives the Normal state's steering RNG so runs are
/// reproducible.
pub fn robot_controller(seed: u64) -> Result<CritterController> {
    let mut controller = CritterController::new();
    controller.attach_states(
        CritterState::new(
            CritterStateKind::Normal,
            Box::new(RobotNormal {
                rng: ChaCha8Rng::seed_from_u64(seed),
            }),
        ),
        CritterState::new(CritterStateKind::Ally, Box::new(RobotAlly)),
        CritterState::new(CritterStateKind::Wall, Box::new(RobotWall)),
        CritterState::new(CritterStateKind::Attack, Box::new(RobotAttack)),
    )?;
    Ok(controller)
}
