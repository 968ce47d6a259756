//! Host agent wrapping one controller
//!
//! A `Critter` owns its pose, its species identity, and its controller for
//! its whole lifetime. The view distance comes from the agent's definition
//! at creation and is pushed into the controller once, at install time.

use crate::core::config::CritterSpec;
use crate::core::error::Result;
use crate::core::types::{EntityId, Vec2};
use crate::engine::controller::CritterController;
use crate::engine::events::TransitionBus;
use crate::engine::perception::Observer;
use crate::engine::state::{CritterStateKind, MovementIntent};
use crate::world::WorldQuery;

pub struct Critter {
    id: EntityId,
    species: String,
    position: Vec2,
    heading: f64,
    view_distance: f64,
    controller: CritterController,
}

impl Critter {
    /// Install a wired controller into a freshly spawned agent
    ///
    /// The spec's view distance is propagated to the controller here;
    /// it is not settable per-state afterwards.
    pub fn new(
        id: EntityId,
        spec: &CritterSpec,
        position: Vec2,
        heading: f64,
        mut controller: CritterController,
    ) -> Self {
        controller.set_view_distance(spec.definition.view);
        Self {
            id,
            species: spec.name.clone(),
            position,
            heading,
            view_distance: spec.definition.view,
            controller,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn view_distance(&self) -> f64 {
        self.view_distance
    }

    pub fn state_kind(&self) -> CritterStateKind {
        self.controller.active_kind()
    }

    pub fn is_dead(&self) -> bool {
        self.state_kind() == CritterStateKind::Dead
    }

    /// Update the pose after the host loop integrates a movement intent
    pub fn set_pose(&mut self, position: Vec2, heading: f64) {
        self.position = position;
        self.heading = heading;
    }

    /// Run one simulation tick and return the movement intent to actuate
    pub fn tick(
        &mut self,
        world: &mut dyn WorldQuery,
        bus: &mut TransitionBus,
    ) -> Result<MovementIntent> {
        let observer = Observer {
            id: self.id,
            species: &self.species,
            position: self.position,
            heading: self.heading,
        };
        self.controller.tick(world, bus, &observer)
    }
}
