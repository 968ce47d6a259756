//! Behavioral states and the species action seam
//!
//! A `CritterState` binds one behavioral kind to a species-supplied action.
//! While it is the controller's active state, its `tick` runs the action,
//! looks down the perception ray, classifies the result, and emits a
//! transition event when the classification disagrees with its own kind.

use serde::{Deserialize, Serialize};

use crate::engine::classifier::classify;
use crate::engine::events::{TickChannel, TransitionBus, TransitionEvent};
use crate::engine::perception::{look_at, Observer};
use crate::world::WorldQuery;

/// Behavioral category of a state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CritterStateKind {
    Dead,
    Normal,
    Ally,
    Wall,
    Attack,
}

impl CritterStateKind {
    /// The four live kinds, in the order `attach_states` expects them
    pub const LIVE: [CritterStateKind; 4] = [
        CritterStateKind::Normal,
        CritterStateKind::Ally,
        CritterStateKind::Wall,
        CritterStateKind::Attack,
    ];
}

/// A forward/angular velocity pair produced by species actions
///
/// The engine never actuates motion itself; intents are returned to the
/// host loop, which owns integration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovementIntent {
    pub forward: f64,
    pub angular: f64,
}

impl MovementIntent {
    /// Stop all motion (the damping default)
    pub const STOP: MovementIntent = MovementIntent { forward: 0.0, angular: 0.0 };

    pub fn new(forward: f64, angular: f64) -> Self {
        Self { forward, angular }
    }
}

/// Species-supplied behavior for one state
///
/// One required method; entry/exit hooks are no-op extension points for
/// one-time setup or teardown on transition.
pub trait StateAction {
    /// Produce this tick's movement intent
    fn act(&mut self) -> MovementIntent;

    /// Called when the owning state becomes active
    fn on_entry(&mut self) {}

    /// Called when the owning state stops being active
    fn on_exit(&mut self) {}
}

/// The damping default: stop all motion
///
/// Used by the terminal Dead state and as a safe fallback.
#[derive(Debug, Default)]
pub struct DampMotion;

impl StateAction for DampMotion {
    fn act(&mut self) -> MovementIntent {
        MovementIntent::STOP
    }
}

/// One behavioral state owned by a controller
pub struct CritterState {
    kind: CritterStateKind,
    view_distance: f64,
    channel: Option<TickChannel>,
    action: Box<dyn StateAction>,
}

impl CritterState {
    pub fn new(kind: CritterStateKind, action: Box<dyn StateAction>) -> Self {
        Self {
            kind,
            view_distance: 0.0,
            channel: None,
            action,
        }
    }

    /// The shared terminal state: damps motion, never transitions
    pub fn dead() -> Self {
        Self::new(CritterStateKind::Dead, Box::new(DampMotion))
    }

    pub fn kind(&self) -> CritterStateKind {
        self.kind
    }

    pub fn view_distance(&self) -> f64 {
        self.view_distance
    }

    pub(crate) fn set_view_distance(&mut self, distance: f64) {
        self.view_distance = distance;
    }

    pub(crate) fn bind_channel(&mut self, channel: TickChannel) {
        self.channel = Some(channel);
    }

    pub(crate) fn enter(&mut self) {
        self.action.on_entry();
    }

    pub(crate) fn exit(&mut self) {
        self.action.on_exit();
    }

    /// One tick while active: act, perceive, classify, emit
    ///
    /// Dead damps motion and emits nothing; it is terminal and
    /// self-looping. For live kinds the action always runs before
    /// perception, and a transition event fires only when the classified
    /// target differs from this state's own kind.
    pub(crate) fn tick(
        &mut self,
        world: &mut dyn WorldQuery,
        bus: &mut TransitionBus,
        observer: &Observer<'_>,
    ) -> MovementIntent {
        if self.kind == CritterStateKind::Dead {
            return DampMotion.act();
        }

        let intent = self.action.act();

        let sighting = look_at(world, observer);
        let target = classify(observer.species, self.view_distance, sighting.as_ref());

        if target != self.kind {
            if let Some(channel) = self.channel {
                bus.emit(TransitionEvent { channel, target });
            }
        }

        intent
    }
}

impl std::fmt::Debug for CritterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CritterState")
            .field("kind", &self.kind)
            .field("view_distance", &self.view_distance)
            .field("channel", &self.channel)
            .finish()
    }
}
