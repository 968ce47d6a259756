//! Critter controller: owns the five states and drives the active one
//!
//! Wiring happens exactly once. The transition table is the complete graph
//! among the four live states plus one edge from each live state to the
//! shared terminal Dead state: 16 directed edges, all scoped by this
//! controller's tick channel.

use ahash::AHashSet;

use crate::core::error::{CritterError, Result};
use crate::core::types::CORPSE_TAG;
use crate::engine::events::{TickChannel, TransitionBus, TransitionEvent};
use crate::engine::perception::Observer;
use crate::engine::state::{CritterState, CritterStateKind, MovementIntent};
use crate::world::WorldQuery;

/// One critter's state machine
pub struct CritterController {
    channel: TickChannel,
    /// The four live states, in attach order (Normal, Ally, Wall, Attack)
    states: Vec<CritterState>,
    dead: CritterState,
    active: CritterStateKind,
    edges: AHashSet<(CritterStateKind, CritterStateKind)>,
    wired: bool,
}

impl CritterController {
    pub fn new() -> Self {
        let channel = TickChannel::allocate();
        let mut dead = CritterState::dead();
        dead.bind_channel(channel);
        Self {
            channel,
            states: Vec::with_capacity(4),
            dead,
            active: CritterStateKind::Normal,
            edges: AHashSet::new(),
            wired: false,
        }
    }

    pub fn channel(&self) -> TickChannel {
        self.channel
    }

    pub fn active_kind(&self) -> CritterStateKind {
        self.active
    }

    pub fn is_wired(&self) -> bool {
        self.wired
    }

    /// Number of outgoing transition edges wired for `kind`
    pub fn outgoing_edges(&self, kind: CritterStateKind) -> usize {
        self.edges.iter().filter(|(from, _)| *from == kind).count()
    }

    /// Attach the four live states and wire the transition graph
    ///
    /// Must be called exactly once, with the states in the exact order
    /// Normal, Ally, Wall, Attack. A state whose kind does not match its
    /// slot is a fatal configuration error; the controller stays
    /// inoperable.
    pub fn attach_states(
        &mut self,
        normal: CritterState,
        ally: CritterState,
        wall: CritterState,
        attack: CritterState,
    ) -> Result<()> {
        if self.wired {
            return Err(CritterError::AlreadyWired);
        }

        let supplied = [normal, ally, wall, attack];
        for (slot, (state, &expected)) in
            supplied.iter().zip(CritterStateKind::LIVE.iter()).enumerate()
        {
            if state.kind() != expected {
                return Err(CritterError::StateOrder {
                    slot,
                    expected,
                    found: state.kind(),
                });
            }
        }

        for mut state in supplied {
            state.bind_channel(self.channel);
            self.states.push(state);
        }

        // Complete graph among live states, plus a Dead edge from each
        for &from in &CritterStateKind::LIVE {
            for &to in &CritterStateKind::LIVE {
                if from != to {
                    self.edges.insert((from, to));
                }
            }
            self.edges.insert((from, CritterStateKind::Dead));
        }

        self.active = CritterStateKind::Normal;
        self.wired = true;
        tracing::debug!(channel = ?self.channel, edges = self.edges.len(), "controller wired");
        Ok(())
    }

    /// Propagate a view distance to all four live states uniformly
    pub fn set_view_distance(&mut self, distance: f64) {
        for state in &mut self.states {
            state.set_view_distance(distance);
        }
    }

    /// Drive the active state for one simulation tick
    ///
    /// If this agent has been renamed to the corpse tag by another
    /// critter's proximity kill, the Dead edge is taken before any action
    /// runs. Otherwise the active state acts, perceives, classifies, and
    /// possibly emits; any event it put on the bus is consumed and applied
    /// before the tick returns.
    pub fn tick(
        &mut self,
        world: &mut dyn WorldQuery,
        bus: &mut TransitionBus,
        observer: &Observer<'_>,
    ) -> Result<MovementIntent> {
        if !self.wired {
            return Err(CritterError::NotWired);
        }

        if self.active != CritterStateKind::Dead
            && world.name_of(observer.id) == Some(CORPSE_TAG)
        {
            bus.emit(TransitionEvent {
                channel: self.channel,
                target: CritterStateKind::Dead,
            });
            self.apply_transitions(bus);
        }

        let intent = self.active_state_mut().tick(world, bus, observer);
        self.apply_transitions(bus);
        Ok(intent)
    }

    fn apply_transitions(&mut self, bus: &mut TransitionBus) {
        for event in bus.drain(self.channel) {
            if event.target == self.active {
                continue;
            }
            if !self.edges.contains(&(self.active, event.target)) {
                // Dead has no outgoing edges; nothing else reaches here
                continue;
            }
            tracing::debug!(
                channel = ?self.channel,
                from = ?self.active,
                to = ?event.target,
                "transition"
            );
            self.active_state_mut().exit();
            self.active = event.target;
            self.active_state_mut().enter();
        }
    }

    fn active_state_mut(&mut self) -> &mut CritterState {
        match self.active {
            CritterStateKind::Dead => &mut self.dead,
            kind => {
                let slot = CritterStateKind::LIVE
                    .iter()
                    .position(|&k| k == kind)
                    .unwrap_or(0);
                &mut self.states[slot]
            }
        }
    }
}

impl Default for CritterController {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec2;
    use crate::engine::state::DampMotion;
    use crate::world::ArenaWorld;

    fn live_state(kind: CritterStateKind) -> CritterState {
        CritterState::new(kind, Box::new(DampMotion))
    }

    fn wired_controller() -> CritterController {
        let mut c = CritterController::new();
        c.attach_states(
            live_state(CritterStateKind::Normal),
            live_state(CritterStateKind::Ally),
            live_state(CritterStateKind::Wall),
            live_state(CritterStateKind::Attack),
        )
        .unwrap();
        c
    }

    #[test]
    fn test_wiring_edge_counts() {
        let c = wired_controller();
        for kind in CritterStateKind::LIVE {
            assert_eq!(c.outgoing_edges(kind), 4, "{kind:?} should have 4 edges");
        }
        assert_eq!(c.outgoing_edges(CritterStateKind::Dead), 0);
    }

    #[test]
    fn test_initial_state_is_normal() {
        let c = wired_controller();
        assert_eq!(c.active_kind(), CritterStateKind::Normal);
    }

    #[test]
    fn test_wrong_order_is_fatal() {
        let mut c = CritterController::new();
        let err = c
            .attach_states(
                live_state(CritterStateKind::Normal),
                live_state(CritterStateKind::Wall), // swapped
                live_state(CritterStateKind::Ally),
                live_state(CritterStateKind::Attack),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            CritterError::StateOrder {
                slot: 1,
                expected: CritterStateKind::Ally,
                found: CritterStateKind::Wall,
            }
        ));
        assert!(!c.is_wired());
    }

    #[test]
    fn test_double_wiring_is_fatal() {
        let mut c = wired_controller();
        let err = c
            .attach_states(
                live_state(CritterStateKind::Normal),
                live_state(CritterStateKind::Ally),
                live_state(CritterStateKind::Wall),
                live_state(CritterStateKind::Attack),
            )
            .unwrap_err();
        assert!(matches!(err, CritterError::AlreadyWired));
    }

    #[test]
    fn test_tick_before_wiring_is_fatal() {
        let mut c = CritterController::new();
        let mut world = ArenaWorld::new();
        let id = world.spawn("x", Vec2::new(0.0, 0.0), 1.0);
        let mut bus = TransitionBus::new();
        let observer = Observer {
            id,
            species: "x",
            position: Vec2::new(0.0, 0.0),
            heading: 0.0,
        };
        assert!(matches!(
            c.tick(&mut world, &mut bus, &observer),
            Err(CritterError::NotWired)
        ));
    }

    #[test]
    fn test_view_distance_propagates_uniformly() {
        let mut c = wired_controller();
        c.set_view_distance(42.0);
        for state in &c.states {
            assert_eq!(state.view_distance(), 42.0);
        }
    }

    #[test]
    fn test_transition_to_wall_on_obstacle() {
        let mut c = wired_controller();
        c.set_view_distance(50.0);

        let mut world = ArenaWorld::new();
        let id = world.spawn("x", Vec2::new(0.0, 0.0), 1.0);
        world.spawn_obstacle(Vec2::new(20.0, 0.0), 1.0);

        let mut bus = TransitionBus::new();
        let observer = Observer {
            id,
            species: "x",
            position: Vec2::new(0.0, 0.0),
            heading: 0.0,
        };
        c.tick(&mut world, &mut bus, &observer).unwrap();
        assert_eq!(c.active_kind(), CritterStateKind::Wall);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_dead_is_terminal() {
        let mut c = wired_controller();
        c.set_view_distance(50.0);

        let mut world = ArenaWorld::new();
        let id = world.spawn(CORPSE_TAG, Vec2::new(0.0, 0.0), 1.0);
        // A live foe in view; a live state would classify Attack
        world.spawn("y", Vec2::new(20.0, 0.0), 1.0);

        let mut bus = TransitionBus::new();
        let observer = Observer {
            id,
            species: "x",
            position: Vec2::new(0.0, 0.0),
            heading: 0.0,
        };

        // Corpse pickup fires before any action
        let intent = c.tick(&mut world, &mut bus, &observer).unwrap();
        assert_eq!(c.active_kind(), CritterStateKind::Dead);
        assert_eq!(intent, MovementIntent::STOP);

        // And it stays Dead on subsequent ticks
        c.tick(&mut world, &mut bus, &observer).unwrap();
        assert_eq!(c.active_kind(), CritterStateKind::Dead);
        assert!(bus.is_empty());
    }

    #[test]
    fn test_shared_bus_does_not_cross_trigger() {
        let mut a = wired_controller();
        let mut b = wired_controller();
        a.set_view_distance(50.0);
        b.set_view_distance(50.0);

        let mut world = ArenaWorld::new();
        // a looks at an obstacle; b looks at nothing
        let a_id = world.spawn("x", Vec2::new(0.0, 0.0), 1.0);
        let b_id = world.spawn("x", Vec2::new(0.0, 100.0), 1.0);
        world.spawn_obstacle(Vec2::new(20.0, 0.0), 1.0);

        let mut bus = TransitionBus::new();
        let a_obs = Observer {
            id: a_id,
            species: "x",
            position: Vec2::new(0.0, 0.0),
            heading: 0.0,
        };
        let b_obs = Observer {
            id: b_id,
            species: "x",
            position: Vec2::new(0.0, 100.0),
            heading: std::f64::consts::PI, // facing away from everything
        };

        a.tick(&mut world, &mut bus, &a_obs).unwrap();
        b.tick(&mut world, &mut bus, &b_obs).unwrap();

        assert_eq!(a.active_kind(), CritterStateKind::Wall);
        assert_eq!(b.active_kind(), CritterStateKind::Normal);
    }
}
