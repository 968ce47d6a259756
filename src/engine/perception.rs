//! Forward ray perception and the lethal-proximity rule
//!
//! The sensor is assumed to sit at the agent's own origin with zero angular
//! offset; real sensor configuration is not introspectable, so the geometry
//! is recomputed here under that fixed single-ray assumption.

use crate::core::config::{LETHAL_RADIUS, PROBE_LENGTH};
use crate::core::types::{EntityId, Vec2, CORPSE_TAG, OBSTACLE_TAG};
use crate::world::WorldQuery;

/// The observing agent, as the perception engine sees it
#[derive(Debug, Clone, Copy)]
pub struct Observer<'a> {
    pub id: EntityId,
    /// Species name, compared against hit identities
    pub species: &'a str,
    pub position: Vec2,
    /// Facing angle in radians
    pub heading: f64,
}

/// What the observer is looking at this tick
#[derive(Debug, Clone, PartialEq)]
pub struct Sighting {
    pub entity: EntityId,
    /// Identity tag of the sighted entity at query time
    pub name: String,
    pub distance: f64,
}

/// Cast the forward probe and report the nearest sighting
///
/// The probe is always `PROBE_LENGTH` long regardless of the observer's
/// view distance; range limiting belongs to the classifier. A query that
/// returns nothing, or a hit on an entity the world no longer knows,
/// degrades to None.
///
/// Side effect: if the nearest hit is strictly inside `LETHAL_RADIUS` and
/// is neither an obstacle, nor the observer's own species, nor already a
/// corpse, that entity is renamed to the corpse tag and the sighting
/// resolves to None for this tick. The kill is checked against the name at
/// query time, so of two mutually close critters only the first to tick
/// kills; the victim is already a corpse when the survivor is re-examined.
pub fn look_at(world: &mut dyn WorldQuery, observer: &Observer<'_>) -> Option<Sighting> {
    let hit = world.cast_ray(observer.position, observer.heading, PROBE_LENGTH, observer.id)?;
    let name = world.name_of(hit.entity)?.to_string();

    if hit.distance < LETHAL_RADIUS
        && name != OBSTACLE_TAG
        && name != observer.species
        && name != CORPSE_TAG
    {
        tracing::debug!(
            victim = ?hit.entity,
            distance = hit.distance,
            observer = ?observer.id,
            "lethal proximity: marking entity as corpse"
        );
        world.rename(hit.entity, CORPSE_TAG);
        return None;
    }

    Some(Sighting {
        entity: hit.entity,
        name,
        distance: hit.distance,
    })
}
