//! World query capability consumed by the perception engine
//!
//! The engine never owns the world; it only casts rays, reads names, and
//! performs one mutation (renaming a killed entity to its corpse tag).

pub mod arena;

pub use arena::ArenaWorld;

use crate::core::types::{EntityId, Vec2};

/// A ray intersection reported by the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: EntityId,
    /// Distance from the ray origin to the intersection point
    pub distance: f64,
}

/// Query surface the perception engine needs from the surrounding world
///
/// Implementations must report the nearest hit only and support excluding
/// exactly one entity (the observer). Renames must be visible to all
/// subsequent queries in the same and later ticks.
pub trait WorldQuery {
    /// Cast a ray from `origin` along `heading` (radians), at most
    /// `max_length` units, ignoring `excluding`. Returns the nearest hit.
    fn cast_ray(
        &self,
        origin: Vec2,
        heading: f64,
        max_length: f64,
        excluding: EntityId,
    ) -> Option<RayHit>;

    /// Current identity tag of an entity, or None if it is not registered
    fn name_of(&self, id: EntityId) -> Option<&str>;

    /// Replace an entity's identity tag (the corpse-rename side effect)
    fn rename(&mut self, id: EntityId, name: &str);
}
