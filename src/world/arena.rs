//! Reference arena world
//!
//! A minimal world implementation backing the engine's tests and the demo
//! binary: entities are circles in a registry keyed by `EntityId`. There is
//! no broad-phase and no physics beyond exact ray/circle intersection;
//! motion integration is the host loop's business.

use ahash::AHashMap;

use crate::core::types::{EntityId, Vec2, OBSTACLE_TAG};
use crate::world::{RayHit, WorldQuery};

/// One registered entity: a named circle
#[derive(Debug, Clone)]
struct ArenaEntity {
    name: String,
    position: Vec2,
    radius: f64,
}

/// Flat registry of circle-shaped entities
#[derive(Debug, Default)]
pub struct ArenaWorld {
    entities: Vec<ArenaEntity>,
    index: AHashMap<EntityId, usize>,
    ids: Vec<EntityId>,
}

impl ArenaWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity and return its handle
    pub fn spawn(&mut self, name: &str, position: Vec2, radius: f64) -> EntityId {
        let id = EntityId::new();
        self.index.insert(id, self.entities.len());
        self.ids.push(id);
        self.entities.push(ArenaEntity {
            name: name.to_string(),
            position,
            radius,
        });
        id
    }

    /// Register a static obstacle (carries the reserved obstacle tag)
    pub fn spawn_obstacle(&mut self, position: Vec2, radius: f64) -> EntityId {
        self.spawn(OBSTACLE_TAG, position, radius)
    }

    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        self.index.get(&id).map(|&i| self.entities[i].position)
    }

    /// Move an entity (used by the host loop when integrating motion)
    pub fn set_position(&mut self, id: EntityId, position: Vec2) {
        if let Some(&i) = self.index.get(&id) {
            self.entities[i].position = position;
        }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate (id, name) pairs, e.g. for status display
    pub fn iter_names(&self) -> impl Iterator<Item = (EntityId, &str)> {
        self.ids
            .iter()
            .zip(self.entities.iter())
            .map(|(&id, e)| (id, e.name.as_str()))
    }

    /// Distance along the ray to the nearest intersection with a circle,
    /// or None if the ray misses it
    fn ray_circle_distance(origin: Vec2, dir: Vec2, center: Vec2, radius: f64) -> Option<f64> {
        let to_center = center - origin;
        let along = to_center.dot(&dir);
        let closest_sq = to_center.dot(&to_center) - along * along;
        let radius_sq = radius * radius;
        if closest_sq > radius_sq {
            return None;
        }
        let half_chord = (radius_sq - closest_sq).sqrt();
        let near = along - half_chord;
        let far = along + half_chord;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            // Ray origin is inside the circle
            Some(0.0)
        } else {
            None
        }
    }
}

impl WorldQuery for ArenaWorld {
    fn cast_ray(
        &self,
        origin: Vec2,
        heading: f64,
        max_length: f64,
        excluding: EntityId,
    ) -> Option<RayHit> {
        let dir = Vec2::from_heading(heading);
        let mut nearest: Option<RayHit> = None;

        for (&id, entity) in self.ids.iter().zip(self.entities.iter()) {
            if id == excluding {
                continue;
            }
            let Some(distance) =
                Self::ray_circle_distance(origin, dir, entity.position, entity.radius)
            else {
                continue;
            };
            if distance > max_length {
                continue;
            }
            if nearest.map(|h| distance < h.distance).unwrap_or(true) {
                nearest = Some(RayHit { entity: id, distance });
            }
        }

        nearest
    }

    fn name_of(&self, id: EntityId) -> Option<&str> {
        self.index.get(&id).map(|&i| self.entities[i].name.as_str())
    }

    fn rename(&mut self, id: EntityId, name: &str) {
        if let Some(&i) = self.index.get(&id) {
            self.entities[i].name = name.to_string();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_hit_only() {
        let mut world = ArenaWorld::new();
        let observer = world.spawn("x", Vec2::new(0.0, 0.0), 1.0);
        let near = world.spawn("near", Vec2::new(10.0, 0.0), 1.0);
        let _far = world.spawn("far", Vec2::new(30.0, 0.0), 1.0);

        let hit = world
            .cast_ray(Vec2::new(0.0, 0.0), 0.0, 1000.0, observer)
            .unwrap();
        assert_eq!(hit.entity, near);
        assert!((hit.distance - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_observer_excluded() {
        let mut world = ArenaWorld::new();
        let observer = world.spawn("x", Vec2::new(0.0, 0.0), 5.0);

        // Only the observer exists; the ray starts inside its own shape
        // but the exclusion must keep it invisible.
        assert!(world
            .cast_ray(Vec2::new(0.0, 0.0), 0.0, 1000.0, observer)
            .is_none());
    }

    #[test]
    fn test_miss_behind_ray() {
        let mut world = ArenaWorld::new();
        let observer = world.spawn("x", Vec2::new(0.0, 0.0), 1.0);
        let _behind = world.spawn("b", Vec2::new(-20.0, 0.0), 1.0);

        assert!(world
            .cast_ray(Vec2::new(0.0, 0.0), 0.0, 1000.0, observer)
            .is_none());
    }

    #[test]
    fn test_miss_off_axis() {
        let mut world = ArenaWorld::new();
        let observer = world.spawn("x", Vec2::new(0.0, 0.0), 1.0);
        let _above = world.spawn("a", Vec2::new(10.0, 5.0), 1.0);

        assert!(world
            .cast_ray(Vec2::new(0.0, 0.0), 0.0, 1000.0, observer)
            .is_none());
    }

    #[test]
    fn test_max_length_respected() {
        let mut world = ArenaWorld::new();
        let observer = world.spawn("x", Vec2::new(0.0, 0.0), 1.0);
        let _distant = world.spawn("d", Vec2::new(100.0, 0.0), 1.0);

        assert!(world
            .cast_ray(Vec2::new(0.0, 0.0), 0.0, 50.0, observer)
            .is_none());
    }

    #[test]
    fn test_rename_visible_to_queries() {
        let mut world = ArenaWorld::new();
        let id = world.spawn("robot", Vec2::new(0.0, 0.0), 1.0);
        world.rename(id, "dead_critter");
        assert_eq!(world.name_of(id), Some("dead_critter"));
    }
}
