//! Classification of perception results into target state kinds
//!
//! Pure decision ladder; called only for agents whose current kind is not
//! Dead. The lethal-proximity side effect has already fired inside
//! perception by the time a sighting reaches this function.

use crate::core::types::{CORPSE_TAG, OBSTACLE_TAG};
use crate::engine::perception::Sighting;
use crate::engine::state::CritterStateKind;

/// Map a sighting to the state the observer should be in
///
/// Decision order, each step checked only while the previous ones fail:
/// 1. `view_distance == 0` disables perception entirely: Normal.
/// 2. No sighting, or a sighting beyond view distance: Normal.
/// 3. Within range: obstacle or corpse is Wall; the observer's own
///    species is Ally; any other live identity is Attack.
///
/// Exactly one target is produced per call. The caller suppresses
/// self-transitions (target equal to the current kind).
pub fn classify(
    observer_species: &str,
    view_distance: f64,
    sighting: Option<&Sighting>,
) -> CritterStateKind {
    if view_distance == 0.0 {
        return CritterStateKind::Normal;
    }

    match sighting {
        Some(seen) if seen.distance <= view_distance => {
            if seen.name == OBSTACLE_TAG || seen.name == CORPSE_TAG {
                CritterStateKind::Wall
            } else if seen.name == observer_species {
                CritterStateKind::Ally
            } else {
                CritterStateKind::Attack
            }
        }
        _ => CritterStateKind::Normal,
    }
}
