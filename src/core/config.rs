//! Engine constants and per-agent configuration
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::Deserialize;

use crate::core::error::Result;

/// Length of the forward perception probe (world units)
///
/// The ray cast is always this long, independent of a critter's
/// `view_distance`. Range limiting is applied by the classifier, not by
/// the ray itself, so a hit beyond view distance is still reported to
/// the classifier (which resolves it to Normal).
pub const PROBE_LENGTH: f64 = 1000.0;

/// Lethal proximity radius (world units)
///
/// A live, non-obstacle, non-same-species entity seen strictly closer
/// than this is killed on the spot: it is renamed to the corpse tag and
/// the observer's sighting for the tick resolves to nothing.
pub const LETHAL_RADIUS: f64 = 10.0;

/// Per-agent spec as loaded from configuration
///
/// Matches the JSON shape consumed at spawn time:
/// `{ "name": "robot", "definition": { "view": 50.0 } }`
#[derive(Debug, Clone, Deserialize)]
pub struct CritterSpec {
    /// Species name, used for ally/foe identity comparison
    pub name: String,
    pub definition: CritterDefinition,
}

/// The `definition` block of a critter spec
#[derive(Debug, Clone, Deserialize)]
pub struct CritterDefinition {
    /// Maximum perception range (world units); 0 disables perception
    pub view: f64,
}

impl CritterSpec {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
