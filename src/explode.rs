//! Radial explosion of parts away from the model origin.

use glam::Vec3;
use log::{debug, warn};

use crate::config::ExplodeConfig;
use crate::registry::PartRegistry;
use crate::scene::{Hierarchy, NodeId};

/// Displaced position of one part.
///
/// A part sitting exactly on the origin has no direction and stays put
/// for any parameter. At `parameter == 0` the result is bit-for-bit `rest`.
pub fn displaced_position(rest: Vec3, origin: Vec3, parameter: f32, scale_factor: f32) -> Vec3 {
    match (rest - origin).try_normalize() {
        Some(direction) => rest + direction * (parameter * scale_factor),
        None => rest,
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExplosionEngine {
    config: ExplodeConfig,
}

impl ExplosionEngine {
    pub fn new(config: ExplodeConfig) -> Self {
        Self { config }
    }

    /// Parameter actually used for `requested`, after optional clamping
    pub fn effective_parameter(&self, requested: f32) -> f32 {
        if self.config.clamp {
            let [lo, hi] = self.config.range;
            requested.clamp(lo, hi)
        } else {
            requested
        }
    }

    /// Target position of every registered part, in traversal order.
    /// Reads only rest state, so repeated calls never drift.
    pub fn positions(&self, parameter: f32, registry: &PartRegistry) -> Vec<(NodeId, Vec3)> {
        let t = self.effective_parameter(parameter);
        let origin = registry.origin();
        registry
            .iter()
            .map(|(id, rest)| (id, displaced_position(rest, origin, t, self.config.scale_factor)))
            .collect()
    }

    /// Writes the displaced positions into `hierarchy`. Returns how many
    /// parts were updated. A non-finite parameter leaves every part alone.
    pub fn apply(&self, parameter: f32, registry: &PartRegistry, hierarchy: &mut Hierarchy) -> usize {
        if !parameter.is_finite() {
            warn!("ignoring non-finite explosion parameter {}", parameter);
            return 0;
        }
        let updated = self
            .positions(parameter, registry)
            .into_iter()
            .filter(|&(id, position)| hierarchy.set_translation(id, position))
            .count();
        debug!("explode t={} moved {} parts", parameter, updated);
        updated
    }
}
