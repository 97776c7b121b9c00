//! Rest-state capture for every part of a loaded model.

use std::collections::HashMap;

use glam::Vec3;
use log::{debug, info};

use crate::scene::{Hierarchy, NodeId};

/// Where each part belongs when the model is not exploded.
///
/// Built once from a freshly loaded hierarchy and immutable afterwards:
/// there is no way to add or remove parts after capture.
#[derive(Debug, Clone, Default)]
pub struct PartRegistry {
    origin: Vec3,
    rest: Vec<(NodeId, Vec3)>,
    index: HashMap<NodeId, usize>,
}

impl PartRegistry {
    /// Registry for a model that has not loaded yet
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records the current local translation of every part as its rest
    /// position, in traversal order. The model origin is the root's
    /// translation.
    pub fn capture(hierarchy: &Hierarchy) -> Self {
        let origin = hierarchy.translation(hierarchy.root()).unwrap_or(Vec3::ZERO);

        let mut rest = Vec::new();
        let mut index = HashMap::new();
        for id in hierarchy.parts() {
            let Some(position) = hierarchy.translation(id) else { continue };
            index.insert(id, rest.len());
            rest.push((id, position));
            debug!("captured part {} at {}", id, position);
        }

        info!("registered {} parts, origin {}", rest.len(), origin);
        Self { origin, rest, index }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn rest_position(&self, id: NodeId) -> Option<Vec3> {
        self.index.get(&id).map(|&i| self.rest[i].1)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// `(part, rest position)` pairs in traversal order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Vec3)> + '_ {
        self.rest.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }
}
