//! Node hierarchy the inspector operates on.
//!
//! Nodes live in an arena owned by [`Hierarchy`]. Every node gets a
//! [`NodeId`] from a process-wide counter, so identifiers are stable for
//! the node's lifetime and never reused, even across reloads.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use glam::{Mat4, Quat, Vec3};
use serde_json::{Map, Value};

use crate::math::AABB;

static NEXT_NODE_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    fn next() -> Self {
        Self(NEXT_NODE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type Metadata = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Local-space triangle soup with cached bounds
#[derive(Debug, Clone)]
pub struct Mesh {
    triangles: Vec<[Vec3; 3]>,
    bounds: Option<AABB>,
}

impl Mesh {
    pub fn new(triangles: Vec<[Vec3; 3]>) -> Self {
        let points: Vec<Vec3> = triangles.iter().flatten().copied().collect();
        let bounds = AABB::from_points(&points);
        Self { triangles, bounds }
    }

    /// Axis-aligned box from `min` to `max`, twelve triangles
    pub fn cuboid(min: Vec3, max: Vec3) -> Self {
        let c = AABB::new(min, max).corners();
        let faces = [
            [0, 2, 3, 1], // -z
            [4, 5, 7, 6], // +z
            [0, 1, 5, 4], // -y
            [2, 6, 7, 3], // +y
            [0, 4, 6, 2], // -x
            [1, 3, 7, 5], // +x
        ];
        let triangles = faces
            .iter()
            .flat_map(|&[a, b, d, e]| [[c[a], c[b], c[d]], [c[a], c[d], c[e]]])
            .collect();
        Self::new(triangles)
    }

    pub fn triangles(&self) -> &[[Vec3; 3]] {
        &self.triangles
    }

    /// `None` when the mesh has no triangles
    pub fn bounds(&self) -> Option<AABB> {
        self.bounds
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    id: NodeId,
    pub name: String,
    pub metadata: Metadata,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Renderable geometry, i.e. a part of the model
    pub fn is_part(&self) -> bool {
        self.mesh.is_some()
    }
}

/// Fields for a node about to be inserted
#[derive(Debug, Clone, Default)]
pub struct NodeDesc {
    pub name: String,
    pub metadata: Metadata,
    pub transform: Transform,
    pub mesh: Option<Mesh>,
}

impl NodeDesc {
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn part(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh: Some(mesh),
            ..Self::default()
        }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A loaded model: a tree of nodes under one root
#[derive(Debug, Clone)]
pub struct Hierarchy {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    root: NodeId,
}

impl Hierarchy {
    pub fn new(root: NodeDesc) -> Self {
        let mut hierarchy = Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            root: NodeId(0),
        };
        hierarchy.root = hierarchy.insert(None, root);
        hierarchy
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Adds `desc` as the last child of `parent`. Returns `None` if the
    /// parent does not belong to this hierarchy.
    pub fn add_node(&mut self, parent: NodeId, desc: NodeDesc) -> Option<NodeId> {
        if !self.index.contains_key(&parent) {
            return None;
        }
        Some(self.insert(Some(parent), desc))
    }

    fn insert(&mut self, parent: Option<NodeId>, desc: NodeDesc) -> NodeId {
        let id = NodeId::next();
        self.index.insert(id, self.nodes.len());
        self.nodes.push(Node {
            id,
            name: desc.name,
            metadata: desc.metadata,
            transform: desc.transform,
            mesh: desc.mesh,
            children: Vec::new(),
        });
        if let Some(parent) = parent.and_then(|p| self.index.get(&p).copied()) {
            self.nodes[parent].children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.index.get(&id).map(|&i| &mut self.nodes[i])
    }

    pub fn translation(&self, id: NodeId) -> Option<Vec3> {
        self.node(id).map(|n| n.transform.translation)
    }

    /// Returns false if the node is unknown
    pub fn set_translation(&mut self, id: NodeId, translation: Vec3) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.transform.translation = translation;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Pre-order traversal (children in insertion order) paired with each
    /// node's world matrix under the current transforms.
    pub fn walk(&self) -> Vec<(NodeId, Mat4)> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![(self.root, Mat4::IDENTITY)];

        while let Some((id, parent_world)) = stack.pop() {
            let Some(node) = self.node(id) else { continue };
            let world = parent_world * node.transform.matrix();
            out.push((id, world));
            // reversed so the first child is visited first
            stack.extend(node.children.iter().rev().map(|&child| (child, world)));
        }

        out
    }

    /// Ids of every part in traversal order
    pub fn parts(&self) -> Vec<NodeId> {
        self.walk()
            .into_iter()
            .map(|(id, _)| id)
            .filter(|&id| self.node(id).is_some_and(Node::is_part))
            .collect()
    }
}
