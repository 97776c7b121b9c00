#![allow(dead_code)]

use explode_inspector::{Hierarchy, Mesh, NodeDesc, NodeId};
use glam::Vec3;

pub fn cube() -> Mesh {
    Mesh::cuboid(Vec3::splat(-0.5), Vec3::splat(0.5))
}

/// Root at `origin` with one cube part per position, in order
pub fn model_with_parts(origin: Vec3, positions: &[Vec3]) -> (Hierarchy, Vec<NodeId>) {
    let mut hierarchy = Hierarchy::new(NodeDesc::group("root").at(origin));
    let root = hierarchy.root();
    let ids = positions
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            hierarchy
                .add_node(root, NodeDesc::part(format!("part-{}", i), cube()).at(p))
                .unwrap()
        })
        .collect();
    (hierarchy, ids)
}

/// Two nodes with meshes under a translated group, plus a points-only mesh.
///
/// Frame (group, y=2) → Bolt (quad, x=1, extras) and an unnamed quad;
/// Marker sits at the scene root with a non-object extras value.
pub const ASSEMBLY_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "name": "Assembly", "nodes": [0, 3] }],
  "nodes": [
    { "name": "Frame", "translation": [0, 2, 0], "children": [1, 2] },
    { "name": "Bolt", "mesh": 0, "translation": [1, 0, 0],
      "extras": { "material": "steel", "mass": 1.5 } },
    { "mesh": 0 },
    { "name": "Marker", "mesh": 1, "extras": "tag" }
  ],
  "meshes": [
    { "name": "quad", "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1 }] },
    { "name": "dots", "primitives": [{ "attributes": { "POSITION": 0 }, "mode": 0 }] }
  ],
  "buffers": [{
    "byteLength": 60,
    "uri": "data:application/octet-stream;base64,AAAAvwAAAL8AAAAAAAAAPwAAAL8AAAAAAAAAPwAAAD8AAAAAAAAAvwAAAD8AAAAAAAABAAIAAAACAAMA"
  }],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 48 },
    { "buffer": 0, "byteOffset": 48, "byteLength": 12 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 4, "type": "VEC3",
      "min": [-0.5, -0.5, 0.0], "max": [0.5, 0.5, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 6, "type": "SCALAR" }
  ]
}"#;

pub fn find_by_name(hierarchy: &Hierarchy, name: &str) -> Option<NodeId> {
    hierarchy
        .walk()
        .into_iter()
        .map(|(id, _)| id)
        .find(|&id| hierarchy.node(id).is_some_and(|n| n.name == name))
}
