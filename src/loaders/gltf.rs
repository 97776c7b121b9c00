use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use log::{debug, info, warn};
use serde_json::{Map, Value};
use std::path::Path;

use crate::scene::{Hierarchy, Mesh, Metadata, NodeDesc, NodeId, Transform};

/// Loads a glTF/GLB file into a node hierarchy
pub fn load_gltf_file(path: impl AsRef<Path>) -> Result<Hierarchy> {
    let path = path.as_ref();
    info!("Loading glTF file: {:?}", path);

    let (document, buffers, _images) = gltf::import(path)
        .with_context(|| format!("Failed to load glTF file: {:?}", path))?;

    build_hierarchy(&document, &buffers)
}

/// Loads a glTF/GLB document held in memory. External buffers are not
/// resolved; embedded (GLB or data URI) buffers are.
pub fn load_gltf_slice(bytes: &[u8]) -> Result<Hierarchy> {
    let (document, buffers, _images) =
        gltf::import_slice(bytes).context("Failed to parse glTF data")?;

    build_hierarchy(&document, &buffers)
}

fn build_hierarchy(document: &gltf::Document, buffers: &[gltf::buffer::Data]) -> Result<Hierarchy> {
    info!(
        "glTF: {} scenes, {} nodes, {} meshes",
        document.scenes().count(),
        document.nodes().count(),
        document.meshes().count()
    );

    let scene = document.default_scene().or_else(|| document.scenes().next());
    let root_name = scene.as_ref().and_then(|s| s.name()).unwrap_or("Scene");
    let mut hierarchy = Hierarchy::new(NodeDesc::group(root_name));

    match scene {
        Some(scene) => {
            let root = hierarchy.root();
            for node in scene.nodes() {
                process_node(&node, buffers, root, &mut hierarchy)?;
            }
        }
        None => warn!("glTF document has no scenes"),
    }

    info!("Built hierarchy with {} nodes", hierarchy.len());
    Ok(hierarchy)
}

/// Recursively copies a glTF node and its children under `parent`
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent: NodeId,
    hierarchy: &mut Hierarchy,
) -> Result<()> {
    let (translation, rotation, scale) = node.transform().decomposed();
    let mesh = match node.mesh() {
        Some(mesh) => Some(read_mesh(&mesh, buffers)?),
        None => None,
    };

    let desc = NodeDesc {
        name: node.name().unwrap_or_default().to_string(),
        metadata: read_extras(node.extras()),
        transform: Transform {
            translation: Vec3::from_array(translation),
            rotation: Quat::from_array(rotation),
            scale: Vec3::from_array(scale),
        },
        mesh,
    };

    let id = hierarchy
        .add_node(parent, desc)
        .context("glTF node parent missing from hierarchy")?;

    for child in node.children() {
        process_node(&child, buffers, id, hierarchy)?;
    }

    Ok(())
}

/// Collects every triangle primitive of a mesh in mesh-local space
fn read_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> Result<Mesh> {
    debug!("  Processing mesh: {:?}", mesh.name());
    let mut triangles = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            warn!(
                "Skipping {:?} primitive in mesh {:?}",
                primitive.mode(),
                mesh.name()
            );
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

        let vertices: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(Vec3::from_array)
            .collect();

        let indices: Vec<u32> = match reader.read_indices() {
            Some(indices) => indices.into_u32().collect(),
            None => (0..vertices.len() as u32).collect(),
        };

        for tri in indices.chunks_exact(3) {
            let corner = |i: u32| {
                vertices
                    .get(i as usize)
                    .copied()
                    .with_context(|| format!("Index {} out of range in mesh {:?}", i, mesh.name()))
            };
            triangles.push([corner(tri[0])?, corner(tri[1])?, corner(tri[2])?]);
        }
    }

    Ok(Mesh::new(triangles))
}

/// Node extras as metadata. Non-object extras are kept under `"value"`.
fn read_extras(extras: &gltf::json::Extras) -> Metadata {
    let Some(raw) = extras else {
        return Metadata::new();
    };
    match serde_json::from_str::<Value>(raw.get()) {
        Ok(Value::Object(map)) => map,
        Ok(Value::Null) => Metadata::new(),
        Ok(other) => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
        Err(e) => {
            warn!("Ignoring unreadable node extras: {}", e);
            Metadata::new()
        }
    }
}
