//! Pointer → part resolution by nearest ray hit.

use glam::{Mat4, Vec3};
use log::debug;

use crate::camera::{pointer_to_ndc, Camera, Viewport};
use crate::core::triangle_intersection::nearest_intersection;
use crate::math::Ray;
use crate::registry::PartRegistry;
use crate::scene::{Hierarchy, Mesh, NodeId};

/// The single part under the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub part: NodeId,
    /// World-space distance from the camera along the ray
    pub distance: f32,
    pub point: Vec3,
}

/// Empty when nothing is under the pointer
pub type PickResult = Option<PickHit>;

#[derive(Debug, Clone, Copy, Default)]
pub struct PickingService;

impl PickingService {
    pub fn new() -> Self {
        Self
    }

    /// Resolves a click at pixel `(x, y)` to the nearest part.
    pub fn pick_at(
        &self,
        x: f32,
        y: f32,
        viewport: Viewport,
        camera: &Camera,
        registry: &PartRegistry,
        hierarchy: &Hierarchy,
    ) -> PickResult {
        let ndc = pointer_to_ndc(x, y, viewport)?;
        let ray = camera.ray_through(ndc)?;
        debug!("pick ({}, {}) -> ndc {} ray dir {}", x, y, ndc, ray.direction);
        self.pick_ray(&ray, registry, hierarchy)
    }

    /// Nearest registered part along `ray`, using current (exploded)
    /// transforms. Equal distances keep the earlier part in traversal order.
    pub fn pick_ray(&self, ray: &Ray, registry: &PartRegistry, hierarchy: &Hierarchy) -> PickResult {
        if registry.is_empty() {
            return None;
        }

        let mut best: PickResult = None;
        let mut tested = 0;

        for (id, world) in hierarchy.walk() {
            if !registry.contains(id) {
                continue;
            }
            let Some(mesh) = hierarchy.node(id).and_then(|n| n.mesh.as_ref()) else {
                continue;
            };
            tested += 1;

            let Some(distance) = intersect_mesh(ray, mesh, &world) else {
                continue;
            };
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(PickHit {
                    part: id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }

        debug!("pick tested {} parts, hit {:?}", tested, best.map(|b| b.part));
        best
    }
}

/// Distance to the closest triangle of `mesh` placed by `world`
fn intersect_mesh(ray: &Ray, mesh: &Mesh, world: &Mat4) -> Option<f32> {
    let bounds = mesh.bounds()?.transformed(world);
    // Cheap reject before touching triangles
    ray.intersect_aabb(&bounds)?;

    let triangles = mesh
        .triangles()
        .iter()
        .map(|tri| tri.map(|v| world.transform_point3(v)));
    nearest_intersection(ray, triangles).map(|(_, hit)| hit.t)
}
