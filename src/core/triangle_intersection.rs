use glam::Vec3;

use crate::math::Ray;

/// Result of triangle intersection test
#[derive(Debug, Clone, Copy)]
pub struct TriangleIntersection {
    pub t: f32,           // Distance along ray
    pub u: f32,           // Barycentric coordinate u
    pub v: f32,           // Barycentric coordinate v
}

/// Möller-Trumbore ray-triangle intersection algorithm.
/// Two-sided: back faces are hit as well, like a picker should.
pub fn moller_trumbore_intersect(
    ray_origin: Vec3,
    ray_dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<TriangleIntersection> {
    const EPSILON: f32 = 1e-7;
    // Relative to the edge lengths, since the determinant scales with area
    const PARALLEL_TOLERANCE: f32 = 1e-6;

    let edge1 = v1 - v0;
    let edge2 = v2 - v0;

    let h = ray_dir.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle (or the triangle is degenerate)
    if a.abs() <= PARALLEL_TOLERANCE * edge1.length() * edge2.length() {
        return None;
    }

    let f = 1.0 / a;
    let s = ray_origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray_dir.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Behind (or at) the origin
    if t <= EPSILON {
        return None;
    }

    Some(TriangleIntersection { t, u, v })
}

/// Closest hit over a triangle list, first one wins on equal distance
pub fn nearest_intersection<I>(ray: &Ray, triangles: I) -> Option<(usize, TriangleIntersection)>
where
    I: IntoIterator<Item = [Vec3; 3]>,
{
    let mut closest: Option<(usize, TriangleIntersection)> = None;

    for (idx, [v0, v1, v2]) in triangles.into_iter().enumerate() {
        if let Some(hit) = moller_trumbore_intersect(ray.origin, ray.direction, v0, v1, v2) {
            if closest.map_or(true, |(_, best)| hit.t < best.t) {
                closest = Some((idx, hit));
            }
        }
    }

    closest
}
