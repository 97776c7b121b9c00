use glam::{Mat4, Vec2, Vec3};

use crate::config::CameraConfig;
use crate::math::Ray;

/// Drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Pointer position in pixels (y down) to normalized device coordinates
/// (both axes in [-1, 1], y up). `None` for an unusable viewport.
pub fn pointer_to_ndc(x: f32, y: f32, viewport: Viewport) -> Option<Vec2> {
    if !viewport.is_valid() {
        return None;
    }
    Some(Vec2::new(
        (x / viewport.width) * 2.0 - 1.0,
        -(y / viewport.height) * 2.0 + 1.0,
    ))
}

/// Perspective camera looking at a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 16.0 / 9.0)
    }
}

impl Camera {
    pub fn from_config(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            up: Vec3::Y,
            fov_y_degrees: config.fov_y_degrees,
            aspect,
            near: config.near,
            far: config.far,
        }
    }

    pub fn look_at(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// World-space ray from the camera through a point in device space
    pub fn ray_through(&self, ndc: Vec2) -> Option<Ray> {
        let inverse = (self.projection_matrix() * self.view_matrix()).inverse();
        let near = inverse.project_point3(ndc.extend(-1.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        Ray::new(self.position, far - near)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y_degrees: 45.0,
            aspect: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }

    #[test]
    fn test_pointer_center_is_ndc_origin() {
        let ndc = pointer_to_ndc(400.0, 300.0, Viewport::new(800.0, 600.0)).unwrap();
        assert_eq!(ndc, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_y_is_flipped() {
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(pointer_to_ndc(0.0, 0.0, viewport).unwrap(), Vec2::new(-1.0, 1.0));
        assert_eq!(pointer_to_ndc(800.0, 600.0, viewport).unwrap(), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn test_zero_viewport_has_no_ndc() {
        assert!(pointer_to_ndc(1.0, 1.0, Viewport::new(0.0, 600.0)).is_none());
        assert!(pointer_to_ndc(1.0, 1.0, Viewport::new(800.0, f32::NAN)).is_none());
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = test_camera();
        let ray = camera.ray_through(Vec2::ZERO).unwrap();
        assert_eq!(ray.origin, camera.position);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-4);
    }

    #[test]
    fn test_top_edge_ray_tilts_up_by_half_fov() {
        let camera = test_camera();
        let ray = camera.ray_through(Vec2::new(0.0, 1.0)).unwrap();
        let angle = ray.direction.angle_between(Vec3::NEG_Z).to_degrees();
        assert!(ray.direction.y > 0.0);
        assert!((angle - 22.5).abs() < 0.05, "angle was {}", angle);
    }

    #[test]
    fn test_right_edge_ray_tilts_right() {
        let camera = test_camera();
        let ray = camera.ray_through(Vec2::new(1.0, 0.0)).unwrap();
        assert!(ray.direction.x > 0.0);
        assert!(ray.direction.y.abs() < 1e-4);
    }

    #[test]
    fn test_set_aspect_ignores_garbage() {
        let mut camera = test_camera();
        camera.set_aspect(0.0);
        assert_eq!(camera.aspect, 1.0);
        camera.set_aspect(2.0);
        assert_eq!(camera.aspect, 2.0);
    }
}
