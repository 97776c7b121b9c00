mod common;

use common::{cube, model_with_parts};
use explode_inspector::camera::{Camera, Viewport};
use explode_inspector::math::Ray;
use explode_inspector::{ExplosionEngine, Hierarchy, Mesh, NodeDesc, PartRegistry, PickingService};
use glam::Vec3;

fn front_camera() -> Camera {
    let mut camera = Camera::default();
    camera.look_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
    camera.set_aspect(800.0 / 600.0);
    camera
}

const VIEWPORT: Viewport = Viewport {
    width: 800.0,
    height: 600.0,
};

#[cfg(test)]
mod pick_at_tests {
    use super::*;

    #[test]
    fn test_nearer_part_wins() {
        // `far` comes first in traversal order so order alone can't explain the result
        let (h, ids) = model_with_parts(Vec3::ZERO, &[Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO]);
        let registry = PartRegistry::capture(&h);

        let hit = PickingService::new()
            .pick_at(405.0, 295.0, VIEWPORT, &front_camera(), &registry, &h)
            .unwrap();

        assert_eq!(hit.part, ids[1]);
        assert!((hit.distance - 9.5).abs() < 1e-3, "distance was {}", hit.distance);
    }

    #[test]
    fn test_empty_model_never_hits() {
        let h = Hierarchy::new(NodeDesc::group("root"));
        let registry = PartRegistry::capture(&h);
        let service = PickingService::new();

        for (x, y) in [(0.0, 0.0), (400.0, 300.0), (799.0, 599.0), (-50.0, 1e6)] {
            assert!(service.pick_at(x, y, VIEWPORT, &front_camera(), &registry, &h).is_none());
        }
    }

    #[test]
    fn test_click_beside_part_misses() {
        let (h, _) = model_with_parts(Vec3::ZERO, &[Vec3::ZERO]);
        let registry = PartRegistry::capture(&h);

        let hit = PickingService::new().pick_at(5.0, 5.0, VIEWPORT, &front_camera(), &registry, &h);

        assert!(hit.is_none());
    }

    #[test]
    fn test_off_center_click_finds_off_center_part() {
        let (h, ids) = model_with_parts(Vec3::ZERO, &[Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)]);
        let registry = PartRegistry::capture(&h);

        // tan(22.5°) * 10 ≈ 4.14 world units to the top edge, so y=3 is ~72% of the way up
        let y = 300.0 - 300.0 * (3.0 / (10.0 * 22.5_f32.to_radians().tan()));
        let hit = PickingService::new()
            .pick_at(405.0, y, VIEWPORT, &front_camera(), &registry, &h)
            .unwrap();

        assert_eq!(hit.part, ids[1]);
    }

    #[test]
    fn test_degenerate_viewport_is_a_miss() {
        let (h, _) = model_with_parts(Vec3::ZERO, &[Vec3::ZERO]);
        let registry = PartRegistry::capture(&h);
        let viewport = Viewport::new(0.0, 0.0);

        let hit = PickingService::new().pick_at(0.0, 0.0, viewport, &front_camera(), &registry, &h);

        assert!(hit.is_none());
    }

    #[test]
    fn test_repeated_picks_agree() {
        let positions = [Vec3::ZERO, Vec3::new(0.2, 0.1, -1.0), Vec3::new(-0.3, 0.0, -2.0)];
        let (h, _) = model_with_parts(Vec3::ZERO, &positions);
        let registry = PartRegistry::capture(&h);
        let service = PickingService::new();
        let camera = front_camera();

        let first = service.pick_at(410.0, 290.0, VIEWPORT, &camera, &registry, &h);
        assert!(first.is_some());
        for _ in 0..10 {
            assert_eq!(service.pick_at(410.0, 290.0, VIEWPORT, &camera, &registry, &h), first);
        }
    }
}

#[cfg(test)]
mod pick_ray_tests {
    use super::*;

    #[test]
    fn test_explosion_changes_what_is_picked() {
        let (mut h, ids) = model_with_parts(Vec3::ZERO, &[Vec3::new(0.5, 0.0, 0.0)]);
        let registry = PartRegistry::capture(&h);
        let ray = Ray::new(Vec3::new(0.6, 0.1, 10.0), Vec3::NEG_Z).unwrap();
        let service = PickingService::new();

        assert_eq!(service.pick_ray(&ray, &registry, &h).map(|p| p.part), Some(ids[0]));

        ExplosionEngine::default().apply(1.0, &registry, &mut h);
        assert!(service.pick_ray(&ray, &registry, &h).is_none());

        ExplosionEngine::default().apply(0.0, &registry, &mut h);
        assert_eq!(service.pick_ray(&ray, &registry, &h).map(|p| p.part), Some(ids[0]));
    }

    #[test]
    fn test_nested_part_is_reported_not_its_parent() {
        let mut h = Hierarchy::new(NodeDesc::group("root"));
        let root = h.root();
        let outer = h
            .add_node(root, NodeDesc::part("housing", cube()).at(Vec3::new(0.0, 0.0, -3.0)))
            .unwrap();
        let inner = h
            .add_node(outer, NodeDesc::part("pin", cube()).at(Vec3::new(0.0, 0.0, 2.0)))
            .unwrap();
        let registry = PartRegistry::capture(&h);
        let ray = Ray::new(Vec3::new(0.1, 0.2, 10.0), Vec3::NEG_Z).unwrap();

        let hit = PickingService::new().pick_ray(&ray, &registry, &h).unwrap();

        assert_eq!(hit.part, inner);
        assert!((hit.distance - 10.5).abs() < 1e-4);
    }

    #[test]
    fn test_result_names_exactly_one_part_among_many() {
        let positions: Vec<Vec3> = (0..20).map(|i| Vec3::new(0.0, 0.0, -(i as f32) * 1.5)).collect();
        let (h, ids) = model_with_parts(Vec3::ZERO, &positions);
        let registry = PartRegistry::capture(&h);
        let ray = Ray::new(Vec3::new(0.1, 0.1, 10.0), Vec3::NEG_Z).unwrap();

        let hit = PickingService::new().pick_ray(&ray, &registry, &h).unwrap();

        assert_eq!(hit.part, ids[0]);
        assert!(hit.distance > 0.0);
    }

    #[test]
    fn test_sub_millimetre_part_is_pickable() {
        let mut h = Hierarchy::new(NodeDesc::group("root"));
        let root = h.root();
        let mesh = Mesh::cuboid(Vec3::splat(-1e-4), Vec3::splat(1e-4));
        let pin = h.add_node(root, NodeDesc::part("pin", mesh)).unwrap();
        let registry = PartRegistry::capture(&h);
        let ray = Ray::new(Vec3::new(2e-5, 3e-5, 1.0), Vec3::NEG_Z).unwrap();

        let hit = PickingService::new().pick_ray(&ray, &registry, &h).unwrap();

        assert_eq!(hit.part, pin);
        assert!((hit.distance - 0.9999).abs() < 1e-5, "distance was {}", hit.distance);
    }

    #[test]
    fn test_camera_inside_part_hits_far_wall() {
        let (h, ids) = model_with_parts(Vec3::ZERO, &[Vec3::ZERO]);
        let registry = PartRegistry::capture(&h);
        let ray = Ray::new(Vec3::new(0.0, 0.1, 0.2), Vec3::X).unwrap();

        let hit = PickingService::new().pick_ray(&ray, &registry, &h).unwrap();

        assert_eq!(hit.part, ids[0]);
        assert!((hit.distance - 0.5).abs() < 1e-5);
    }
}
