use glam::{Mat4, Vec3};
use super::*;

// ============================================================================
// AABB
// ============================================================================

#[test]
fn test_aabb_center_and_validity() {
    let aabb = AABB::new(Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 4.0, 6.0));
    assert_eq!(aabb.center(), Vec3::new(0.0, 2.0, 4.0));
    assert!(aabb.is_valid());

    let inverted = AABB::new(Vec3::splat(1.0), Vec3::splat(-1.0));
    assert!(!inverted.is_valid());

    let nan = AABB::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::ONE);
    assert!(!nan.is_valid());
}

#[test]
fn test_aabb_transformed_translation() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let moved = aabb.transformed(&Mat4::from_translation(Vec3::new(10.0, 0.0, 0.0)));
    assert_eq!(moved.min, Vec3::new(9.0, -1.0, -1.0));
    assert_eq!(moved.max, Vec3::new(11.0, 1.0, 1.0));
}

#[test]
fn test_aabb_transformed_rotation_stays_tight() {
    let aabb = AABB::new(Vec3::new(-2.0, -1.0, -1.0), Vec3::new(2.0, 1.0, 1.0));
    let rotated = aabb.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
    assert!((rotated.max.x - 1.0).abs() < 1e-5);
    assert!((rotated.max.y - 2.0).abs() < 1e-5);
}

#[test]
fn test_aabb_bounding_sphere() {
    let aabb = AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0));
    let sphere = aabb.bounding_sphere();
    assert_eq!(sphere.center, Vec3::ZERO);
    assert!((sphere.radius - 3.0_f32.sqrt()).abs() < 1e-5);
}

// ============================================================================
// Sphere / volume
// ============================================================================

#[test]
fn test_sphere_validity() {
    assert!(BoundingSphere::new(Vec3::ZERO, 0.0).is_valid());
    assert!(!BoundingSphere::new(Vec3::ZERO, -1.0).is_valid());
    assert!(!BoundingSphere::new(Vec3::ZERO, f32::INFINITY).is_valid());
}

#[test]
fn test_volume_from_and_center() {
    let volume: BoundingVolume = BoundingSphere::new(Vec3::X, 2.0).into();
    assert_eq!(volume.center(), Vec3::X);
    assert!(volume.is_valid());

    let volume: BoundingVolume = AABB::new(Vec3::ZERO, Vec3::splat(2.0)).into();
    assert_eq!(volume.center(), Vec3::ONE);
}
