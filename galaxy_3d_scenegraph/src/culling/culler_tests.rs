use glam::{Mat4, Quat, Vec3};
use crate::camera::Frustum;
use crate::culling::{AABB, BoundingSphere, BoundingVolume};
use super::*;

fn view_projection() -> Mat4 {
    let projection = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y);
    projection * view
}

fn sphere(center: Vec3, radius: f32) -> BoundingVolume {
    BoundingSphere::new(center, radius).into()
}

// ============================================================================
// Inside / outside
// ============================================================================

#[test]
fn test_volume_fully_inside_is_visible() {
    let vp = view_projection();
    let frustum = Frustum::clip_space();

    assert!(Culler::is_visible(&sphere(Vec3::ZERO, 1.0), &vp, &frustum));
    assert!(Culler::is_visible(
        &AABB::new(Vec3::splat(-1.0), Vec3::splat(1.0)).into(),
        &vp,
        &frustum,
    ));
}

#[test]
fn test_volume_outside_each_plane_is_rejected() {
    let vp = view_projection();
    let frustum = Frustum::clip_space();

    let outside = [
        Vec3::new(-50.0, 0.0, 0.0), // left
        Vec3::new(50.0, 0.0, 0.0),  // right
        Vec3::new(0.0, -50.0, 0.0), // bottom
        Vec3::new(0.0, 50.0, 0.0),  // top
        Vec3::new(0.0, 0.0, 20.0),  // behind the eye (near)
        Vec3::new(0.0, 0.0, -200.0), // beyond far
    ];

    for center in outside {
        assert!(
            !Culler::is_visible(&sphere(center, 1.0), &vp, &frustum),
            "sphere at {:?} should be culled",
            center
        );
    }
}

#[test]
fn test_straddling_volume_is_visible() {
    let vp = view_projection();
    // The frustum half-width at distance 10 is 10; centre just outside, radius overlaps
    assert!(Culler::is_visible(&sphere(Vec3::new(10.5, 0.0, 0.0), 2.0), &vp, &Frustum::clip_space()));
}

// ============================================================================
// Invariance under rigid transforms
// ============================================================================

#[test]
fn test_visibility_invariant_under_rotation_and_translation() {
    let vp = view_projection();
    let frustum = Frustum::clip_space();

    let transforms = [
        Mat4::from_translation(Vec3::new(3.0, -2.0, 1.0)),
        Mat4::from_rotation_translation(
            Quat::from_rotation_y(1.1),
            Vec3::new(-4.0, 1.0, -3.0),
        ),
        Mat4::from_rotation_translation(
            Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), 2.3),
            Vec3::new(0.5, 7.0, -20.0),
        ),
    ];

    let world_inside = Vec3::new(1.0, 1.0, -2.0);
    let world_outside = Vec3::new(0.0, 0.0, 30.0);

    for model in transforms {
        let inverse = model.inverse();
        let local_inside = inverse.transform_point3(world_inside);
        let local_outside = inverse.transform_point3(world_outside);
        let composed = vp * model;

        assert!(Culler::is_visible(&sphere(local_inside, 0.5), &composed, &frustum));
        assert!(!Culler::is_visible(&sphere(local_outside, 0.5), &composed, &frustum));
    }
}

// ============================================================================
// Malformed volumes and local tests
// ============================================================================

#[test]
fn test_invalid_volume_is_conservatively_visible() {
    let vp = view_projection();
    assert!(Culler::is_visible(&sphere(Vec3::new(0.0, 0.0, 500.0), -1.0), &vp, &Frustum::clip_space()));
}

#[test]
fn test_is_visible_local_matches_is_visible() {
    let vp = view_projection();
    let local = Frustum::clip_space().transformed(&vp);

    for center in [Vec3::ZERO, Vec3::new(40.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -95.0)] {
        let volume = sphere(center, 1.0);
        assert_eq!(
            Culler::is_visible_local(&volume, &local),
            Culler::is_visible(&volume, &vp, &Frustum::clip_space()),
        );
    }
}
