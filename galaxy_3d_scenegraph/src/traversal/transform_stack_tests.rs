use glam::{Mat4, Vec3};
use super::*;

#[test]
fn test_new_stack_is_identity() {
    let stack = TransformStack::new();
    assert_eq!(stack.current(), Mat4::IDENTITY);
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_push_composes_with_top() {
    let base = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
    let local = Mat4::from_scale(Vec3::splat(2.0));
    let mut stack = TransformStack::with_base(base);

    stack.push(&local);
    assert_eq!(stack.current(), base * local);
    assert_eq!(stack.depth(), 1);

    let point = stack.current().transform_point3(Vec3::X);
    assert_eq!(point, Vec3::new(2.0, 0.0, -10.0));
}

#[test]
fn test_pop_restores_previous_top() {
    let mut stack = TransformStack::new();
    let a = Mat4::from_translation(Vec3::X);
    let b = Mat4::from_rotation_y(0.5);

    stack.push(&a);
    stack.push(&b);
    stack.pop();
    assert_eq!(stack.current(), a);
    stack.pop();
    assert_eq!(stack.current(), Mat4::IDENTITY);
    assert_eq!(stack.depth(), 0);
}

#[test]
fn test_push_absolute_ignores_top() {
    let mut stack = TransformStack::with_base(Mat4::from_translation(Vec3::Y));
    let view = Mat4::look_at_rh(Vec3::Z, Vec3::ZERO, Vec3::Y);

    stack.push_absolute(view);
    assert_eq!(stack.current(), view);
    stack.pop();
    assert_eq!(stack.current(), Mat4::from_translation(Vec3::Y));
}

#[test]
fn test_reset_replaces_base() {
    let mut stack = TransformStack::new();
    stack.push(&Mat4::from_translation(Vec3::X));
    stack.reset(Mat4::from_scale(Vec3::splat(3.0)));

    assert_eq!(stack.depth(), 0);
    assert_eq!(stack.current(), Mat4::from_scale(Vec3::splat(3.0)));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "without matching push")]
fn test_pop_underflow_asserts_in_debug() {
    let mut stack = TransformStack::new();
    stack.pop();
}

#[test]
#[cfg(not(debug_assertions))]
fn test_pop_underflow_keeps_base_in_release() {
    let mut stack = TransformStack::new();
    stack.pop();
    assert_eq!(stack.current(), Mat4::IDENTITY);
}
