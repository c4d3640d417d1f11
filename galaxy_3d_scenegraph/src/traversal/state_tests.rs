use std::sync::Arc;
use glam::{Mat4, Vec3};
use crate::camera::Camera;
use crate::culling::{BoundingSphere, BoundingVolume, Culler};
use crate::node::BindGraphicsPipeline;
use crate::render::mock_command_list::{MockCommandList, MockPipeline};
use crate::render::Viewport;
use super::*;

fn projection() -> Mat4 {
    Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0)
}

fn view() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, Vec3::Y)
}

fn viewport(width: f32) -> Viewport {
    Viewport { x: 0.0, y: 0.0, width, height: 600.0, min_depth: 0.0, max_depth: 1.0 }
}

// ============================================================================
// Matrices and frusta
// ============================================================================

#[test]
fn test_set_projection_and_view() {
    let mut state = State::new(2);
    state.set_projection_and_view(projection(), view());

    assert_eq!(state.projection(), projection());
    assert_eq!(state.modelview(), view());
    assert_eq!(state.composed(), projection() * view());
    assert_eq!(state.depths(), StackDepths::default());
}

#[test]
fn test_local_frustum_follows_transform() {
    let mut state = State::new(2);
    state.set_projection_and_view(projection(), view());
    let far_right: BoundingVolume = BoundingSphere::new(Vec3::new(50.0, 0.0, 0.0), 1.0).into();
    assert!(!Culler::is_visible_local(&far_right, state.local_frustum()));

    // Move local space so the sphere lands in front of the camera
    state.push_transform(&Mat4::from_translation(Vec3::new(-50.0, 0.0, 0.0)));
    assert!(Culler::is_visible_local(&far_right, state.local_frustum()));

    state.pop_transform();
    assert!(!Culler::is_visible_local(&far_right, state.local_frustum()));
    assert_eq!(state.depths(), StackDepths::default());
}

#[test]
fn test_push_view_replaces_matrices() {
    let mut state = State::new(2);
    state.set_projection_and_view(projection(), view());
    state.push_transform(&Mat4::from_translation(Vec3::X));

    let other_view = Mat4::look_at_rh(Vec3::new(5.0, 5.0, 5.0), Vec3::ZERO, Vec3::Y);
    let other_projection = Mat4::orthographic_rh(-1.0, 1.0, -1.0, 1.0, 0.1, 10.0);
    state.push_view(&Camera::new(other_view, other_projection));

    assert_eq!(state.modelview(), other_view);
    assert_eq!(state.projection(), other_projection);

    state.pop_view();
    assert_eq!(state.modelview(), view() * Mat4::from_translation(Vec3::X));
    assert_eq!(state.projection(), projection());
}

// ============================================================================
// Lazy recording
// ============================================================================

#[test]
fn test_record_pushes_matrices_once() {
    let mut state = State::new(2);
    state.set_projection_and_view(projection(), view());
    let mut commands = MockCommandList::new();

    state.record(&mut commands).unwrap();
    state.record(&mut commands).unwrap();

    assert_eq!(commands.commands, vec!["push_constants(0)", "push_constants(64)"]);
    assert_eq!(commands.push_constant_data[0].1, bytemuck::bytes_of(&projection()).to_vec());
    assert_eq!(commands.push_constant_data[1].1, bytemuck::bytes_of(&view()).to_vec());
}

#[test]
fn test_record_order_is_viewport_state_matrices() {
    let mut state = State::new(2);
    let mut commands = MockCommandList::new();

    state.state_stack_mut()
        .push(0, Arc::new(BindGraphicsPipeline::new(MockPipeline::new("p"))))
        .unwrap();
    state.push_view(&Camera::new(view(), projection()).with_viewport(viewport(800.0)));
    state.record(&mut commands).unwrap();

    assert_eq!(
        commands.commands,
        vec![
            "set_viewport(800x600)",
            "set_scissor(800x600)",
            "bind_pipeline(p)",
            "push_constants(0)",
            "push_constants(64)",
        ]
    );
}

#[test]
fn test_nested_view_without_viewport_keeps_outer() {
    let mut state = State::new(2);
    state.push_view(&Camera::new(view(), projection()).with_viewport(viewport(800.0)));
    state.push_view(&Camera::new(view(), projection()));

    assert_eq!(state.current_viewport().unwrap().viewport, viewport(800.0));

    state.pop_view();
    state.pop_view();
    assert!(state.current_viewport().is_none());
    assert_eq!(state.depths(), StackDepths::default());
}

#[test]
fn test_pop_view_rerecords_outer_viewport() {
    let mut state = State::new(2);
    let mut commands = MockCommandList::new();

    state.push_view(&Camera::new(view(), projection()).with_viewport(viewport(800.0)));
    state.push_view(&Camera::new(view(), projection()).with_viewport(viewport(200.0)));
    state.record(&mut commands).unwrap();
    state.pop_view();
    state.record(&mut commands).unwrap();

    let viewports: Vec<&String> = commands.commands.iter().filter(|c| c.starts_with("set_viewport")).collect();
    assert_eq!(viewports, vec!["set_viewport(200x600)", "set_viewport(800x600)"]);
}
