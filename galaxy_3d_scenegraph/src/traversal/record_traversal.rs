/// RecordTraversal - records one frame of a scene graph into a command list
///
/// The traversal is a `Visitor`: nodes dispatch to the `apply_*` method of
/// their kind. Every stack push made while entering a node is owned by a
/// `TraversalScope` guard, so each exit path (normal return or culled
/// early return) pops exactly what was pushed.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use glam::Mat4;
use crate::camera::Camera;
use crate::culling::{BoundingSphere, BoundingVolume, Culler};
use crate::error::{Error, Result};
use crate::node::{
    Node, Visitor, Group, QuadGroup, CullGroup, CullNode, LOD, LodBoundary, PagedLOD,
    MatrixTransform, StateGroup, StateCommand, View, ViewMask, Command, Commands,
};
use crate::paging::{PagingCoordinator, Residency};
use crate::render::CommandList;
use crate::{engine_debug, engine_error};
use super::frame::{FrameContext, FrameStamp};
use super::state::State;

/// Level-of-detail metric policy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LodPolicy {
    /// Multiplier applied to the eye-to-bound distance
    pub metric_scale: f32,
    /// Tie-break for metrics exactly on a band threshold
    pub boundary: LodBoundary,
}

impl Default for LodPolicy {
    fn default() -> Self {
        Self {
            metric_scale: 1.0,
            boundary: LodBoundary::Inclusive,
        }
    }
}

/// Record traversal configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordConfig {
    /// Number of state slots (slots `0..max_slot` are valid)
    pub max_slot: u32,
    pub lod: LodPolicy,
    /// Views whose mask does not intersect this are skipped
    pub traversal_mask: ViewMask,
}

impl Default for RecordConfig {
    fn default() -> Self {
        Self {
            max_slot: 2,
            lod: LodPolicy::default(),
            traversal_mask: ViewMask::ALL,
        }
    }
}

/// Counters collected during one `record` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordStats {
    pub nodes_visited: usize,
    /// Subtrees skipped by frustum culling
    pub culled: usize,
    pub commands_recorded: usize,
    /// New paging load requests posted
    pub load_requests: usize,
    /// Paged nodes rendered through their proxy
    pub proxies_visited: usize,
    /// Node kinds without a handler
    pub unknown_nodes: usize,
    /// Bounding volumes that could not be tested (treated as visible)
    pub invalid_bounds: usize,
    /// Commands or state the command list rejected
    pub recording_errors: usize,
    /// State commands bound to out-of-range slots
    pub slot_errors: usize,
}

/// Scene graph record traversal
pub struct RecordTraversal<'a> {
    config: RecordConfig,
    state: State,
    frame_stamp: FrameStamp,
    command_list: Option<&'a mut dyn CommandList>,
    paging: Option<PagingCoordinator>,
    stats: RecordStats,
}

impl<'a> RecordTraversal<'a> {
    pub fn new(config: RecordConfig) -> Self {
        Self {
            config,
            state: State::new(config.max_slot),
            frame_stamp: FrameStamp::default(),
            command_list: None,
            paging: None,
            stats: RecordStats::default(),
        }
    }

    /// Traversal bound to one frame's inputs
    pub fn from_frame(frame: FrameContext<'a>, config: RecordConfig) -> Self {
        let mut traversal = Self::new(config);
        traversal.set_frame_stamp(frame.frame_stamp);
        traversal.set_projection_and_view_matrix(frame.projection, frame.view);
        traversal.set_command_list(Some(frame.command_list));
        traversal
    }

    // ===== SETUP =====

    pub fn set_command_list(&mut self, command_list: Option<&'a mut dyn CommandList>) {
        self.command_list = command_list;
        self.state.mark_all_dirty();
    }

    pub fn has_command_list(&self) -> bool {
        self.command_list.is_some()
    }

    pub fn set_frame_stamp(&mut self, frame_stamp: FrameStamp) {
        self.frame_stamp = frame_stamp;
    }

    pub fn frame_stamp(&self) -> FrameStamp {
        self.frame_stamp
    }

    /// Reset the projection and model-view stacks to a new camera
    pub fn set_projection_and_view_matrix(&mut self, projection: Mat4, view: Mat4) {
        self.state.set_projection_and_view(projection, view);
    }

    /// Attach (or detach) the paging subsystem used by `PagedLOD` nodes
    pub fn set_paging_coordinator(&mut self, paging: Option<PagingCoordinator>) {
        self.paging = paging;
    }

    pub fn paging_coordinator(&self) -> Option<&PagingCoordinator> {
        self.paging.as_ref()
    }

    pub fn config(&self) -> &RecordConfig {
        &self.config
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn stats(&self) -> RecordStats {
        self.stats
    }

    // ===== TRAVERSAL =====

    /// Visit `node` with the current state
    pub fn apply(&mut self, node: &dyn Node) {
        node.accept(self);
    }

    /// Record a whole frame starting at `root`
    ///
    /// Fails only when no command list is bound. Every problem found inside
    /// the graph is logged, counted in the returned stats and skipped.
    pub fn record(&mut self, root: &dyn Node) -> Result<RecordStats> {
        if self.command_list.is_none() {
            engine_error!("galaxy3d::RecordTraversal", "record() called without a command list");
            return Err(Error::MissingCommandTarget);
        }

        self.stats = RecordStats::default();
        self.state.mark_all_dirty();

        let before = self.state.depths();
        root.accept(self);
        let after = self.state.depths();
        if before != after {
            engine_error!("galaxy3d::RecordTraversal",
                "Traversal stacks unbalanced after frame {}: {:?} -> {:?}",
                self.frame_stamp.frame_count, before, after);
        }

        Ok(self.stats)
    }

    fn is_visible(&mut self, bound: &BoundingVolume) -> bool {
        if !bound.is_valid() {
            self.stats.invalid_bounds += 1;
            return true;
        }
        if Culler::is_visible_local(bound, self.state.local_frustum()) {
            return true;
        }
        self.stats.culled += 1;
        false
    }

    /// Eye-to-centre distance in view space, scaled by the LOD policy
    fn lod_metric(&self, bound: &BoundingSphere) -> f32 {
        let center = self.state.modelview().transform_point3(bound.center);
        center.length() * self.config.lod.metric_scale
    }

    fn record_command(&mut self, command: &dyn Command) {
        let Some(command_list) = self.command_list.as_deref_mut() else {
            return;
        };

        if let Err(error) = self.state.record(command_list) {
            self.stats.recording_errors += 1;
            engine_error!("galaxy3d::RecordTraversal",
                "Failed to record state before '{}': {}", command.class_name(), error);
            return;
        }

        match command.record(command_list) {
            Ok(()) => self.stats.commands_recorded += 1,
            Err(error) => {
                self.stats.recording_errors += 1;
                engine_error!("galaxy3d::RecordTraversal",
                    "Failed to record '{}': {}", command.class_name(), error);
            }
        }
    }
}

impl<'a> Visitor for RecordTraversal<'a> {
    fn apply_node(&mut self, node: &dyn Node) {
        self.stats.nodes_visited += 1;
        self.stats.unknown_nodes += 1;
        engine_debug!("galaxy3d::RecordTraversal",
            "No handler for node kind '{}', skipping", node.class_name());
    }

    fn apply_group(&mut self, group: &Group) {
        self.stats.nodes_visited += 1;
        group.traverse(self);
    }

    fn apply_quad_group(&mut self, group: &QuadGroup) {
        self.stats.nodes_visited += 1;
        group.traverse(self);
    }

    fn apply_cull_group(&mut self, group: &CullGroup) {
        self.stats.nodes_visited += 1;
        if !self.is_visible(group.bound()) {
            return;
        }
        group.traverse(self);
    }

    fn apply_cull_node(&mut self, node: &CullNode) {
        self.stats.nodes_visited += 1;
        if !self.is_visible(node.bound()) {
            return;
        }
        node.traverse(self);
    }

    fn apply_lod(&mut self, lod: &LOD) {
        self.stats.nodes_visited += 1;
        if !self.is_visible(&BoundingVolume::Sphere(*lod.bound())) {
            return;
        }

        let metric = self.lod_metric(lod.bound());
        if let Some((_, child)) = lod.select_band(metric, self.config.lod.boundary) {
            child.accept(self);
        }
    }

    fn apply_paged_lod(&mut self, paged: &PagedLOD) {
        self.stats.nodes_visited += 1;
        if !self.is_visible(&BoundingVolume::Sphere(*paged.bound())) {
            return;
        }

        let metric = self.lod_metric(paged.bound());
        let wants_detail = self
            .config
            .lod
            .boundary
            .covers(paged.high_detail_threshold(), metric);

        let frame = self.frame_stamp.frame_count;
        let resident = match (&self.paging, wants_detail) {
            (Some(paging), true) => {
                let key = paged.key();
                let status = paging.residency_for(key);
                match status.residency {
                    Residency::Resident => {
                        paging.touch(key, frame);
                        status.root
                    }
                    Residency::Loading => {
                        paging.touch(key, frame);
                        None
                    }
                    Residency::Unloaded => {
                        if paging.request_load(key, paged.load_priority(metric), frame) {
                            self.stats.load_requests += 1;
                        }
                        None
                    }
                    Residency::Expired => None,
                }
            }
            _ => None,
        };

        match resident {
            Some(root) => root.accept(self),
            None => {
                self.stats.proxies_visited += 1;
                paged.proxy().accept(self);
            }
        }
    }

    fn apply_matrix_transform(&mut self, transform: &MatrixTransform) {
        self.stats.nodes_visited += 1;
        let mut scope = TraversalScope::transform(self, transform.matrix());
        transform.traverse(&mut *scope);
    }

    fn apply_state_group(&mut self, group: &StateGroup) {
        self.stats.nodes_visited += 1;
        let mut scope = TraversalScope::state_commands(self, group.state_commands());
        group.traverse(&mut *scope);
    }

    fn apply_view(&mut self, view: &View) {
        self.stats.nodes_visited += 1;
        if !view.mask().intersects(self.config.traversal_mask) {
            return;
        }
        let mut scope = TraversalScope::view(self, view.camera());
        view.traverse(&mut *scope);
    }

    fn apply_commands(&mut self, commands: &Commands) {
        self.stats.nodes_visited += 1;
        for command in commands.commands() {
            self.record_command(command.as_ref());
        }
    }

    fn apply_command(&mut self, command: &dyn Command) {
        self.stats.nodes_visited += 1;
        self.record_command(command);
    }

    fn as_visitor(&mut self) -> &mut dyn Visitor {
        self
    }
}

// ===== SCOPE GUARD =====

enum ScopeKind<'n> {
    Transform,
    View,
    StateCommands(&'n [Arc<dyn StateCommand>]),
}

/// Pops what its constructor pushed when dropped
///
/// Dereferences to the traversal so children are visited through the
/// guard while it is alive.
struct TraversalScope<'s, 'a, 'n> {
    traversal: &'s mut RecordTraversal<'a>,
    kind: ScopeKind<'n>,
}

impl<'s, 'a, 'n> TraversalScope<'s, 'a, 'n> {
    fn transform(traversal: &'s mut RecordTraversal<'a>, local: &Mat4) -> Self {
        traversal.state.push_transform(local);
        Self { traversal, kind: ScopeKind::Transform }
    }

    fn view(traversal: &'s mut RecordTraversal<'a>, camera: &Camera) -> Self {
        traversal.state.push_view(camera);
        Self { traversal, kind: ScopeKind::View }
    }

    /// Push every state command; out-of-range slots are logged and skipped
    fn state_commands(traversal: &'s mut RecordTraversal<'a>, commands: &'n [Arc<dyn StateCommand>]) -> Self {
        for command in commands {
            if let Err(error) = traversal.state.state_stack_mut().push(command.slot(), command.clone()) {
                traversal.stats.slot_errors += 1;
                engine_error!("galaxy3d::RecordTraversal", "Skipping state binding {:?}: {}", command, error);
            }
        }
        Self { traversal, kind: ScopeKind::StateCommands(commands) }
    }
}

impl<'s, 'a, 'n> Deref for TraversalScope<'s, 'a, 'n> {
    type Target = RecordTraversal<'a>;

    fn deref(&self) -> &Self::Target {
        &*self.traversal
    }
}

impl<'s, 'a, 'n> DerefMut for TraversalScope<'s, 'a, 'n> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.traversal
    }
}

impl<'s, 'a, 'n> Drop for TraversalScope<'s, 'a, 'n> {
    fn drop(&mut self) {
        let state = &mut self.traversal.state;
        match self.kind {
            ScopeKind::Transform => state.pop_transform(),
            ScopeKind::View => state.pop_view(),
            ScopeKind::StateCommands(commands) => {
                let stack = state.state_stack_mut();
                let max_slot = stack.max_slot();
                // Pop in reverse, skipping the slots the push rejected.
                for command in commands.iter().rev().filter(|c| c.slot() < max_slot) {
                    if let Err(error) = stack.pop(command.slot()) {
                        engine_error!("galaxy3d::RecordTraversal", "State stack imbalance: {}", error);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "record_traversal_tests.rs"]
mod tests;
