/// Level-of-detail node whose high-detail child lives outside the graph

use crate::culling::BoundingSphere;
use crate::paging::PagingKey;
use super::{Node, NodeRef, Visitor};

/// Paged level of detail
///
/// The high-detail subgraph is identified by `key` and loaded on demand by
/// the paging subsystem. `proxy` is the always-present coarse stand-in
/// rendered while the subgraph is not resident or not wanted.
#[derive(Debug)]
pub struct PagedLOD {
    bound: BoundingSphere,
    key: PagingKey,
    high_detail_threshold: f32,
    priority: Option<f32>,
    proxy: NodeRef,
}

impl PagedLOD {
    pub fn new(bound: BoundingSphere, key: impl Into<PagingKey>, proxy: NodeRef) -> Self {
        Self {
            bound,
            key: key.into(),
            high_detail_threshold: f32::INFINITY,
            priority: None,
            proxy,
        }
    }

    /// Largest metric at which the high-detail subgraph is wanted
    pub fn with_high_detail_threshold(mut self, threshold: f32) -> Self {
        self.high_detail_threshold = threshold;
        self
    }

    /// Fixed load priority, overriding the distance-derived one
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn bound(&self) -> &BoundingSphere {
        &self.bound
    }

    pub fn key(&self) -> &PagingKey {
        &self.key
    }

    pub fn high_detail_threshold(&self) -> f32 {
        self.high_detail_threshold
    }

    pub fn proxy(&self) -> &NodeRef {
        &self.proxy
    }

    /// Load priority at `metric`: the fixed priority if set, otherwise
    /// closer nodes get higher priority
    pub fn load_priority(&self, metric: f32) -> f32 {
        self.priority.unwrap_or_else(|| 1.0 / (1.0 + metric.max(0.0)))
    }

    /// Visit the proxy (used by non-paging visitors)
    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        self.proxy.accept(visitor);
    }
}

impl Node for PagedLOD {
    fn class_name(&self) -> &'static str {
        "PagedLOD"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_paged_lod(self);
    }
}
