/// Level-of-detail selection node

use crate::culling::BoundingSphere;
use super::{Node, NodeRef, Visitor};

/// How a band treats a metric equal to its threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LodBoundary {
    /// `metric <= threshold` is covered
    #[default]
    Inclusive,
    /// Only `metric < threshold` is covered
    Exclusive,
}

impl LodBoundary {
    /// Whether a band with `threshold` covers `metric`
    pub fn covers(&self, threshold: f32, metric: f32) -> bool {
        match self {
            LodBoundary::Inclusive => metric <= threshold,
            LodBoundary::Exclusive => metric < threshold,
        }
    }
}

/// One alternative representation and the largest metric it is used for
#[derive(Debug, Clone)]
pub struct LodBand {
    pub threshold: f32,
    /// `None` marks a band whose representation is missing
    pub child: Option<NodeRef>,
}

/// Selects one child band from the distance metric at the node
///
/// Bands are kept ordered finest (smallest threshold) to coarsest.
#[derive(Debug)]
pub struct LOD {
    bound: BoundingSphere,
    bands: Vec<LodBand>,
}

impl LOD {
    pub fn new(bound: BoundingSphere) -> Self {
        Self {
            bound,
            bands: Vec::new(),
        }
    }

    /// Insert a band, keeping bands sorted by threshold
    ///
    /// Bands with equal thresholds keep insertion order.
    pub fn add_band(&mut self, threshold: f32, child: Option<NodeRef>) {
        let index = self.bands.partition_point(|band| band.threshold <= threshold);
        self.bands.insert(index, LodBand { threshold, child });
    }

    /// Builder form of `add_band`
    pub fn with_band(mut self, threshold: f32, child: Option<NodeRef>) -> Self {
        self.add_band(threshold, child);
        self
    }

    pub fn bound(&self) -> &BoundingSphere {
        &self.bound
    }

    pub fn bands(&self) -> &[LodBand] {
        &self.bands
    }

    /// Pick the band to render for `metric`
    ///
    /// The finest band whose threshold covers the metric wins. If that
    /// band has no child, the next coarser band with a child is used.
    /// Returns `None` when no band qualifies.
    pub fn select_band(&self, metric: f32, boundary: LodBoundary) -> Option<(usize, &NodeRef)> {
        let first = self
            .bands
            .iter()
            .position(|band| boundary.covers(band.threshold, metric))?;

        self.bands[first..]
            .iter()
            .enumerate()
            .find_map(|(offset, band)| band.child.as_ref().map(|child| (first + offset, child)))
    }

    /// Visit every present band (used by non-selecting visitors)
    pub fn traverse(&self, visitor: &mut dyn Visitor) {
        for child in self.bands.iter().filter_map(|band| band.child.as_ref()) {
            child.accept(visitor);
        }
    }
}

impl Node for LOD {
    fn class_name(&self) -> &'static str {
        "LOD"
    }

    fn accept(&self, visitor: &mut dyn Visitor) {
        visitor.apply_lod(self);
    }
}

#[cfg(test)]
#[path = "lod_tests.rs"]
mod tests;
