/// Per-frame inputs of a record traversal

use glam::Mat4;
use crate::render::CommandList;

/// Frame identifier used for paging bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameStamp {
    /// Monotonically increasing frame index
    pub frame_count: u64,
    /// Simulation time in seconds
    pub simulation_time: f64,
}

impl FrameStamp {
    pub fn new(frame_count: u64, simulation_time: f64) -> Self {
        Self { frame_count, simulation_time }
    }

    /// Stamp of the following frame, `delta` seconds later
    pub fn next(&self, delta: f64) -> Self {
        Self {
            frame_count: self.frame_count + 1,
            simulation_time: self.simulation_time + delta,
        }
    }
}

/// Everything the frame driver supplies to one traversal
pub struct FrameContext<'a> {
    pub frame_stamp: FrameStamp,
    pub projection: Mat4,
    pub view: Mat4,
    pub command_list: &'a mut dyn CommandList,
}

impl<'a> FrameContext<'a> {
    pub fn new(
        frame_stamp: FrameStamp,
        projection: Mat4,
        view: Mat4,
        command_list: &'a mut dyn CommandList,
    ) -> Self {
        Self {
            frame_stamp,
            projection,
            view,
            command_list,
        }
    }
}
