//! Simulation system
//!
//! Manages the frame loop:
//! - Delta time calculation
//! - Scene graph update (entities, then camera)
//! - Draw pass into the frame renderer

use std::time::Instant;

use mechsim_core::{SceneGraph, SceneObject};
use mechsim_render::{FrameRenderer, FrameStats};

/// Default cap on a single frame step, in seconds
pub const DEFAULT_MAX_FRAME_DT: f32 = 0.25;

/// Result of one simulated frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameResult {
    /// Step actually applied, after capping
    pub dt: f32,
    pub stats: FrameStats,
}

/// Drives a scene graph one frame at a time
pub struct SimulationSystem {
    last_frame: Instant,
    max_dt: f32,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            max_dt: DEFAULT_MAX_FRAME_DT,
        }
    }

    /// Set the longest step a single frame may apply
    ///
    /// Negative or NaN caps are replaced by the default.
    pub fn with_max_dt(mut self, max_dt: f32) -> Self {
        if max_dt >= 0.0 {
            self.max_dt = max_dt;
        } else {
            log::warn!("Ignoring invalid max frame dt {}, using {}", max_dt, DEFAULT_MAX_FRAME_DT);
            self.max_dt = DEFAULT_MAX_FRAME_DT;
        }
        self
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }

    /// Run one frame using wall-clock time since the previous frame
    pub fn frame<T: SceneObject>(
        &mut self,
        graph: &mut SceneGraph<T>,
        renderer: &mut FrameRenderer,
    ) -> FrameResult {
        let now = Instant::now();
        let raw_dt = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.step(graph, renderer, raw_dt)
    }

    /// Run one frame with an explicit step
    ///
    /// Steps longer than `max_dt` are clamped so a stall (first frame,
    /// debugger pause) does not fling every motion to its end.
    pub fn step<T: SceneObject>(
        &mut self,
        graph: &mut SceneGraph<T>,
        renderer: &mut FrameRenderer,
        raw_dt: f32,
    ) -> FrameResult {
        let dt = raw_dt.max(0.0).min(self.max_dt);
        graph.update(dt);
        let stats = renderer.render(graph);
        FrameResult { dt, stats }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}
