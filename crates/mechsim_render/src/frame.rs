//! Per-frame rendering
//!
//! [`FrameRenderer`] owns the projection parameters and a reusable
//! [`DrawList`], and turns one scene graph draw pass into GPU-ready
//! instance data.

use mechsim_core::{SceneGraph, SceneObject};
use mechsim_math::{mat4, Mat4};

use crate::draw_list::DrawList;

/// Perspective projection parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians
    pub fov_y: f32,
    /// Width over height
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y: 45f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 300.0,
        }
    }
}

impl Projection {
    /// Create projection parameters, with the field of view in degrees
    pub fn new(fov_degrees: f32, width: u32, height: u32, near: f32, far: f32) -> Self {
        Self {
            fov_y: fov_degrees.to_radians(),
            aspect: aspect_ratio(width, height),
            near,
            far,
        }
    }

    /// Update the aspect ratio after a resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = aspect_ratio(width, height);
    }

    /// Projection matrix
    pub fn matrix(&self) -> Mat4 {
        mat4::perspective(self.fov_y, self.aspect, self.near, self.far)
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width as f32 / height.max(1) as f32
}

/// Counts for one rendered frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub instances: usize,
    pub highlighted: usize,
}

/// Builds draw lists from a scene graph, one frame at a time
pub struct FrameRenderer {
    projection: Projection,
    draw_list: DrawList,
    frame: u64,
}

impl FrameRenderer {
    pub fn new(projection: Projection) -> Self {
        Self {
            projection,
            draw_list: DrawList::new(),
            frame: 0,
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn projection_mut(&mut self) -> &mut Projection {
        &mut self.projection
    }

    /// Draw list produced by the last call to `render`
    pub fn draw_list(&self) -> &DrawList {
        &self.draw_list
    }

    /// Number of frames rendered so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Run the scene's draw pass into a fresh draw list
    pub fn render<T: SceneObject>(&mut self, graph: &SceneGraph<T>) -> FrameStats {
        self.draw_list.clear();
        graph.draw(self.projection.matrix(), &mut self.draw_list);
        self.frame += 1;

        let stats = FrameStats {
            frame: self.frame,
            instances: self.draw_list.len(),
            highlighted: self.draw_list.highlight_count(),
        };
        log::trace!("Frame {}: {} instances ({} highlighted)", stats.frame, stats.instances, stats.highlighted);
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_new_converts_degrees() {
        let p = Projection::new(90.0, 800, 400, 0.1, 100.0);
        assert!((p.fov_y - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(p.aspect, 2.0);
    }

    #[test]
    fn test_resize_guards_zero_height() {
        let mut p = Projection::default();
        p.resize(640, 0);
        assert!(p.aspect.is_finite());
        p.resize(640, 480);
        assert!((p.aspect - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_projection_matrix_matches_helper() {
        let p = Projection::default();
        assert_eq!(p.matrix(), mat4::perspective(p.fov_y, p.aspect, p.near, p.far));
    }
}
