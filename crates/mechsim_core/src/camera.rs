//! Follow camera
//!
//! The camera looks at a single point (its `position`) from a fixed offset.
//! That point is either parked (`Still`), easing toward a fixed destination
//! (`Focus`), or chasing a scene node (`Track`). Tracking eases in over the
//! transition time and then follows the node exactly every frame.

use mechsim_math::{lerp, mat4, smooth, Mat4, Vec3};

use crate::object::SceneObject;
use crate::tree::{NodeKey, OwnershipTree};

/// Default seconds spent easing toward a new focus point or target
pub const DEFAULT_TRANSITION_TIME: f64 = 0.5;
/// Default distance multiplier applied to the eye offset
pub const DEFAULT_ZOOM: f32 = 8.0;

/// Resolves a tracked node to a world-space point
pub trait TargetSource {
    /// Current position of `key`, or None once it no longer exists
    fn target_position(&self, key: NodeKey) -> Option<Vec3>;
}

impl<T: SceneObject> TargetSource for OwnershipTree<T> {
    fn target_position(&self, key: NodeKey) -> Option<Vec3> {
        self.get(key).map(SceneObject::position)
    }
}

/// What the camera is currently doing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    Still,
    Focus,
    Track,
}

/// Camera that eases toward points and follows selected nodes
#[derive(Clone, Debug)]
pub struct FollowCamera {
    position: Vec3,
    start: Vec3,
    destination: Vec3,
    target: Option<NodeKey>,
    elapsed: f64,
    total_time: f64,
    mode: CameraMode,
    /// Distance multiplier for `offset`
    pub zoom: f32,
    /// Direction from the look-at point to the eye, before zoom
    pub offset: Vec3,
    pub up: Vec3,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl FollowCamera {
    /// Create a still camera looking at the origin
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            start: Vec3::ZERO,
            destination: Vec3::ZERO,
            target: None,
            elapsed: 0.0,
            total_time: DEFAULT_TRANSITION_TIME,
            mode: CameraMode::Still,
            zoom: DEFAULT_ZOOM,
            offset: Vec3::new(0.0, 5.0, 10.0),
            up: Vec3::Y,
        }
    }

    /// Set how long focus and track transitions take
    ///
    /// Zero, negative or NaN durations make every transition instant.
    pub fn with_transition_time(mut self, seconds: f64) -> Self {
        self.total_time = if seconds > 0.0 { seconds } else { 0.0 };
        self
    }

    pub fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = zoom;
        self
    }

    /// Ease toward a fixed point, then stop
    pub fn focus(&mut self, point: Vec3) {
        self.start = self.position;
        self.destination = point;
        self.target = None;
        self.elapsed = 0.0;
        self.set_mode(CameraMode::Focus);
    }

    /// Ease toward a node, then follow it
    pub fn track(&mut self, target: NodeKey) {
        self.start = self.position;
        self.target = Some(target);
        self.elapsed = 0.0;
        self.set_mode(CameraMode::Track);
    }

    /// Park the camera where it is
    pub fn stop(&mut self) {
        self.target = None;
        self.set_mode(CameraMode::Still);
    }

    /// Advance by `dt` seconds
    pub fn update<S: TargetSource + ?Sized>(&mut self, dt: f64, source: &S) {
        self.elapsed += dt;
        match self.mode {
            CameraMode::Still => {}
            CameraMode::Focus => {
                if self.transition_done() {
                    self.position = self.destination;
                    self.set_mode(CameraMode::Still);
                } else {
                    self.position = lerp(self.start, self.destination, self.progress());
                }
            }
            CameraMode::Track => {
                let Some(target) = self.target.and_then(|key| source.target_position(key)) else {
                    self.stop();
                    return;
                };
                if self.transition_done() {
                    self.position = target;
                } else {
                    self.position = lerp(self.start, target, self.progress());
                }
            }
        }
    }

    /// View matrix looking at `position` from `offset * zoom` away
    pub fn view_transform(&self) -> Mat4 {
        mat4::look_at(self.eye(), self.position, self.up)
    }

    /// Eye position
    pub fn eye(&self) -> Vec3 {
        self.position + self.offset * self.zoom
    }

    /// Point the camera is looking at
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Node being tracked, if any
    pub fn target(&self) -> Option<NodeKey> {
        self.target
    }

    pub fn transition_time(&self) -> f64 {
        self.total_time
    }

    fn transition_done(&self) -> bool {
        self.total_time <= 0.0 || self.elapsed > self.total_time
    }

    fn progress(&self) -> f32 {
        smooth(self.elapsed / self.total_time) as f32
    }

    fn set_mode(&mut self, mode: CameraMode) {
        if self.mode != mode {
            log::debug!("Camera {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }
}
