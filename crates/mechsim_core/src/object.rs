//! Payload contract for scene graph nodes

use mechsim_math::{Mat4, Vec3};

use crate::render::Renderer;
use crate::NodeKey;

/// Role a node can play in the root's demonstration setup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubjectKind {
    Plane,
    Particle,
}

/// Behaviour every node payload provides to the scene graph
///
/// `update` runs once per frame in pre-order. `draw` and `draw_highlighted`
/// receive the frame's view-projection and submit their own commands.
pub trait SceneObject {
    fn update(&mut self, dt: f32);

    fn draw(&self, view_projection: Mat4, renderer: &mut dyn Renderer);

    /// Draw as part of the selected subtree, enlarged by `scale`
    fn draw_highlighted(&self, view_projection: Mat4, scale: f32, renderer: &mut dyn Renderer);

    /// World-space position, used as the camera's tracking target
    fn position(&self) -> Vec3;

    /// Subject role this payload can fill, if any
    fn subject(&self) -> Option<SubjectKind> {
        None
    }

    /// Called on the root payload when a node with a subject role is attached
    fn subject_attached(&mut self, _key: NodeKey, _kind: SubjectKind) {}

    /// Called on the root payload when a node is destroyed
    fn subject_detached(&mut self, _key: NodeKey) {}
}
