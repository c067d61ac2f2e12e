//! Draw submission seam
//!
//! Scene objects never talk to a graphics API. Each draw call produces one
//! [`DrawCommand`] that a [`Renderer`] consumes; what happens after that
//! (GPU upload, batching, recording for tests) is the renderer's business.

use mechsim_math::Mat4;

/// Which shared mesh a command draws
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Unit quad used for inclined planes
    Plane,
    /// Unit sphere used for particles and points
    Sphere,
    /// Coil spring with unit length along +Y
    Spring,
    /// Thickened coil used as the spring's selection outline
    SpringHighlight,
}

/// How a command should be shaded
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DrawStyle {
    #[default]
    Normal,
    /// Flat single-colour outline drawn for the selected subtree
    Highlight,
}

/// One mesh instance to draw this frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub mesh: MeshKind,
    /// Model-view-projection transform
    pub transform: Mat4,
    /// RGBA colour
    pub colour: [f32; 4],
    pub style: DrawStyle,
}

/// Sink for draw commands
pub trait Renderer {
    fn submit(&mut self, command: DrawCommand);
}

impl Renderer for Vec<DrawCommand> {
    fn submit(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechsim_math::mat4;

    #[test]
    fn test_vec_collects_commands() {
        let mut commands: Vec<DrawCommand> = Vec::new();
        let renderer: &mut dyn Renderer = &mut commands;
        renderer.submit(DrawCommand {
            mesh: MeshKind::Sphere,
            transform: mat4::IDENTITY,
            colour: [1.0, 0.0, 0.0, 1.0],
            style: DrawStyle::Normal,
        });
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].mesh, MeshKind::Sphere);
    }

    #[test]
    fn test_default_style_is_normal() {
        assert_eq!(DrawStyle::default(), DrawStyle::Normal);
    }
}
