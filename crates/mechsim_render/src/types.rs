//! GPU-compatible data types for the instance pass
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use mechsim_core::{DrawCommand, DrawStyle};

/// Per-instance uniforms
/// Layout: 96 bytes total
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawUniforms {
    /// Model-view-projection matrix (64 bytes)
    pub mvp: [[f32; 4]; 4],
    /// RGBA colour (16 bytes)
    pub colour: [f32; 4],
    /// 1 for the selection outline, 0 otherwise
    pub highlight: u32,
    /// Padding for 16-byte alignment
    pub _padding: [u32; 3],
}

impl Default for DrawUniforms {
    fn default() -> Self {
        Self {
            mvp: mechsim_math::mat4::IDENTITY,
            colour: [1.0; 4],
            highlight: 0,
            _padding: [0; 3],
        }
    }
}

impl From<&DrawCommand> for DrawUniforms {
    fn from(command: &DrawCommand) -> Self {
        Self {
            mvp: command.transform,
            colour: command.colour,
            highlight: match command.style {
                DrawStyle::Normal => 0,
                DrawStyle::Highlight => 1,
            },
            _padding: [0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechsim_core::MeshKind;

    #[test]
    fn test_draw_uniforms_size() {
        assert_eq!(std::mem::size_of::<DrawUniforms>(), 96);
    }

    #[test]
    fn test_from_highlight_command() {
        let command = DrawCommand {
            mesh: MeshKind::Plane,
            transform: mechsim_math::mat4::IDENTITY,
            colour: [0.1, 0.2, 0.3, 1.0],
            style: DrawStyle::Highlight,
        };
        let u = DrawUniforms::from(&command);
        assert_eq!(u.highlight, 1);
        assert_eq!(u.colour, [0.1, 0.2, 0.3, 1.0]);
    }
}
