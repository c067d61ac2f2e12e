//! Draw list - bridges the scene graph to GPU buffers
//!
//! Collects the commands submitted during one draw pass into a contiguous
//! uniform buffer, remembering which mesh each instance uses. Submission
//! order is preserved so the highlight pass stays on top.

use mechsim_core::{DrawCommand, MeshKind, Renderer};

use crate::types::DrawUniforms;

/// Instances collected from one frame, ready for upload
pub struct DrawList {
    meshes: Vec<MeshKind>,
    uniforms: Vec<DrawUniforms>,
}

impl DrawList {
    /// Create an empty draw list
    pub fn new() -> Self {
        Self {
            meshes: Vec::new(),
            uniforms: Vec::new(),
        }
    }

    /// Create a draw list with pre-allocated capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            meshes: Vec::with_capacity(capacity),
            uniforms: Vec::with_capacity(capacity),
        }
    }

    /// Clear all instances, keeping the allocation
    pub fn clear(&mut self) {
        self.meshes.clear();
        self.uniforms.clear();
    }

    /// Get the number of instances
    #[inline]
    pub fn len(&self) -> usize {
        self.uniforms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty()
    }

    /// Number of highlighted instances
    pub fn highlight_count(&self) -> usize {
        self.uniforms.iter().filter(|u| u.highlight != 0).count()
    }

    /// Instances in submission order
    pub fn iter(&self) -> impl Iterator<Item = (MeshKind, &DrawUniforms)> {
        self.meshes.iter().copied().zip(self.uniforms.iter())
    }

    /// Instances drawing `mesh`, in submission order
    pub fn batch(&self, mesh: MeshKind) -> impl Iterator<Item = &DrawUniforms> {
        self.iter()
            .filter(move |(m, _)| *m == mesh)
            .map(|(_, u)| u)
    }

    /// Raw uniform buffer contents
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uniforms)
    }
}

impl Default for DrawList {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for DrawList {
    fn submit(&mut self, command: DrawCommand) {
        self.meshes.push(command.mesh);
        self.uniforms.push(DrawUniforms::from(&command));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mechsim_core::DrawStyle;
    use mechsim_math::mat4;

    fn command(mesh: MeshKind, style: DrawStyle) -> DrawCommand {
        DrawCommand {
            mesh,
            transform: mat4::IDENTITY,
            colour: [1.0, 0.0, 0.0, 1.0],
            style,
        }
    }

    #[test]
    fn test_submit_and_batch() {
        let mut list = DrawList::new();
        list.submit(command(MeshKind::Sphere, DrawStyle::Normal));
        list.submit(command(MeshKind::Plane, DrawStyle::Normal));
        list.submit(command(MeshKind::Sphere, DrawStyle::Highlight));

        assert_eq!(list.len(), 3);
        assert_eq!(list.batch(MeshKind::Sphere).count(), 2);
        assert_eq!(list.batch(MeshKind::Spring).count(), 0);
        assert_eq!(list.highlight_count(), 1);
    }

    #[test]
    fn test_bytes_match_instance_count() {
        let mut list = DrawList::with_capacity(2);
        list.submit(command(MeshKind::Sphere, DrawStyle::Normal));
        list.submit(command(MeshKind::Sphere, DrawStyle::Normal));
        assert_eq!(list.as_bytes().len(), 2 * std::mem::size_of::<DrawUniforms>());
    }

    #[test]
    fn test_clear() {
        let mut list = DrawList::new();
        list.submit(command(MeshKind::Plane, DrawStyle::Normal));
        list.clear();
        assert!(list.is_empty());
        assert!(list.as_bytes().is_empty());
    }
}
