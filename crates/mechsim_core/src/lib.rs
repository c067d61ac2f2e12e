//! Core types for mechsim
//!
//! This crate provides the scene structure every other part of the
//! simulator works through:
//!
//! - [`OwnershipTree`] - Arena-backed tree where each node owns its children
//! - [`NodeKey`] - Generational key to a node in the tree
//! - [`TraversalState`] / [`Traversal`] - Pre-order and post-order walks with
//!   branch skipping
//! - [`Entity`] - A simulated object (world, plane, particle, point, spring)
//! - [`FollowCamera`] - Camera that eases toward points and tracks nodes
//! - [`SceneGraph`] - Selection-aware controller that updates and draws the tree
//! - [`Renderer`] - Sink that receives one [`DrawCommand`] per drawn node

mod error;
mod tree;
mod traversal;
mod render;
mod object;
mod entity;
mod camera;
mod scene_graph;

pub use error::{TreeError, SceneError};
pub use tree::{OwnershipTree, Node, NodeKey};
pub use traversal::{Traversal, TraversalMode, TraversalState};
pub use render::{DrawCommand, DrawStyle, MeshKind, Renderer};
pub use object::{SceneObject, SubjectKind};
pub use entity::{
    DirtyFlags, Entity, EntityKind, Material, SimulationParams, SimulationSubjects, MOVE_TIME,
    SPRING_COILS, SPRING_COIL_WIDTH,
};
pub use camera::{CameraMode, FollowCamera, TargetSource, DEFAULT_TRANSITION_TIME, DEFAULT_ZOOM};
pub use scene_graph::{SceneGraph, DEFAULT_HIGHLIGHT_SCALE};

// Re-export commonly used types from mechsim_math for convenience
pub use mechsim_math::{mat4, Mat4, Vec3};
