//! Rendering support for mechsim
//!
//! Converts scene graph draw passes into GPU-ready instance data.
//!
//! ## Key Components
//!
//! - [`types::DrawUniforms`] - Per-instance uniform layout
//! - [`draw_list::DrawList`] - [`Renderer`] that collects a frame's instances
//! - [`frame::FrameRenderer`] - Projection parameters plus a reusable draw list

pub mod types;
pub mod draw_list;
pub mod frame;

// Re-export core types for convenience
pub use mechsim_core::{DrawCommand, DrawStyle, MeshKind, Renderer};

pub use types::DrawUniforms;
pub use draw_list::DrawList;
pub use frame::{FrameRenderer, FrameStats, Projection};
