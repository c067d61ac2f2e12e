//! Mathematics library for mechsim
//!
//! This crate provides the small amount of linear algebra the scene graph
//! and its renderers need.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - 4x4 column-major matrix for transformations
//!
//! ## Easing
//!
//! - [`easing::smooth`] - S-curve remap used by camera and entity motion
//! - [`easing::lerp`] - linear interpolation between two points

mod vec3;
pub mod mat4;
pub mod easing;

pub use vec3::Vec3;
pub use mat4::Mat4;
pub use easing::{lerp, smooth};
