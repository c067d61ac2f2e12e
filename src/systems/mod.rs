//! Application systems
//!
//! Frame-level systems that drive the scene graph.

mod simulation;

pub use simulation::{FrameResult, SimulationSystem};
