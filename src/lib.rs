//! mechsim - interactive mechanics simulator
//!
//! Library half of the application: configuration, the frame clock and
//! scene construction helpers. The scene structure itself lives in
//! `mechsim_core`; draw list generation lives in `mechsim_render`.

pub mod config;
pub mod scene;
pub mod systems;
