//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`MECHSIM_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use mechsim_core::SimulationParams;
use serde::{Serialize, Deserialize};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Scene and frame configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Simulation constants held by the world
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`MECHSIM_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // MECHSIM_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("MECHSIM_").split("__"));

        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the frame loop and camera cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scene.max_frame_dt.is_nan() || self.scene.max_frame_dt < 0.0 {
            return Err(ConfigError::invalid(format!(
                "scene.max_frame_dt must be non-negative, got {}",
                self.scene.max_frame_dt
            )));
        }
        if self.camera.transition_time.is_nan() || self.camera.transition_time < 0.0 {
            return Err(ConfigError::invalid(format!(
                "camera.transition_time must be non-negative, got {}",
                self.camera.transition_time
            )));
        }
        Ok(())
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "mechsim - Mechanics Simulator".to_string(),
            width: 1280,
            height: 720,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Distance multiplier for the eye offset
    pub zoom: f32,
    /// Seconds to ease toward a new focus point or target
    pub transition_time: f64,
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            zoom: mechsim_core::DEFAULT_ZOOM,
            transition_time: mechsim_core::DEFAULT_TRANSITION_TIME,
            fov: 45.0,
            near: 0.1,
            far: 300.0,
        }
    }
}

/// Scene and frame configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    /// Enlargement applied to the selected subtree
    pub highlight_scale: f32,
    /// Longest frame step in seconds; slower frames are clamped
    pub max_frame_dt: f32,
    /// Frames the headless demo runs for
    pub demo_frames: u32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            highlight_scale: mechsim_core::DEFAULT_HIGHLIGHT_SCALE,
            max_frame_dt: 0.25,
            demo_frames: 240,
        }
    }
}

/// Simulation constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub distance: f32,
    pub friction: f32,
    pub force: f32,
    /// Gravitational acceleration (positive = downward)
    pub gravity: f32,
    pub mass: f32,
    pub initial_velocity: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationParams::default().into()
    }
}

impl From<SimulationParams> for SimulationConfig {
    fn from(p: SimulationParams) -> Self {
        Self {
            distance: p.distance,
            friction: p.friction,
            force: p.force,
            gravity: p.gravity,
            mass: p.mass,
            initial_velocity: p.initial_velocity,
        }
    }
}

impl SimulationConfig {
    /// Parameters for the world entity
    pub fn to_params(&self) -> SimulationParams {
        SimulationParams {
            distance: self.distance,
            friction: self.friction,
            force: self.force,
            gravity: self.gravity,
            mass: self.mass,
            initial_velocity: self.initial_velocity,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    fn invalid(message: String) -> Self {
        ConfigError { message }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
