//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use mechsim::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("MECHSIM_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("MECHSIM_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_numeric() {
    std::env::set_var("MECHSIM_CAMERA__ZOOM", "3.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.camera.zoom, 3.5);
    std::env::remove_var("MECHSIM_CAMERA__ZOOM");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("MECHSIM_WINDOW__TITLE");
    std::env::remove_var("MECHSIM_CAMERA__ZOOM");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    assert!(config.scene.demo_frames > 0);
    assert!(config.scene.max_frame_dt > 0.0);
}

#[test]
#[serial]
fn test_missing_directory_falls_back_to_defaults() {
    std::env::remove_var("MECHSIM_WINDOW__TITLE");
    let config = AppConfig::load_from("does/not/exist").unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.camera.transition_time, 0.5);
}

#[test]
#[serial]
fn test_invalid_env_value_is_reported() {
    std::env::set_var("MECHSIM_WINDOW__WIDTH", "wide");
    let result = AppConfig::load_from("does/not/exist");
    std::env::remove_var("MECHSIM_WINDOW__WIDTH");

    let err = result.unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}

#[test]
#[serial]
fn test_negative_frame_cap_is_rejected() {
    std::env::set_var("MECHSIM_SCENE__MAX_FRAME_DT", "-1");
    let result = AppConfig::load();
    std::env::remove_var("MECHSIM_SCENE__MAX_FRAME_DT");

    let err = result.unwrap_err();
    assert!(err.to_string().contains("max_frame_dt"));
}
