//! Viewer configuration loading

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use triplane_scene::{SceneConfig, ViewType};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub controls: ControlsConfig,
    #[serde(default)]
    pub scene: SceneConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    #[serde(default = "default_title")]
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
        }
    }
}

fn default_title() -> String {
    "Triplane".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsConfig {
    /// View that drives outline emphasis and rotation at startup
    #[serde(default)]
    pub initial_view: ViewType,
    /// Crosshair rotation per key press, in degrees
    #[serde(default = "default_rotation_step")]
    pub rotation_step_degrees: f32,
    /// World units visible vertically in each orthographic viewport
    #[serde(default = "default_view_height")]
    pub view_height: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            initial_view: ViewType::default(),
            rotation_step_degrees: default_rotation_step(),
            view_height: default_view_height(),
        }
    }
}

fn default_rotation_step() -> f32 {
    5.0
}

fn default_view_height() -> f32 {
    14.0
}

/// Load configuration from file
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(Config::default())
    }
}
