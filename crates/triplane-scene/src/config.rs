//! Scene configuration: sizes, colours, lighting, and alignment thresholds

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse scene configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Tunables for building and updating the reference scene
#[derive(Debug, Clone, Serialize, Deserialize, Resource)]
pub struct SceneConfig {
    /// Edge length of each reference plane
    #[serde(default = "default_plane_size")]
    pub plane_size: f32,
    /// Fill opacity of the planes (0.0-1.0)
    #[serde(default = "default_plane_opacity")]
    pub plane_opacity: f32,
    /// RGB colours (0.0-1.0) of the XY, YZ and XZ planes
    #[serde(default = "default_xy_color")]
    pub xy_color: [f32; 3],
    #[serde(default = "default_yz_color")]
    pub yz_color: [f32; 3],
    #[serde(default = "default_xz_color")]
    pub xz_color: [f32; 3],
    /// Background clear colour
    #[serde(default = "default_background")]
    pub background: [f32; 3],
    /// Ambient light brightness
    #[serde(default = "default_ambient_brightness")]
    pub ambient_brightness: f32,
    /// Point light position and intensity (lumens)
    #[serde(default = "default_point_light_position")]
    pub point_light_position: [f32; 3],
    #[serde(default = "default_point_light_intensity")]
    pub point_light_intensity: f32,
    /// Edge length of the camera marker cubes
    #[serde(default = "default_marker_size")]
    pub marker_size: f32,
    /// Outline width in pixels for ordinary planes
    #[serde(default = "default_outline_width")]
    pub outline_width: f32,
    /// Outline width in pixels for edge-on (crosshair) planes
    #[serde(default = "default_crosshair_width")]
    pub crosshair_outline_width: f32,
    /// |dot| above which a plane counts as facing the camera
    #[serde(default = "default_facing_threshold")]
    pub facing_threshold: f32,
    /// |dot| below which a plane counts as edge-on to the camera
    #[serde(default = "default_edge_on_threshold")]
    pub edge_on_threshold: f32,
}

fn default_plane_size() -> f32 {
    10.0
}

fn default_plane_opacity() -> f32 {
    0.5
}

fn default_xy_color() -> [f32; 3] {
    [1.0, 0.0, 0.0]
}

fn default_yz_color() -> [f32; 3] {
    [0.0, 0.0, 1.0]
}

fn default_xz_color() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_background() -> [f32; 3] {
    [0.94, 0.94, 0.94]
}

fn default_ambient_brightness() -> f32 {
    400.0
}

fn default_point_light_position() -> [f32; 3] {
    [5.0, 5.0, 5.0]
}

fn default_point_light_intensity() -> f32 {
    100000.0
}

fn default_marker_size() -> f32 {
    0.5
}

fn default_outline_width() -> f32 {
    5.0
}

fn default_crosshair_width() -> f32 {
    10.0
}

fn default_facing_threshold() -> f32 {
    0.99
}

fn default_edge_on_threshold() -> f32 {
    0.01
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            plane_size: default_plane_size(),
            plane_opacity: default_plane_opacity(),
            xy_color: default_xy_color(),
            yz_color: default_yz_color(),
            xz_color: default_xz_color(),
            background: default_background(),
            ambient_brightness: default_ambient_brightness(),
            point_light_position: default_point_light_position(),
            point_light_intensity: default_point_light_intensity(),
            marker_size: default_marker_size(),
            outline_width: default_outline_width(),
            crosshair_outline_width: default_crosshair_width(),
            facing_threshold: default_facing_threshold(),
            edge_on_threshold: default_edge_on_threshold(),
        }
    }
}

impl SceneConfig {
    /// Load from a TOML string; missing keys fall back to defaults
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn plane_color(&self, kind: crate::PlaneKind) -> Color {
        let [r, g, b] = match kind {
            crate::PlaneKind::XY => self.xy_color,
            crate::PlaneKind::YZ => self.yz_color,
            crate::PlaneKind::XZ => self.xz_color,
        };
        Color::srgb(r, g, b)
    }

    pub fn background_color(&self) -> Color {
        let [r, g, b] = self.background;
        Color::srgb(r, g, b)
    }
}
