//! Shared types: view slots, plane kinds, and marker components

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Logical view camera slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Front,
    Top,
    Side,
}

impl ViewType {
    pub const ALL: [ViewType; 3] = [ViewType::Front, ViewType::Top, ViewType::Side];

    /// Position reported for this view when no camera is registered
    pub fn default_position(self) -> Vec3 {
        match self {
            ViewType::Top => Vec3::new(0.0, 10.0, 0.0),
            ViewType::Side => Vec3::new(10.0, 0.0, 0.0),
            ViewType::Front => Vec3::new(0.0, 0.0, 10.0),
        }
    }

    /// Up vector used when a view camera is first pointed at the origin
    pub fn default_up(self) -> Vec3 {
        match self {
            // Looking straight down Y, so Y cannot be up
            ViewType::Top => Vec3::NEG_Z,
            ViewType::Side | ViewType::Front => Vec3::Y,
        }
    }

    /// The two views that are not `self`, in `ALL` order
    pub fn others(self) -> [ViewType; 2] {
        match self {
            ViewType::Front => [ViewType::Top, ViewType::Side],
            ViewType::Top => [ViewType::Front, ViewType::Side],
            ViewType::Side => [ViewType::Front, ViewType::Top],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewType::Front => "front",
            ViewType::Top => "top",
            ViewType::Side => "side",
        }
    }
}

impl fmt::Display for ViewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "front" => Ok(ViewType::Front),
            "top" => Ok(ViewType::Top),
            "side" => Ok(ViewType::Side),
            other => Err(format!("unknown view type: {}", other)),
        }
    }
}

/// Which of the three orthogonal reference planes a mesh represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    XY,
    YZ,
    XZ,
}

impl PlaneKind {
    /// Rotation applied to the base XY construction (normal +Z)
    pub fn rotation(self) -> Quat {
        match self {
            PlaneKind::XY => Quat::IDENTITY,
            PlaneKind::YZ => Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            PlaneKind::XZ => Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
        }
    }
}

/// Marker component for the root entity of the reference scene
#[derive(Component)]
pub struct ReferenceRoot;

/// Marker component for the semi-transparent plane meshes
#[derive(Component, Debug, Clone, Copy)]
pub struct ReferencePlane(pub PlaneKind);

/// Outline drawn around a plane; always the plane's first child
///
/// The retained `Gizmo` on the same entity is derived from this and is only
/// present while the outline is not hidden.
#[derive(Component, Debug, Clone)]
pub struct PlaneOutline {
    /// Line width in screen pixels
    pub line_width: f32,
    /// Line strip around the plane's edges, in the plane's colour
    pub edges: Handle<GizmoAsset>,
}

impl PlaneOutline {
    /// Gizmo that draws this outline at its current width
    pub fn gizmo(&self) -> Gizmo {
        Gizmo {
            handle: self.edges.clone(),
            line_config: GizmoLineConfig {
                width: self.line_width,
                ..default()
            },
            ..default()
        }
    }
}

/// Cube standing in for a view camera inside the scene
#[derive(Component, Debug, Clone, Copy)]
pub struct CameraMarker(pub ViewType);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_positions() {
        assert_eq!(ViewType::Top.default_position(), Vec3::new(0.0, 10.0, 0.0));
        assert_eq!(ViewType::Side.default_position(), Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(ViewType::Front.default_position(), Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn test_others_excludes_self() {
        for view in ViewType::ALL {
            let others = view.others();
            assert!(!others.contains(&view));
            assert_ne!(others[0], others[1]);
        }
    }

    #[test]
    fn test_view_type_parse() {
        assert_eq!("TOP".parse::<ViewType>(), Ok(ViewType::Top));
        assert_eq!(ViewType::Side.to_string(), "side");
        assert!("back".parse::<ViewType>().is_err());
    }

    #[test]
    fn test_plane_normals() {
        let normal = |kind: PlaneKind| kind.rotation() * Vec3::Z;
        assert!(normal(PlaneKind::XY).abs_diff_eq(Vec3::Z, 1e-6));
        assert!(normal(PlaneKind::YZ).abs_diff_eq(Vec3::X, 1e-6));
        assert!(normal(PlaneKind::XZ).abs_diff_eq(Vec3::NEG_Y, 1e-6));
    }
}
