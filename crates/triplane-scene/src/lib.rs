//! Triplane Scene - three-plane reference scene with synchronized view cameras
//!
//! This crate provides the reference scene used by the Triplane viewer:
//! - XY / YZ / XZ reference planes, each with a pixel-width outline
//! - Front / top / side view camera slots with cube markers that track them
//! - Helpers that show or emphasize outlines relative to a camera, and
//!   rotate the edge-on planes together with the off-axis cameras

pub mod config;
pub mod orientation;
pub mod outlines;
pub mod planes;
pub mod rotation;
pub mod store;
pub mod types;

use bevy::prelude::*;

/// Plugin that installs the scene state and the per-frame upkeep systems.
///
/// Building the scene is left to the embedding app: register the view
/// cameras, then call `ReferenceScene::initialize`.
pub struct TriplaneScenePlugin;

impl Plugin for TriplaneScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneStore>()
            .init_resource::<SceneConfig>()
            .add_systems(Update, (follow_view_cameras, planes::sync_outline_gizmos).chain());
    }
}

/// Keep the camera markers on top of the view cameras when something else
/// moves the cameras
pub fn follow_view_cameras(mut scene: ReferenceScene) {
    if scene.view_cameras_moved() {
        scene.update_camera_marker_positions();
    }
}

// Re-export commonly used types
pub use config::{ConfigError, SceneConfig};
pub use store::{ReferenceScene, SceneStore, MARKER_ORDER};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{initialize, test_app};
    use bevy::ecs::system::RunSystemOnce;

    #[test]
    fn test_markers_follow_moved_camera() {
        let mut app = test_app();
        app.add_systems(Update, follow_view_cameras);

        let top = app.world_mut().spawn(Transform::from_xyz(0.0, 10.0, 0.0)).id();
        app.world_mut()
            .run_system_once(move |mut scene: ReferenceScene| {
                scene.set_view_camera(ViewType::Top, top)
            })
            .unwrap();
        initialize(&mut app);
        app.update();

        app.world_mut()
            .get_mut::<Transform>(top)
            .unwrap()
            .translation = Vec3::new(2.0, 7.0, 1.0);
        app.update();

        let marker = app.world().resource::<SceneStore>().camera_markers()[0];
        let position = app.world().get::<Transform>(marker).unwrap().translation;
        assert_eq!(position, Vec3::new(2.0, 7.0, 1.0));
    }
}
