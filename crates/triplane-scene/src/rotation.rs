//! Rotating the crosshair planes together with the off-axis view cameras

use bevy::prelude::*;
use tracing::debug;

use crate::orientation::{alignment, orbit_camera};
use crate::store::ReferenceScene;

impl<'w, 's> ReferenceScene<'w, 's> {
    /// Rotate every plane seen edge-on from `current_camera`, and the two
    /// other view cameras, by `angle` about the current camera's view axis.
    ///
    /// The rotated cameras keep their distance from the origin and are
    /// turned back to face it. Markers are resynchronized afterwards.
    pub fn rotate_crosshair_planes(&mut self, scene: Entity, current_camera: Entity, angle: f32) {
        let axis = self.world_direction(current_camera);
        let threshold = self.config.edge_on_threshold;

        // Transform::rotate works in parent space, so the world axis is
        // brought into each mesh's parent frame first
        let edge_on: Vec<(Entity, Vec3)> = self
            .descendants(scene)
            .into_iter()
            .filter(|entity| self.mesh_nodes.contains(*entity))
            .filter(|mesh| alignment(axis, self.world_direction(*mesh)) < threshold)
            .map(|mesh| (mesh, self.parent_rotation(mesh).inverse() * axis))
            .collect();
        for (mesh, local_axis) in edge_on {
            if let Ok((mut transform, _)) = self.nodes.get_mut(mesh) {
                transform.rotate(Quat::from_axis_angle(local_axis, angle));
            }
        }

        let Some(current_view) = self.store.view_of(current_camera) else {
            debug!(?current_camera, "Camera is not a registered view camera");
            self.update_camera_marker_positions();
            return;
        };

        let target = self.scene_origin(scene);
        for view in current_view.others() {
            let Some(camera) = self.store.view_camera(view) else {
                continue;
            };
            if let Ok((mut transform, _)) = self.nodes.get_mut(camera) {
                orbit_camera(&mut transform, axis, angle, target);
            }
        }

        self.update_camera_marker_positions();
    }

    /// Orbit every camera under `scene` except `current_camera` about `axis`
    /// by `angle`, keeping distance from the origin and facing it.
    pub fn update_other_view_cameras(
        &mut self,
        scene: Entity,
        current_camera: Entity,
        angle: f32,
        axis: Vec3,
    ) {
        let target = self.scene_origin(scene);
        let cameras: Vec<Entity> = self
            .descendants(scene)
            .into_iter()
            .filter(|entity| *entity != current_camera && self.camera_nodes.contains(*entity))
            .collect();
        for camera in cameras {
            if let Ok((mut transform, _)) = self.nodes.get_mut(camera) {
                orbit_camera(&mut transform, axis, angle, target);
            }
        }
    }

    fn scene_origin(&self, scene: Entity) -> Vec3 {
        self.nodes
            .get(scene)
            .map(|(transform, _)| transform.translation)
            .unwrap_or(Vec3::ZERO)
    }
}
