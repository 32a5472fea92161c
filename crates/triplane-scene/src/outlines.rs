//! Outline visibility and crosshair emphasis relative to a camera

use bevy::prelude::*;
use tracing::trace;

use crate::orientation::alignment;
use crate::store::ReferenceScene;

impl<'w, 's> ReferenceScene<'w, 's> {
    /// Show the outline of every plane that faces `camera`, hide the rest.
    ///
    /// Only meshes under `scene` whose first child is a `PlaneOutline` are
    /// considered.
    pub fn update_visible_outlines(&mut self, scene: Entity, camera: Entity) {
        let camera_direction = self.world_direction(camera);
        let threshold = self.config.facing_threshold;

        for (mesh, outline) in self.outlined_meshes(scene) {
            let facing = alignment(camera_direction, self.world_direction(mesh)) > threshold;
            if let Ok((_, mut visibility)) = self.outlines.get_mut(outline) {
                *visibility = if facing {
                    Visibility::Visible
                } else {
                    Visibility::Hidden
                };
            }
        }
    }

    /// Thicken the outlines of planes seen edge-on from `camera` and reset
    /// every other outline to the default width.
    ///
    /// Every outline is rewritten and marked changed on each call.
    pub fn highlight_crosshair_planes(&mut self, scene: Entity, camera: Entity) {
        let camera_direction = self.world_direction(camera);
        let threshold = self.config.edge_on_threshold;
        let highlight_width = self.config.crosshair_outline_width;
        let default_width = self.config.outline_width;

        for (mesh, outline) in self.outlined_meshes(scene) {
            let edge_on = alignment(camera_direction, self.world_direction(mesh)) < threshold;
            if let Ok((mut style, _)) = self.outlines.get_mut(outline) {
                style.line_width = if edge_on { highlight_width } else { default_width };
                style.set_changed();
                trace!(?mesh, edge_on, "Crosshair emphasis updated");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{initialize, test_app};
    use crate::store::SceneStore;
    use crate::types::{PlaneKind, PlaneOutline, ReferencePlane};
    use bevy::ecs::system::RunSystemOnce;

    /// Outline state per plane kind after running `op` from a camera at
    /// `position` looking at the origin
    fn outline_state(
        position: Vec3,
        up: Vec3,
        op: fn(&mut ReferenceScene, Entity, Entity),
    ) -> Vec<(PlaneKind, Visibility, f32)> {
        let mut app = test_app();
        initialize(&mut app);
        let camera = app
            .world_mut()
            .spawn(Transform::from_translation(position).looking_at(Vec3::ZERO, up))
            .id();
        let scene = app.world().resource::<SceneStore>().scene().unwrap();

        app.world_mut()
            .run_system_once(move |mut reference: ReferenceScene| op(&mut reference, scene, camera))
            .unwrap();

        let world = app.world_mut();
        let mut planes = world.query::<(&ReferencePlane, &Children)>();
        let plane_outlines: Vec<(PlaneKind, Entity)> = planes
            .iter(world)
            .map(|(plane, children)| (plane.0, children[0]))
            .collect();
        plane_outlines
            .into_iter()
            .map(|(kind, outline)| {
                let style = world.get::<PlaneOutline>(outline).unwrap();
                let visibility = world.get::<Visibility>(outline).unwrap();
                (kind, *visibility, style.line_width)
            })
            .collect()
    }

    fn find(states: &[(PlaneKind, Visibility, f32)], kind: PlaneKind) -> (Visibility, f32) {
        states
            .iter()
            .find(|(k, _, _)| *k == kind)
            .map(|(_, visibility, width)| (*visibility, *width))
            .unwrap()
    }

    #[test]
    fn test_facing_plane_outline_visible() {
        // Front camera looks down -Z, straight at the XY plane
        let states = outline_state(Vec3::new(0.0, 0.0, 10.0), Vec3::Y, |scene, root, camera| {
            scene.update_visible_outlines(root, camera)
        });

        assert_eq!(find(&states, PlaneKind::XY).0, Visibility::Visible);
        assert_eq!(find(&states, PlaneKind::YZ).0, Visibility::Hidden);
        assert_eq!(find(&states, PlaneKind::XZ).0, Visibility::Hidden);
    }

    #[test]
    fn test_only_facing_outline_keeps_its_gizmo() {
        let mut app = test_app();
        app.add_systems(Update, crate::planes::sync_outline_gizmos);
        initialize(&mut app);
        let scene = app.world().resource::<SceneStore>().scene().unwrap();
        let camera = app
            .world_mut()
            .spawn(Transform::from_xyz(0.0, 0.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y))
            .id();

        app.world_mut()
            .run_system_once(move |mut reference: ReferenceScene| {
                reference.update_visible_outlines(scene, camera)
            })
            .unwrap();
        app.update();

        let world = app.world_mut();
        let mut planes = world.query::<(&ReferencePlane, &Children)>();
        let drawn: Vec<(PlaneKind, bool)> = planes
            .iter(world)
            .map(|(plane, children)| (plane.0, children[0]))
            .collect::<Vec<_>>()
            .into_iter()
            .map(|(kind, outline)| (kind, world.get::<Gizmo>(outline).is_some()))
            .collect();

        for (kind, has_gizmo) in drawn {
            assert_eq!(has_gizmo, kind == PlaneKind::XY, "{kind:?}");
        }
    }

    #[test]
    fn test_side_camera_sees_yz_plane() {
        let states = outline_state(Vec3::new(10.0, 0.0, 0.0), Vec3::Y, |scene, root, camera| {
            scene.update_visible_outlines(root, camera)
        });

        assert_eq!(find(&states, PlaneKind::YZ).0, Visibility::Visible);
        assert_eq!(find(&states, PlaneKind::XY).0, Visibility::Hidden);
    }

    #[test]
    fn test_edge_on_planes_highlighted() {
        // Top camera: XY and YZ are edge-on, XZ faces the camera
        let states = outline_state(Vec3::new(0.0, 10.0, 0.0), Vec3::NEG_Z, |scene, root, camera| {
            scene.highlight_crosshair_planes(root, camera)
        });

        assert_eq!(find(&states, PlaneKind::XY).1, 10.0);
        assert_eq!(find(&states, PlaneKind::YZ).1, 10.0);
        assert_eq!(find(&states, PlaneKind::XZ).1, 5.0);
    }

    #[test]
    fn test_oblique_camera_resets_highlight() {
        let mut app = test_app();
        initialize(&mut app);
        let scene = app.world().resource::<SceneStore>().scene().unwrap();
        let top = app
            .world_mut()
            .spawn(Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z))
            .id();
        let oblique = app
            .world_mut()
            .spawn(Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y))
            .id();

        app.world_mut()
            .run_system_once(move |mut reference: ReferenceScene| {
                reference.highlight_crosshair_planes(scene, top);
                reference.highlight_crosshair_planes(scene, oblique);
            })
            .unwrap();

        let world = app.world_mut();
        let widths: Vec<f32> = world
            .query::<&PlaneOutline>()
            .iter(world)
            .map(|outline| outline.line_width)
            .collect();
        assert_eq!(widths, vec![5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_meshes_without_outline_untouched() {
        let mut app = test_app();
        initialize(&mut app);
        let scene = app.world().resource::<SceneStore>().scene().unwrap();
        let camera = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, 10.0)).id();

        app.world_mut()
            .run_system_once(move |mut reference: ReferenceScene| {
                reference.update_visible_outlines(scene, camera);
            })
            .unwrap();

        // Camera markers have no outline child and keep their visibility
        let world = app.world_mut();
        let marker_visibility: Vec<Visibility> = world
            .query_filtered::<&Visibility, With<crate::types::CameraMarker>>()
            .iter(world)
            .copied()
            .collect();
        assert_eq!(marker_visibility, vec![Visibility::Inherited; 3]);
    }
}
