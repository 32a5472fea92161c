//! Scene state holder: the reference scene root, camera markers, and the
//! three logical view cameras

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use tracing::{debug, info};

use crate::config::SceneConfig;
use crate::types::*;

/// Marker order, matched by `update_camera_marker_positions`
pub const MARKER_ORDER: [ViewType; 3] = [ViewType::Top, ViewType::Side, ViewType::Front];

/// Single source of truth for the reference scene and the view camera slots
#[derive(Resource, Debug, Default)]
pub struct SceneStore {
    scene: Option<Entity>,
    camera_markers: Vec<Entity>,
    front_camera: Option<Entity>,
    top_camera: Option<Entity>,
    side_camera: Option<Entity>,
}

impl SceneStore {
    pub fn scene(&self) -> Option<Entity> {
        self.scene
    }

    pub fn camera_markers(&self) -> &[Entity] {
        &self.camera_markers
    }

    pub fn view_camera(&self, view: ViewType) -> Option<Entity> {
        match view {
            ViewType::Front => self.front_camera,
            ViewType::Top => self.top_camera,
            ViewType::Side => self.side_camera,
        }
    }

    /// Record `camera` under `view`, replacing any previous camera
    pub fn set_view_camera(&mut self, view: ViewType, camera: Entity) {
        let slot = match view {
            ViewType::Front => &mut self.front_camera,
            ViewType::Top => &mut self.top_camera,
            ViewType::Side => &mut self.side_camera,
        };
        *slot = Some(camera);
    }

    /// Which slot, if any, holds `camera`
    pub fn view_of(&self, camera: Entity) -> Option<ViewType> {
        ViewType::ALL
            .into_iter()
            .find(|view| self.view_camera(*view) == Some(camera))
    }
}

/// System parameter bundling everything the scene helpers read and write.
///
/// All helpers are methods on this type so one system can initialize,
/// query, and rotate the scene without conflicting borrows.
#[derive(SystemParam)]
pub struct ReferenceScene<'w, 's> {
    pub(crate) store: ResMut<'w, SceneStore>,
    pub(crate) config: Res<'w, SceneConfig>,
    pub(crate) commands: Commands<'w, 's>,
    pub(crate) meshes: ResMut<'w, Assets<Mesh>>,
    pub(crate) materials: ResMut<'w, Assets<StandardMaterial>>,
    pub(crate) gizmo_assets: ResMut<'w, Assets<GizmoAsset>>,
    pub(crate) nodes: Query<'w, 's, (&'static mut Transform, Option<&'static ChildOf>)>,
    pub(crate) children: Query<'w, 's, &'static Children>,
    pub(crate) mesh_nodes: Query<'w, 's, (), With<Mesh3d>>,
    pub(crate) camera_nodes: Query<'w, 's, (), With<Camera>>,
    pub(crate) outlines: Query<'w, 's, (&'static mut PlaneOutline, &'static mut Visibility)>,
}

impl<'w, 's> ReferenceScene<'w, 's> {
    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// Build the scene once: background, lights, the three reference planes
    /// and the three camera markers. Later calls do nothing.
    pub fn initialize(&mut self) {
        if self.store.scene.is_some() {
            debug!("Reference scene already initialized");
            return;
        }

        let root = self
            .commands
            .spawn((
                ReferenceRoot,
                Name::new("Reference Scene"),
                Transform::default(),
                Visibility::default(),
            ))
            .id();
        self.store.scene = Some(root);

        self.commands
            .insert_resource(ClearColor(self.config.background_color()));
        self.commands.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: self.config.ambient_brightness,
            ..default()
        });

        self.commands.spawn((
            PointLight {
                intensity: self.config.point_light_intensity,
                shadows_enabled: false,
                ..default()
            },
            Transform::from_translation(Vec3::from(self.config.point_light_position)),
            ChildOf(root),
        ));

        let size = self.config.plane_size;
        for kind in [PlaneKind::XY, PlaneKind::YZ, PlaneKind::XZ] {
            let color = self.config.plane_color(kind);
            let plane = self.spawn_plane_with_outline(size, color);
            self.commands.entity(plane).insert((
                ReferencePlane(kind),
                Transform::from_rotation(kind.rotation()),
                ChildOf(root),
            ));
        }

        let marker_mesh = self.meshes.add(Cuboid::from_length(self.config.marker_size));
        let marker_colors = [
            Color::srgb(1.0, 0.0, 0.0),
            Color::srgb(0.0, 0.0, 1.0),
            Color::srgb(0.0, 1.0, 0.0),
        ];
        // Markers are placed at spawn; their entities are not queryable until
        // the commands are applied
        let positions = MARKER_ORDER.map(|view| self.view_camera_position(view));
        let mut markers = Vec::with_capacity(MARKER_ORDER.len());
        for ((view, color), position) in MARKER_ORDER.into_iter().zip(marker_colors).zip(positions) {
            let material = self.materials.add(StandardMaterial {
                base_color: color,
                unlit: true,
                ..default()
            });
            let marker = self
                .commands
                .spawn((
                    CameraMarker(view),
                    Name::new(format!("{} camera marker", view)),
                    Mesh3d(marker_mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(position),
                    Visibility::default(),
                    ChildOf(root),
                ))
                .id();
            markers.push(marker);
        }
        self.store.camera_markers = markers;

        info!(?root, "Reference scene initialized");
    }

    pub fn set_view_camera(&mut self, view: ViewType, camera: Entity) {
        debug!(%view, ?camera, "Registered view camera");
        self.store.set_view_camera(view, camera);
    }

    pub fn view_camera(&self, view: ViewType) -> Option<Entity> {
        self.store.view_camera(view)
    }

    /// Current position of the camera in `view`, or the view's default when
    /// no camera is registered
    pub fn view_camera_position(&self, view: ViewType) -> Vec3 {
        self.store
            .view_camera(view)
            .and_then(|camera| self.nodes.get(camera).ok())
            .map(|(transform, _)| transform.translation)
            .unwrap_or_else(|| view.default_position())
    }

    pub fn front_view_camera_position(&self) -> Vec3 {
        self.view_camera_position(ViewType::Front)
    }

    pub fn top_view_camera_position(&self) -> Vec3 {
        self.view_camera_position(ViewType::Top)
    }

    pub fn side_view_camera_position(&self) -> Vec3 {
        self.view_camera_position(ViewType::Side)
    }

    /// Copy each view camera position onto its marker.
    ///
    /// Does nothing unless exactly three markers exist.
    pub fn update_camera_marker_positions(&mut self) {
        if self.store.camera_markers.len() != MARKER_ORDER.len() {
            return;
        }

        let positions = MARKER_ORDER.map(|view| self.view_camera_position(view));
        let markers = self.store.camera_markers.clone();
        for (marker, position) in markers.into_iter().zip(positions) {
            if let Ok((mut transform, _)) = self.nodes.get_mut(marker) {
                transform.translation = position;
            }
        }
    }

    /// Whether any registered view camera's transform changed since this
    /// system last ran
    pub fn view_cameras_moved(&mut self) -> bool {
        ViewType::ALL
            .into_iter()
            .filter_map(|view| self.store.view_camera(view))
            .any(|camera| {
                self.nodes
                    .get_mut(camera)
                    .is_ok_and(|(transform, _)| transform.is_changed())
            })
    }

    /// Rotation of `entity` in world space, composed up the parent chain
    pub(crate) fn world_rotation(&self, entity: Entity) -> Quat {
        let mut rotation = Quat::IDENTITY;
        let mut current = Some(entity);
        while let Some(node) = current {
            let Ok((transform, child_of)) = self.nodes.get(node) else {
                break;
            };
            rotation = transform.rotation * rotation;
            current = child_of.map(ChildOf::parent);
        }
        rotation
    }

    /// Rotation of the parent frame of `entity` in world space
    pub(crate) fn parent_rotation(&self, entity: Entity) -> Quat {
        self.nodes
            .get(entity)
            .ok()
            .and_then(|(_, child_of)| child_of)
            .map(|child_of| self.world_rotation(child_of.parent()))
            .unwrap_or(Quat::IDENTITY)
    }

    /// World-space forward (-Z) direction of `entity`
    ///
    /// Composed from local `Transform`s up the parent chain, so it is current
    /// within the frame, before `GlobalTransform` propagation. Parent
    /// translations and scales are ignored: they do not affect a direction
    /// as long as scales are uniform.
    pub fn world_direction(&self, entity: Entity) -> Vec3 {
        self.world_rotation(entity) * Vec3::NEG_Z
    }

    /// Every descendant of `scene`, parents before children
    pub(crate) fn descendants(&self, scene: Entity) -> Vec<Entity> {
        let mut found = Vec::new();
        let mut stack: Vec<Entity> = Vec::new();
        if let Ok(children) = self.children.get(scene) {
            stack.extend(children.iter().rev());
        }
        while let Some(entity) = stack.pop() {
            found.push(entity);
            if let Ok(children) = self.children.get(entity) {
                stack.extend(children.iter().rev());
            }
        }
        found
    }

    /// Mesh descendants of `scene` whose first child is a plane outline,
    /// paired with that outline
    pub(crate) fn outlined_meshes(&self, scene: Entity) -> Vec<(Entity, Entity)> {
        self.descendants(scene)
            .into_iter()
            .filter(|entity| self.mesh_nodes.contains(*entity))
            .filter_map(|mesh| {
                let first = self.children.get(mesh).ok()?.first().copied()?;
                self.outlines.contains(first).then_some((mesh, first))
            })
            .collect()
    }
}
