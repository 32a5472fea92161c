//! Bevy application setup: three orthographic view cameras side by side

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;
use triplane_scene::{ReferenceScene, TriplaneScenePlugin, ViewType};

use crate::config::Config;
use crate::ui::UiPlugin;

/// View whose camera drives outline emphasis and crosshair rotation
#[derive(Debug, Clone, Copy, Resource, Default)]
pub struct ActiveView(pub ViewType);

/// Interaction settings
#[derive(Debug, Clone, Resource)]
pub struct ViewerSettings {
    /// Crosshair rotation per step, in radians
    pub rotation_step: f32,
    /// World units visible vertically in each viewport
    pub view_height: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            rotation_step: 5f32.to_radians(),
            view_height: 14.0,
        }
    }
}

/// Rotation requested by input or UI, applied once per frame
#[derive(Debug, Clone, Copy, Resource, Default)]
pub struct PendingRotation(pub f32);

/// Marker component for the viewer's view cameras
#[derive(Component)]
pub struct ViewCamera(pub ViewType);

pub fn run(config: Config) {
    App::new()
        .insert_resource(config.scene.clone())
        .insert_resource(ActiveView(config.controls.initial_view))
        .insert_resource(ViewerSettings {
            rotation_step: config.controls.rotation_step_degrees.to_radians(),
            view_height: config.controls.view_height,
        })
        .init_resource::<PendingRotation>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: config.window.title.clone(),
                ..default()
            }),
            ..default()
        }))
        // PickingPlugin must be present before EguiPlugin is added
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .add_plugins(TriplaneScenePlugin)
        .add_plugins(UiPlugin)
        .add_systems(Startup, (spawn_view_cameras, initialize_reference_scene).chain())
        .add_systems(Update, (
            handle_keyboard,
            apply_pending_rotation,
            refresh_outlines,
        ).chain())
        .add_systems(Update, layout_viewports)
        .run();
}

fn spawn_view_cameras(mut commands: Commands, mut scene: ReferenceScene) {
    for (order, view) in ViewType::ALL.into_iter().enumerate() {
        let camera = commands
            .spawn((
                Camera3d::default(),
                Camera {
                    order: order as isize,
                    ..default()
                },
                Projection::from(OrthographicProjection::default_3d()),
                Transform::from_translation(view.default_position())
                    .looking_at(Vec3::ZERO, view.default_up()),
                ViewCamera(view),
                Name::new(format!("{} view camera", view)),
            ))
            .id();
        scene.set_view_camera(view, camera);
    }
}

fn initialize_reference_scene(mut scene: ReferenceScene) {
    scene.initialize();
}

/// Column rectangles (position, size) in physical pixels for the views in
/// `ViewType::ALL` order
pub fn viewport_columns(width: u32, height: u32) -> [(UVec2, UVec2); 3] {
    let column = (width / 3).max(1);
    let height = height.max(1);
    [0, 1, 2].map(|i| {
        let x = column * i;
        // Last column absorbs the remainder
        let w = if i == 2 { width.saturating_sub(x).max(1) } else { column };
        (UVec2::new(x, 0), UVec2::new(w, height))
    })
}

/// Split the window into one column per view and keep the orthographic
/// scale so `view_height` world units fill each column vertically
fn layout_viewports(
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<ViewerSettings>,
    mut cameras: Query<(&ViewCamera, &mut Camera, &mut Projection)>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let columns = viewport_columns(window.physical_width(), window.physical_height());

    for (view_camera, mut camera, mut projection) in &mut cameras {
        let Some(index) = ViewType::ALL.iter().position(|v| *v == view_camera.0) else {
            continue;
        };
        let (position, size) = columns[index];

        let current = camera
            .viewport
            .as_ref()
            .map(|viewport| (viewport.physical_position, viewport.physical_size));
        if current != Some((position, size)) {
            let viewport = camera.viewport.get_or_insert_with(Default::default);
            viewport.physical_position = position;
            viewport.physical_size = size;
        }

        let scale = settings.view_height / size.y as f32;
        let stale = matches!(
            &*projection,
            Projection::Orthographic(ortho) if (ortho.scale - scale).abs() > f32::EPSILON
        );
        if stale {
            if let Projection::Orthographic(ortho) = &mut *projection {
                ortho.scale = scale;
            }
        }
    }
}

fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<ViewerSettings>,
    mut active: ResMut<ActiveView>,
    mut pending: ResMut<PendingRotation>,
) {
    let bindings = [
        (KeyCode::Digit1, ViewType::Front),
        (KeyCode::Digit2, ViewType::Top),
        (KeyCode::Digit3, ViewType::Side),
    ];
    for (key, view) in bindings {
        if keyboard.just_pressed(key) && active.0 != view {
            active.0 = view;
            tracing::info!(%view, "Active view changed");
        }
    }

    if keyboard.just_pressed(KeyCode::KeyQ) {
        pending.0 -= settings.rotation_step;
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        pending.0 += settings.rotation_step;
    }
}

/// Rotate the crosshair about the active camera's axis by the pending angle
pub fn apply_pending_rotation(
    mut pending: ResMut<PendingRotation>,
    active: Res<ActiveView>,
    mut scene: ReferenceScene,
) {
    if pending.0 == 0.0 {
        return;
    }
    let angle = std::mem::take(&mut pending.0);

    let (Some(root), Some(camera)) = (scene.store().scene(), scene.view_camera(active.0)) else {
        return;
    };
    tracing::debug!(view = %active.0, angle, "Rotating crosshair planes");
    scene.rotate_crosshair_planes(root, camera, angle);
}

/// Re-evaluate outline visibility and emphasis whenever the active view or
/// any view camera changes
pub fn refresh_outlines(active: Res<ActiveView>, mut scene: ReferenceScene) {
    let moved = scene.view_cameras_moved();
    if !active.is_changed() && !moved {
        return;
    }
    let (Some(root), Some(camera)) = (scene.store().scene(), scene.view_camera(active.0)) else {
        return;
    };
    scene.highlight_crosshair_planes(root, camera);
    scene.update_visible_outlines(root, camera);
}
