//! UI overlay using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use triplane_scene::{SceneStore, ViewType};

use crate::app::{ActiveView, PendingRotation, ViewCamera, ViewerSettings};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
        app.add_systems(EguiPrimaryContextPass, ui_system);
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    mut active: ResMut<ActiveView>,
    mut settings: ResMut<ViewerSettings>,
    mut pending: ResMut<PendingRotation>,
    store: Res<SceneStore>,
    cameras: Query<&Transform, With<ViewCamera>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    egui::Window::new("Views")
        .default_pos(egui::pos2(12.0, 12.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Active view (1/2/3)");
            ui.horizontal(|ui| {
                for view in ViewType::ALL {
                    if ui.selectable_label(active.0 == view, view.label()).clicked() && active.0 != view {
                        active.0 = view;
                    }
                }
            });

            ui.separator();

            let mut step_degrees = settings.rotation_step.to_degrees();
            if ui
                .add(egui::Slider::new(&mut step_degrees, 1.0..=45.0).text("Step (°)"))
                .changed()
            {
                settings.rotation_step = step_degrees.to_radians();
            }
            ui.horizontal(|ui| {
                if ui.button("⟲ Rotate (Q)").clicked() {
                    pending.0 -= settings.rotation_step;
                }
                if ui.button("⟳ Rotate (E)").clicked() {
                    pending.0 += settings.rotation_step;
                }
            });

            ui.separator();

            for view in ViewType::ALL {
                let position = store
                    .view_camera(view)
                    .and_then(|camera| cameras.get(camera).ok())
                    .map(|transform| transform.translation)
                    .unwrap_or_else(|| view.default_position());
                ui.label(
                    egui::RichText::new(format!(
                        "{:>5}: [{:.2}, {:.2}, {:.2}]",
                        view.label(),
                        position.x,
                        position.y,
                        position.z
                    ))
                    .monospace(),
                );
            }
        });
}
