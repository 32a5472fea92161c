//! Reference plane construction and outline gizmo upkeep

use bevy::prelude::*;
use bevy::render::alpha::AlphaMode;
use tracing::trace;

use crate::store::ReferenceScene;
use crate::types::PlaneOutline;

/// Corners of a `size` x `size` square in its local XY plane, closed back to
/// the first corner so the strip covers all four edges
pub fn outline_points(size: f32) -> [Vec3; 5] {
    let half = size / 2.0;
    [
        Vec3::new(-half, -half, 0.0),
        Vec3::new(half, -half, 0.0),
        Vec3::new(half, half, 0.0),
        Vec3::new(-half, half, 0.0),
        Vec3::new(-half, -half, 0.0),
    ]
}

impl<'w, 's> ReferenceScene<'w, 's> {
    /// Spawn a square, semi-transparent, double-sided plane with an outline
    /// child of the same colour. Returns the plane entity.
    ///
    /// The outline starts at the default width; `highlight_crosshair_planes`
    /// changes it afterwards.
    pub fn spawn_plane_with_outline(&mut self, size: f32, color: Color) -> Entity {
        let material = self.materials.add(StandardMaterial {
            base_color: color.with_alpha(self.config.plane_opacity),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            double_sided: true,
            cull_mode: None,
            ..default()
        });

        let plane = self
            .commands
            .spawn((
                Mesh3d(self.meshes.add(Rectangle::new(size, size))),
                MeshMaterial3d(material),
                Transform::default(),
                Visibility::default(),
            ))
            .id();

        let mut edges = GizmoAsset::new();
        edges.linestrip(outline_points(size), color);

        let outline = PlaneOutline {
            line_width: self.config.outline_width,
            edges: self.gizmo_assets.add(edges),
        };
        self.commands.spawn((
            outline.gizmo(),
            outline,
            Transform::default(),
            Visibility::default(),
            ChildOf(plane),
        ));

        plane
    }
}

/// Mirror outline state into the retained gizmo the renderer extracts.
///
/// The gizmo extractor ignores `Visibility`, so a hidden outline loses its
/// `Gizmo` and gets it back, at the current width, once shown again.
pub fn sync_outline_gizmos(
    mut commands: Commands,
    mut outlines: Query<
        (Entity, &PlaneOutline, &Visibility, Option<&mut Gizmo>),
        Or<(Changed<PlaneOutline>, Changed<Visibility>)>,
    >,
) {
    for (entity, outline, visibility, gizmo) in &mut outlines {
        let hidden = *visibility == Visibility::Hidden;
        match gizmo {
            Some(_) if hidden => {
                trace!(?entity, "Hiding outline gizmo");
                commands.entity(entity).remove::<Gizmo>();
            }
            Some(mut gizmo) => {
                if gizmo.line_config.width != outline.line_width {
                    trace!(width = outline.line_width, "Applying outline width");
                    gizmo.line_config.width = outline.line_width;
                }
            }
            None if !hidden => {
                trace!(?entity, "Showing outline gizmo");
                commands.entity(entity).insert(outline.gizmo());
            }
            None => {}
        }
    }
}
