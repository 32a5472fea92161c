//! Direction and orbit math shared by the outline and rotation helpers

use bevy::prelude::*;

/// Absolute cosine between two view/normal directions.
///
/// Sign is discarded: a plane seen from behind is still facing the camera.
pub fn alignment(a: Vec3, b: Vec3) -> f32 {
    a.normalize_or_zero().dot(b.normalize_or_zero()).abs()
}

/// Rotate `position` about `axis` (through the origin) keeping its distance
/// from the origin.
///
/// The length is restored after the rotation to stop drift accumulating over
/// many small interactive steps.
pub fn orbit_about_origin(position: Vec3, axis: Vec3, angle: f32) -> Vec3 {
    let Some(axis) = axis.try_normalize() else {
        return position;
    };
    let distance = position.length();
    let rotated = Quat::from_axis_angle(axis, angle) * position;
    rotated.normalize_or_zero() * distance
}

/// Orbit a camera transform about `axis` and point it back at `target`.
///
/// The camera's current up vector is carried through the same rotation so a
/// top-down camera keeps a usable up direction.
pub fn orbit_camera(transform: &mut Transform, axis: Vec3, angle: f32, target: Vec3) {
    let Some(axis) = axis.try_normalize() else {
        return;
    };
    let rotation = Quat::from_axis_angle(axis, angle);
    let up = rotation * *transform.up();
    transform.translation = orbit_about_origin(transform.translation, axis, angle);
    transform.look_at(target, up);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_alignment_ignores_sign() {
        assert!((alignment(Vec3::Z, Vec3::NEG_Z) - 1.0).abs() < 1e-6);
        assert!(alignment(Vec3::Z, Vec3::X) < 1e-6);
        assert_eq!(alignment(Vec3::ZERO, Vec3::X), 0.0);
    }

    #[test]
    fn test_orbit_quarter_turn() {
        let rotated = orbit_about_origin(Vec3::new(0.0, 0.0, 10.0), Vec3::Y, FRAC_PI_2);
        assert!(rotated.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn test_orbit_preserves_distance() {
        let mut position = Vec3::new(3.0, 4.0, 12.0);
        let distance = position.length();
        for _ in 0..1000 {
            position = orbit_about_origin(position, Vec3::new(1.0, 2.0, 0.5), 0.013);
        }
        assert!((position.length() - distance).abs() < 1e-3);
    }

    #[test]
    fn test_orbit_zero_axis_is_noop() {
        let position = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(orbit_about_origin(position, Vec3::ZERO, 1.0), position);
    }

    #[test]
    fn test_orbit_camera_faces_target() {
        let mut transform =
            Transform::from_xyz(0.0, 10.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z);
        orbit_camera(&mut transform, Vec3::Z, FRAC_PI_4, Vec3::ZERO);

        assert!((transform.translation.length() - 10.0).abs() < 1e-4);
        let to_origin = (-transform.translation).normalize();
        assert!(transform.forward().dot(to_origin) > 0.9999);
    }
}
