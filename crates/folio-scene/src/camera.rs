//! Orbit camera for the showcase
//!
//! The camera circles the model on a fixed ring: dragging changes azimuth
//! only, the polar angle stays locked at its initial value, and there is no
//! zoom. Pointer input claimed by the UI layer never reaches the orbit.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;

/// Initial camera position, looking at the origin
pub const CAMERA_POSITION: Vec3 = Vec3::new(20.0, 3.0, 5.0);

/// Vertical field of view in degrees
pub const CAMERA_FOV_DEGREES: f32 = 25.0;

/// Marker component for the showcase camera
#[derive(Component)]
pub struct ShowcaseCamera;

/// Orbit state. Elevation and distance are fixed for the session, so the
/// camera moves on a horizontal ring around the target.
#[derive(Resource)]
pub struct OrbitSettings {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    pub sensitivity: f32,
    pub target: Vec3,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        let distance = CAMERA_POSITION.length();
        Self {
            // Spherical decomposition of the initial position (Y-up)
            azimuth: CAMERA_POSITION.z.atan2(CAMERA_POSITION.x),
            elevation: (CAMERA_POSITION.y / distance).asin(),
            distance,
            sensitivity: 0.005,
            target: Vec3::ZERO,
        }
    }
}

impl OrbitSettings {
    /// Camera position for the current azimuth (Y-up spherical coordinates)
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.elevation.cos() * self.azimuth.cos();
        let y = self.distance * self.elevation.sin();
        let z = self.distance * self.elevation.cos() * self.azimuth.sin();
        self.target + Vec3::new(x, y, z)
    }
}

/// Orbit with left mouse drag or single-finger drag. Azimuth only; scroll is
/// drained but ignored since zoom is disabled.
pub(crate) fn update_camera(
    mut camera_query: Query<&mut Transform, With<ShowcaseCamera>>,
    mut orbit: ResMut<OrbitSettings>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut contexts: bevy_egui::EguiContexts,
) {
    // Check if egui wants the mouse - if so, don't process camera controls
    let egui_wants_pointer = match contexts.ctx_mut() {
        Ok(ctx) => ctx.wants_pointer_input(),
        Err(_) => false,
    };

    let mut total_motion = Vec2::ZERO;
    for motion in mouse_motion.read() {
        total_motion += motion.delta;
    }

    if mouse_button.pressed(MouseButton::Left) && !egui_wants_pointer {
        orbit.azimuth -= total_motion.x * orbit.sensitivity;
    }

    // Touch support for mobile
    if touch_input.iter().count() == 1 && !egui_wants_pointer {
        for touch in touch_input.iter() {
            let delta = touch.delta();
            if delta != Vec2::ZERO {
                orbit.azimuth -= delta.x * orbit.sensitivity;
            }
        }
    }

    // Zoom is disabled; drain scroll events so they don't accumulate
    for _ in mouse_wheel.read() {}

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = orbit.position();
        transform.look_at(orbit.target, Vec3::Y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_orbit_reproduces_camera_position() {
        let orbit = OrbitSettings::default();
        let pos = orbit.position();
        assert!((pos - CAMERA_POSITION).length() < 1e-4);
    }

    #[test]
    fn test_orbit_keeps_distance_and_height() {
        let mut orbit = OrbitSettings::default();
        let initial_height = orbit.position().y;

        orbit.azimuth += 1.7;
        let pos = orbit.position();
        assert!((pos.length() - orbit.distance).abs() < 1e-4);
        // Polar angle is locked, so height over the target never changes
        assert!((pos.y - initial_height).abs() < 1e-4);
    }
}
