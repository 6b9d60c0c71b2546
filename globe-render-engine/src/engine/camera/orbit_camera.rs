use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::engine::assets::globe_manifest::CameraSettings;

/// Marker for the camera that renders and picks the globe.
#[derive(Component)]
pub struct GlobeCamera;

/// Keeps the pitch away from the poles where `looking_at` degenerates.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

/// Base dolly factor per wheel line, raised to the zoom speed.
const ZOOM_BASE: f32 = 0.95;

/// Wheel pixels that count as one line on touchpads and browsers.
const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Rotation still to be applied, drained by `damping` each frame.
    pub pending_yaw: f32,
    pub pending_pitch: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub zoom_speed: f32,
    pub rotate_speed: f32,
    pub damping: f32,
}

impl OrbitCamera {
    pub fn with_settings(settings: &CameraSettings) -> Self {
        let min_distance = settings.min_distance.min(settings.max_distance);
        Self {
            target: Vec3::ZERO,
            distance: settings
                .start_distance
                .clamp(min_distance, settings.max_distance),
            yaw: 0.0,
            pitch: 0.0,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            min_distance,
            max_distance: settings.max_distance,
            zoom_speed: settings.zoom_speed,
            rotate_speed: settings.rotate_speed,
            damping: settings.damping,
        }
    }

    /// Queue a drag of `delta` pixels. A drag across the full viewport height
    /// turns the globe once.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let scale = std::f32::consts::TAU * self.rotate_speed / viewport_height;
        self.pending_yaw -= delta.x * scale;
        self.pending_pitch += delta.y * scale;
    }

    /// Positive steps move towards the globe.
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * ZOOM_BASE.powf(self.zoom_speed * steps))
            .clamp(self.min_distance, self.max_distance);
    }

    /// Apply one frame of the pending rotation.
    pub fn update(&mut self) {
        let share = if self.damping > 0.0 {
            self.damping.min(1.0)
        } else {
            1.0
        };

        self.yaw += self.pending_yaw * share;
        self.pitch = (self.pitch + self.pending_pitch * share).clamp(-MAX_PITCH, MAX_PITCH);
        self.pending_yaw *= 1.0 - share;
        self.pending_pitch *= 1.0 - share;
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Camera position. Yaw and pitch of zero look at the globe from -Z.
    pub fn eye(&self) -> Vec3 {
        self.target + self.rotation() * (Vec3::NEG_Z * self.distance)
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.eye()).looking_at(self.target, Vec3::Y)
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::with_settings(&CameraSettings::default())
    }
}

pub fn orbit_camera_controller(
    mut camera_query: Query<&mut Transform, With<GlobeCamera>>,
    mut orbit: ResMut<OrbitCamera>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut scroll_events: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let Ok(mut camera_transform) = camera_query.single_mut() else {
        return;
    };

    let mouse_delta: Vec2 = mouse_motion.read().map(|m| m.delta).sum();
    if mouse_button.pressed(MouseButton::Left) && mouse_delta != Vec2::ZERO {
        if let Ok(window) = windows.single() {
            orbit.rotate(mouse_delta, window.height());
        }
    }

    let scroll_steps: f32 = scroll_events
        .read()
        .map(|ev| match ev.unit {
            MouseScrollUnit::Line => ev.y,
            MouseScrollUnit::Pixel => ev.y / PIXELS_PER_LINE,
        })
        .sum();
    if scroll_steps.abs() > f32::EPSILON {
        orbit.zoom(scroll_steps);
    }

    orbit.update();
    *camera_transform = orbit.transform();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_negative_z_looking_at_origin() {
        let orbit = OrbitCamera::default();
        assert!(orbit.eye().abs_diff_eq(Vec3::new(0.0, 0.0, -3.0), 1e-5));

        let forward = orbit.transform().forward();
        assert!(forward.as_vec3().abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut orbit = OrbitCamera::default();
        for _ in 0..500 {
            orbit.zoom(1.0);
        }
        assert_eq!(orbit.distance, 1.3);

        for _ in 0..500 {
            orbit.zoom(-1.0);
        }
        assert_eq!(orbit.distance, 5.0);
    }

    #[test]
    fn zoom_in_then_out_returns_to_start() {
        let mut orbit = OrbitCamera::default();
        orbit.zoom(2.0);
        assert!(orbit.distance < 3.0);
        orbit.zoom(-2.0);
        assert!((orbit.distance - 3.0).abs() < 1e-4);
    }

    #[test]
    fn damping_drains_pending_rotation_gradually() {
        let mut orbit = OrbitCamera::default();
        orbit.rotate(Vec2::new(100.0, 0.0), 600.0);
        let total = orbit.pending_yaw;

        orbit.update();
        assert!((orbit.yaw - total * 0.05).abs() < 1e-6);

        for _ in 0..400 {
            orbit.update();
        }
        assert!((orbit.yaw - total).abs() < 1e-4);
        assert!(orbit.pending_yaw.abs() < 1e-4);
    }

    #[test]
    fn pitch_never_reaches_the_poles() {
        let mut orbit = OrbitCamera {
            damping: 0.0,
            ..default()
        };
        orbit.rotate(Vec2::new(0.0, 10_000.0), 600.0);
        orbit.update();
        assert!(orbit.pitch < std::f32::consts::FRAC_PI_2);
        assert!(orbit.transform().translation.is_finite());
    }

    #[test]
    fn distance_is_preserved_by_rotation() {
        let mut orbit = OrbitCamera {
            damping: 0.0,
            ..default()
        };
        orbit.rotate(Vec2::new(123.0, -45.0), 600.0);
        orbit.update();
        assert!((orbit.eye().length() - 3.0).abs() < 1e-4);
    }
}
