//! Camera system for the star system viewer.
//!
//! A perspective camera circles the star: scroll to zoom, middle-drag to
//! orbit. The camera entity is also the scene's mount point; without it no
//! scene is built.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll},
    prelude::*,
};

/// Closest camera distance from the star, in scene units.
pub const MIN_DISTANCE: f32 = 3.0;

/// Furthest camera distance from the star, in scene units.
pub const MAX_DISTANCE: f32 = 120.0;

/// Default distance showing the whole system (outermost orbit at 15 units).
pub const DEFAULT_DISTANCE: f32 = 32.0;

/// Default elevation above the orbit plane, radians.
pub const DEFAULT_PITCH: f32 = 0.65;

/// Zoom speed multiplier for scroll wheel.
pub const ZOOM_SPEED: f32 = 0.1;

/// Orbit speed in radians per pixel of mouse motion.
pub const ORBIT_SPEED: f32 = 0.005;

/// Marker component for the main camera.
#[derive(Component)]
pub struct MainCamera;

/// Resource tracking where the camera sits around the star.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct CameraRig {
    pub distance: f32,
    /// Rotation around the vertical axis, radians.
    pub yaw: f32,
    /// Elevation above the orbit plane, radians.
    pub pitch: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            yaw: 0.0,
            pitch: DEFAULT_PITCH,
        }
    }
}

impl CameraRig {
    /// Camera transform looking at the star.
    pub fn transform(&self) -> Transform {
        let offset = Vec3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        );
        Transform::from_translation(offset).looking_at(Vec3::ZERO, Vec3::Y)
    }

    /// Multiply the distance by `factor`, clamped to the zoom limits.
    pub fn zoom(&mut self, factor: f32) {
        self.distance = (self.distance * factor).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Rotate by a mouse delta, keeping the camera above the plane.
    pub fn orbit(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_SPEED;
        self.pitch = (self.pitch + delta.y * ORBIT_SPEED).clamp(0.05, 1.5);
    }
}

/// Plugin providing camera functionality.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraRig>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, (camera_zoom, camera_orbit, apply_camera_rig).chain());
    }
}

/// Spawn the main camera with a soft ambient light.
fn setup_camera(mut commands: Commands, rig: Res<CameraRig>) {
    commands.spawn((
        Camera3d::default(),
        rig.transform(),
        AmbientLight {
            color: Color::WHITE,
            brightness: 150.0,
            ..default()
        },
        MainCamera,
    ));
}

/// Handle mouse scroll wheel for zoom.
fn camera_zoom(mouse_scroll: Res<AccumulatedMouseScroll>, mut rig: ResMut<CameraRig>) {
    // Skip if no scroll input
    if mouse_scroll.delta.y == 0.0 {
        return;
    }
    rig.zoom(1.0 - mouse_scroll.delta.y * ZOOM_SPEED);
}

/// Handle middle mouse button drag for orbiting.
fn camera_orbit(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mut rig: ResMut<CameraRig>,
) {
    if !mouse_buttons.pressed(MouseButton::Middle) || mouse_motion.delta == Vec2::ZERO {
        return;
    }
    rig.orbit(mouse_motion.delta);
}

fn apply_camera_rig(rig: Res<CameraRig>, mut camera_query: Query<&mut Transform, With<MainCamera>>) {
    if !rig.is_changed() {
        return;
    }
    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };
    *transform = rig.transform();
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rig_distance_preserved() {
        let rig = CameraRig::default();
        let transform = rig.transform();
        assert_relative_eq!(transform.translation.length(), DEFAULT_DISTANCE, epsilon = 1e-4);
        assert!(transform.translation.y > 0.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut rig = CameraRig::default();
        rig.zoom(100.0);
        assert_eq!(rig.distance, MAX_DISTANCE);
        rig.zoom(0.0);
        assert_eq!(rig.distance, MIN_DISTANCE);
    }

    #[test]
    fn test_orbit_keeps_camera_above_plane() {
        let mut rig = CameraRig::default();
        rig.orbit(Vec2::new(0.0, -10_000.0));
        assert_relative_eq!(rig.pitch, 0.05);
        rig.orbit(Vec2::new(0.0, 10_000.0));
        assert_relative_eq!(rig.pitch, 1.5);
    }
}
