//! Orbital motion of body meshes.
//!
//! Each body advances its phase by `angular_speed × Δt × speed_factor` per
//! frame and is moved back onto its circular, planar ring. The frame clock
//! is Bevy's [`Time`], so tests drive it with `TimeUpdateStrategy`. The
//! [`AnimationHandle`] is the explicit start/stop switch: the scene starts it
//! once it is live and stops it on teardown.

use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::render::layout::ring_point;
use crate::types::{FrameSet, MIN_KEPLER_AU};

/// Settings for orbital animation.
#[derive(Resource, Clone, Debug)]
pub struct AnimationSettings {
    /// Global slowdown applied to every body's angular speed.
    pub speed_factor: f32,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self { speed_factor: 0.1 }
    }
}

/// Start/stop handle for the per-frame motion system.
#[derive(Resource, Default, Debug)]
pub struct AnimationHandle {
    running: bool,
    paused: bool,
}

impl AnimationHandle {
    /// Begin animating; called when a scene goes live.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop animating; called when a scene is torn down.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// User pause, independent of the scene lifecycle.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether the motion system should run this frame.
    pub fn is_active(&self) -> bool {
        self.running && !self.paused
    }
}

/// Run condition for the motion system.
pub fn animation_active(handle: Res<AnimationHandle>) -> bool {
    handle.is_active()
}

/// Angular speed in radians per second before the global speed factor.
///
/// A positive period gives `2π / period_days`. Otherwise a Kepler-like
/// fallback `2π / d^1.5` uses the body's own orbit distance, or the orbit's
/// radius when the body has none, floored at [`MIN_KEPLER_AU`].
pub fn angular_speed(period_days: Option<f64>, orbit_au: Option<f64>, orbit_radius_au: f64) -> f32 {
    if let Some(period) = period_days.filter(|p| p.is_finite() && *p > 0.0) {
        return (std::f64::consts::TAU / period) as f32;
    }
    let distance = orbit_au
        .filter(|d| d.is_finite() && *d != 0.0)
        .unwrap_or(orbit_radius_au)
        .max(MIN_KEPLER_AU);
    (std::f64::consts::TAU / distance.powf(1.5)) as f32
}

/// Phase state of one animated body.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct OrbitalMotion {
    /// Current phase, radians in `[0, 2π)`.
    pub angle: f32,
    /// Radians per second before the global speed factor.
    pub angular_speed: f32,
    /// Ring radius in scene units.
    pub radius: f32,
}

impl OrbitalMotion {
    /// Advance the phase by `dt` seconds and return the new position.
    pub fn advance(&mut self, dt: f32, speed_factor: f32) -> Vec3 {
        self.angle = (self.angle + self.angular_speed * dt * speed_factor).rem_euclid(TAU);
        self.position()
    }

    pub fn position(&self) -> Vec3 {
        ring_point(self.radius, self.angle)
    }
}

/// Plugin providing orbital animation.
pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AnimationSettings>()
            .init_resource::<AnimationHandle>()
            .add_systems(
                Update,
                advance_orbits
                    .in_set(FrameSet::Animate)
                    .run_if(animation_active),
            );
    }
}

/// Move every animated body along its ring.
pub fn advance_orbits(
    time: Res<Time>,
    settings: Res<AnimationSettings>,
    mut bodies: Query<(&mut OrbitalMotion, &mut Transform)>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    for (mut motion, mut transform) in bodies.iter_mut() {
        transform.translation = motion.advance(dt, settings.speed_factor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_period_drives_speed() {
        assert_relative_eq!(angular_speed(Some(365.0), Some(1.0), 1.0), TAU / 365.0);
    }

    #[test]
    fn test_kepler_fallback() {
        assert_relative_eq!(angular_speed(None, Some(1.0), 5.0), TAU);
        assert_relative_eq!(angular_speed(Some(0.0), Some(4.0), 1.0), TAU / 8.0);
        assert_relative_eq!(angular_speed(Some(-3.0), None, 4.0), TAU / 8.0);
    }

    #[test]
    fn test_kepler_fallback_floors_distance() {
        let floor = (std::f64::consts::TAU / 0.1f64.powf(1.5)) as f32;
        assert_relative_eq!(angular_speed(None, Some(0.01), 1.0), floor);
        assert_relative_eq!(angular_speed(None, None, 0.0), floor);
    }

    #[test]
    fn test_advance_moves_along_ring() {
        let mut motion = OrbitalMotion {
            angle: 0.0,
            angular_speed: TAU / 4.0,
            radius: 2.0,
        };
        let position = motion.advance(1.0, 1.0);
        assert_relative_eq!(motion.angle, TAU / 4.0);
        assert_relative_eq!(position.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(position.z, 2.0, epsilon = 1e-5);
        assert_eq!(position.y, 0.0);
    }

    #[test]
    fn test_advance_applies_speed_factor_and_wraps() {
        let mut motion = OrbitalMotion {
            angle: 6.0,
            angular_speed: 1.0,
            radius: 1.0,
        };
        motion.advance(5.0, 0.1);
        assert_relative_eq!(motion.angle, 6.5 - TAU, epsilon = 1e-5);
    }

    #[test]
    fn test_handle_lifecycle() {
        let mut handle = AnimationHandle::default();
        assert!(!handle.is_active());
        handle.start();
        assert!(handle.is_active());
        handle.toggle_pause();
        assert!(handle.is_running() && !handle.is_active());
        handle.toggle_pause();
        handle.stop();
        assert!(!handle.is_active());
    }
}
