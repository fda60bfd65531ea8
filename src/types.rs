//! Shared constants for dataset import and star system rendering.

use bevy::prelude::*;

/// System set for ordering frame systems.
///
/// Input and picking update the selection state before the scene is rebuilt,
/// and the rebuild finishes before bodies are animated.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Keyboard shortcuts and pointer picking.
    Input,
    /// Scene teardown and rebuild.
    Scene,
    /// Orbital motion of body meshes.
    Animate,
}

impl FrameSet {
    /// Order the frame sets within `Update`.
    pub fn configure(app: &mut App) {
        app.configure_sets(
            Update,
            (FrameSet::Input, FrameSet::Scene, FrameSet::Animate).chain(),
        );
    }
}

/// Orbit identifier used when a row names no orbit.
pub const DEFAULT_ORBIT_ID: &str = "orbit-1";

/// Star radius used when no row supplies a finite value.
pub const DEFAULT_STAR_RADIUS: f64 = 1.6;

/// Orbit radius (AU) used when no row supplies a finite value.
pub const DEFAULT_ORBIT_RADIUS_AU: f64 = 1.0;

/// Body radius used when a row supplies no finite value.
pub const DEFAULT_BODY_RADIUS: f64 = 1.0;

/// Scene units spanned by the outermost orbit.
pub const BASE_ORBIT_SCALE: f32 = 15.0;

/// Smallest orbit distance (AU) fed into the Kepler-like speed fallback.
pub const MIN_KEPLER_AU: f64 = 0.1;

/// Columns a row must fill for it to contribute to the hierarchy.
pub const REQUIRED_COLUMNS: &str = "buyingentity, tenant, galaxy, star, bodyname";
