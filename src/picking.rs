//! Pointer picking of orbit rings.
//!
//! Only orbit rings take part in hit-testing; body spheres and labels are
//! ignored. A ring counts as hit when the pointer ray passes within
//! [`PickingSettings::threshold`] of the ring's polyline, and the hit nearest
//! to the camera wins.

use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::camera::MainCamera;
use crate::selection::{OrbitSelectionChanged, SelectedOrbit};
use crate::types::FrameSet;

/// Settings for ring picking.
#[derive(Resource, Clone, Debug)]
pub struct PickingSettings {
    /// Maximum ray-to-ring distance that still counts as a hit (scene units).
    pub threshold: f32,
    /// Segments used to approximate a ring when testing.
    pub segments: u32,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            segments: 128,
        }
    }
}

/// Pickable orbit ring, centered on its entity's translation.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct OrbitRing {
    pub orbit_id: String,
    /// Ring radius in scene units.
    pub radius: f32,
}

/// A ring intersected by a pointer ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingHit<'a> {
    pub orbit_id: &'a str,
    /// Distance along the ray to the closest approach.
    pub distance: f32,
}

/// Closest approach between a ray and a segment.
///
/// Returns `(t, distance²)` where `t ≥ 0` is the ray parameter.
pub fn ray_segment_closest(ray: Ray3d, a: Vec3, b: Vec3) -> (f32, f32) {
    let dir = *ray.direction;
    let seg = b - a;
    let w0 = ray.origin - a;

    let seg_len_sq = seg.length_squared();
    let b_dot = dir.dot(seg);
    let d_dot = dir.dot(w0);
    let e_dot = seg.dot(w0);
    let denom = seg_len_sq - b_dot * b_dot;

    // Unclamped solution, then clamp the segment parameter and re-project.
    let mut s = if denom.abs() > 1e-8 && seg_len_sq > 0.0 {
        ((e_dot - b_dot * d_dot) / denom).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mut t = (dir.dot(a + seg * s - ray.origin)).max(0.0);
    if seg_len_sq > 0.0 {
        s = ((ray.origin + dir * t - a).dot(seg) / seg_len_sq).clamp(0.0, 1.0);
        t = (dir.dot(a + seg * s - ray.origin)).max(0.0);
    }

    let closest_on_ray = ray.origin + dir * t;
    let closest_on_segment = a + seg * s;
    (t, closest_on_ray.distance_squared(closest_on_segment))
}

/// Closest approach between a ray and a planar ring, if within `threshold`.
pub fn ray_ring_distance(
    ray: Ray3d,
    center: Vec3,
    radius: f32,
    threshold: f32,
    segments: u32,
) -> Option<f32> {
    let segments = segments.max(8);
    let threshold_sq = threshold * threshold;
    let point = |i: u32| {
        let angle = TAU * i as f32 / segments as f32;
        center + Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
    };

    let mut best: Option<f32> = None;
    for i in 0..segments {
        let (t, dist_sq) = ray_segment_closest(ray, point(i), point(i + 1));
        if dist_sq <= threshold_sq && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    }
    best
}

/// Nearest ring hit by `ray` among `rings` (each paired with its center).
pub fn nearest_ring_hit<'a>(
    ray: Ray3d,
    rings: impl IntoIterator<Item = (&'a OrbitRing, Vec3)>,
    settings: &PickingSettings,
) -> Option<RingHit<'a>> {
    rings
        .into_iter()
        .filter_map(|(ring, center)| {
            ray_ring_distance(ray, center, ring.radius, settings.threshold, settings.segments).map(
                |distance| RingHit {
                    orbit_id: &ring.orbit_id,
                    distance,
                },
            )
        })
        .min_by(|a, b| a.distance.total_cmp(&b.distance))
}

/// Plugin providing orbit picking.
pub struct PickingPlugin;

impl Plugin for PickingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PickingSettings>()
            .add_systems(Update, pick_orbit_on_click.in_set(FrameSet::Input));
    }
}

/// Resolve a left click to the nearest orbit ring and select it.
///
/// Misses leave the selection unchanged.
fn pick_orbit_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    rings: Query<(&OrbitRing, &GlobalTransform)>,
    settings: Res<PickingSettings>,
    mut selected: ResMut<SelectedOrbit>,
    mut changes: MessageWriter<OrbitSelectionChanged>,
    mut contexts: EguiContexts,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_pointer_input()
    {
        return;
    }

    let Ok(window) = window_query.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor_pos) else {
        return;
    };

    let hit = nearest_ring_hit(
        ray,
        rings.iter().map(|(ring, transform)| (ring, transform.translation())),
        &settings,
    );
    let Some(hit) = hit else {
        return;
    };

    if selected.0.as_deref() != Some(hit.orbit_id) {
        info!("Selected orbit {}", hit.orbit_id);
        selected.0 = Some(hit.orbit_id.to_string());
        changes.write(OrbitSelectionChanged {
            orbit_id: selected.0.clone(),
        });
    }
}
