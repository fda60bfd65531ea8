//! Scene layout for one star system.
//!
//! Turns a [`Star`] plus the current selection and label flag into a plain
//! description of everything the scene will contain. The description holds
//! no GPU resources; [`super::scene`] materializes it.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::prelude::*;

use crate::animation::angular_speed;
use crate::hierarchy::{Body, Orbit, Star};

use super::scaling::GeometryScale;
use super::style::{
    BodyPalette, LineStyle, SceneSettings, body_size, orbit_color, ring_opacity, star_color,
};

/// Angular offset added per orbit index so first bodies do not line up.
pub const ORBIT_PHASE_OFFSET: f32 = 0.1;

/// Arc length per glyph of a curved orbit label, in scene units.
pub const GLYPH_ARC_LENGTH: f32 = 0.28;

/// Widest arc a curved orbit label may span, in radians.
pub const MAX_LABEL_SPAN: f32 = 0.9;

/// Distance between a ring and its curved label.
pub const ORBIT_LABEL_GAP: f32 = 0.35;

#[derive(Clone, Debug, PartialEq)]
pub struct StarVisual {
    pub name: String,
    pub color: Color,
    pub radius: f32,
}

/// One orbit ring.
#[derive(Clone, Debug, PartialEq)]
pub struct RingVisual {
    pub orbit_id: String,
    /// Position in the radius-sorted orbit list.
    pub index: usize,
    /// Radius in scene units.
    pub radius: f32,
    pub color: Color,
    pub style: LineStyle,
    pub opacity: f32,
    pub selected: bool,
}

/// One body sphere.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyVisual {
    pub name: String,
    pub orbit_id: String,
    pub color: Color,
    /// Sphere radius in scene units.
    pub size: f32,
    /// Radius of the ring the body travels on, in scene units.
    pub orbit_radius: f32,
    /// Phase angle at build time, radians.
    pub initial_angle: f32,
    /// Radians per second before the global speed factor.
    pub angular_speed: f32,
}

impl BodyVisual {
    /// Position on the ring at the initial angle.
    pub fn initial_position(&self) -> Vec3 {
        ring_point(self.orbit_radius, self.initial_angle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Star,
    Body,
    /// One character of a curved orbit name.
    OrbitGlyph,
}

/// A text label. Body labels are positioned relative to their body.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelVisual {
    pub text: String,
    pub kind: LabelKind,
    pub position: Vec3,
    /// Index into [`ScenePlan::bodies`] for body labels.
    pub body: Option<usize>,
}

/// Everything one star's scene contains.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenePlan {
    pub star: StarVisual,
    pub scale: GeometryScale,
    pub rings: Vec<RingVisual>,
    pub bodies: Vec<BodyVisual>,
    pub labels: Vec<LabelVisual>,
}

/// Point on a planar ring around the origin.
pub fn ring_point(radius: f32, angle: f32) -> Vec3 {
    Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// Initial phase of the `index`-th of `count` bodies on the `orbit_index`-th orbit.
pub fn initial_angle(index: usize, count: usize, orbit_index: usize) -> f32 {
    let spacing = if count == 0 { 0.0 } else { TAU * index as f32 / count as f32 };
    spacing + ORBIT_PHASE_OFFSET * orbit_index as f32
}

/// Angular step between glyphs of a curved label with `len` characters on
/// an arc of `radius`. Long names are squeezed so the span never exceeds
/// [`MAX_LABEL_SPAN`].
pub fn glyph_step(len: usize, radius: f32) -> f32 {
    if len == 0 || radius <= 0.0 {
        return 0.0;
    }
    (GLYPH_ARC_LENGTH / radius).min(MAX_LABEL_SPAN / len as f32)
}

/// Lay out a curved orbit label centered at the top (far side) of a ring.
///
/// Whitespace keeps its slot but produces no glyph.
pub fn orbit_label_glyphs(name: &str, ring_radius: f32) -> Vec<(char, Vec3)> {
    let chars: Vec<char> = name.chars().collect();
    let radius = ring_radius + ORBIT_LABEL_GAP;
    let step = glyph_step(chars.len(), radius);
    let span = step * chars.len().saturating_sub(1) as f32;
    let start = -FRAC_PI_2 - span / 2.0;

    chars
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(i, &c)| {
            let mut position = ring_point(radius, start + step * i as f32);
            position.y = 0.05;
            (c, position)
        })
        .collect()
}

fn plan_body(
    body: &Body,
    orbit: &Orbit,
    ring: &RingVisual,
    index: usize,
    count: usize,
    scale: &GeometryScale,
    palette: &mut BodyPalette,
    settings: &SceneSettings,
) -> BodyVisual {
    BodyVisual {
        name: body.name.clone(),
        orbit_id: orbit.id.clone(),
        color: palette.color_for(body),
        size: body_size(&body.kind, scale.normalized_radius(body.radius), settings),
        orbit_radius: ring.radius,
        initial_angle: initial_angle(index, count, ring.index),
        angular_speed: angular_speed(body.period_days, body.orbit_au, orbit.radius_au),
    }
}

/// Lay out the scene for `star`.
pub fn plan_scene(
    star: &Star,
    selected_orbit: Option<&str>,
    show_labels: bool,
    settings: &SceneSettings,
) -> ScenePlan {
    let orbits = star.orbits_by_radius();
    let scale = GeometryScale::compute(
        &orbits,
        orbits.iter().flat_map(|o| &o.bodies),
        settings.base_orbit_scale,
    );

    let star_visual = StarVisual {
        name: star.name.clone(),
        color: star_color(&star.color),
        radius: star.radius as f32,
    };

    let mut palette = BodyPalette::default();
    let mut rings = Vec::with_capacity(orbits.len());
    let mut bodies = Vec::new();
    let mut labels = Vec::new();

    if show_labels {
        labels.push(LabelVisual {
            text: star.name.clone(),
            kind: LabelKind::Star,
            position: Vec3::new(0.0, star_visual.radius + settings.label_lift, 0.0),
            body: None,
        });
    }

    for (index, orbit) in orbits.iter().enumerate() {
        let style = LineStyle::parse(&orbit.style);
        let selected = selected_orbit == Some(orbit.id.as_str());
        let ring = RingVisual {
            orbit_id: orbit.id.clone(),
            index,
            radius: scale.orbit_units(orbit.radius_au),
            color: orbit_color(orbit),
            style,
            opacity: ring_opacity(style, selected, settings),
            selected,
        };

        let count = orbit.bodies.len();
        for (i, body) in orbit.bodies.iter().enumerate() {
            let visual = plan_body(body, orbit, &ring, i, count, &scale, &mut palette, settings);
            if show_labels {
                labels.push(LabelVisual {
                    text: body.name.clone(),
                    kind: LabelKind::Body,
                    position: Vec3::new(0.0, visual.size + settings.label_lift, 0.0),
                    body: Some(bodies.len()),
                });
            }
            bodies.push(visual);
        }

        if show_labels {
            labels.extend(
                orbit_label_glyphs(orbit.display_name(), ring.radius)
                    .into_iter()
                    .map(|(c, position)| LabelVisual {
                        text: c.to_string(),
                        kind: LabelKind::OrbitGlyph,
                        position,
                        body: None,
                    }),
            );
        }

        rings.push(ring);
    }

    ScenePlan {
        star: star_visual,
        scale,
        rings,
        bodies,
        labels,
    }
}
