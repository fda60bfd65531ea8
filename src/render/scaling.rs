//! Star system scaling.
//!
//! Two scalars derived from one star's data on every rebuild:
//! 1. A linear AU → scene-unit factor so the outermost orbit spans
//!    [`BASE_ORBIT_SCALE`] units
//! 2. The body radius range used to normalize raw radii before they are
//!    mapped onto on-screen sphere sizes

use crate::hierarchy::{Body, Orbit};
use crate::types::{BASE_ORBIT_SCALE, DEFAULT_BODY_RADIUS};

/// Scale factors for one star system. Carries no state between rebuilds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeometryScale {
    /// Scene units per AU.
    pub orbit_scale: f32,
    /// Smallest raw body radius.
    pub min_radius: f32,
    /// Largest raw body radius.
    pub max_radius: f32,
    /// `max_radius - min_radius`, floored to 1 when zero.
    pub radius_range: f32,
}

impl Default for GeometryScale {
    fn default() -> Self {
        Self {
            orbit_scale: 1.0,
            min_radius: DEFAULT_BODY_RADIUS as f32,
            max_radius: DEFAULT_BODY_RADIUS as f32,
            radius_range: 1.0,
        }
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

impl GeometryScale {
    /// Compute the scales for `orbits` (sorted ascending by radius) and the
    /// flattened `bodies` of those orbits.
    pub fn compute<'a>(
        orbits: &[&Orbit],
        bodies: impl IntoIterator<Item = &'a Body>,
        base_orbit_scale: f32,
    ) -> Self {
        let first = orbits.first().map(|o| o.radius_au).unwrap_or(1.0);
        let max_orbit = orbits
            .iter()
            .map(|o| o.radius_au)
            .fold(first, f64::max);
        let orbit_scale = if max_orbit.is_finite() && max_orbit > 0.0 {
            (base_orbit_scale as f64 / max_orbit) as f32
        } else {
            1.0
        };

        let radii: Vec<f64> = bodies
            .into_iter()
            .map(|b| finite_or(b.radius, DEFAULT_BODY_RADIUS))
            .collect();
        if radii.is_empty() {
            return Self {
                orbit_scale,
                ..Self::default()
            };
        }

        let min_radius = radii.iter().copied().fold(f64::INFINITY, f64::min) as f32;
        let max_radius = radii.iter().copied().fold(f64::NEG_INFINITY, f64::max) as f32;
        let range = max_radius - min_radius;

        Self {
            orbit_scale,
            min_radius,
            max_radius,
            radius_range: if range == 0.0 { 1.0 } else { range },
        }
    }

    /// Convenience for the default base scale.
    pub fn for_orbits<'a>(orbits: &[&Orbit], bodies: impl IntoIterator<Item = &'a Body>) -> Self {
        Self::compute(orbits, bodies, BASE_ORBIT_SCALE)
    }

    /// Orbit radius in scene units.
    pub fn orbit_units(&self, radius_au: f64) -> f32 {
        radius_au as f32 * self.orbit_scale
    }

    /// Body radius normalized into `[0, 1]` across the system.
    pub fn normalized_radius(&self, radius: f64) -> f32 {
        let radius = finite_or(radius, DEFAULT_BODY_RADIUS) as f32;
        ((radius - self.min_radius) / self.radius_range).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{body, orbit};
    use approx::assert_relative_eq;

    #[test]
    fn test_orbit_scale_uses_outermost_orbit() {
        let orbits = [orbit("a", 1.0), orbit("b", 2.5), orbit("c", 10.0)];
        let refs: Vec<&Orbit> = orbits.iter().collect();
        let scale = GeometryScale::for_orbits(&refs, []);
        assert_relative_eq!(scale.orbit_scale, 1.5);
        assert_relative_eq!(scale.orbit_units(2.5), 3.75);
    }

    #[test]
    fn test_zero_radius_orbit_falls_back_to_unit_scale() {
        let orbits = [orbit("a", 0.0)];
        let refs: Vec<&Orbit> = orbits.iter().collect();
        assert_eq!(GeometryScale::for_orbits(&refs, []).orbit_scale, 1.0);
    }

    #[test]
    fn test_no_orbits_uses_unit_radius() {
        let scale = GeometryScale::for_orbits(&[], []);
        assert_relative_eq!(scale.orbit_scale, 15.0);
    }

    #[test]
    fn test_body_radius_range() {
        let bodies = [body("a", 1.0), body("b", 1.0), body("c", 5.0)];
        let scale = GeometryScale::for_orbits(&[], &bodies);
        assert_eq!(scale.min_radius, 1.0);
        assert_eq!(scale.max_radius, 5.0);
        assert_eq!(scale.radius_range, 4.0);
        assert_eq!(scale.normalized_radius(1.0), 0.0);
        assert_eq!(scale.normalized_radius(5.0), 1.0);
        assert_eq!(scale.normalized_radius(3.0), 0.5);
    }

    #[test]
    fn test_equal_radii_floor_range_to_one() {
        let bodies = [body("a", 2.0), body("b", 2.0)];
        let scale = GeometryScale::for_orbits(&[], &bodies);
        assert_eq!(scale.radius_range, 1.0);
        assert_eq!(scale.normalized_radius(2.0), 0.0);
    }

    #[test]
    fn test_non_finite_radius_counts_as_one() {
        let bodies = [body("a", f64::NAN), body("b", 3.0)];
        let scale = GeometryScale::for_orbits(&[], &bodies);
        assert_eq!(scale.min_radius, 1.0);
        assert_eq!(scale.radius_range, 2.0);
    }
}
