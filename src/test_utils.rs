//! Test utilities for hierarchy and scene tests.
//!
//! Provides raw-row builders and small hand-made stars.

use crate::dataset::normalize::RawRow;
use crate::hierarchy::{Body, Orbit, Star};

/// Fixtures for creating test rows and trees.
pub mod fixtures {
    use super::*;

    /// Raw row from `(header, value)` pairs.
    pub fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    /// Row carrying only the required columns.
    pub fn body_row(entity: &str, tenant: &str, galaxy: &str, star: &str, body: &str) -> RawRow {
        row(&[
            ("buyingentity", entity),
            ("tenant", tenant),
            ("galaxy", galaxy),
            ("star", star),
            ("bodyname", body),
        ])
    }

    /// Empty orbit with the given radius.
    pub fn orbit(id: &str, radius_au: f64) -> Orbit {
        Orbit {
            id: id.to_string(),
            name: String::new(),
            kind: String::new(),
            style: String::new(),
            color: String::new(),
            radius_au,
            bodies: Vec::new(),
        }
    }

    /// Planet with the given raw radius and no explicit color.
    pub fn body(name: &str, radius: f64) -> Body {
        Body {
            name: name.to_string(),
            kind: "planet".to_string(),
            orbit_id: String::new(),
            orbit_au: None,
            radius,
            color: String::new(),
            period_days: None,
            notes: String::new(),
            buying_entity: "E".to_string(),
            tenant: "T".to_string(),
            galaxy: "G".to_string(),
            star: "S".to_string(),
        }
    }

    fn orbit_with(id: &str, radius_au: f64, bodies: Vec<Body>) -> Orbit {
        let mut orbit = orbit(id, radius_au);
        orbit.bodies = bodies
            .into_iter()
            .map(|mut b| {
                b.orbit_id = id.to_string();
                b
            })
            .collect();
        orbit
    }

    /// Three-orbit star, stored out of radius order:
    /// a dashed asteroid belt at 2.5 AU, an outer orbit at 10 AU with one
    /// large planet, and an inner orbit at 1 AU with two equal planets.
    pub fn sample_star() -> Star {
        let mut ceres = body("Ceres", 1.0);
        ceres.kind = "asteroid".to_string();
        let mut belt = orbit_with("belt", 2.5, vec![ceres]);
        belt.name = "Main Belt".to_string();
        belt.kind = "asteroid".to_string();
        belt.style = "dashed".to_string();

        let outer = orbit_with("outer", 10.0, vec![body("Jupiter", 5.0)]);
        let inner = orbit_with("inner", 1.0, vec![body("Mercury", 1.0), body("Venus", 1.0)]);

        Star {
            name: "S".to_string(),
            color: String::new(),
            radius: 1.6,
            orbits: vec![belt, outer, inner],
        }
    }
}
