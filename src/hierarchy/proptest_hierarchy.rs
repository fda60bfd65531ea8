//! Property-based tests for hierarchy building using proptest.
//!
//! Rows are drawn from small name pools (including blanks) so that
//! collisions, overrides and rejected rows all occur frequently.

use std::collections::HashSet;

use proptest::prelude::*;

use super::build;
use crate::dataset::normalize::RawRow;

#[derive(Clone, Debug)]
struct Row {
    entity: &'static str,
    tenant: &'static str,
    galaxy: &'static str,
    star: &'static str,
    body: &'static str,
    orbit: &'static str,
    star_color: &'static str,
    orbit_au: &'static str,
}

impl Row {
    fn is_valid(&self) -> bool {
        [self.entity, self.tenant, self.galaxy, self.star, self.body]
            .iter()
            .all(|v| !v.trim().is_empty())
    }

    fn star_path(&self) -> (&str, &str, &str, &str) {
        (
            self.entity.trim(),
            self.tenant.trim(),
            self.galaxy.trim(),
            self.star.trim(),
        )
    }

    fn raw(&self) -> RawRow {
        [
            ("Buying Entity", self.entity),
            ("Tenant", self.tenant),
            ("Galaxy", self.galaxy),
            ("Star", self.star),
            ("Body Name", self.body),
            ("Orbit", self.orbit),
            ("Star Color", self.star_color),
            ("Orbit AU", self.orbit_au),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }
}

fn key_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["A", "B", " A ", "", "  "])
}

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        key_strategy(),
        key_strategy(),
        key_strategy(),
        key_strategy(),
        prop::sample::select(vec!["Earth", "Mars", "", "Earth "]),
        prop::sample::select(vec!["", "o1", "o2"]),
        prop::sample::select(vec!["", "#112233", "#abcdef"]),
        prop::sample::select(vec!["", "1", "2,5", "x", "10"]),
    )
        .prop_map(
            |(entity, tenant, galaxy, star, body, orbit, star_color, orbit_au)| Row {
                entity,
                tenant,
                galaxy,
                star,
                body,
                orbit,
                star_color,
                orbit_au,
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every emitted body carries all required keys; rejected rows vanish.
    #[test]
    fn prop_bodies_have_required_keys(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let (hierarchy, counts) = build(rows.iter().map(Row::raw));

        let valid = rows.iter().filter(|r| r.is_valid()).count();
        prop_assert_eq!(counts.body_count, valid);

        for body in hierarchy.bodies() {
            prop_assert!(!body.buying_entity.is_empty());
            prop_assert!(!body.tenant.is_empty());
            prop_assert!(!body.galaxy.is_empty());
            prop_assert!(!body.star.is_empty());
            prop_assert!(!body.name.is_empty());
        }
    }

    /// Star count equals the number of distinct trimmed star paths.
    #[test]
    fn prop_star_count_matches_distinct_paths(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let (_, counts) = build(rows.iter().map(Row::raw));

        let paths: HashSet<_> = rows.iter().filter(|r| r.is_valid()).map(Row::star_path).collect();
        let entities: HashSet<_> = paths.iter().map(|p| p.0).collect();
        prop_assert_eq!(counts.star_count, paths.len());
        prop_assert_eq!(counts.entity_count, entities.len());
    }

    /// Star color reflects the last non-empty value supplied for it.
    #[test]
    fn prop_star_color_last_write_wins(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let (hierarchy, _) = build(rows.iter().map(Row::raw));

        for row in rows.iter().filter(|r| r.is_valid()) {
            let (e, t, g, s) = row.star_path();
            let expected = rows
                .iter()
                .filter(|r| r.is_valid() && r.star_path() == (e, t, g, s))
                .filter(|r| !r.star_color.is_empty())
                .last()
                .map(|r| r.star_color)
                .unwrap_or("");
            let star = hierarchy.star(e, t, g, s);
            prop_assert!(star.is_some());
            prop_assert_eq!(star.map(|s| s.color.as_str()), Some(expected));
        }
    }

    /// Orbit radius is the first finite value seen for that orbit.
    #[test]
    fn prop_orbit_radius_first_finite_wins(rows in prop::collection::vec(row_strategy(), 1..40)) {
        let (hierarchy, _) = build(rows.iter().map(Row::raw));

        for row in rows.iter().filter(|r| r.is_valid()) {
            let (e, t, g, s) = row.star_path();
            let orbit_id = if row.orbit.is_empty() { "orbit-1" } else { row.orbit };
            let expected = rows
                .iter()
                .filter(|r| r.is_valid() && r.star_path() == (e, t, g, s))
                .filter(|r| (if r.orbit.is_empty() { "orbit-1" } else { r.orbit }) == orbit_id)
                .find_map(|r| r.orbit_au.replace(',', ".").parse::<f64>().ok())
                .unwrap_or(1.0);
            let orbit = hierarchy.star(e, t, g, s).and_then(|s| s.orbit(orbit_id));
            prop_assert_eq!(orbit.map(|o| o.radius_au), Some(expected));
        }
    }

    /// Building the same rows twice yields identical trees.
    #[test]
    fn prop_build_is_deterministic(rows in prop::collection::vec(row_strategy(), 0..40)) {
        let first = build(rows.iter().map(Row::raw));
        let second = build(rows.iter().map(Row::raw));
        prop_assert_eq!(first, second);
    }
}
