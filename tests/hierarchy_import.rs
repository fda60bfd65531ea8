//! Integration tests for dataset import and hierarchy building.

mod common;

use approx::assert_relative_eq;
use orbitview::dataset::{DatasetError, load_from_reader};
use orbitview::types::{DEFAULT_ORBIT_ID, DEFAULT_ORBIT_RADIUS_AU, DEFAULT_STAR_RADIUS};

use common::{SAMPLE_CSV, load, sample, sol};

#[test]
fn test_sample_counts() {
    let (_, counts) = load(SAMPLE_CSV);
    assert_eq!(counts.entity_count, 2);
    assert_eq!(counts.tenant_count, 2);
    assert_eq!(counts.galaxy_count, 3);
    assert_eq!(counts.star_count, 3);
    assert_eq!(counts.body_count, 6);
}

#[test]
fn test_star_attributes_last_non_empty_wins() {
    let hierarchy = sample();
    let star = sol(&hierarchy);
    assert_eq!(star.color, "#ffcc66");
    assert_relative_eq!(star.radius, 2.0);
}

#[test]
fn test_orbit_attributes_first_non_empty_wins() {
    let hierarchy = sample();
    let inner = sol(&hierarchy).orbit("inner").expect("inner orbit");
    assert_eq!(inner.name, "Inner Orbit");
    assert_eq!(inner.kind, "inner");
    assert_relative_eq!(inner.radius_au, 1.0);
    let names: Vec<&str> = inner.bodies.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Mercury", "Venus"]);
}

#[test]
fn test_comma_decimals() {
    let hierarchy = sample();
    let star = sol(&hierarchy);
    assert_relative_eq!(star.orbit("belt").expect("belt").radius_au, 2.7);
    let mercury = star.bodies().find(|b| b.name == "Mercury").expect("Mercury");
    assert_relative_eq!(mercury.radius, 0.4);
    assert_eq!(mercury.period_days, Some(88.0));
}

#[test]
fn test_body_inherits_orbit_distance() {
    let hierarchy = sample();
    let venus = sol(&hierarchy)
        .bodies()
        .find(|b| b.name == "Venus")
        .expect("Venus");
    assert_eq!(venus.orbit_au, Some(1.0));
    assert_eq!(venus.orbit_id, "inner");
    assert_eq!(venus.buying_entity, "Acme");
    assert_eq!(venus.star, "Sol");
}

#[test]
fn test_missing_orbit_id_uses_default() {
    let hierarchy = sample();
    let vega = hierarchy
        .star("Borealis", "Labs", "Milky Way", "Vega")
        .expect("Vega");
    assert_eq!(vega.orbits.len(), 1);
    assert_eq!(vega.orbits[0].id, DEFAULT_ORBIT_ID);
    assert_relative_eq!(vega.orbits[0].radius_au, DEFAULT_ORBIT_RADIUS_AU);
    assert_relative_eq!(vega.radius, DEFAULT_STAR_RADIUS);
}

#[test]
fn test_header_names_are_normalized() {
    let csv = "BUYING ENTITY, Tenant ,galaxy,Star,Planet,Planet Radius,Planet Color\n\
               Acme,Ops,MW,Sol,Earth,\"1,5\",#00ff00\n";
    let (hierarchy, _) = load(csv);
    let earth = hierarchy
        .star("Acme", "Ops", "MW", "Sol")
        .and_then(|s| s.bodies().next())
        .expect("body imported");
    assert_eq!(earth.name, "Earth");
    assert_relative_eq!(earth.radius, 1.5);
    assert_eq!(earth.color, "#00ff00");
}

#[test]
fn test_keys_are_trimmed_and_incomplete_rows_skipped() {
    let csv = "buyingentity,tenant,galaxy,star,bodyname\n\
               \" Acme \",Ops,MW,Sol,Earth\n\
               Acme,Ops,MW,Sol,\n\
               Acme,,MW,Sol,Mars\n\
               Acme,Ops,MW, Sol,Venus\n";
    let (hierarchy, counts) = load(csv);
    assert_eq!(counts.entity_count, 1);
    assert_eq!(counts.star_count, 1);
    assert_eq!(counts.body_count, 2);
    assert!(hierarchy.star("Acme", "Ops", "MW", "Sol").is_some());
}

#[test]
fn test_empty_import_names_required_columns() {
    let csv = "name,color\nEarth,#00ff00\n";
    let err = load_from_reader(csv.as_bytes()).expect_err("nothing to import");
    assert!(matches!(err, DatasetError::Empty { .. }));
    let message = err.to_string();
    for column in ["buyingentity", "tenant", "galaxy", "star", "bodyname"] {
        assert!(message.contains(column), "{message} should name {column}");
    }
}

#[test]
fn test_header_only_file_is_empty() {
    let err = load_from_reader("buyingentity,tenant,galaxy,star,bodyname\n".as_bytes())
        .expect_err("no rows");
    assert!(matches!(err, DatasetError::Empty { .. }));
}

#[test]
fn test_enumeration_is_lexicographic() {
    let hierarchy = sample();
    assert_eq!(hierarchy.entity_names(), vec!["Acme", "Borealis"]);
    let tenant = hierarchy
        .entity("Acme")
        .and_then(|e| e.tenant("Ops"))
        .expect("tenant");
    assert_eq!(tenant.galaxy_names(), vec!["Milky Way", "Whirlpool"]);
    let radii: Vec<f64> = sol(&hierarchy)
        .orbits_by_radius()
        .iter()
        .map(|o| o.radius_au)
        .collect();
    assert_eq!(radii, vec![1.0, 2.7, 5.2]);
}
