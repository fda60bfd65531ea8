//! Arena-backed hierarchy builder.
//!
//! Each level of the tree lives in its own arena, addressed through a
//! name-keyed lookup table scoped to the parent node. The insert-or-fetch
//! operations own the override rules:
//!
//! - star `color`/`radius`: last non-empty (finite) value wins
//! - orbit `name`/`type`/`style`/`color`: first non-empty value wins, per field
//! - orbit `radiusAU`: first finite value wins, then never changes
//! - bodies: one per accepted row, appended in input order, never merged
//!
//! All lookups use exact trimmed strings. Arenas are plain vectors, so the
//! finished tree depends only on input order.

use std::collections::HashMap;

use bevy::log::debug;

use crate::dataset::normalize::{NormalizedRow, RawRow, fields, normalize_row};
use crate::types::{DEFAULT_BODY_RADIUS, DEFAULT_ORBIT_ID, DEFAULT_ORBIT_RADIUS_AU, DEFAULT_STAR_RADIUS};

use super::{Body, BuyingEntity, Counts, Galaxy, Hierarchy, Orbit, Star, Tenant};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityKey(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TenantKey(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GalaxyKey(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StarKey(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OrbitKey(usize);

/// Star attributes carried by one row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StarAttrs {
    pub color: String,
    pub radius: Option<f64>,
}

/// Orbit attributes carried by one row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrbitAttrs {
    pub name: String,
    pub kind: String,
    pub style: String,
    pub color: String,
    pub radius_au: Option<f64>,
}

struct EntityNode {
    name: String,
    tenants: Vec<TenantKey>,
}

struct TenantNode {
    name: String,
    galaxies: Vec<GalaxyKey>,
}

struct GalaxyNode {
    name: String,
    stars: Vec<StarKey>,
}

struct StarNode {
    name: String,
    color: String,
    radius: Option<f64>,
    orbits: Vec<OrbitKey>,
}

struct OrbitNode {
    id: String,
    attrs: OrbitAttrs,
    bodies: Vec<Body>,
}

/// Growable tree used while rows are folded in.
#[derive(Default)]
pub struct HierarchyBuilder {
    entities: Vec<EntityNode>,
    entity_index: HashMap<String, EntityKey>,
    tenants: Vec<TenantNode>,
    tenant_index: HashMap<(EntityKey, String), TenantKey>,
    galaxies: Vec<GalaxyNode>,
    galaxy_index: HashMap<(TenantKey, String), GalaxyKey>,
    stars: Vec<StarNode>,
    star_index: HashMap<(GalaxyKey, String), StarKey>,
    orbits: Vec<OrbitNode>,
    orbit_index: HashMap<(StarKey, String), OrbitKey>,
    skipped_rows: usize,
}

/// Keep `current` unless it is empty and `incoming` is not.
fn fill_if_empty(current: &mut String, incoming: &str) {
    if current.is_empty() && !incoming.is_empty() {
        *current = incoming.to_string();
    }
}

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entity(&mut self, name: &str) -> EntityKey {
        if let Some(&key) = self.entity_index.get(name) {
            return key;
        }
        let key = EntityKey(self.entities.len());
        self.entities.push(EntityNode {
            name: name.to_string(),
            tenants: Vec::new(),
        });
        self.entity_index.insert(name.to_string(), key);
        key
    }

    pub fn tenant(&mut self, entity: EntityKey, name: &str) -> TenantKey {
        let lookup = (entity, name.to_string());
        if let Some(&key) = self.tenant_index.get(&lookup) {
            return key;
        }
        let key = TenantKey(self.tenants.len());
        self.tenants.push(TenantNode {
            name: name.to_string(),
            galaxies: Vec::new(),
        });
        self.entities[entity.0].tenants.push(key);
        self.tenant_index.insert(lookup, key);
        key
    }

    pub fn galaxy(&mut self, tenant: TenantKey, name: &str) -> GalaxyKey {
        let lookup = (tenant, name.to_string());
        if let Some(&key) = self.galaxy_index.get(&lookup) {
            return key;
        }
        let key = GalaxyKey(self.galaxies.len());
        self.galaxies.push(GalaxyNode {
            name: name.to_string(),
            stars: Vec::new(),
        });
        self.tenants[tenant.0].galaxies.push(key);
        self.galaxy_index.insert(lookup, key);
        key
    }

    /// Insert or fetch a star; a non-empty color or finite radius in `attrs`
    /// overwrites whatever an earlier row supplied.
    pub fn star(&mut self, galaxy: GalaxyKey, name: &str, attrs: &StarAttrs) -> StarKey {
        let lookup = (galaxy, name.to_string());
        let key = match self.star_index.get(&lookup) {
            Some(&key) => key,
            None => {
                let key = StarKey(self.stars.len());
                self.stars.push(StarNode {
                    name: name.to_string(),
                    color: String::new(),
                    radius: None,
                    orbits: Vec::new(),
                });
                self.galaxies[galaxy.0].stars.push(key);
                self.star_index.insert(lookup, key);
                key
            }
        };

        let node = &mut self.stars[key.0];
        if !attrs.color.is_empty() {
            node.color = attrs.color.clone();
        }
        if let Some(radius) = attrs.radius.filter(|r| r.is_finite()) {
            node.radius = Some(radius);
        }
        key
    }

    /// Insert or fetch an orbit; each text field keeps the first non-empty
    /// value, the radius keeps the first finite value.
    pub fn orbit(&mut self, star: StarKey, id: &str, attrs: &OrbitAttrs) -> OrbitKey {
        let lookup = (star, id.to_string());
        let key = match self.orbit_index.get(&lookup) {
            Some(&key) => key,
            None => {
                let key = OrbitKey(self.orbits.len());
                self.orbits.push(OrbitNode {
                    id: id.to_string(),
                    attrs: OrbitAttrs::default(),
                    bodies: Vec::new(),
                });
                self.stars[star.0].orbits.push(key);
                self.orbit_index.insert(lookup, key);
                key
            }
        };

        let current = &mut self.orbits[key.0].attrs;
        fill_if_empty(&mut current.name, &attrs.name);
        fill_if_empty(&mut current.kind, &attrs.kind);
        fill_if_empty(&mut current.style, &attrs.style);
        fill_if_empty(&mut current.color, &attrs.color);
        if current.radius_au.is_none() {
            current.radius_au = attrs.radius_au.filter(|r| r.is_finite());
        }
        key
    }

    /// Append a body to an orbit. A body without its own finite orbit
    /// distance inherits the orbit's radius as resolved so far.
    pub fn push_body(&mut self, orbit: OrbitKey, mut body: Body) {
        let node = &mut self.orbits[orbit.0];
        body.orbit_id = node.id.clone();
        if !body.orbit_au.is_some_and(f64::is_finite) {
            body.orbit_au = node.attrs.radius_au;
        }
        node.bodies.push(body);
    }

    /// Fold one normalized row into the tree.
    ///
    /// Returns `false` (and changes nothing) when a required key or the body
    /// name is empty after trimming.
    pub fn push_row(&mut self, row: &NormalizedRow) -> bool {
        let entity = row.text(fields::BUYING_ENTITY);
        let tenant = row.text(fields::TENANT);
        let galaxy = row.text(fields::GALAXY);
        let star = row.text(fields::STAR);
        let body_name = row.text(fields::BODY_NAME);

        if [&entity, &tenant, &galaxy, &star, &body_name]
            .iter()
            .any(|value| value.is_empty())
        {
            self.skipped_rows += 1;
            return false;
        }

        let mut orbit_id = row.text(fields::ORBIT_ID);
        if orbit_id.is_empty() {
            orbit_id = DEFAULT_ORBIT_ID.to_string();
        }

        let star_attrs = StarAttrs {
            color: row.text(fields::STAR_COLOR),
            radius: row.number(fields::STAR_RADIUS),
        };
        let orbit_attrs = OrbitAttrs {
            name: row.text(fields::ORBIT_NAME),
            kind: row.text(fields::ORBIT_TYPE),
            style: row.text(fields::ORBIT_STYLE),
            color: row.text(fields::ORBIT_COLOR),
            radius_au: row.number(fields::ORBIT_AU),
        };

        let entity_key = self.entity(&entity);
        let tenant_key = self.tenant(entity_key, &tenant);
        let galaxy_key = self.galaxy(tenant_key, &galaxy);
        let star_key = self.star(galaxy_key, &star, &star_attrs);
        let orbit_key = self.orbit(star_key, &orbit_id, &orbit_attrs);

        let body = Body {
            name: body_name,
            kind: row.text(fields::BODY_TYPE),
            orbit_id,
            orbit_au: row.number(fields::ORBIT_AU),
            radius: row
                .number(fields::BODY_RADIUS)
                .unwrap_or(DEFAULT_BODY_RADIUS),
            color: row.text(fields::BODY_COLOR),
            period_days: row.number(fields::PERIOD_DAYS),
            notes: row.text(fields::NOTES),
            buying_entity: entity,
            tenant,
            galaxy,
            star,
        };
        self.push_body(orbit_key, body);
        true
    }

    /// Number of rows rejected by [`Self::push_row`] so far.
    pub fn skipped_rows(&self) -> usize {
        self.skipped_rows
    }

    /// Freeze the arenas into the nested tree.
    pub fn finish(mut self) -> Hierarchy {
        let mut orbits: Vec<Option<Orbit>> = self
            .orbits
            .drain(..)
            .map(|node| {
                Some(Orbit {
                    id: node.id,
                    name: node.attrs.name,
                    kind: node.attrs.kind,
                    style: node.attrs.style,
                    color: node.attrs.color,
                    radius_au: node.attrs.radius_au.unwrap_or(DEFAULT_ORBIT_RADIUS_AU),
                    bodies: node.bodies,
                })
            })
            .collect();

        let mut stars: Vec<Option<Star>> = self
            .stars
            .drain(..)
            .map(|node| {
                Some(Star {
                    name: node.name,
                    color: node.color,
                    radius: node.radius.unwrap_or(DEFAULT_STAR_RADIUS),
                    orbits: node
                        .orbits
                        .iter()
                        .filter_map(|key| orbits[key.0].take())
                        .collect(),
                })
            })
            .collect();

        let mut galaxies: Vec<Option<Galaxy>> = self
            .galaxies
            .drain(..)
            .map(|node| {
                Some(Galaxy {
                    name: node.name,
                    stars: node
                        .stars
                        .iter()
                        .filter_map(|key| stars[key.0].take())
                        .collect(),
                })
            })
            .collect();

        let mut tenants: Vec<Option<Tenant>> = self
            .tenants
            .drain(..)
            .map(|node| {
                Some(Tenant {
                    name: node.name,
                    galaxies: node
                        .galaxies
                        .iter()
                        .filter_map(|key| galaxies[key.0].take())
                        .collect(),
                })
            })
            .collect();

        let entities = self
            .entities
            .drain(..)
            .map(|node| BuyingEntity {
                name: node.name,
                tenants: node
                    .tenants
                    .iter()
                    .filter_map(|key| tenants[key.0].take())
                    .collect(),
            })
            .collect();

        Hierarchy { entities }
    }
}

/// Fold raw rows into a hierarchy and report its aggregate counts.
///
/// Never fails; an empty hierarchy is for the caller to reject.
pub fn build<I>(rows: I) -> (Hierarchy, Counts)
where
    I: IntoIterator<Item = RawRow>,
{
    let mut builder = HierarchyBuilder::new();
    for row in rows {
        builder.push_row(&normalize_row(row));
    }

    let skipped = builder.skipped_rows();
    if skipped > 0 {
        debug!("Skipped {skipped} rows missing a required field");
    }

    let hierarchy = builder.finish();
    let counts = hierarchy.counts();
    (hierarchy, counts)
}
