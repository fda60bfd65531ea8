//! Ownership hierarchy: buying entity → tenant → galaxy → star → orbit → body.
//!
//! The tree is produced in one pass by [`builder::build`] and is immutable
//! afterwards. Children are stored in first-seen order; every accessor that
//! enumerates for display sorts at read time (names lexicographically, orbits
//! by radius).

pub mod builder;

#[cfg(test)]
mod proptest_hierarchy;

pub use builder::{HierarchyBuilder, OrbitAttrs, StarAttrs, build};

/// Aggregate counts reported after a successful import.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub entity_count: usize,
    pub tenant_count: usize,
    pub galaxy_count: usize,
    pub star_count: usize,
    pub body_count: usize,
}

/// Root of the imported tree.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Hierarchy {
    pub entities: Vec<BuyingEntity>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BuyingEntity {
    pub name: String,
    pub tenants: Vec<Tenant>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Tenant {
    pub name: String,
    pub galaxies: Vec<Galaxy>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Galaxy {
    pub name: String,
    pub stars: Vec<Star>,
}

/// A star and the orbits around it.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub name: String,
    /// Last non-empty color supplied for this star; empty when none was.
    pub color: String,
    /// Last finite radius supplied, or [`crate::types::DEFAULT_STAR_RADIUS`].
    pub radius: f64,
    pub orbits: Vec<Orbit>,
}

/// One orbit ring around a star.
#[derive(Clone, Debug, PartialEq)]
pub struct Orbit {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub style: String,
    pub color: String,
    /// First finite radius supplied, or [`crate::types::DEFAULT_ORBIT_RADIUS_AU`].
    pub radius_au: f64,
    /// Bodies in input row order.
    pub bodies: Vec<Body>,
}

/// One orbiting object. Every accepted row produces exactly one body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub name: String,
    pub kind: String,
    pub orbit_id: String,
    /// Row value, else the orbit's radius at the time the row was read.
    pub orbit_au: Option<f64>,
    pub radius: f64,
    pub color: String,
    pub period_days: Option<f64>,
    pub notes: String,
    pub buying_entity: String,
    pub tenant: String,
    pub galaxy: String,
    pub star: String,
}

fn sorted_names<T>(items: &[T], name: impl Fn(&T) -> &str) -> Vec<&str> {
    let mut names: Vec<&str> = items.iter().map(name).collect();
    names.sort_unstable();
    names
}

impl Hierarchy {
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, name: &str) -> Option<&BuyingEntity> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Buying entity names in lexicographic order.
    pub fn entity_names(&self) -> Vec<&str> {
        sorted_names(&self.entities, |e| &e.name)
    }

    /// Look up a star by its full ownership path.
    pub fn star(&self, entity: &str, tenant: &str, galaxy: &str, star: &str) -> Option<&Star> {
        self.entity(entity)?
            .tenant(tenant)?
            .galaxy(galaxy)?
            .star(star)
    }

    /// Every body in the tree, in build order.
    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.entities
            .iter()
            .flat_map(|e| &e.tenants)
            .flat_map(|t| &t.galaxies)
            .flat_map(|g| &g.stars)
            .flat_map(|s| s.bodies())
    }

    pub fn counts(&self) -> Counts {
        let tenants = self.entities.iter().flat_map(|e| &e.tenants);
        let galaxies = tenants.clone().flat_map(|t| &t.galaxies);
        let stars = galaxies.clone().flat_map(|g| &g.stars);

        Counts {
            entity_count: self.entities.len(),
            tenant_count: tenants.count(),
            galaxy_count: galaxies.count(),
            star_count: stars.count(),
            body_count: self.bodies().count(),
        }
    }
}

impl BuyingEntity {
    pub fn tenant(&self, name: &str) -> Option<&Tenant> {
        self.tenants.iter().find(|t| t.name == name)
    }

    pub fn tenant_names(&self) -> Vec<&str> {
        sorted_names(&self.tenants, |t| &t.name)
    }
}

impl Tenant {
    pub fn galaxy(&self, name: &str) -> Option<&Galaxy> {
        self.galaxies.iter().find(|g| g.name == name)
    }

    pub fn galaxy_names(&self) -> Vec<&str> {
        sorted_names(&self.galaxies, |g| &g.name)
    }
}

impl Galaxy {
    pub fn star(&self, name: &str) -> Option<&Star> {
        self.stars.iter().find(|s| s.name == name)
    }

    pub fn star_names(&self) -> Vec<&str> {
        sorted_names(&self.stars, |s| &s.name)
    }
}

impl Star {
    pub fn orbit(&self, id: &str) -> Option<&Orbit> {
        self.orbits.iter().find(|o| o.id == id)
    }

    /// Orbits sorted ascending by radius; ties keep build order.
    pub fn orbits_by_radius(&self) -> Vec<&Orbit> {
        let mut orbits: Vec<&Orbit> = self.orbits.iter().collect();
        orbits.sort_by(|a, b| a.radius_au.total_cmp(&b.radius_au));
        orbits
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> {
        self.orbits.iter().flat_map(|o| &o.bodies)
    }
}

impl Orbit {
    /// Name shown for the orbit: its label, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}
