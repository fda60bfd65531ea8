//! Star and orbit selection state.
//!
//! The four-level star selection is kept valid against the active hierarchy:
//! whenever a level is missing or names a key that no longer exists, it falls
//! to the lexicographically smallest key available at that level, and the
//! levels below are re-resolved the same way.

use bevy::prelude::*;

use crate::dataset::ActiveHierarchy;
use crate::hierarchy::{Hierarchy, Star};
use crate::types::FrameSet;

/// Currently selected buying entity / tenant / galaxy / star.
#[derive(Resource, Default, Clone, Debug, PartialEq, Eq)]
pub struct StarSelection {
    pub entity: Option<String>,
    pub tenant: Option<String>,
    pub galaxy: Option<String>,
    pub star: Option<String>,
}

/// Orbit highlighted in the scene, by identifier.
#[derive(Resource, Default, Clone, Debug, PartialEq, Eq)]
pub struct SelectedOrbit(pub Option<String>);

/// Notification that the selected orbit changed.
#[derive(Message, Clone, Debug, PartialEq, Eq)]
pub struct OrbitSelectionChanged {
    pub orbit_id: Option<String>,
}

/// Keep `current` if it names one of `names`, else take the first name.
fn resolve(current: &mut Option<String>, names: &[&str]) {
    let valid = current
        .as_deref()
        .is_some_and(|name| names.contains(&name));
    if !valid {
        *current = names.first().map(|name| name.to_string());
    }
}

impl StarSelection {
    /// Re-resolve every level against `hierarchy`. Returns whether anything
    /// changed.
    pub fn reconcile(&mut self, hierarchy: Option<&Hierarchy>) -> bool {
        let before = self.clone();

        let Some(hierarchy) = hierarchy else {
            *self = Self::default();
            return before != *self;
        };

        resolve(&mut self.entity, &hierarchy.entity_names());
        let entity = self.entity.as_deref().and_then(|n| hierarchy.entity(n));

        let tenant_names = entity.map(|e| e.tenant_names()).unwrap_or_default();
        resolve(&mut self.tenant, &tenant_names);
        let tenant = entity.zip(self.tenant.as_deref()).and_then(|(e, n)| e.tenant(n));

        let galaxy_names = tenant.map(|t| t.galaxy_names()).unwrap_or_default();
        resolve(&mut self.galaxy, &galaxy_names);
        let galaxy = tenant.zip(self.galaxy.as_deref()).and_then(|(t, n)| t.galaxy(n));

        let star_names = galaxy.map(|g| g.star_names()).unwrap_or_default();
        resolve(&mut self.star, &star_names);

        before != *self
    }

    /// Choose a buying entity; lower levels are re-resolved.
    pub fn select_entity(&mut self, name: &str, hierarchy: &Hierarchy) {
        self.entity = Some(name.to_string());
        self.tenant = None;
        self.galaxy = None;
        self.star = None;
        self.reconcile(Some(hierarchy));
    }

    pub fn select_tenant(&mut self, name: &str, hierarchy: &Hierarchy) {
        self.tenant = Some(name.to_string());
        self.galaxy = None;
        self.star = None;
        self.reconcile(Some(hierarchy));
    }

    pub fn select_galaxy(&mut self, name: &str, hierarchy: &Hierarchy) {
        self.galaxy = Some(name.to_string());
        self.star = None;
        self.reconcile(Some(hierarchy));
    }

    pub fn select_star(&mut self, name: &str, hierarchy: &Hierarchy) {
        self.star = Some(name.to_string());
        self.reconcile(Some(hierarchy));
    }

    /// The selected star, if all four levels resolve.
    pub fn resolve_star<'a>(&self, hierarchy: &'a Hierarchy) -> Option<&'a Star> {
        hierarchy.star(
            self.entity.as_deref()?,
            self.tenant.as_deref()?,
            self.galaxy.as_deref()?,
            self.star.as_deref()?,
        )
    }
}

/// Plugin providing selection state.
pub struct SelectionPlugin;

impl Plugin for SelectionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StarSelection>()
            .init_resource::<SelectedOrbit>()
            .add_message::<OrbitSelectionChanged>()
            .add_systems(
                Update,
                sync_selection.after(FrameSet::Input).before(FrameSet::Scene),
            );
    }
}

/// Whether `orbit_id` names an orbit of the selected star.
pub fn orbit_exists(
    hierarchy: Option<&Hierarchy>,
    selection: &StarSelection,
    orbit_id: &str,
) -> bool {
    hierarchy
        .and_then(|h| selection.resolve_star(h))
        .and_then(|star| star.orbit(orbit_id))
        .is_some()
}

/// Reconcile the star selection after imports or user changes, and drop the
/// orbit highlight whenever the selected star changes or its orbit is gone.
pub fn sync_selection(
    hierarchy: Res<ActiveHierarchy>,
    mut selection: ResMut<StarSelection>,
    mut selected_orbit: ResMut<SelectedOrbit>,
    mut changes: MessageWriter<OrbitSelectionChanged>,
    mut last_star: Local<Option<StarSelection>>,
) {
    if !hierarchy.is_changed() && !selection.is_changed() {
        return;
    }

    if selection.bypass_change_detection().reconcile(hierarchy.get()) {
        selection.set_changed();
    }

    let star_changed = last_star.as_ref() != Some(&*selection);
    let orbit_gone = hierarchy.is_changed()
        && selected_orbit
            .0
            .as_deref()
            .is_some_and(|id| !orbit_exists(hierarchy.get(), &selection, id));
    if ((star_changed && last_star.is_some()) || orbit_gone) && selected_orbit.0.is_some() {
        if orbit_gone {
            debug!("Selected orbit no longer exists");
        }
        selected_orbit.0 = None;
        changes.write(OrbitSelectionChanged { orbit_id: None });
    }

    if star_changed {
        *last_star = Some(selection.clone());
        if let Some(star) = &selection.star {
            debug!("Selected star {star}");
        }
    }
}
