//! Control panel.
//!
//! A small egui window for picking the star to show, toggling labels and
//! inspecting the highlighted orbit. It only reads and writes the selection
//! and settings resources; the scene reacts to those on its own.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::animation::AnimationHandle;
use crate::dataset::{ActiveHierarchy, ImportStatus};
use crate::hierarchy::{Hierarchy, Orbit};
use crate::render::LabelSettings;
use crate::selection::{OrbitSelectionChanged, SelectedOrbit, StarSelection};

/// Plugin that adds the control panel.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, control_panel);
    }
}

/// Which selection level a combo box edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Level {
    Entity,
    Tenant,
    Galaxy,
    Star,
}

/// Names offered at `level` under the current selection, sorted.
fn level_names<'a>(hierarchy: &'a Hierarchy, selection: &StarSelection, level: Level) -> Vec<&'a str> {
    let entity = selection.entity.as_deref().and_then(|n| hierarchy.entity(n));
    let tenant = entity.zip(selection.tenant.as_deref()).and_then(|(e, n)| e.tenant(n));
    let galaxy = tenant.zip(selection.galaxy.as_deref()).and_then(|(t, n)| t.galaxy(n));
    match level {
        Level::Entity => hierarchy.entity_names(),
        Level::Tenant => entity.map(|e| e.tenant_names()).unwrap_or_default(),
        Level::Galaxy => tenant.map(|t| t.galaxy_names()).unwrap_or_default(),
        Level::Star => galaxy.map(|g| g.star_names()).unwrap_or_default(),
    }
}

/// Combo box over `names`; returns the newly chosen name.
fn level_combo(ui: &mut egui::Ui, label: &str, current: Option<&str>, names: &[&str]) -> Option<String> {
    let mut chosen = None;
    egui::ComboBox::from_label(label)
        .selected_text(current.unwrap_or("-"))
        .width(160.0)
        .show_ui(ui, |ui| {
            for name in names {
                if ui.selectable_label(current == Some(*name), *name).clicked() && current != Some(*name) {
                    chosen = Some(name.to_string());
                }
            }
        });
    chosen
}

fn status_ui(ui: &mut egui::Ui, status: &ImportStatus) {
    match status {
        ImportStatus::Idle => {
            ui.label("Drop a CSV file onto the window to import it.");
        }
        ImportStatus::Loaded { source, counts } => {
            ui.label(
                egui::RichText::new(
                    source
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default(),
                )
                .strong(),
            );
            ui.label(format!(
                "{} entities, {} tenants, {} galaxies, {} stars, {} bodies",
                counts.entity_count,
                counts.tenant_count,
                counts.galaxy_count,
                counts.star_count,
                counts.body_count
            ));
        }
        ImportStatus::Failed { source, message } => {
            ui.colored_label(
                egui::Color32::from_rgb(248, 113, 113),
                format!("{}: {message}", source.display()),
            );
        }
    }
}

fn orbit_ui(ui: &mut egui::Ui, orbit: &Orbit) {
    ui.label(egui::RichText::new(orbit.display_name()).strong());
    if !orbit.kind.is_empty() {
        ui.label(format!("Type: {}", orbit.kind));
    }
    ui.label(format!("Radius: {:.2} AU", orbit.radius_au));
    for body in &orbit.bodies {
        let mut line = body.name.clone();
        if !body.kind.is_empty() {
            line.push_str(&format!(" ({})", body.kind));
        }
        if let Some(period) = body.period_days {
            line.push_str(&format!(", {period:.0} d"));
        }
        ui.label(line);
    }
}

/// Draw the control panel.
fn control_panel(
    mut contexts: EguiContexts,
    hierarchy: Res<ActiveHierarchy>,
    status: Res<ImportStatus>,
    mut selection: ResMut<StarSelection>,
    mut selected_orbit: ResMut<SelectedOrbit>,
    mut changes: MessageWriter<OrbitSelectionChanged>,
    mut labels: ResMut<LabelSettings>,
    mut animation: ResMut<AnimationHandle>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    egui::Window::new("Star systems")
        .default_pos(egui::pos2(12.0, 12.0))
        .resizable(false)
        .show(ctx, |ui| {
            status_ui(ui, &status);

            let Some(hierarchy) = hierarchy.get() else {
                return;
            };
            ui.separator();

            let levels = [
                (Level::Entity, "Buying entity", selection.entity.clone()),
                (Level::Tenant, "Tenant", selection.tenant.clone()),
                (Level::Galaxy, "Galaxy", selection.galaxy.clone()),
                (Level::Star, "Star", selection.star.clone()),
            ];
            for (level, label, current) in levels {
                let names = level_names(hierarchy, &selection, level);
                let Some(name) = level_combo(ui, label, current.as_deref(), &names) else {
                    continue;
                };
                match level {
                    Level::Entity => selection.select_entity(&name, hierarchy),
                    Level::Tenant => selection.select_tenant(&name, hierarchy),
                    Level::Galaxy => selection.select_galaxy(&name, hierarchy),
                    Level::Star => selection.select_star(&name, hierarchy),
                }
            }

            ui.separator();
            ui.horizontal(|ui| {
                // Copy out so change detection only fires on a real toggle
                let mut visible = labels.visible;
                if ui.checkbox(&mut visible, "Labels (L)").changed() {
                    labels.visible = visible;
                }
                let pause_text = if animation.is_paused() { "Resume" } else { "Pause" };
                if ui.button(pause_text).on_hover_text("Space").clicked() {
                    animation.toggle_pause();
                }
            });

            let star = selection.resolve_star(hierarchy);
            let orbit = star.zip(selected_orbit.0.as_deref()).and_then(|(s, id)| s.orbit(id));
            if let Some(orbit) = orbit {
                ui.separator();
                orbit_ui(ui, orbit);
                if ui.button("Clear (Esc)").clicked() {
                    selected_orbit.0 = None;
                    changes.write(OrbitSelectionChanged { orbit_id: None });
                }
            } else if star.is_some() {
                ui.separator();
                ui.weak("Click an orbit ring to inspect it.");
            }
        });
}
