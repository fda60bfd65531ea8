//! Keyboard shortcuts.
//!
//! `L` toggles labels, `Space` pauses the orbital motion and `Escape` clears
//! the highlighted orbit.

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::animation::AnimationHandle;
use crate::render::LabelSettings;
use crate::selection::{OrbitSelectionChanged, SelectedOrbit};
use crate::types::FrameSet;

/// Plugin providing keyboard input handling.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, keyboard_shortcuts.in_set(FrameSet::Input));
    }
}

/// Handle keyboard shortcuts for viewer control.
fn keyboard_shortcuts(
    keys: Res<ButtonInput<KeyCode>>,
    mut labels: ResMut<LabelSettings>,
    mut animation: ResMut<AnimationHandle>,
    mut selected: ResMut<SelectedOrbit>,
    mut changes: MessageWriter<OrbitSelectionChanged>,
    mut contexts: EguiContexts,
) {
    // Don't steal keys from text fields
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.wants_keyboard_input()
    {
        return;
    }

    if keys.just_pressed(KeyCode::KeyL) {
        labels.visible = !labels.visible;
        info!("Labels {}", if labels.visible { "shown" } else { "hidden" });
    }

    if keys.just_pressed(KeyCode::Space) {
        animation.toggle_pause();
        info!(
            "Animation {}",
            if animation.is_paused() { "paused" } else { "running" }
        );
    }

    if keys.just_pressed(KeyCode::Escape) && selected.0.is_some() {
        selected.0 = None;
        changes.write(OrbitSelectionChanged { orbit_id: None });
    }
}
