//! Scene labels using egui for text rendering.
//!
//! Label entities are spawned by the scene builder; this module projects them
//! to the screen each frame and paints them.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPrimaryContextPass, egui};

use crate::camera::MainCamera;

use super::layout::LabelKind;

/// Plugin providing label rendering.
pub struct LabelPlugin;

impl Plugin for LabelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LabelSettings>()
            .add_systems(EguiPrimaryContextPass, draw_scene_labels);
    }
}

/// Settings for label rendering.
#[derive(Resource)]
pub struct LabelSettings {
    /// Whether labels are part of the scene. Toggling rebuilds the scene.
    pub visible: bool,
    /// Font size for star and body names, in points.
    pub font_size: f32,
}

impl Default for LabelSettings {
    fn default() -> Self {
        Self {
            visible: true,
            font_size: 14.0,
        }
    }
}

/// Text anchored to a point in the scene.
#[derive(Component, Clone, Debug)]
pub struct SceneLabel {
    pub text: String,
    pub kind: LabelKind,
}

fn label_style(kind: LabelKind, font_size: f32) -> (f32, egui::Color32) {
    match kind {
        LabelKind::Star => (font_size + 2.0, egui::Color32::from_rgb(255, 236, 190)),
        LabelKind::Body => (font_size, egui::Color32::from_rgba_unmultiplied(220, 220, 220, 230)),
        // Orbit names are per-character and a touch dimmer
        LabelKind::OrbitGlyph => (
            font_size * 0.8,
            egui::Color32::from_rgba_unmultiplied(180, 190, 210, 200),
        ),
    }
}

/// Draw every scene label at its projected screen position.
fn draw_scene_labels(
    mut egui_ctx: EguiContexts,
    labels: Query<(&SceneLabel, &GlobalTransform)>,
    camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    settings: Res<LabelSettings>,
) {
    if !settings.visible || labels.is_empty() {
        return;
    }

    let Ok((camera, camera_transform)) = camera.single() else {
        return;
    };
    let Ok(ctx) = egui_ctx.ctx_mut() else {
        return;
    };

    egui::Area::new(egui::Id::new("scene_labels"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            let painter = ui.painter();

            for (label, transform) in labels.iter() {
                // Project world position to screen; skips points behind the camera
                let Ok(screen_pos) =
                    camera.world_to_viewport(camera_transform, transform.translation())
                else {
                    continue;
                };

                let (size, color) = label_style(label.kind, settings.font_size);
                let pos = egui::pos2(screen_pos.x, screen_pos.y);
                let font = egui::FontId::proportional(size);

                // Shadow
                painter.text(
                    pos + egui::vec2(1.0, 1.0),
                    egui::Align2::CENTER_BOTTOM,
                    &label.text,
                    font.clone(),
                    egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180),
                );

                // Main text
                painter.text(pos, egui::Align2::CENTER_BOTTOM, &label.text, font, color);
            }
        });
}
