//! Rendering for the selected star system.
//!
//! Geometry scaling, styling and layout are plain functions; the scene
//! module materializes a layout into entities and owns its lifecycle.

pub mod labels;
pub mod layout;
pub mod rings;
pub mod scaling;
pub mod scene;
pub mod style;

use bevy::prelude::*;

use self::labels::LabelPlugin;
use self::scene::ScenePlugin;

// Re-export for use in other modules
pub use self::labels::{LabelSettings, SceneLabel};
pub use self::scaling::GeometryScale;
pub use self::scene::{ActiveScene, SceneBody, SceneLifecycle, StarSceneRoot};
pub use self::style::{LineStyle, SceneSettings};

/// Plugin aggregating all rendering functionality.
pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((ScenePlugin, LabelPlugin));
    }
}
