//! Orbitview - star system hierarchy viewer
//!
//! A desktop application that imports an ownership hierarchy from a CSV file
//! and shows the selected star's orbits and bodies as an animated 3D scene.

use std::path::PathBuf;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use clap::Parser;

use orbitview::animation::AnimationPlugin;
use orbitview::camera::CameraPlugin;
use orbitview::dataset::{DatasetPlugin, LoadDataset};
use orbitview::input::InputPlugin;
use orbitview::picking::PickingPlugin;
use orbitview::render::RenderPlugin;
use orbitview::selection::SelectionPlugin;
use orbitview::types::FrameSet;
use orbitview::ui::UiPlugin;

/// Interactive viewer for star system hierarchies.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// CSV dataset to import at startup. Files dropped onto the window are
    /// imported as well.
    dataset: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orbitview".into(),
            ..default()
        }),
        ..default()
    }))
    .add_plugins(EguiPlugin::default())
    .insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.05)))
    // Add viewer plugins
    .add_plugins((
        DatasetPlugin,
        SelectionPlugin,
        CameraPlugin,
        InputPlugin,
        PickingPlugin,
        RenderPlugin,
        AnimationPlugin,
        UiPlugin,
    ));
    FrameSet::configure(&mut app);

    if let Some(path) = cli.dataset {
        app.add_systems(Startup, move |mut loads: MessageWriter<LoadDataset>| {
            loads.write(LoadDataset { path: path.clone() });
        });
    }

    app.run();
}
