//! Scene lifecycle for the selected star.
//!
//! The whole scene lives under one [`StarSceneRoot`] entity. Any change to
//! the hierarchy, the star selection, the highlighted orbit or the label flag
//! tears the current scene down and builds a new one. Teardown always runs
//! before a new build starts and releases every mesh and material the old
//! scene created.

use bevy::prelude::*;

use crate::animation::{AnimationHandle, OrbitalMotion};
use crate::camera::MainCamera;
use crate::dataset::ActiveHierarchy;
use crate::picking::OrbitRing;
use crate::selection::{SelectedOrbit, StarSelection};
use crate::types::FrameSet;

use super::labels::{LabelSettings, SceneLabel};
use super::layout::{RingVisual, ScenePlan, plan_scene};
use super::rings::{RibbonGeometry, dashed_ring, solid_ring};
use super::style::{LineStyle, SceneSettings};

/// Lifecycle of the single active scene.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneLifecycle {
    #[default]
    Unmounted,
    Building,
    Live,
}

impl SceneLifecycle {
    /// Enter `Building`. Only allowed from `Unmounted`, so the previous scene
    /// must have been torn down first.
    pub fn begin_build(&mut self) -> bool {
        if *self != Self::Unmounted {
            return false;
        }
        *self = Self::Building;
        true
    }

    /// Enter `Live` after a build.
    pub fn finish_build(&mut self) -> bool {
        if *self != Self::Building {
            return false;
        }
        *self = Self::Live;
        true
    }

    pub fn teardown(&mut self) {
        *self = Self::Unmounted;
    }

    pub fn is_live(&self) -> bool {
        *self == Self::Live
    }
}

/// Everything the active scene owns.
#[derive(Resource, Default, Debug)]
pub struct ActiveScene {
    pub root: Option<Entity>,
    pub meshes: Vec<Handle<Mesh>>,
    pub materials: Vec<Handle<StandardMaterial>>,
}

impl ActiveScene {
    /// Despawn the scene tree and free its assets. Returns whether there was
    /// anything to release.
    pub fn release(
        &mut self,
        commands: &mut Commands,
        meshes: &mut Assets<Mesh>,
        materials: &mut Assets<StandardMaterial>,
    ) -> bool {
        let had_scene = self.root.is_some();
        if let Some(root) = self.root.take() {
            commands.entity(root).despawn();
        }
        for handle in self.meshes.drain(..) {
            meshes.remove(handle.id());
        }
        for handle in self.materials.drain(..) {
            materials.remove(handle.id());
        }
        had_scene
    }
}

/// Root of the star scene tree.
#[derive(Component)]
pub struct StarSceneRoot;

/// The central star sphere.
#[derive(Component)]
pub struct StarMarker;

/// A body sphere.
#[derive(Component, Clone, Debug)]
pub struct SceneBody {
    pub name: String,
    pub orbit_id: String,
}

/// Translucent halo around a glow-style ring.
#[derive(Component)]
pub struct GlowRing;

/// Asset sink that records every handle it hands out in the active scene.
struct SceneAssets<'a> {
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    scene: &'a mut ActiveScene,
}

impl SceneAssets<'_> {
    fn mesh(&mut self, mesh: impl Into<Mesh>) -> Handle<Mesh> {
        let handle = self.meshes.add(mesh);
        self.scene.meshes.push(handle.clone());
        handle
    }

    fn material(&mut self, material: StandardMaterial) -> Handle<StandardMaterial> {
        let handle = self.materials.add(material);
        self.scene.materials.push(handle.clone());
        handle
    }
}

/// Plugin providing the scene lifecycle.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneSettings>()
            .init_resource::<SceneLifecycle>()
            .init_resource::<ActiveScene>()
            .add_systems(Update, rebuild_scene.in_set(FrameSet::Scene));
    }
}

/// Tear down and rebuild the scene when anything it depends on changes.
pub fn rebuild_scene(
    mut commands: Commands,
    hierarchy: Res<ActiveHierarchy>,
    selection: Res<StarSelection>,
    selected_orbit: Res<SelectedOrbit>,
    labels: Res<LabelSettings>,
    settings: Res<SceneSettings>,
    camera: Query<(), With<MainCamera>>,
    camera_added: Query<(), Added<MainCamera>>,
    mut lifecycle: ResMut<SceneLifecycle>,
    mut active: ResMut<ActiveScene>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut animation: ResMut<AnimationHandle>,
) {
    let mounted = camera.single().is_ok();
    let dirty = hierarchy.is_changed()
        || selection.is_changed()
        || selected_orbit.is_changed()
        || labels.is_changed()
        || !camera_added.is_empty();
    let unmounting = !mounted && *lifecycle != SceneLifecycle::Unmounted;
    if !dirty && !unmounting {
        return;
    }

    if active.release(&mut commands, &mut meshes, &mut materials) {
        debug!("Tore down star scene");
    }
    animation.stop();
    lifecycle.teardown();

    if !mounted {
        debug!("No camera to mount the scene on");
        return;
    }
    let Some(star) = hierarchy.get().and_then(|h| selection.resolve_star(h)) else {
        return;
    };

    if !lifecycle.begin_build() {
        warn!("Scene build requested while {:?}", *lifecycle);
        return;
    }
    let plan = plan_scene(
        star,
        selected_orbit.0.as_deref(),
        labels.visible,
        &settings,
    );
    let mut assets = SceneAssets {
        meshes: &mut meshes,
        materials: &mut materials,
        scene: &mut active,
    };
    let root = spawn_scene(&mut commands, &plan, &settings, &mut assets);
    active.root = Some(root);

    if !lifecycle.finish_build() {
        warn!("Scene finished building while {:?}", *lifecycle);
        return;
    }
    animation.start();
    info!(
        "Built scene for {}: {} orbits, {} bodies",
        plan.star.name,
        plan.rings.len(),
        plan.bodies.len()
    );
}

fn ring_geometry(ring: &RingVisual, settings: &SceneSettings) -> RibbonGeometry {
    match ring.style {
        LineStyle::Dashed => dashed_ring(
            ring.radius,
            settings.ring_width,
            settings.dash_length,
            settings.gap_length,
            settings.ring_segments,
        ),
        LineStyle::Solid | LineStyle::Glow => {
            solid_ring(ring.radius, settings.ring_width, settings.ring_segments)
        }
    }
}

fn line_material(color: Color, opacity: f32, alpha_mode: AlphaMode) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(opacity),
        unlit: true,
        alpha_mode,
        double_sided: true,
        cull_mode: None,
        ..default()
    }
}

/// Materialize `plan` under a new root entity.
fn spawn_scene(
    commands: &mut Commands,
    plan: &ScenePlan,
    settings: &SceneSettings,
    assets: &mut SceneAssets,
) -> Entity {
    let root = commands
        .spawn((
            StarSceneRoot,
            Name::new(format!("Star scene: {}", plan.star.name)),
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    // Star and its light
    let star_color = plan.star.color;
    commands.spawn((
        StarMarker,
        Mesh3d(assets.mesh(Sphere::new(plan.star.radius).mesh().uv(32, 18))),
        MeshMaterial3d(assets.material(StandardMaterial {
            base_color: star_color,
            emissive: star_color.to_linear() * 4.0,
            ..default()
        })),
        Transform::default(),
        ChildOf(root),
    ));
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: settings.base_orbit_scale * 10.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::default(),
        ChildOf(root),
    ));

    for ring in &plan.rings {
        commands.spawn((
            OrbitRing {
                orbit_id: ring.orbit_id.clone(),
                radius: ring.radius,
            },
            Mesh3d(assets.mesh(ring_geometry(ring, settings).into_mesh())),
            MeshMaterial3d(assets.material(line_material(
                ring.color,
                ring.opacity,
                AlphaMode::Blend,
            ))),
            Transform::default(),
            ChildOf(root),
        ));

        if ring.style == LineStyle::Glow {
            let glow = solid_ring(
                ring.radius * settings.glow_scale,
                settings.ring_width * 4.0,
                settings.ring_segments,
            );
            commands.spawn((
                GlowRing,
                Mesh3d(assets.mesh(glow.into_mesh())),
                MeshMaterial3d(assets.material(line_material(
                    ring.color,
                    ring.opacity * settings.glow_opacity,
                    AlphaMode::Add,
                ))),
                Transform::default(),
                ChildOf(root),
            ));
        }
    }

    let body_entities: Vec<Entity> = plan
        .bodies
        .iter()
        .map(|body| {
            commands
                .spawn((
                    SceneBody {
                        name: body.name.clone(),
                        orbit_id: body.orbit_id.clone(),
                    },
                    OrbitalMotion {
                        angle: body.initial_angle,
                        angular_speed: body.angular_speed,
                        radius: body.orbit_radius,
                    },
                    Mesh3d(assets.mesh(Sphere::new(body.size).mesh().uv(24, 14))),
                    MeshMaterial3d(assets.material(StandardMaterial {
                        base_color: body.color,
                        perceptual_roughness: 0.8,
                        ..default()
                    })),
                    Transform::from_translation(body.initial_position()),
                    ChildOf(root),
                ))
                .id()
        })
        .collect();

    for label in &plan.labels {
        // Body labels ride along with their body
        let parent = label
            .body
            .and_then(|i| body_entities.get(i).copied())
            .unwrap_or(root);
        commands.spawn((
            SceneLabel {
                text: label.text.clone(),
                kind: label.kind,
            },
            Transform::from_translation(label.position),
            ChildOf(parent),
        ));
    }

    root
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_transitions() {
        let mut lifecycle = SceneLifecycle::default();
        assert!(!lifecycle.finish_build());
        assert!(lifecycle.begin_build());
        assert!(!lifecycle.begin_build());
        assert!(lifecycle.finish_build());
        assert!(lifecycle.is_live());
        assert!(!lifecycle.begin_build());
        lifecycle.teardown();
        assert_eq!(lifecycle, SceneLifecycle::Unmounted);
        assert!(lifecycle.begin_build());
    }
}
