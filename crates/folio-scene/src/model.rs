//! glTF showcase model loading and animation
//!
//! The showcase asset is fetched once through a process-wide cache keyed by
//! asset path: repeated requests for the same path collapse onto a single
//! in-flight fetch, and the resolved scene handle is retained for the process
//! lifetime. While the fetch is pending a placeholder spins in the model's
//! place; on failure the placeholder stays and the rest of the page is
//! unaffected.

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use std::collections::HashMap;

use crate::viewport::{ModelPreset, ViewportState};
use crate::ShowcaseSettings;

/// Base orientation of the showcase model (XYZ Euler, radians)
const BASE_ROTATION: (f32, f32, f32) = (-0.01, -0.2, -0.1);

/// Angular rate of the loading placeholder, independent of the model's rate
const INDICATOR_SPIN_RATE: f32 = 1.2;

/// Load lifecycle of the showcase model, per mount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// No fetch requested yet
    #[default]
    Idle,
    /// Fetch in flight; the placeholder stands in for the model
    Loading,
    /// Scene root resolved and attached
    Ready,
    /// Fetch failed; the placeholder persists
    Failed,
}

impl LoadPhase {
    pub fn is_ready(self) -> bool {
        self == LoadPhase::Ready
    }
}

/// Process-wide cache of loaded model handles, keyed by asset path.
/// Append-only: entries are never evicted, so later mounts of the same path
/// reuse the resolved handle without re-fetching.
#[derive(Resource, Default)]
pub struct ModelCache {
    /// Resolved scene roots
    pub scenes: HashMap<String, Handle<Scene>>,
    /// In-flight fetches
    pub loading: HashMap<String, Handle<Gltf>>,
    /// Terminal outcome per path (true = loaded, false = failed)
    pub ready: HashMap<String, bool>,
}

impl ModelCache {
    /// Whether a request for `path` must issue a new fetch. False once a
    /// fetch is in flight or a terminal outcome is recorded, which is what
    /// collapses concurrent requesters onto one fetch.
    pub fn needs_fetch(&self, path: &str) -> bool {
        !self.loading.contains_key(path)
            && !self.scenes.contains_key(path)
            && !self.ready.contains_key(path)
    }

    /// Record an in-flight fetch. Returns false (and changes nothing) if the
    /// path already has a fetch or outcome.
    pub fn begin_fetch(&mut self, path: &str, handle: Handle<Gltf>) -> bool {
        if !self.needs_fetch(path) {
            return false;
        }
        self.loading.insert(path.to_string(), handle);
        true
    }

    /// Record a resolved scene root for `path`
    pub fn resolve(&mut self, path: &str, scene: Handle<Scene>) {
        self.loading.remove(path);
        self.scenes.insert(path.to_string(), scene);
        self.ready.insert(path.to_string(), true);
    }

    /// Record a failed fetch for `path`
    pub fn fail(&mut self, path: &str) {
        self.loading.remove(path);
        self.ready.insert(path.to_string(), false);
    }

    /// The resolved scene handle, if any
    pub fn scene(&self, path: &str) -> Option<Handle<Scene>> {
        self.scenes.get(path).cloned()
    }
}

/// The showcase model actor: asset path, load phase, spin rate, and the
/// accumulated yaw
#[derive(Resource)]
pub struct ShowcaseModel {
    pub asset_path: String,
    pub phase: LoadPhase,
    /// Yaw angular rate in radians per second
    pub spin_rate: f32,
    /// Current yaw, applied between the fixed X and Z tilts
    pub yaw: f32,
}

/// Orientation for a given yaw. The yaw slots into the middle of the XYZ
/// Euler decomposition, so the X and Z tilts hold steady while the model
/// spins instead of precessing around world Y.
pub fn showcase_rotation(yaw: f32) -> Quat {
    Quat::from_euler(EulerRot::XYZ, BASE_ROTATION.0, yaw, BASE_ROTATION.2)
}

/// Marker for the spawned showcase scene root
#[derive(Component)]
pub struct ShowcasePiece;

/// Marker for the fallback visual shown while the asset is pending
#[derive(Component)]
pub struct LoadingIndicator;

pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelCache>()
            .add_systems(Startup, (setup_model, spawn_loading_indicator))
            .add_systems(Update, request_model)
            .add_systems(Update, poll_models.after(request_model))
            .add_systems(Update, spawn_showcase.after(poll_models))
            .add_systems(
                Update,
                (spin_showcase, spin_loading_indicator, apply_model_preset)
                    .after(spawn_showcase),
            );
    }
}

fn setup_model(mut commands: Commands, settings: Res<ShowcaseSettings>) {
    commands.insert_resource(ShowcaseModel {
        asset_path: settings.scene.model_path.clone(),
        phase: LoadPhase::Idle,
        spin_rate: settings.scene.spin_rate,
        yaw: BASE_ROTATION.1,
    });
}

/// Kick off the asset fetch on the first frame. Idempotent across mounts:
/// a path already cached (in flight or resolved) is not fetched again.
fn request_model(
    mut model: ResMut<ShowcaseModel>,
    mut cache: ResMut<ModelCache>,
    asset_server: Res<AssetServer>,
) {
    if model.phase != LoadPhase::Idle {
        return;
    }

    if cache.needs_fetch(&model.asset_path) {
        tracing::info!("Starting to load showcase model: {}", model.asset_path);
        let handle: Handle<Gltf> = asset_server.load(&model.asset_path);
        cache.begin_fetch(&model.asset_path, handle);
    }
    model.phase = LoadPhase::Loading;
}

/// Check loading state and extract scene roots from loaded GLTFs
fn poll_models(
    mut cache: ResMut<ModelCache>,
    mut model: ResMut<ShowcaseModel>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
) {
    let loading_keys: Vec<String> = cache.loading.keys().cloned().collect();
    for key in loading_keys {
        let Some(handle) = cache.loading.get(&key) else {
            continue;
        };

        match asset_server.get_load_state(handle.id()) {
            Some(LoadState::Loaded) => {
                if let Some(gltf) = gltf_assets.get(handle) {
                    let scene_handle = gltf
                        .default_scene
                        .clone()
                        .or_else(|| gltf.scenes.first().cloned());
                    match scene_handle {
                        Some(scene) => {
                            tracing::info!("Model loaded: {}", key);
                            cache.resolve(&key, scene);
                        }
                        None => {
                            tracing::error!("Model has no scenes: {}", key);
                            cache.fail(&key);
                        }
                    }
                }
            }
            Some(LoadState::Failed(_)) => {
                tracing::error!("Failed to load model: {}", key);
                cache.fail(&key);
            }
            _ => {
                // Still loading
            }
        }
    }

    // Advance this actor's phase from the shared cache outcome
    if model.phase == LoadPhase::Loading {
        match cache.ready.get(&model.asset_path) {
            Some(true) => model.phase = LoadPhase::Ready,
            Some(false) => model.phase = LoadPhase::Failed,
            None => {}
        }
    }
}

/// Attach the resolved scene root and retire the placeholder
fn spawn_showcase(
    mut commands: Commands,
    cache: Res<ModelCache>,
    model: Res<ShowcaseModel>,
    viewport: Res<ViewportState>,
    existing: Query<Entity, With<ShowcasePiece>>,
    indicators: Query<Entity, With<LoadingIndicator>>,
) {
    if !model.phase.is_ready() || !existing.is_empty() {
        return;
    }

    let Some(scene) = cache.scene(&model.asset_path) else {
        return;
    };

    let preset = ModelPreset::for_class(viewport.class());
    tracing::info!("Spawning showcase model ({:?} preset)", viewport.class());
    commands.spawn((
        SceneRoot(scene),
        Transform::from_translation(preset.position)
            .with_scale(Vec3::splat(preset.scale))
            .with_rotation(showcase_rotation(model.yaw)),
        ShowcasePiece,
    ));

    for entity in indicators.iter() {
        commands.entity(entity).despawn();
    }
}

/// Fallback visual: a small emissive slab that spins in the model's place
fn spawn_loading_indicator(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(1.2, 0.08, 1.2))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.56, 0.33, 1.0),
            emissive: bevy::color::LinearRgba::new(0.3, 0.15, 0.6, 1.0),
            unlit: true,
            ..default()
        })),
        Transform::from_translation(Vec3::new(0.0, -1.0, 0.0)),
        LoadingIndicator,
    ));
}

/// Advance the model's yaw by an elapsed-time increment.
///
/// Rotation is time-based, so the total delta over a span is `rate × elapsed`
/// regardless of how many frames deliver it. Before the asset resolves the
/// yaw is left untouched and a diagnostic is emitted; the frame never fails.
pub fn advance_orientation(phase: LoadPhase, yaw: f32, elapsed: f32, rate: f32) -> f32 {
    if phase.is_ready() {
        yaw + elapsed * rate
    } else {
        tracing::debug!("Showcase model not resolved; skipping rotation");
        yaw
    }
}

/// Rotate the showcase once per rendered frame while mounted
fn spin_showcase(
    time: Res<Time>,
    mut model: ResMut<ShowcaseModel>,
    mut pieces: Query<&mut Transform, With<ShowcasePiece>>,
) {
    model.yaw = advance_orientation(model.phase, model.yaw, time.delta_secs(), model.spin_rate);
    for mut transform in pieces.iter_mut() {
        transform.rotation = showcase_rotation(model.yaw);
    }
}

/// Keep the placeholder visibly alive while the asset is in flight
fn spin_loading_indicator(
    time: Res<Time>,
    mut indicators: Query<&mut Transform, With<LoadingIndicator>>,
) {
    for mut transform in indicators.iter_mut() {
        transform.rotate_y(time.delta_secs() * INDICATOR_SPIN_RATE);
    }
}

/// Re-apply scale/position when the viewport class changes
fn apply_model_preset(
    viewport: Res<ViewportState>,
    mut pieces: Query<&mut Transform, With<ShowcasePiece>>,
) {
    if !viewport.is_changed() {
        return;
    }

    let preset = ModelPreset::for_class(viewport.class());
    for mut transform in pieces.iter_mut() {
        transform.translation = preset.position;
        transform.scale = Vec3::splat(preset.scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_single_fetch_per_path() {
        let mut cache = ModelCache::default();
        let path = "models/desktop_pc/scene.gltf";

        assert!(cache.needs_fetch(path));
        assert!(cache.begin_fetch(path, Handle::default()));

        // A concurrent request for the same path must not issue a second fetch
        assert!(!cache.needs_fetch(path));
        assert!(!cache.begin_fetch(path, Handle::default()));
        assert_eq!(cache.loading.len(), 1);
    }

    #[test]
    fn test_cache_requesters_share_resolved_handle() {
        let mut cache = ModelCache::default();
        let path = "models/desktop_pc/scene.gltf";
        cache.begin_fetch(path, Handle::default());

        let scene: Handle<Scene> = Handle::default();
        cache.resolve(path, scene.clone());

        let first = cache.scene(path).unwrap();
        let second = cache.scene(path).unwrap();
        assert_eq!(first, scene);
        assert_eq!(second, scene);
        assert!(cache.loading.is_empty());
        assert_eq!(cache.ready.get(path), Some(&true));
    }

    #[test]
    fn test_cache_retains_failure_outcome() {
        let mut cache = ModelCache::default();
        let path = "models/missing.gltf";
        cache.begin_fetch(path, Handle::default());
        cache.fail(path);

        assert_eq!(cache.ready.get(path), Some(&false));
        assert!(cache.scene(path).is_none());
        // Failed paths are not re-fetched either
        assert!(!cache.needs_fetch(path));
    }

    #[test]
    fn test_rotation_additive_over_increments() {
        let rate = 0.2;
        let split = advance_orientation(
            LoadPhase::Ready,
            advance_orientation(LoadPhase::Ready, 0.0, 0.016, rate),
            0.034,
            rate,
        );
        let whole = advance_orientation(LoadPhase::Ready, 0.0, 0.050, rate);
        assert!((split - whole).abs() < 1e-6);
        assert!((whole - 0.2 * 0.050).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_guarded_before_resolution() {
        for phase in [LoadPhase::Idle, LoadPhase::Loading, LoadPhase::Failed] {
            assert_eq!(advance_orientation(phase, 1.5, 0.016, 0.2), 1.5);
        }
    }

    #[test]
    fn test_spin_preserves_base_tilts() {
        // Accumulating yaw must leave the X and Z tilt components untouched;
        // the spin axis sits between them, not on world Y.
        let mut yaw = -0.2;
        for _ in 0..200 {
            yaw = advance_orientation(LoadPhase::Ready, yaw, 0.016, 0.2);
            let (x, _, z) = showcase_rotation(yaw).to_euler(EulerRot::XYZ);
            assert!((x - (-0.01)).abs() < 1e-4);
            assert!((z - (-0.1)).abs() < 1e-4);
        }
    }

    #[test]
    fn test_rotation_matches_accumulated_yaw() {
        let yaw = advance_orientation(LoadPhase::Ready, -0.2, 0.5, 0.2);
        let (_, y, _) = showcase_rotation(yaw).to_euler(EulerRot::XYZ);
        assert!((y - (-0.2 + 0.5 * 0.2)).abs() < 1e-4);
    }

    #[test]
    fn test_phase_transitions() {
        let mut phase = LoadPhase::default();
        assert_eq!(phase, LoadPhase::Idle);
        phase = LoadPhase::Loading;
        assert!(!phase.is_ready());
        phase = LoadPhase::Ready;
        assert!(phase.is_ready());
    }
}
