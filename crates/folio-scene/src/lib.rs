//! Folio Scene - the 3D showcase
//!
//! Hosts the render surface contents shared by the native and web frontends:
//! an orbit camera, a three-light studio rig, viewport classification with
//! responsive presets, and the cached glTF showcase model.

use bevy::prelude::*;
use folio_core::{SceneConfig, SiteConfig, WindowConfig};

pub mod camera;
pub mod model;
pub mod scene;
pub mod viewport;

pub use camera::{OrbitSettings, ShowcaseCamera};
pub use model::{LoadPhase, ModelCache, ShowcaseModel};
pub use viewport::{LightingPreset, ModelPreset, ViewportClass, ViewportState};

/// Site configuration exposed to the scene systems as a resource
#[derive(Resource, Clone, Default)]
pub struct ShowcaseSettings {
    pub window: WindowConfig,
    pub scene: SceneConfig,
}

impl From<SiteConfig> for ShowcaseSettings {
    fn from(config: SiteConfig) -> Self {
        Self {
            window: config.window,
            scene: config.scene,
        }
    }
}

/// The complete showcase: camera, lighting, viewport tracking, and model
pub struct ShowcasePlugin {
    pub config: SiteConfig,
}

impl Plugin for ShowcasePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ShowcaseSettings::from(self.config.clone()))
            .insert_resource(ViewportState::new(self.config.scene.mobile_breakpoint))
            .init_resource::<OrbitSettings>()
            .add_plugins(model::ModelPlugin)
            .add_systems(Startup, (scene::setup_scene, viewport::init_viewport))
            .add_systems(
                Update,
                (
                    viewport::track_viewport,
                    scene::apply_lighting.after(viewport::track_viewport),
                    camera::update_camera,
                ),
            );
    }
}
