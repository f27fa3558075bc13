//! Bevy application setup

use bevy::prelude::*;
use bevy::winit::WinitSettings;
use bevy_egui::EguiPlugin;
use bevy_picking::{prelude::MeshPickingPlugin, DefaultPickingPlugins};
use std::time::Duration;

use folio_core::{Content, FrameloopMode, SiteConfig};
use folio_scene::ShowcasePlugin;

use crate::ui::{PageContent, PagePlugin, UiLayout};

/// Path of the optional native config file, relative to the working directory
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_PATH: &str = "folio.toml";

/// Path of the optional content replacement file (same shape as the built-in
/// data set)
#[cfg(not(target_arch = "wasm32"))]
const CONTENT_PATH: &str = "content.json";

/// Page background, a deep navy matching the site palette
const BACKGROUND_COLOR: Color = Color::srgb(0.02, 0.03, 0.086);

fn load_config() -> SiteConfig {
    #[cfg(not(target_arch = "wasm32"))]
    {
        match SiteConfig::load_or_default(std::path::Path::new(CONFIG_PATH)) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!("Config rejected ({}), falling back to defaults", e);
                SiteConfig::default()
            }
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        SiteConfig::default()
    }
}

fn load_content() -> Content {
    #[cfg(not(target_arch = "wasm32"))]
    {
        match Content::load_or_built_in(std::path::Path::new(CONTENT_PATH)) {
            Ok(content) => content,
            Err(e) => {
                tracing::error!("Content rejected ({}), using built-in data", e);
                Content::built_in()
            }
        }
    }
    #[cfg(target_arch = "wasm32")]
    {
        Content::built_in()
    }
}

/// Run the Bevy application
pub fn run() {
    let config = load_config();
    let content = load_content();
    if let Err(e) = content.validate() {
        tracing::error!("Content failed validation: {}", e);
        return;
    }

    App::new()
        .insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(winit_settings_for(config.scene.frameloop))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window.title.clone(),
                        canvas: Some(config.window.canvas.clone()),
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(AssetPlugin {
                    // Don't look for .meta files - the static host doesn't have them
                    meta_check: bevy::asset::AssetMetaCheck::Never,
                    ..default()
                }),
        )
        // These must be added BEFORE EguiPlugin so it can detect PickingPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(MeshPickingPlugin)
        .add_plugins(EguiPlugin::default())
        .insert_resource(PageContent(content))
        .init_resource::<UiLayout>()
        .add_plugins(ShowcasePlugin { config })
        .add_plugins(PagePlugin)
        .add_systems(Startup, apply_pixel_density)
        .add_systems(Update, adjust_power_settings_for_mobile)
        .run();
}

/// Pin the render scale factor from config. Skipped on wasm, where the
/// override makes rendering fill only part of the canvas.
#[allow(unused_variables, unused_mut)]
fn apply_pixel_density(
    settings: Res<folio_scene::ShowcaseSettings>,
    mut windows: Query<&mut Window>,
) {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let Ok(mut window) = windows.single_mut() else {
            return;
        };
        window
            .resolution
            .set_scale_factor_override(Some(settings.window.pixel_density));
    }
}

fn winit_settings_for(mode: FrameloopMode) -> WinitSettings {
    use bevy::winit::UpdateMode;
    match mode {
        FrameloopMode::Always => WinitSettings::default(),
        FrameloopMode::Reactive => WinitSettings {
            focused_mode: UpdateMode::reactive_low_power(Duration::from_millis(100)),
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_millis(500)),
        },
    }
}

/// The frameloop to run given the configured mode and the current layout.
/// The configured mode always wins unless the mobile power saver is opted
/// into; by default the showcase keeps animating continuously on mobile.
fn effective_frameloop(
    configured: FrameloopMode,
    mobile_power_saver: bool,
    is_mobile: bool,
) -> FrameloopMode {
    if mobile_power_saver && is_mobile {
        FrameloopMode::Reactive
    } else {
        configured
    }
}

/// Re-apply the frameloop when the layout flips between mobile and desktop
fn adjust_power_settings_for_mobile(
    layout: Res<UiLayout>,
    settings: Res<folio_scene::ShowcaseSettings>,
    mut winit_settings: ResMut<WinitSettings>,
) {
    if !layout.is_changed() {
        return;
    }

    let mode = effective_frameloop(
        settings.scene.frameloop,
        settings.scene.mobile_power_saver,
        layout.is_mobile,
    );
    *winit_settings = winit_settings_for(mode);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_layout_keeps_configured_frameloop() {
        // Continuous rendering stays on when the layout goes mobile
        assert_eq!(
            effective_frameloop(FrameloopMode::Always, false, true),
            FrameloopMode::Always
        );
        assert_eq!(
            effective_frameloop(FrameloopMode::Always, false, false),
            FrameloopMode::Always
        );
    }

    #[test]
    fn test_mobile_power_saver_is_opt_in() {
        assert_eq!(
            effective_frameloop(FrameloopMode::Always, true, true),
            FrameloopMode::Reactive
        );
        // Opt-in only bites on mobile layouts
        assert_eq!(
            effective_frameloop(FrameloopMode::Always, true, false),
            FrameloopMode::Always
        );
        assert_eq!(
            effective_frameloop(FrameloopMode::Reactive, false, false),
            FrameloopMode::Reactive
        );
    }
}
