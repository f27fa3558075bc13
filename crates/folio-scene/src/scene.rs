//! Showcase scene setup: camera and lighting rig

use bevy::prelude::*;

use crate::camera::{ShowcaseCamera, CAMERA_FOV_DEGREES, CAMERA_POSITION};
use crate::viewport::{LightingPreset, ViewportClass, ViewportState};
use crate::ShowcaseSettings;

/// Base photometric intensities, scaled by the viewport lighting preset
const AMBIENT_BASE_BRIGHTNESS: f32 = 2000.0;
const SPOT_BASE_INTENSITY: f32 = 8_000_000.0;
const POINT_BASE_INTENSITY: f32 = 100_000.0;

/// Key light position, high and off to the side like a studio rig
const SPOT_POSITION: Vec3 = Vec3::new(-20.0, 50.0, 10.0);

/// Narrow cone half-angle of the key light, radians
const SPOT_OUTER_ANGLE: f32 = 0.12;

/// Marker for the narrow key spot light
#[derive(Component)]
pub struct KeySpot;

/// Marker for the soft point fill light
#[derive(Component)]
pub struct FillPoint;

pub(crate) fn setup_scene(mut commands: Commands, settings: Res<ShowcaseSettings>) {
    // Y-up: camera on a ring around the origin, slightly above the model
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Transform::from_translation(CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        ShowcaseCamera,
    ));

    // Soft sky fill standing in for a hemisphere light
    let preset = LightingPreset::for_class(ViewportClass::default());
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.95, 1.0),
        brightness: AMBIENT_BASE_BRIGHTNESS * preset.hemisphere,
        ..default()
    });

    // Narrow key spot from high left. Shadows are off by default; the model
    // is the only occluder in the scene so they add little.
    commands.spawn((
        SpotLight {
            intensity: SPOT_BASE_INTENSITY * preset.spot,
            outer_angle: SPOT_OUTER_ANGLE,
            inner_angle: 0.0,
            range: 120.0,
            shadows_enabled: settings.scene.cast_shadows,
            ..default()
        },
        Transform::from_translation(SPOT_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
        KeySpot,
    ));

    // Point fill near the model to lift the shadow side
    commands.spawn((
        PointLight {
            intensity: POINT_BASE_INTENSITY * preset.point,
            shadows_enabled: false,
            color: Color::srgb(1.0, 0.95, 0.9),
            ..default()
        },
        Transform::from_translation(Vec3::new(0.0, 2.0, 3.0)),
        FillPoint,
    ));

    tracing::info!("Scene rig ready");
}

/// Rescale the rig when the viewport class changes
pub(crate) fn apply_lighting(
    viewport: Res<ViewportState>,
    mut ambient: ResMut<AmbientLight>,
    mut spots: Query<&mut SpotLight, With<KeySpot>>,
    mut points: Query<&mut PointLight, With<FillPoint>>,
) {
    if !viewport.is_changed() {
        return;
    }

    let preset = LightingPreset::for_class(viewport.class());
    ambient.brightness = AMBIENT_BASE_BRIGHTNESS * preset.hemisphere;
    for mut spot in spots.iter_mut() {
        spot.intensity = SPOT_BASE_INTENSITY * preset.spot;
    }
    for mut point in points.iter_mut() {
        point.intensity = POINT_BASE_INTENSITY * preset.point;
    }
}
