use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::render_settings::CLEAR_COLOUR;
use crate::engine::assets::globe_manifest::GlobeManifest;

/// Full-window background sprite behind the globe.
#[derive(Component)]
pub struct GlobeBackground {
    /// Share of the image shown along each axis, from the top-left corner.
    repeat: Vec2,
}

/// Drawn before the globe camera, which renders on top without clearing.
pub fn spawn_background_camera(commands: &mut Commands) {
    commands.spawn((
        Name::new("BackgroundCamera"),
        Camera2d,
        Camera {
            order: -1,
            clear_color: ClearColorConfig::Custom(CLEAR_COLOUR),
            ..default()
        },
        // Must match the globe camera so both draw into the same target.
        Msaa::Off,
    ));
}

pub fn spawn_background_when_ready(
    manifest: Option<Res<GlobeManifest>>,
    asset_server: Res<AssetServer>,
    mut spawned: Local<bool>,
    mut commands: Commands,
) {
    if *spawned {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };
    *spawned = true;

    let Some(ref path) = manifest.background else {
        info!("No background image configured");
        return;
    };

    info!("Loading background image from {}", path);
    commands.spawn((
        Name::new("GlobeBackground"),
        GlobeBackground {
            repeat: Vec2::from(manifest.background_repeat),
        },
        Sprite {
            image: asset_server.load(path.clone()),
            ..default()
        },
        Visibility::Hidden,
    ));
}

/// Stretch the background over the window once its image is known.
pub fn fit_background_to_window(
    windows: Query<&Window, With<PrimaryWindow>>,
    images: Res<Assets<Image>>,
    asset_server: Res<AssetServer>,
    mut backgrounds: Query<(Entity, &GlobeBackground, &mut Sprite, &mut Visibility)>,
    mut commands: Commands,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let window_size = window.size();

    for (entity, background, mut sprite, mut visibility) in &mut backgrounds {
        let Some(image) = images.get(&sprite.image) else {
            if let Some(LoadState::Failed(err)) = asset_server.get_load_state(&sprite.image) {
                warn!("Background image unavailable: {}", err);
                commands.entity(entity).despawn();
            }
            continue;
        };

        let rect = background_rect(image.size_f32(), background.repeat);
        if sprite.custom_size != Some(window_size) || sprite.rect != Some(rect) {
            sprite.custom_size = Some(window_size);
            sprite.rect = Some(rect);
        }
        if *visibility != Visibility::Inherited {
            *visibility = Visibility::Inherited;
        }
    }
}

/// Region of the image shown, anchored at its top-left corner.
pub fn background_rect(image_size: Vec2, repeat: Vec2) -> Rect {
    Rect::from_corners(Vec2::ZERO, image_size * repeat.clamp(Vec2::ZERO, Vec2::ONE))
}
