use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::constants::path::GLOBE_MANIFEST_PATH;
use crate::engine::assets::globe_manifest::GlobeManifest;
use crate::engine::camera::orbit_camera::{GlobeCamera, OrbitCamera};
use crate::engine::loading::progress::LoadingProgress;

#[derive(Resource, Default)]
pub struct ManifestLoader {
    handle: Option<Handle<GlobeManifest>>,
}

// Start the loading process
pub fn start_loading(mut manifest_loader: ResMut<ManifestLoader>, asset_server: Res<AssetServer>) {
    info!("Loading globe manifest from {}", GLOBE_MANIFEST_PATH);
    manifest_loader.handle = Some(asset_server.load(GLOBE_MANIFEST_PATH));
}

/// Publish the manifest as a resource and configure the camera from it.
/// A missing or malformed manifest falls back to the built-in defaults.
pub fn load_manifest_system(
    mut loading_progress: ResMut<LoadingProgress>,
    manifest_loader: Res<ManifestLoader>,
    manifests: Res<Assets<GlobeManifest>>,
    asset_server: Res<AssetServer>,
    mut projections: Query<&mut Projection, With<GlobeCamera>>,
    mut commands: Commands,
) {
    if loading_progress.manifest_loaded {
        return;
    }

    let Some(ref handle) = manifest_loader.handle else {
        return;
    };

    let manifest = if let Some(manifest) = manifests.get(handle) {
        info!("✓ Globe manifest loaded, model: {}", manifest.model);
        manifest.clone()
    } else if let Some(LoadState::Failed(err)) = asset_server.get_load_state(handle) {
        warn!(
            "Globe manifest {} unavailable ({}), using defaults",
            GLOBE_MANIFEST_PATH, err
        );
        GlobeManifest::default()
    } else {
        return;
    };

    for mut projection in &mut projections {
        *projection = manifest.camera.projection();
    }
    commands.insert_resource(OrbitCamera::with_settings(&manifest.camera));
    commands.insert_resource(manifest);
    loading_progress.manifest_loaded = true;
}
