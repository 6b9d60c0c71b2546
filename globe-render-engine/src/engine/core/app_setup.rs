use bevy::asset::AssetMetaCheck;
use bevy::core_pipeline::prepass::DepthPrepass;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::picking::mesh_picking::MeshPickingSettings;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;

use crate::constants::render_settings::{CLEAR_COLOUR, OUTLINE_SETTINGS};
use crate::engine::assets::globe_manifest::GlobeManifest;
use crate::engine::camera::orbit_camera::{GlobeCamera, OrbitCamera, orbit_camera_controller};
use crate::engine::core::app_state::{AppState, transition_to_running, update_loading_frontend};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::globe_loader::{
    GlobeLoader, check_globe_load_state, spawn_globe_when_ready,
};
use crate::engine::loading::manifest_loader::{ManifestLoader, load_manifest_system, start_loading};
use crate::engine::loading::progress::LoadingProgress;
use crate::engine::render::outline_post_processing::OutlinePostProcessPlugin;
use crate::engine::scene::background::{
    fit_background_to_window, spawn_background_camera, spawn_background_when_ready,
};
use crate::engine::scene::lighting::ambient_light;
use crate::engine::systems::fps_tracking::fps_notification_system;
use crate::rpc::web_rpc::WebRpcPlugin;
use crate::tools::hover_pick::HoverPickPlugin;
use crate::tools::tooltip::TooltipPlugin;

#[cfg(not(target_arch = "wasm32"))]
use crate::engine::systems::fps_tracking::{fps_text_update_system, spawn_fps_overlay};

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .init_state::<AppState>()
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers GlobeManifest as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<GlobeManifest>::new(&["json"]))
        .add_plugins(OutlinePostProcessPlugin)
        .add_plugins(WebRpcPlugin)
        .add_plugins(HoverPickPlugin)
        .add_plugins(TooltipPlugin);

    // Hover picking casts its own rays, so the picking backend only
    // considers meshes that opt in.
    app.insert_resource(MeshPickingSettings {
        require_markers: true,
        ..default()
    });

    app.init_resource::<LoadingProgress>()
        .init_resource::<ManifestLoader>()
        .init_resource::<GlobeLoader>()
        .init_resource::<OrbitCamera>()
        .insert_resource(ClearColor(CLEAR_COLOUR))
        .insert_resource(ambient_light());

    app.add_systems(Startup, (setup, start_loading).chain())
        .add_systems(
            Update,
            (
                load_manifest_system,
                spawn_globe_when_ready,
                check_globe_load_state,
                transition_to_running,
                update_loading_frontend,
            )
                .chain()
                .run_if(in_state(AppState::Loading)),
        )
        .add_systems(
            Update,
            (
                orbit_camera_controller,
                spawn_background_when_ready,
                fit_background_to_window,
            ),
        )
        .add_systems(
            Update,
            fps_notification_system.run_if(in_state(AppState::Running)),
        );

    #[cfg(not(target_arch = "wasm32"))]
    {
        app.add_systems(Startup, spawn_fps_overlay)
            .add_systems(Update, fps_text_update_system);
    }

    app
}

fn create_globe_camera(commands: &mut Commands) {
    let orbit = OrbitCamera::default();
    commands.spawn((
        Name::new("GlobeCamera"),
        GlobeCamera,
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::None,
            ..default()
        },
        Tonemapping::None,
        // The outline reads single-sampled prepass depth.
        Msaa::Off,
        DepthPrepass,
        orbit.transform(),
        OUTLINE_SETTINGS,
    ));
}

// Startup system that only handles basic initialisation
fn setup(mut commands: Commands) {
    spawn_background_camera(&mut commands);
    create_globe_camera(&mut commands);
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    DefaultPlugins.set(window_config).set(asset_config)
}
