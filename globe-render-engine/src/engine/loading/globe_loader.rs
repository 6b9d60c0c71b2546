use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::SceneInstanceReady;
use thiserror::Error;

use crate::constants::interaction::DEFAULT_EXCLUDED_NODE_NAME;
use crate::engine::assets::globe_manifest::GlobeManifest;
use crate::engine::core::app_state::AppState;
use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::hover_pick::CandidateMeshes;

#[derive(Debug, Error)]
pub enum GlobeLoadError {
    #[error("failed to load globe model '{path}': {reason}")]
    Model { path: String, reason: String },
    #[error("globe model '{path}' contains no pickable meshes")]
    NoCandidates { path: String },
}

/// Root entity of the spawned globe scene.
#[derive(Component)]
pub struct GlobeRoot;

#[derive(Resource, Default)]
pub struct GlobeLoader {
    /// The whole glTF file. Load failures are reported against this handle.
    gltf: Option<Handle<Gltf>>,
    scene: Option<Handle<Scene>>,
}

/// Spawn the globe scene once the manifest is known.
pub fn spawn_globe_when_ready(
    mut loading_progress: ResMut<LoadingProgress>,
    mut globe_loader: ResMut<GlobeLoader>,
    manifest: Option<Res<GlobeManifest>>,
    asset_server: Res<AssetServer>,
    mut commands: Commands,
) {
    if loading_progress.globe_requested || !loading_progress.manifest_loaded {
        return;
    }
    let Some(manifest) = manifest else {
        return;
    };

    info!("Loading globe model from {}", manifest.model);
    let scene = asset_server.load(GltfAssetLabel::Scene(0).from_asset(manifest.model.clone()));

    commands
        .spawn((Name::new("GlobeRoot"), GlobeRoot, SceneRoot(scene.clone())))
        .observe(collect_candidate_meshes);

    globe_loader.gltf = Some(asset_server.load(manifest.model.clone()));
    globe_loader.scene = Some(scene);
    loading_progress.globe_requested = true;
}

/// Watch the model load and fail the viewer into a non-interactive state.
pub fn check_globe_load_state(
    mut loading_progress: ResMut<LoadingProgress>,
    globe_loader: Res<GlobeLoader>,
    manifest: Option<Res<GlobeManifest>>,
    asset_server: Res<AssetServer>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if loading_progress.failed || loading_progress.meshes_collected {
        return;
    }
    let failure = globe_loader
        .gltf
        .iter()
        .map(|handle| handle.id().untyped())
        .chain(globe_loader.scene.iter().map(|handle| handle.id().untyped()))
        .find_map(|id| match asset_server.get_load_state(id) {
            Some(LoadState::Failed(err)) => Some(err),
            _ => None,
        });

    if let Some(err) = failure {
        let error = GlobeLoadError::Model {
            path: manifest.map(|m| m.model.clone()).unwrap_or_default(),
            reason: err.to_string(),
        };
        error!("{error}");
        rpc_interface.send_notification(
            "globe_load_failed",
            serde_json::json!({ "message": error.to_string() }),
        );
        loading_progress.failed = true;
        next_state.set(AppState::LoadFailed);
    }
}

/// Observer on the globe root: registers every mesh of the spawned scene
/// instance for picking, except the ocean node.
pub fn collect_candidate_meshes(
    trigger: Trigger<SceneInstanceReady>,
    children: Query<&Children>,
    nodes: Query<(Option<&Name>, Option<&ChildOf>), With<Mesh3d>>,
    names: Query<&Name>,
    manifest: Option<Res<GlobeManifest>>,
    mut candidates: ResMut<CandidateMeshes>,
    mut loading_progress: ResMut<LoadingProgress>,
) {
    let excluded = manifest
        .as_ref()
        .map(|m| m.excluded_node.as_str())
        .unwrap_or(DEFAULT_EXCLUDED_NODE_NAME);

    let collected = collect_candidates(trigger.target(), &children, &nodes, &names, excluded);

    if collected.is_empty() {
        let error = GlobeLoadError::NoCandidates {
            path: manifest.map(|m| m.model.clone()).unwrap_or_default(),
        };
        warn!("{error}");
    } else {
        info!(
            "✓ Registered {} globe meshes for picking ({} countries)",
            collected.len(),
            collected.country_count()
        );
    }

    *candidates = collected;
    loading_progress.meshes_collected = true;
}

pub fn collect_candidates(
    root: Entity,
    children: &Query<&Children>,
    nodes: &Query<(Option<&Name>, Option<&ChildOf>), With<Mesh3d>>,
    names: &Query<&Name>,
    excluded_node: &str,
) -> CandidateMeshes {
    let mut candidates = CandidateMeshes::default();

    for entity in children.iter_descendants(root) {
        let Ok((name, parent)) = nodes.get(entity) else {
            continue;
        };
        let parent_name = parent
            .and_then(|child_of| names.get(child_of.parent()).ok())
            .map(Name::as_str);

        candidates.register(entity, name.map(Name::as_str), parent_name, excluded_node);
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::ecs::system::RunSystemOnce;

    fn spawn_globe_hierarchy(world: &mut World) -> Entity {
        let root = world.spawn(Name::new("Scene")).id();
        world.entity_mut(root).with_children(|scene| {
            scene
                .spawn(Name::new("globe"))
                .with_child((Name::new("Sphere"), Mesh3d::default()));
            scene
                .spawn(Name::new("france"))
                .with_child((Name::new("france_mesh"), Mesh3d::default()));
            scene.spawn((Name::new("Spain"), Mesh3d::default()));
            scene.spawn(Name::new("empty_node"));
        });
        root
    }

    fn collect(world: &mut World, root: Entity) -> CandidateMeshes {
        world
            .run_system_once(
                move |children: Query<&Children>,
                      nodes: Query<(Option<&Name>, Option<&ChildOf>), With<Mesh3d>>,
                      names: Query<&Name>| {
                    collect_candidates(root, &children, &nodes, &names, "globe")
                },
            )
            .unwrap()
    }

    #[test]
    fn collects_country_meshes_and_skips_the_ocean() {
        let mut world = World::new();
        let root = spawn_globe_hierarchy(&mut world);

        let candidates = collect(&mut world, root);

        assert_eq!(candidates.len(), 2);
        let ids: Vec<_> = candidates
            .iter()
            .filter_map(|c| c.country.map(|country| country.id))
            .collect();
        assert!(ids.contains(&"france"));
        assert!(ids.contains(&"spain"));
    }

    #[test]
    fn empty_scene_yields_empty_candidate_set() {
        let mut world = World::new();
        let root = world.spawn(Name::new("Scene")).id();

        assert!(collect(&mut world, root).is_empty());
    }
}
