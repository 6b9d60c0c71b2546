use bevy::prelude::*;

use crate::engine::loading::progress::LoadingProgress;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::hover_pick::CandidateMeshes;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
    /// Globe model could not be loaded. The scene stays up but nothing is pickable.
    LoadFailed,
}

#[derive(Component)]
pub struct FpsText;

// Final transition once the globe's meshes are registered for picking
pub fn transition_to_running(
    loading_progress: Res<LoadingProgress>,
    candidates: Res<CandidateMeshes>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !loading_progress.meshes_collected || loading_progress.failed {
        return;
    }

    info!(
        "→ Globe ready with {} pickable meshes ({} countries), transitioning to Running state",
        candidates.len(),
        candidates.country_count()
    );
    rpc_interface.send_notification(
        "globe_loaded",
        serde_json::json!({
            "candidate_meshes": candidates.len(),
            "countries": candidates.country_count(),
        }),
    );
    next_state.set(AppState::Running);
}

/// Push loading stage changes to the frontend.
pub fn update_loading_frontend(
    loading_progress: Res<LoadingProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if !loading_progress.is_changed() {
        return;
    }

    rpc_interface.send_notification(
        "loading_progress",
        serde_json::json!({
            "stage": loading_progress.stage(),
            "fraction": loading_progress.fraction(),
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    fn loading_app() -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_state::<AppState>()
            .init_resource::<LoadingProgress>()
            .init_resource::<CandidateMeshes>()
            .init_resource::<WebRpcInterface>()
            .add_systems(
                Update,
                transition_to_running.run_if(in_state(AppState::Loading)),
            );
        app
    }

    fn current_state(app: &App) -> AppState {
        *app.world().resource::<State<AppState>>().get()
    }

    #[test]
    fn stays_loading_until_meshes_are_collected() {
        let mut app = loading_app();
        app.update();
        app.update();
        assert_eq!(current_state(&app), AppState::Loading);
    }

    #[test]
    fn collected_meshes_move_the_app_to_running() {
        let mut app = loading_app();
        app.update();
        app.world_mut()
            .resource_mut::<LoadingProgress>()
            .meshes_collected = true;
        app.update();
        app.update();
        assert_eq!(current_state(&app), AppState::Running);
    }

    #[test]
    fn failed_load_never_reaches_running() {
        let mut app = loading_app();
        {
            let mut progress = app.world_mut().resource_mut::<LoadingProgress>();
            progress.meshes_collected = true;
            progress.failed = true;
        }
        app.update();
        app.update();
        assert_eq!(current_state(&app), AppState::Loading);
    }
}
