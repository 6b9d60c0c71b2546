use bevy::picking::mesh_picking::ray_cast::MeshRayCast;
use bevy::prelude::*;
use bevy::window::{CursorLeft, PrimaryWindow};
use country_data::CountryRecord;

use crate::engine::camera::orbit_camera::GlobeCamera;
use crate::rpc::web_rpc::WebRpcInterface;
use crate::tools::tooltip::{TooltipAnchor, TooltipField};

use super::highlight::{CountryHighlight, apply_highlight, highlight_transform};
use super::pointer::{PointerAction, SurfaceRect, pointer_action, pointer_to_ndc};
use super::ray::{SceneRayCaster, nearest_hit, ray_from_ndc};
use super::state::{CandidateMeshes, HoverState};

/// The nearest object under the pointer.
#[derive(Debug, Clone)]
pub struct HitTarget {
    pub entity: Entity,
    /// `None` when the hit entity carries no mesh.
    pub mesh: Option<Handle<Mesh>>,
    pub transform: GlobalTransform,
    pub country: Option<&'static CountryRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HoverOutcome {
    Cleared,
    Highlighted {
        entity: Entity,
        mesh: Handle<Mesh>,
        transform: Transform,
        /// `None` for meshes without a country record.
        country: Option<&'static CountryRecord>,
    },
}

impl HoverOutcome {
    pub fn entity(&self) -> Option<Entity> {
        match self {
            Self::Cleared => None,
            Self::Highlighted { entity, .. } => Some(*entity),
        }
    }

    pub fn country(&self) -> Option<&'static CountryRecord> {
        match self {
            Self::Cleared => None,
            Self::Highlighted { country, .. } => *country,
        }
    }
}

/// Decide what the highlight should show for the current hit.
pub fn resolve_hover(target: Option<&HitTarget>) -> HoverOutcome {
    let Some(target) = target else {
        return HoverOutcome::Cleared;
    };
    let Some(mesh) = target.mesh.clone() else {
        return HoverOutcome::Cleared;
    };

    HoverOutcome::Highlighted {
        entity: target.entity,
        mesh,
        transform: highlight_transform(&target.transform),
        country: target.country,
    }
}

/// Result of one pointer event, applied to the highlight and tooltip.
#[derive(Event, Debug, Clone)]
pub struct HoverEvent {
    /// Pointer position in logical window pixels.
    pub pointer: Vec2,
    pub surface_right: f32,
    pub viewport_height: f32,
    pub outcome: HoverOutcome,
}

/// Ray-cast from the pointer into the candidate meshes on every pointer move.
pub fn pick_country_under_pointer(
    mut cursor_moved: EventReader<CursorMoved>,
    mut cursor_left: EventReader<CursorLeft>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<GlobeCamera>>,
    targets: Query<(Option<&Mesh3d>, &GlobalTransform)>,
    candidates: Res<CandidateMeshes>,
    mut ray_cast: MeshRayCast,
    mut hover_events: EventWriter<HoverEvent>,
) {
    let left = cursor_left.read().count() > 0;
    let moved = cursor_moved.read().last().map(|event| event.position);

    let Ok(window) = windows.single() else {
        return;
    };
    let viewport_height = window.height();

    let pointer = match pointer_action(left, moved, window.cursor_position().is_some()) {
        PointerAction::Idle => return,
        PointerAction::Left => {
            hover_events.write(HoverEvent {
                pointer: Vec2::ZERO,
                surface_right: window.width(),
                viewport_height,
                outcome: HoverOutcome::Cleared,
            });
            return;
        }
        PointerAction::Moved(pointer) => pointer,
    };

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Some(surface) = camera.logical_viewport_rect().map(SurfaceRect::from) else {
        return;
    };
    let Some(ndc) = pointer_to_ndc(pointer, surface) else {
        return;
    };
    let Some(ray) = ray_from_ndc(camera, camera_transform, ndc) else {
        return;
    };

    hover_events.write(HoverEvent {
        pointer,
        surface_right: surface.right(),
        viewport_height,
        outcome: hover_outcome_for_ray(ray, &mut ray_cast, &candidates, &targets),
    });
}

/// Cast `ray` into the candidates and decide the hover from the nearest hit.
pub fn hover_outcome_for_ray(
    ray: Ray3d,
    caster: &mut impl SceneRayCaster,
    candidates: &CandidateMeshes,
    targets: &Query<(Option<&Mesh3d>, &GlobalTransform)>,
) -> HoverOutcome {
    let target = nearest_hit(caster.intersect(ray, candidates)).and_then(|hit| {
        debug!("Pointer ray hit {:?} at {}", hit.entity, hit.point);
        let (mesh, transform) = targets.get(hit.entity).ok()?;
        Some(HitTarget {
            entity: hit.entity,
            mesh: mesh.map(|mesh| mesh.0.clone()),
            transform: *transform,
            country: candidates.get(hit.entity).and_then(|c| c.country),
        })
    });

    resolve_hover(target.as_ref())
}

/// Update the highlight, tooltip and hover state from the latest pointer event.
pub fn apply_hover_events(
    mut hover_events: EventReader<HoverEvent>,
    mut highlight_query: Query<
        (&mut Transform, &mut Mesh3d, &mut Visibility),
        With<CountryHighlight>,
    >,
    mut field_query: Query<(&TooltipField, &mut Text)>,
    mut tooltip_anchor: ResMut<TooltipAnchor>,
    mut hover_state: ResMut<HoverState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    let Some(event) = hover_events.read().last() else {
        return;
    };

    if let Ok((mut transform, mut mesh, mut visibility)) = highlight_query.single_mut() {
        apply_highlight(&event.outcome, &mut transform, &mut mesh, &mut visibility);
    }

    // Placement waits for layout to size the panel around the new text.
    match event.outcome.country() {
        Some(country) => {
            for (field, mut text) in &mut field_query {
                let line = field.line(country);
                if text.0 != line {
                    text.0 = line;
                }
            }
            tooltip_anchor.show_at(event.pointer, event.surface_right, event.viewport_height);
        }
        None => tooltip_anchor.hide(),
    }

    if hover_state.update(&event.outcome) {
        let mesh = hover_state.mesh_index();
        match hover_state.country {
            Some(country) => {
                info!("Hovering {}", country.name);
                rpc_interface.send_notification(
                    "country_hovered",
                    serde_json::json!({ "country": country, "mesh": mesh }),
                );
            }
            None => {
                rpc_interface.send_notification(
                    "country_hover_cleared",
                    serde_json::json!({ "mesh": mesh }),
                );
            }
        }
    }
}
