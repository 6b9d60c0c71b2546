//! Country hover picking.
//!
//! Every pointer move casts a ray from the globe camera through the pointer,
//! takes the nearest candidate mesh and mirrors it with a single translucent
//! red overlay, then places the country tooltip beside the pointer.
//!
//! ## Data Flow
//!
//! ```text
//! CursorMoved / CursorLeft
//!   └─> pick_country_under_pointer()
//!       ├─> pointer_action() orders leave against move
//!       ├─> pointer_to_ndc() + ray_from_ndc()
//!       ├─> hover_outcome_for_ray(): MeshRayCast over CandidateMeshes, nearest hit
//!       └─> HoverEvent { outcome: Cleared | Highlighted }
//!           └─> apply_hover_events()
//!               ├─> CountryHighlight mesh, transform and visibility
//!               ├─> Tooltip text and TooltipAnchor
//!               └─> HoverState + RPC notification on change
//!
//! PostUpdate, after UI layout
//!   └─> position_tooltip() places the panel at its measured size
//! ```
//!
//! Picking is split across two systems because the ray cast reads every
//! `Mesh3d` while the highlight writes its own.

/// Hover decision and the systems that run it.
pub mod controller;

/// Highlight overlay entity and transform rules.
pub mod highlight;

/// Window-to-device coordinate mapping.
pub mod pointer;

/// Pick rays and the ray-caster seam.
pub mod ray;

/// Candidate meshes and current hover state.
pub mod state;

use bevy::prelude::*;

pub use state::{CandidateMeshes, HoverState};

use controller::{HoverEvent, apply_hover_events, pick_country_under_pointer};
use highlight::spawn_country_highlight;

pub struct HoverPickPlugin;

impl Plugin for HoverPickPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CandidateMeshes>()
            .init_resource::<HoverState>()
            .add_event::<HoverEvent>()
            .add_systems(Startup, spawn_country_highlight)
            .add_systems(
                Update,
                (pick_country_under_pointer, apply_hover_events).chain(),
            );
    }
}
