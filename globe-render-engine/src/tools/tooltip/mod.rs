//! Country info tooltip shown beside the pointer.

/// Pure placement rule with edge flipping.
pub mod placement;

/// Tooltip panel entity and its text fields.
pub mod ui;

use bevy::prelude::*;
use bevy::ui::UiSystem;

pub use ui::{TooltipAnchor, TooltipField, TooltipPanel};

use ui::{position_tooltip, spawn_tooltip};

pub struct TooltipPlugin;

impl Plugin for TooltipPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TooltipAnchor>()
            .add_systems(Startup, spawn_tooltip)
            .add_systems(PostUpdate, position_tooltip.after(UiSystem::Layout));
    }
}
