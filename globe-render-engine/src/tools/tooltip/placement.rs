use bevy::prelude::*;

use crate::constants::interaction::TOOLTIP_POINTER_OFFSET;

/// Where the tooltip panel goes, in logical window pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TooltipPlacement {
    pub left: f32,
    pub top: f32,
    pub visible: bool,
}

/// Place the panel below and to the right of the pointer, flipping to the
/// other side on each axis where it would overflow.
///
/// Horizontal overflow is measured against the right edge of the render
/// surface, vertical overflow against the viewport height.
pub fn place_tooltip(
    pointer: Vec2,
    panel_size: Vec2,
    surface_right: f32,
    viewport_height: f32,
) -> TooltipPlacement {
    let offset = TOOLTIP_POINTER_OFFSET;

    let left = if pointer.x + offset + panel_size.x > surface_right {
        pointer.x - offset - panel_size.x
    } else {
        pointer.x + offset
    };

    let top = if pointer.y + offset + panel_size.y > viewport_height {
        pointer.y - offset - panel_size.y
    } else {
        pointer.y + offset
    };

    TooltipPlacement {
        left,
        top,
        visible: true,
    }
}
