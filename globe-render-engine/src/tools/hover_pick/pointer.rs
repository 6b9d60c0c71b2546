use bevy::math::Rect;
use bevy::prelude::*;

/// The render surface inside the window, in logical pixels with a top-left origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn right(&self) -> f32 {
        self.left + self.width
    }
}

impl From<Rect> for SurfaceRect {
    fn from(rect: Rect) -> Self {
        Self {
            left: rect.min.x,
            top: rect.min.y,
            width: rect.width(),
            height: rect.height(),
        }
    }
}

/// Map a window-space pointer position into normalised device coordinates.
///
/// `x` runs from -1 at the surface's left edge to 1 at its right edge and `y`
/// from 1 at the top to -1 at the bottom. Returns `None` for an empty surface.
pub fn pointer_to_ndc(pointer: Vec2, surface: SurfaceRect) -> Option<Vec2> {
    if surface.width <= 0.0 || surface.height <= 0.0 {
        return None;
    }

    Some(Vec2::new(
        (pointer.x - surface.left) / surface.width * 2.0 - 1.0,
        -((pointer.y - surface.top) / surface.height * 2.0 - 1.0),
    ))
}

/// What this frame's pointer events ask the picker to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    Idle,
    Left,
    Moved(Vec2),
}

/// Combine the frame's `CursorLeft` and last `CursorMoved` events.
///
/// Leave and move events arrive on separate queues, so when both occur in one
/// frame the window's current cursor state decides which came last.
pub fn pointer_action(left: bool, moved: Option<Vec2>, cursor_in_window: bool) -> PointerAction {
    match (left, moved) {
        (true, Some(pointer)) if cursor_in_window => PointerAction::Moved(pointer),
        (true, _) => PointerAction::Left,
        (false, Some(pointer)) => PointerAction::Moved(pointer),
        (false, None) => PointerAction::Idle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_WINDOW: SurfaceRect = SurfaceRect {
        left: 0.0,
        top: 0.0,
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn corners_and_centre_of_full_window() {
        assert_eq!(pointer_to_ndc(Vec2::new(0.0, 0.0), FULL_WINDOW), Some(Vec2::new(-1.0, 1.0)));
        assert_eq!(pointer_to_ndc(Vec2::new(800.0, 600.0), FULL_WINDOW), Some(Vec2::new(1.0, -1.0)));
        assert_eq!(pointer_to_ndc(Vec2::new(400.0, 300.0), FULL_WINDOW), Some(Vec2::ZERO));
    }

    #[test]
    fn offset_surface_accounts_for_its_position() {
        let surface = SurfaceRect::from(Rect::new(200.0, 100.0, 600.0, 500.0));
        assert_eq!(surface.right(), 600.0);

        assert_eq!(pointer_to_ndc(Vec2::new(400.0, 300.0), surface), Some(Vec2::ZERO));
        assert_eq!(pointer_to_ndc(Vec2::new(200.0, 100.0), surface), Some(Vec2::new(-1.0, 1.0)));
    }

    #[test]
    fn empty_surface_has_no_mapping() {
        let surface = SurfaceRect {
            width: 0.0,
            ..FULL_WINDOW
        };
        assert_eq!(pointer_to_ndc(Vec2::new(10.0, 10.0), surface), None);
    }

    #[test]
    fn leaving_clears_unless_the_pointer_came_back() {
        let pointer = Vec2::new(40.0, 60.0);

        assert_eq!(pointer_action(false, None, true), PointerAction::Idle);
        assert_eq!(pointer_action(false, Some(pointer), true), PointerAction::Moved(pointer));
        assert_eq!(pointer_action(true, None, false), PointerAction::Left);

        // Moved then left within one frame.
        assert_eq!(pointer_action(true, Some(pointer), false), PointerAction::Left);
        // Left then re-entered within one frame.
        assert_eq!(pointer_action(true, Some(pointer), true), PointerAction::Moved(pointer));
    }
}
