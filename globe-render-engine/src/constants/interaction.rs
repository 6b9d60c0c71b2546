/// Uniform growth applied to the highlight so its edges show around the hovered mesh.
pub const HIGHLIGHT_SCALE_FACTOR: f32 = 1.005;

/// Distance in logical pixels between the pointer and the nearest tooltip edge.
pub const TOOLTIP_POINTER_OFFSET: f32 = 50.0;

/// Ocean sphere node in the globe model. Never pickable.
pub const DEFAULT_EXCLUDED_NODE_NAME: &str = "globe";

/// Seconds between fps notifications sent to the frontend.
pub const FPS_NOTIFICATION_INTERVAL: f32 = 0.5;
