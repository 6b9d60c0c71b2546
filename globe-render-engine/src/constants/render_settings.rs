use bevy::color::Color;
use bevy::math::Vec4;

use crate::engine::render::outline_post_processing::OutlineSettings;

pub const OUTLINE_SETTINGS: OutlineSettings = OutlineSettings {
    edge_colour: Vec4::ONE,
    edge_strength: 5.0,
    edge_thickness: 10.0,
};

pub const CLEAR_COLOUR: Color = Color::WHITE;

/// Ambient only scene, so the brightness is far above Bevy's default.
pub const AMBIENT_COLOUR: Color = Color::srgb(0.25, 0.25, 0.25);
pub const AMBIENT_BRIGHTNESS: f32 = 4000.0;

pub const HIGHLIGHT_COLOUR: Color = Color::srgba(1.0, 0.0, 0.0, 0.6);
