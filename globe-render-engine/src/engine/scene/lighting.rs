use bevy::prelude::*;

use crate::constants::render_settings::{AMBIENT_BRIGHTNESS, AMBIENT_COLOUR};

/// The globe has no directional light, so ambient is the only light source.
pub fn ambient_light() -> AmbientLight {
    AmbientLight {
        color: AMBIENT_COLOUR,
        brightness: AMBIENT_BRIGHTNESS,
        ..default()
    }
}
