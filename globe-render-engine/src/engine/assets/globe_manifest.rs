use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::interaction::DEFAULT_EXCLUDED_NODE_NAME;
use crate::constants::path::{DEFAULT_BACKGROUND_PATH, DEFAULT_GLOBE_MODEL_PATH};

/// Viewer configuration as a Bevy asset. Mirrors `globe_manifest.json`.
/// Every field is optional in the JSON and falls back to the built-in default.
#[derive(Asset, Debug, Clone, PartialEq, Serialize, Deserialize, TypePath, Resource)]
#[serde(default)]
pub struct GlobeManifest {
    /// glTF binary holding the globe and one named mesh per country.
    pub model: String,
    pub background: Option<String>,
    /// Fraction of the background image shown along x and y.
    pub background_repeat: [f32; 2],
    /// Node whose meshes are rendered but never picked (the ocean sphere).
    pub excluded_node: String,
    pub camera: CameraSettings,
}

impl Default for GlobeManifest {
    fn default() -> Self {
        Self {
            model: DEFAULT_GLOBE_MODEL_PATH.to_string(),
            background: Some(DEFAULT_BACKGROUND_PATH.to_string()),
            background_repeat: [0.5, 1.0],
            excluded_node: DEFAULT_EXCLUDED_NODE_NAME.to_string(),
            camera: CameraSettings::default(),
        }
    }
}

/// Perspective and orbit limits for the globe camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub start_distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub zoom_speed: f32,
    pub rotate_speed: f32,
    /// Share of the pending rotation applied each frame.
    pub damping: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            near: 0.1,
            far: 1000.0,
            start_distance: 3.0,
            min_distance: 1.3,
            max_distance: 5.0,
            zoom_speed: 0.2,
            rotate_speed: 1.0,
            damping: 0.05,
        }
    }
}

impl CameraSettings {
    pub fn projection(&self) -> Projection {
        Projection::Perspective(PerspectiveProjection {
            fov: self.fov_degrees.to_radians(),
            near: self.near,
            far: self.far,
            ..default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_manifest_keeps_defaults() {
        let manifest: GlobeManifest = serde_json::from_str(
            r#"{ "model": "models/europe.glb", "camera": { "max_distance": 8.0 } }"#,
        )
        .unwrap();

        assert_eq!(manifest.model, "models/europe.glb");
        assert_eq!(manifest.excluded_node, "globe");
        assert_eq!(manifest.background_repeat, [0.5, 1.0]);
        assert_eq!(manifest.camera.max_distance, 8.0);
        assert_eq!(manifest.camera.min_distance, 1.3);
        assert_eq!(manifest.camera.fov_degrees, 45.0);
    }

    #[test]
    fn background_can_be_disabled() {
        let manifest: GlobeManifest = serde_json::from_str(r#"{ "background": null }"#).unwrap();
        assert!(manifest.background.is_none());
    }

    #[test]
    fn projection_uses_radians() {
        let Projection::Perspective(perspective) = CameraSettings::default().projection() else {
            panic!("expected a perspective projection");
        };
        assert!((perspective.fov - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
        assert_eq!(perspective.near, 0.1);
        assert_eq!(perspective.far, 1000.0);
    }
}
