use bevy::prelude::*;

#[derive(Resource, Default, Debug, Clone)]
pub struct LoadingProgress {
    pub manifest_loaded: bool,
    pub globe_requested: bool,
    pub meshes_collected: bool,
    pub failed: bool,
}

impl LoadingProgress {
    pub fn stage(&self) -> &'static str {
        if self.failed {
            "failed"
        } else if self.meshes_collected {
            "ready"
        } else if self.globe_requested {
            "loading_globe"
        } else if self.manifest_loaded {
            "manifest_loaded"
        } else {
            "loading_manifest"
        }
    }

    pub fn fraction(&self) -> f32 {
        let done = [
            self.manifest_loaded,
            self.globe_requested,
            self.meshes_collected,
        ]
        .iter()
        .filter(|stage| **stage)
        .count();
        done as f32 / 3.0
    }
}
