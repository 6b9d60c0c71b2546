/// Viewer configuration loaded before anything else.
pub const GLOBE_MANIFEST_PATH: &str = "globe_manifest.json";

/// Used when the manifest is missing or unreadable.
pub const DEFAULT_GLOBE_MODEL_PATH: &str = "models/globe6.glb";
pub const DEFAULT_BACKGROUND_PATH: &str = "textures/background.jpeg";

pub const OUTLINE_SHADER_PATH: &str = "shaders/outline_postprocess.wgsl";
