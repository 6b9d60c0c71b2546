/// Asset paths relative to the asset root.
pub mod path;

/// Hover highlight and tooltip layout constants.
pub mod interaction;

/// Lighting, clear colour and post-processing defaults.
pub mod render_settings;
