//! Viewer configuration assets.

/// Globe manifest describing the model, background and camera limits.
pub mod globe_manifest;
