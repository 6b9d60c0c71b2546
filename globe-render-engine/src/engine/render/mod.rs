//! Post-processing for the globe view.
//!
//! A single fullscreen pass after tonemapping reads the globe camera's depth
//! prepass and blends a glow along the globe silhouette. Output is already in
//! the target's sRGB format, so no separate gamma pass follows.

/// Silhouette outline render graph node.
pub mod outline_post_processing;
