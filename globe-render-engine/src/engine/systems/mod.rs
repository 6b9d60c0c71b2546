//! Runtime diagnostics.
//!
//! Sends frame rate updates to the host page over RPC and keeps the native
//! FPS overlay current.

/// FPS notification and overlay systems.
pub mod fps_tracking;
