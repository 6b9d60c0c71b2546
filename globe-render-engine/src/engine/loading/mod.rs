//! Loading pipeline for the globe viewer.
//!
//! Reads the manifest, spawns the globe scene and registers its country
//! meshes for picking. Success and failure both end in an explicit
//! `AppState` transition.

/// Globe scene spawning, candidate mesh collection and failure reporting.
pub mod globe_loader;

/// Manifest loading and camera initialisation.
pub mod manifest_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
