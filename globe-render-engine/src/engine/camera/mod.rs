//! Orbit camera for globe navigation.
//!
//! Provides drag-to-rotate and wheel zoom around the globe centre with
//! damped motion and distance limits. Panning is not supported.

/// Orbit camera resource and controller system.
pub mod orbit_camera;
