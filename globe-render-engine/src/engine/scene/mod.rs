//! Static scene dressing around the globe.
//!
//! The globe model is lit by ambient light only. A 2D camera behind the
//! globe camera clears to white and draws the background image.

/// Background camera and cropped background sprite.
pub mod background;

/// Ambient lighting.
pub mod lighting;
