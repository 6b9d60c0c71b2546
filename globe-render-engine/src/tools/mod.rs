//! Interactive tools layered over the globe.
//!
//! Hovering a country highlights its mesh and shows a tooltip with the
//! country's name, capital and population. Both tools run in every app
//! state; before the globe has loaded the candidate set is empty and every
//! hover misses.

/// Ray-cast hover picking and the country highlight overlay.
pub mod hover_pick;

/// Country tooltip placement and UI.
pub mod tooltip;
