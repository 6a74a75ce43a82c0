//! Frame-indexed slide animation of the overlay cards.

/// Slide-in / slide-out timeline.
pub mod timeline;
