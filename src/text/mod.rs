//! Bio text handling: two-line wrapping and text rasterization for the bio card.

/// SVG-backed text rasterization.
pub mod svg;
/// Greedy two-line bio wrapping.
pub mod wrap;
