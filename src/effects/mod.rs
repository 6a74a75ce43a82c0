//! Pixel operations used to build and place overlay cards.

/// Source-over compositing, opacity scaling and stencil masking.
pub mod composite;
/// Resampling helpers.
pub mod resize;
