//! Bio card and logo card construction plus per-frame placement.

/// Card construction (translucency, bubble, circular avatar, text, logo).
pub mod card;
/// Per-frame placement of the prebuilt cards.
pub mod compositor;
/// Fixed card geometry.
pub mod layout;
