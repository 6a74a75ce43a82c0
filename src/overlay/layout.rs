use crate::foundation::error::{OverlayError, OverlayResult};
use crate::text::wrap::DEFAULT_LINE_BUDGET;

/// Pixel position of an element's top-left corner, relative to its card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Anchor {
    /// Horizontal position.
    pub x: i64,
    /// Vertical position.
    pub y: i64,
}

impl Anchor {
    /// Shorthand constructor.
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Geometry of the bio card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BioCardLayout {
    /// Vertical anchor of the card on the frame.
    pub top: i64,
    /// Width the slide animation travels.
    pub slide_width: f64,
    /// Decorative bubble position.
    pub bubble: Anchor,
    /// Circular avatar position.
    pub avatar: Anchor,
    /// Avatar height after resizing (width follows the photo's aspect ratio).
    pub avatar_height: u32,
    /// Creator name position.
    pub name: Anchor,
    /// Creator name font size.
    pub name_size_px: f32,
    /// First bio line position.
    pub line1: Anchor,
    /// Second bio line position.
    pub line2: Anchor,
    /// Bio font size.
    pub body_size_px: f32,
}

impl Default for BioCardLayout {
    fn default() -> Self {
        Self {
            top: 1095,
            slide_width: 844.0,
            bubble: Anchor::new(31, 23),
            avatar: Anchor::new(45, 36),
            avatar_height: 138,
            name: Anchor::new(250, 25),
            name_size_px: 64.0,
            line1: Anchor::new(250, 112),
            line2: Anchor::new(250, 150),
            body_size_px: 32.0,
        }
    }
}

/// Geometry of the logo card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LogoCardLayout {
    /// Vertical anchor of the card on the frame.
    pub top: i64,
    /// Width the slide animation travels.
    pub slide_width: f64,
    /// Logo position.
    pub logo: Anchor,
    /// Logo width after resizing.
    pub logo_width: u32,
    /// Logo height after resizing.
    pub logo_height: u32,
}

impl Default for LogoCardLayout {
    fn default() -> Self {
        Self {
            top: 1355,
            slide_width: 564.0,
            logo: Anchor::new(73, 21),
            logo_width: 381,
            logo_height: 119,
        }
    }
}

/// Everything that decides how the overlay looks, independent of frame index.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct OverlayLayout {
    /// Bio card geometry.
    pub bio_card: BioCardLayout,
    /// Logo card geometry.
    pub logo_card: LogoCardLayout,
    /// Translucency applied to both card backgrounds.
    pub card_opacity: f32,
    /// Text color.
    pub text_rgb: [u8; 3],
    /// Character budget of the first bio line.
    pub wrap_budget: usize,
}

impl Default for OverlayLayout {
    fn default() -> Self {
        Self {
            bio_card: BioCardLayout::default(),
            logo_card: LogoCardLayout::default(),
            card_opacity: 0.9,
            text_rgb: [255, 255, 255],
            wrap_budget: DEFAULT_LINE_BUDGET,
        }
    }
}

impl OverlayLayout {
    /// Reject values that cannot produce a card.
    pub fn validate(&self) -> OverlayResult<()> {
        if !(0.0..=1.0).contains(&self.card_opacity) {
            return Err(OverlayError::validation(format!(
                "card_opacity must be within [0, 1], got {}",
                self.card_opacity
            )));
        }
        for (name, w) in [
            ("bio_card.slide_width", self.bio_card.slide_width),
            ("logo_card.slide_width", self.logo_card.slide_width),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(OverlayError::validation(format!(
                    "{name} must be finite and >= 0, got {w}"
                )));
            }
        }
        for (name, size) in [
            ("bio_card.name_size_px", self.bio_card.name_size_px),
            ("bio_card.body_size_px", self.bio_card.body_size_px),
        ] {
            if !size.is_finite() || size <= 0.0 {
                return Err(OverlayError::validation(format!(
                    "{name} must be finite and > 0, got {size}"
                )));
            }
        }
        if self.bio_card.avatar_height == 0 {
            return Err(OverlayError::validation("bio_card.avatar_height must be > 0"));
        }
        if self.logo_card.logo_width == 0 || self.logo_card.logo_height == 0 {
            return Err(OverlayError::validation(
                "logo_card.logo_width/logo_height must be > 0",
            ));
        }
        if self.wrap_budget == 0 {
            return Err(OverlayError::validation("wrap_budget must be > 0"));
        }
        Ok(())
    }
}
