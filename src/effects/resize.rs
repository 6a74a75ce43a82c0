use image::imageops::FilterType;

use crate::assets::image::PremulImage;
use crate::foundation::error::{OverlayError, OverlayResult};

/// Resample to exactly `width x height`.
///
/// Resampling runs on premultiplied data so transparent edges do not bleed color.
pub fn resize_exact(img: &PremulImage, width: u32, height: u32) -> OverlayResult<PremulImage> {
    if width == 0 || height == 0 {
        return Err(OverlayError::validation(format!(
            "resize target must be non-zero, got {width}x{height}"
        )));
    }
    if img.width == width && img.height == height {
        return Ok(img.clone());
    }
    let buf = img.as_premul_buffer()?;
    let out = image::imageops::resize(&buf, width, height, FilterType::Triangle);
    PremulImage::from_premul_raw(width, height, out.into_raw())
}

/// Uniformly resample to `height`, keeping the aspect ratio.
pub fn resize_to_height(img: &PremulImage, height: u32) -> OverlayResult<PremulImage> {
    if img.height == 0 {
        return Err(OverlayError::validation("cannot resize an image with zero height"));
    }
    let width = (f64::from(height) * f64::from(img.width) / f64::from(img.height))
        .round()
        .max(1.0) as u32;
    resize_exact(img, width, height)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/resize.rs"]
mod tests;
