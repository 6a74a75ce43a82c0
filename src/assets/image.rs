use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{OverlayError, OverlayResult};
use crate::foundation::math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};

/// Row-major, tightly packed, premultiplied RGBA8 raster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PremulImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes, `width * height * 4` long.
    pub data: Vec<u8>,
}

impl PremulImage {
    /// Fully transparent image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Image filled with one premultiplied color.
    pub fn filled(width: u32, height: u32, px: [u8; 4]) -> Self {
        Self {
            width,
            height,
            data: px.repeat((width as usize) * (height as usize)),
        }
    }

    /// Wrap already-premultiplied bytes, checking the buffer length.
    pub fn from_premul_raw(width: u32, height: u32, data: Vec<u8>) -> OverlayResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| OverlayError::validation("image buffer size overflow"))?;
        if data.len() != expected {
            return Err(OverlayError::validation(format!(
                "image buffer has {} bytes, expected {expected} for {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Convert a straight-alpha image into premultiplied form.
    pub fn from_straight(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert back to a straight-alpha `image` buffer.
    pub fn to_straight(&self) -> OverlayResult<image::RgbaImage> {
        let mut data = self.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| OverlayError::validation("image buffer does not match its dimensions"))
    }

    /// Borrow the buffer as an `image` view with premultiplied contents.
    pub(crate) fn as_premul_buffer(&self) -> OverlayResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| OverlayError::validation("image buffer does not match its dimensions"))
    }

    /// Premultiplied pixel at `(x, y)`; panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> OverlayResult<PremulImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(PremulImage::from_straight(dyn_img.to_rgba8()))
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> OverlayResult<PremulImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes).map_err(|e| match e {
        OverlayError::Other(err) => {
            OverlayError::Other(err.context(format!("decode image '{}'", path.display())))
        }
        other => other,
    })
}

/// Read and decode an image file, discarding its alpha channel.
///
/// Color stored under transparent pixels survives, so stencils keep the RGB they were authored
/// with.
pub fn load_image_opaque(path: &Path) -> OverlayResult<PremulImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    let mut rgba = image::load_from_memory(&bytes)
        .with_context(|| format!("decode image '{}'", path.display()))?
        .to_rgba8();
    for px in rgba.pixels_mut() {
        px.0[3] = 255;
    }
    Ok(PremulImage::from_straight(rgba))
}

/// Write an image as PNG (straight alpha).
pub fn save_png(img: &PremulImage, path: &Path) -> OverlayResult<()> {
    let straight = img.to_straight()?;
    straight
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
