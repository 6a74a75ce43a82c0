use crate::assets::image::PremulImage;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::foundation::math::mul_div255_u8;

/// One premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Premultiplied source-over of one pixel, with `opacity` applied to the source.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// Offsets may be negative or push `src` past the right/bottom edge; only the overlapping region
/// is touched.
pub fn composite_at(dst: &mut PremulImage, src: &PremulImage, x: i64, y: i64, opacity: f32) {
    let dst_w = i64::from(dst.width);
    let dst_h = i64::from(dst.height);
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src.width)).min(dst_w);
    let y1 = (y + i64::from(src.height)).min(dst_h);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src_stride = src.width as usize * 4;
    let dst_stride = dst.width as usize * 4;
    let span = (x1 - x0) as usize * 4;

    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let sx = (x0 - x) as usize;
        let s_off = sy * src_stride + sx * 4;
        let d_off = dy as usize * dst_stride + x0 as usize * 4;
        let s_row = &src.data[s_off..s_off + span];
        let d_row = &mut dst.data[d_off..d_off + span];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
            d.copy_from_slice(&out);
        }
    }
}

/// Scale the whole image's opacity by `opacity` in `[0, 1]`.
pub fn scale_opacity(img: &mut PremulImage, opacity: f32) {
    let op = ((opacity.clamp(0.0, 1.0) * 255.0).round() as i32).clamp(0, 255) as u16;
    if op == 255 {
        return;
    }
    for c in &mut img.data {
        *c = mul_div255(u16::from(*c), op);
    }
}

/// Multiply each pixel's coverage by the brightness of the matching stencil pixel.
///
/// Brightness is the mean of the stencil's red, green and blue channels, so a white disc on
/// black keeps the disc and clears the rest. The stencil's alpha is not consulted, so pass one
/// loaded opaque (see [`crate::assets::image::load_image_opaque`]). Both images must have the
/// same dimensions.
pub fn apply_luma_mask(img: &mut PremulImage, stencil: &PremulImage) -> OverlayResult<()> {
    if img.width != stencil.width || img.height != stencil.height {
        return Err(OverlayError::validation(format!(
            "stencil is {}x{}, image is {}x{}",
            stencil.width, stencil.height, img.width, img.height
        )));
    }
    for (px, m) in img
        .data
        .chunks_exact_mut(4)
        .zip(stencil.data.chunks_exact(4))
    {
        let luma = ((u16::from(m[0]) + u16::from(m[1]) + u16::from(m[2])) / 3).min(255);
        if luma == 255 {
            continue;
        }
        for c in px.iter_mut() {
            *c = mul_div255(u16::from(*c), luma);
        }
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    mul_div255_u8(x, y)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
