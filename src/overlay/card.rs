use crate::assets::image::PremulImage;
use crate::assets::store::OverlayAssets;
use crate::effects::composite::{apply_luma_mask, composite_at, scale_opacity};
use crate::effects::resize::{resize_exact, resize_to_height};
use crate::foundation::error::OverlayResult;
use crate::overlay::layout::OverlayLayout;
use crate::text::svg::{TextRenderer, TextSpan};
use crate::text::wrap::BioLines;

/// Build the bio card: translucent background, bubble, circular avatar, then name and bio text.
#[tracing::instrument(skip_all, fields(creator_name = %creator_name))]
pub fn build_bio_card(
    assets: &OverlayAssets,
    creator_name: &str,
    lines: &BioLines,
    layout: &OverlayLayout,
    text: &TextRenderer,
) -> OverlayResult<PremulImage> {
    let geo = &layout.bio_card;
    let mut card = assets.bio_card_art.clone();
    scale_opacity(&mut card, layout.card_opacity);

    composite_at(&mut card, &assets.bubble, geo.bubble.x, geo.bubble.y, 1.0);

    let avatar = circular_avatar(&assets.creator, &assets.avatar_stencil, geo.avatar_height)?;
    composite_at(&mut card, &avatar, geo.avatar.x, geo.avatar.y, 1.0);

    let mut spans = vec![
        TextSpan {
            text: creator_name,
            x: geo.name.x as f32,
            y: geo.name.y as f32,
            size_px: geo.name_size_px,
        },
        TextSpan {
            text: &lines.line1,
            x: geo.line1.x as f32,
            y: geo.line1.y as f32,
            size_px: geo.body_size_px,
        },
    ];
    if lines.has_second_line() {
        spans.push(TextSpan {
            text: &lines.line2,
            x: geo.line2.x as f32,
            y: geo.line2.y as f32,
            size_px: geo.body_size_px,
        });
    }
    let layer = text.render_layer(card.width, card.height, &spans, layout.text_rgb)?;
    composite_at(&mut card, &layer, 0, 0, 1.0);

    Ok(card)
}

/// Clip `photo` to the stencil's bright region, then scale it to `height`.
///
/// The stencil is stretched to the photo's size first, so any photo shape is accepted.
pub fn circular_avatar(
    photo: &PremulImage,
    stencil: &PremulImage,
    height: u32,
) -> OverlayResult<PremulImage> {
    let stencil = resize_exact(stencil, photo.width, photo.height)?;
    let mut masked = photo.clone();
    apply_luma_mask(&mut masked, &stencil)?;
    resize_to_height(&masked, height)
}

/// Build the logo card: translucent background with the resized logo on top.
#[tracing::instrument(skip_all)]
pub fn build_logo_card(assets: &OverlayAssets, layout: &OverlayLayout) -> OverlayResult<PremulImage> {
    let geo = &layout.logo_card;
    let mut card = assets.logo_card_art.clone();
    scale_opacity(&mut card, layout.card_opacity);

    let logo = resize_exact(&assets.logo, geo.logo_width, geo.logo_height)?;
    composite_at(&mut card, &logo, geo.logo.x, geo.logo.y, 1.0);
    Ok(card)
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/card.rs"]
mod tests;
