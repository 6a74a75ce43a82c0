use std::path::Path;

use anyhow::Context as _;

use crate::animation::timeline::AnimationTimeline;
use crate::assets::image::{PremulImage, load_image, save_png};
use crate::assets::store::OverlayAssets;
use crate::effects::composite::composite_at;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::OverlayResult;
use crate::overlay::card::{build_bio_card, build_logo_card};
use crate::overlay::layout::OverlayLayout;
use crate::text::svg::TextRenderer;
use crate::text::wrap::BioLines;

/// Places the two prebuilt cards onto frames according to the slide timeline.
///
/// Cards are built once per job; annotating a frame only reads them, so one compositor can be
/// shared across worker threads.
#[derive(Clone, Debug)]
pub struct OverlayCompositor {
    bio_card: PremulImage,
    logo_card: PremulImage,
    layout: OverlayLayout,
    timeline: AnimationTimeline,
}

impl OverlayCompositor {
    /// Build both cards for this job.
    pub fn new(
        assets: &OverlayAssets,
        creator_name: &str,
        lines: &BioLines,
        layout: &OverlayLayout,
        timeline: AnimationTimeline,
        text: &TextRenderer,
    ) -> OverlayResult<Self> {
        let bio_card = build_bio_card(assets, creator_name, lines, layout, text)?;
        let logo_card = build_logo_card(assets, layout)?;
        Ok(Self::from_cards(bio_card, logo_card, layout.clone(), timeline))
    }

    /// Wrap already-built cards.
    pub fn from_cards(
        bio_card: PremulImage,
        logo_card: PremulImage,
        layout: OverlayLayout,
        timeline: AnimationTimeline,
    ) -> Self {
        Self {
            bio_card,
            logo_card,
            layout,
            timeline,
        }
    }

    /// The prebuilt bio card.
    pub fn bio_card(&self) -> &PremulImage {
        &self.bio_card
    }

    /// The prebuilt logo card.
    pub fn logo_card(&self) -> &PremulImage {
        &self.logo_card
    }

    /// The slide schedule.
    pub fn timeline(&self) -> &AnimationTimeline {
        &self.timeline
    }

    /// Composite both cards onto `frame` at their positions for `index`.
    ///
    /// Returns `false` and leaves the frame untouched outside the visible window.
    pub fn annotate(&self, frame: &mut PremulImage, index: FrameIndex) -> bool {
        let Some(offsets) = self.timeline.offsets_for(
            index,
            self.layout.bio_card.slide_width,
            self.layout.logo_card.slide_width,
        ) else {
            return false;
        };

        composite_at(
            frame,
            &self.bio_card,
            offsets.bio_x.round() as i64,
            self.layout.bio_card.top,
            1.0,
        );
        composite_at(
            frame,
            &self.logo_card,
            offsets.logo_x.round() as i64,
            self.layout.logo_card.top,
            1.0,
        );
        true
    }

    /// Annotate the frame file `src` into `dst`.
    ///
    /// Frames outside the visible window are copied byte-for-byte.
    pub fn annotate_file(&self, src: &Path, dst: &Path, index: FrameIndex) -> OverlayResult<()> {
        if !self.timeline.is_visible(index) {
            std::fs::copy(src, dst).with_context(|| {
                format!("copy frame '{}' -> '{}'", src.display(), dst.display())
            })?;
            return Ok(());
        }

        let mut frame = load_image(src)?;
        self.annotate(&mut frame, index);
        save_png(&frame, dst)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/compositor.rs"]
mod tests;
