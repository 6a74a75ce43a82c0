use crate::foundation::core::FrameIndex;
use crate::foundation::error::{OverlayError, OverlayResult};

/// Where a frame sits relative to the slide windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlidePhase {
    /// Before slide-in starts or after slide-out ends; nothing is composited.
    Hidden,
    /// Inside `[slide_in_start, slide_in_end]`.
    SlidingIn,
    /// Strictly between the two windows.
    AtRest,
    /// Inside `[slide_out_start, slide_out_end]`.
    SlidingOut,
}

/// Horizontal card offsets for one frame, in destination pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationOffsets {
    /// Left edge of the bio card.
    pub bio_x: f64,
    /// Left edge of the logo card.
    pub logo_x: f64,
}

/// Slide windows shared by both cards.
///
/// Offsets are linear in the frame index: `-card_width` (fully hidden to the left) at
/// `slide_in_start`, `0` from `slide_in_end` through `slide_out_start`, back to `-card_width` at
/// `slide_out_end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnimationTimeline {
    /// First frame with a visible card.
    pub slide_in_start: u64,
    /// First frame at rest.
    pub slide_in_end: u64,
    /// Last frame at rest.
    pub slide_out_start: u64,
    /// Last frame with a visible card.
    pub slide_out_end: u64,
    /// Divisor that turns a frame delta into a fraction of the card width.
    pub slide_frames: u64,
}

impl Default for AnimationTimeline {
    fn default() -> Self {
        Self {
            slide_in_start: 30,
            slide_in_end: 40,
            slide_out_start: 110,
            slide_out_end: 120,
            slide_frames: 10,
        }
    }
}

impl AnimationTimeline {
    /// Check window ordering.
    pub fn validate(&self) -> OverlayResult<()> {
        if self.slide_frames == 0 {
            return Err(OverlayError::validation("slide_frames must be > 0"));
        }
        if !(self.slide_in_start <= self.slide_in_end
            && self.slide_in_end <= self.slide_out_start
            && self.slide_out_start <= self.slide_out_end)
        {
            return Err(OverlayError::validation(format!(
                "slide windows must be ordered: in [{}, {}], out [{}, {}]",
                self.slide_in_start, self.slide_in_end, self.slide_out_start, self.slide_out_end
            )));
        }
        Ok(())
    }

    /// Classify `frame`.
    pub fn phase(&self, frame: FrameIndex) -> SlidePhase {
        let f = frame.0;
        if f < self.slide_in_start || f > self.slide_out_end {
            SlidePhase::Hidden
        } else if f <= self.slide_in_end {
            SlidePhase::SlidingIn
        } else if f < self.slide_out_start {
            SlidePhase::AtRest
        } else {
            SlidePhase::SlidingOut
        }
    }

    /// Whether any overlay work is needed for `frame`.
    pub fn is_visible(&self, frame: FrameIndex) -> bool {
        self.phase(frame) != SlidePhase::Hidden
    }

    /// Offset of a card of `card_width` at `frame`, or `None` when off-canvas.
    pub fn card_offset(&self, frame: FrameIndex, card_width: f64) -> Option<f64> {
        let f = frame.0;
        let steps = self.slide_frames as f64;
        match self.phase(frame) {
            SlidePhase::Hidden => None,
            SlidePhase::SlidingIn => {
                let delta = (f - self.slide_in_start) as f64;
                Some(delta * card_width / steps - card_width)
            }
            SlidePhase::AtRest => Some(0.0),
            SlidePhase::SlidingOut => {
                let delta = (f - self.slide_out_start) as f64;
                Some(-(delta * card_width) / steps)
            }
        }
    }

    /// Offsets of both cards at `frame`, or `None` when the frame carries no overlay.
    pub fn offsets_for(
        &self,
        frame: FrameIndex,
        bio_card_width: f64,
        logo_card_width: f64,
    ) -> Option<AnimationOffsets> {
        Some(AnimationOffsets {
            bio_x: self.card_offset(frame, bio_card_width)?,
            logo_x: self.card_offset(frame, logo_card_width)?,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
