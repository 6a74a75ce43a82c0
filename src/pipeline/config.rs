use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::animation::timeline::AnimationTimeline;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::overlay::layout::OverlayLayout;
use crate::pipeline::workspace::WorkspaceLayout;

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Threading and chunking controls for frame annotation.
pub struct AnnotateThreading {
    /// Annotate frames on a rayon pool when `true`.
    pub parallel: bool,
    /// Frames per scheduling chunk. Progress is reported in frame order after each chunk.
    pub chunk_size: usize,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

impl Default for AnnotateThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

/// External tool and encoder settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineOpts {
    /// `ffmpeg` executable.
    pub ffmpeg_bin: PathBuf,
    /// `ffprobe` executable.
    pub ffprobe_bin: PathBuf,
    /// Target frame width after decoding (height follows aspect ratio, rounded to even).
    pub scale_width: u32,
    /// Video codec passed to the encoder.
    pub codec: String,
    /// Pixel format passed to the encoder.
    pub pixel_format: String,
    /// Annotation threading.
    pub threading: AnnotateThreading,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            ffmpeg_bin: PathBuf::from("ffmpeg"),
            ffprobe_bin: PathBuf::from("ffprobe"),
            scale_width: 1080,
            codec: "libx264".to_string(),
            pixel_format: "yuv420p".to_string(),
            threading: AnnotateThreading::default(),
        }
    }
}

/// Complete job configuration. Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Card geometry and look.
    pub layout: OverlayLayout,
    /// Slide animation schedule.
    pub timeline: AnimationTimeline,
    /// Working directory file names.
    pub workspace: WorkspaceLayout,
    /// Tooling and encoder options.
    pub opts: PipelineOpts,
}

impl PipelineConfig {
    /// Read a JSON config file.
    pub fn from_path(path: &Path) -> OverlayResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(text: &str) -> OverlayResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| OverlayError::validation(format!("invalid pipeline config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations that cannot run a job.
    pub fn validate(&self) -> OverlayResult<()> {
        self.layout.validate()?;
        self.timeline.validate()?;
        self.workspace.validate()?;

        let w = self.opts.scale_width;
        if w == 0 || !w.is_multiple_of(2) {
            return Err(OverlayError::validation(format!(
                "scale_width must be a positive even number, got {w}"
            )));
        }
        if self.opts.codec.trim().is_empty() {
            return Err(OverlayError::validation("codec must be non-empty"));
        }
        if self.opts.pixel_format.trim().is_empty() {
            return Err(OverlayError::validation("pixel_format must be non-empty"));
        }
        if let Some(0) = self.opts.threading.threads {
            return Err(OverlayError::validation(
                "annotate threading 'threads' must be >= 1 when set",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/config.rs"]
mod tests;
