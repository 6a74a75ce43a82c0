use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{OverlayError, OverlayResult};

/// What the pipeline needs to know about the source video before decoding it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VideoProbe {
    /// Source frame rate, when the container reports one.
    pub fps: Option<Fps>,
    /// Whether the source carries at least one audio stream.
    pub has_audio: bool,
}

/// Parameters of the frames-to-video encode.
#[derive(Clone, Debug)]
pub struct EncodeRequest {
    /// Directory holding `1.png`, `2.png`, ...
    pub frame_dir: PathBuf,
    /// Number of the first frame file.
    pub start_number: u64,
    /// Encoder name passed to the tool (e.g. `libx264`).
    pub codec: String,
    /// Output pixel format (e.g. `yuv420p`).
    pub pixel_format: String,
    /// Input frame rate; the tool's default applies when `None`.
    pub fps: Option<Fps>,
    /// Silent video to produce.
    pub out_path: PathBuf,
}

/// Decode / encode / remux seam between the pipeline and the external media tool.
///
/// Every call blocks until the underlying process has exited; the pipeline relies on that as a
/// sequencing barrier between stages.
pub trait MediaTranscoder: Send + Sync {
    /// Inspect the source video.
    fn probe(&self, video: &Path) -> OverlayResult<VideoProbe>;

    /// Decode `video` into numbered PNG frames in `out_dir`, scaled to `scale_width` with the
    /// height following the aspect ratio. Returns the frame count.
    fn extract(&self, video: &Path, out_dir: &Path, scale_width: u32) -> OverlayResult<u64>;

    /// Encode a numbered frame sequence into a video without audio. Returns the output path.
    fn encode(&self, req: &EncodeRequest) -> OverlayResult<PathBuf>;

    /// Copy the video stream of `silent` and the audio stream of `original` (when present) into
    /// `out_path` without re-encoding. Returns the output path.
    fn remux(&self, silent: &Path, original: &Path, out_path: &Path) -> OverlayResult<PathBuf>;
}

/// Count the numbered frames in `dir` and check they form `1..=N` without gaps.
///
/// Files whose stem is not a number are ignored. A missing directory, an empty sequence or a gap
/// are decode failures.
pub fn scan_frame_sequence(dir: &Path) -> OverlayResult<u64> {
    let rd = std::fs::read_dir(dir)
        .with_context(|| format!("read frame directory '{}'", dir.display()))?;

    let mut indices = Vec::new();
    for entry in rd {
        let entry = entry.with_context(|| format!("list frame directory '{}'", dir.display()))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        let Some(idx) = path
            .file_stem()
            .and_then(|s| s.to_str())
            .and_then(|s| s.parse::<u64>().ok())
        else {
            continue;
        };
        indices.push(idx);
    }

    if indices.is_empty() {
        return Err(OverlayError::decode(format!(
            "no frames were extracted into '{}'",
            dir.display()
        )));
    }

    indices.sort_unstable();
    for (expected, &got) in (FrameIndex::FIRST.0..).zip(&indices) {
        if got != expected {
            return Err(OverlayError::decode(format!(
                "frame sequence in '{}' is not contiguous: expected {expected}.png, found {got}.png",
                dir.display()
            )));
        }
    }

    Ok(indices.len() as u64)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/transcoder.rs"]
mod tests;
