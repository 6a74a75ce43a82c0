use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::encode::tool::{ToolCommand, ToolFailure, is_tool_on_path};
use crate::encode::transcoder::{EncodeRequest, MediaTranscoder, VideoProbe, scan_frame_sequence};
use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{OverlayError, OverlayResult};

/// `printf`-style pattern the image2 muxer expands to `1.png`, `2.png`, ...
pub const FRAME_PATTERN: &str = "%d.png";

/// [`MediaTranscoder`] backed by the system `ffmpeg` and `ffprobe` binaries.
#[derive(Clone, Debug)]
pub struct FfmpegTranscoder {
    ffmpeg: PathBuf,
    ffprobe: PathBuf,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg", "ffprobe")
    }
}

impl FfmpegTranscoder {
    /// Use explicit binaries (names are resolved through `PATH`).
    pub fn new(ffmpeg: impl Into<PathBuf>, ffprobe: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg: ffmpeg.into(),
            ffprobe: ffprobe.into(),
        }
    }

    /// `true` when both binaries run.
    pub fn is_available(&self) -> bool {
        is_tool_on_path(&self.ffmpeg) && is_tool_on_path(&self.ffprobe)
    }
}

/// Arguments decoding `video` into scaled, numbered PNG frames in `out_dir`.
///
/// Height uses `-2` so it follows the aspect ratio while staying even, which yuv420p output
/// requires.
pub fn decode_args(video: &Path, out_dir: &Path, scale_width: u32) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-v".into(),
        "error".into(),
        "-i".into(),
        video.as_os_str().to_os_string(),
        "-vf".into(),
        format!("scale={scale_width}:-2").into(),
        "-start_number".into(),
        FrameIndex::FIRST.0.to_string().into(),
        out_dir.join(FRAME_PATTERN).into_os_string(),
    ]
}

/// Arguments muxing a numbered frame sequence into a silent video.
pub fn encode_args(req: &EncodeRequest) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec!["-y".into(), "-v".into(), "error".into()];
    if let Some(fps) = req.fps {
        args.push("-framerate".into());
        args.push(fps.to_string().into());
    }
    args.extend([
        "-start_number".into(),
        req.start_number.to_string().into(),
        "-i".into(),
        req.frame_dir.join(FRAME_PATTERN).into_os_string(),
        "-an".into(),
        "-c:v".into(),
        req.codec.clone().into(),
        "-pix_fmt".into(),
        req.pixel_format.clone().into(),
        req.out_path.as_os_str().to_os_string(),
    ]);
    args
}

/// Arguments copying video from `silent` and the first audio stream of `original`, if any.
pub fn remux_args(silent: &Path, original: &Path, out_path: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-v".into(),
        "error".into(),
        "-i".into(),
        silent.as_os_str().to_os_string(),
        "-i".into(),
        original.as_os_str().to_os_string(),
        "-c".into(),
        "copy".into(),
        "-map".into(),
        "0:v:0".into(),
        // Trailing `?` makes the audio mapping optional.
        "-map".into(),
        "1:a:0?".into(),
        out_path.as_os_str().to_os_string(),
    ]
}

/// Arguments asking `ffprobe` for stream metadata as JSON.
pub fn probe_args(video: &Path) -> Vec<OsString> {
    vec![
        "-v".into(),
        "error".into(),
        "-print_format".into(),
        "json".into(),
        "-show_streams".into(),
        video.as_os_str().to_os_string(),
    ]
}

/// Parse `ffprobe -print_format json -show_streams` output.
pub fn parse_probe_json(bytes: &[u8]) -> OverlayResult<VideoProbe> {
    #[derive(serde::Deserialize)]
    struct ProbeStream {
        codec_type: Option<String>,
        avg_frame_rate: Option<String>,
        r_frame_rate: Option<String>,
    }
    #[derive(serde::Deserialize)]
    struct ProbeOut {
        #[serde(default)]
        streams: Vec<ProbeStream>,
    }

    let parsed: ProbeOut = serde_json::from_slice(bytes)
        .map_err(|e| OverlayError::decode(format!("ffprobe json parse failed: {e}")))?;
    let video = parsed
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or_else(|| OverlayError::decode("no video stream found"))?;

    // `0/0` shows up for streams without a stable rate; treat it as unknown.
    let fps = [video.avg_frame_rate.as_deref(), video.r_frame_rate.as_deref()]
        .into_iter()
        .flatten()
        .find_map(|r| Fps::parse_ratio(r).ok());
    let has_audio = parsed
        .streams
        .iter()
        .any(|s| s.codec_type.as_deref() == Some("audio"));

    Ok(VideoProbe { fps, has_audio })
}

impl MediaTranscoder for FfmpegTranscoder {
    #[tracing::instrument(skip(self))]
    fn probe(&self, video: &Path) -> OverlayResult<VideoProbe> {
        let out = ToolCommand::new(&self.ffprobe)
            .args(probe_args(video))
            .run()
            .map_err(|e| stage_error(OverlayError::Decode, "probe", e))?;
        parse_probe_json(&out.stdout)
    }

    #[tracing::instrument(skip(self))]
    fn extract(&self, video: &Path, out_dir: &Path, scale_width: u32) -> OverlayResult<u64> {
        if scale_width == 0 || !scale_width.is_multiple_of(2) {
            return Err(OverlayError::validation(format!(
                "scale width must be a non-zero even number, got {scale_width}"
            )));
        }
        ToolCommand::new(&self.ffmpeg)
            .args(decode_args(video, out_dir, scale_width))
            .run()
            .map_err(|e| stage_error(OverlayError::Decode, "decode", e))?;
        scan_frame_sequence(out_dir)
    }

    #[tracing::instrument(skip(self))]
    fn encode(&self, req: &EncodeRequest) -> OverlayResult<PathBuf> {
        ToolCommand::new(&self.ffmpeg)
            .args(encode_args(req))
            .run()
            .map_err(|e| stage_error(OverlayError::Encode, "encode", e))?;
        Ok(req.out_path.clone())
    }

    #[tracing::instrument(skip(self))]
    fn remux(&self, silent: &Path, original: &Path, out_path: &Path) -> OverlayResult<PathBuf> {
        ToolCommand::new(&self.ffmpeg)
            .args(remux_args(silent, original, out_path))
            .run()
            .map_err(|e| stage_error(OverlayError::Remux, "remux", e))?;
        Ok(out_path.to_path_buf())
    }
}

fn stage_error(make: fn(String) -> OverlayError, step: &str, failure: ToolFailure) -> OverlayError {
    make(format!("{step} failed: {failure}"))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
