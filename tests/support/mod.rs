#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use bioslide::encode::transcoder::scan_frame_sequence;
use bioslide::overlay::layout::{Anchor, BioCardLayout, LogoCardLayout};
use bioslide::{
    EncodeRequest, Fps, MediaTranscoder, OverlayError, OverlayLayout, OverlayResult,
    PipelineConfig, VideoProbe, Workspace,
};

pub const FRAME_W: u32 = 64;
pub const FRAME_H: u32 = 48;

/// Media step the fake transcoder should fail at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailAt {
    Probe,
    Extract,
    Encode,
    Remux,
}

/// Stand-in for ffmpeg: writes solid-color PNG frames, snapshots the frame directories when asked
/// to encode and writes placeholder video files.
pub struct FakeTranscoder {
    pub frames: u64,
    pub has_audio: bool,
    pub fail_at: Option<FailAt>,
    pub capture_dir: PathBuf,
    pub calls: Arc<Mutex<Vec<String>>>,
    /// After a successful remux, turn this path's parent directory into a regular file so the
    /// path can no longer be removed.
    pub block_removal_of: Option<PathBuf>,
}

impl FakeTranscoder {
    pub fn new(frames: u64, capture_dir: &Path) -> Self {
        Self {
            frames,
            has_audio: true,
            fail_at: None,
            capture_dir: capture_dir.to_path_buf(),
            calls: Arc::new(Mutex::new(Vec::new())),
            block_removal_of: None,
        }
    }

    pub fn failing_at(mut self, step: FailAt) -> Self {
        self.fail_at = Some(step);
        self
    }

    fn log(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

/// Deterministic color of raw frame `n`.
pub fn raw_color(n: u64) -> [u8; 4] {
    [(n % 256) as u8, (n * 7 % 256) as u8, 90, 255]
}

impl MediaTranscoder for FakeTranscoder {
    fn probe(&self, _video: &Path) -> OverlayResult<VideoProbe> {
        self.log("probe");
        if self.fail_at == Some(FailAt::Probe) {
            return Err(OverlayError::decode("fake probe failure"));
        }
        Ok(VideoProbe {
            fps: Some(Fps::new(30, 1)?),
            has_audio: self.has_audio,
        })
    }

    fn extract(&self, _video: &Path, out_dir: &Path, _scale_width: u32) -> OverlayResult<u64> {
        self.log("extract");
        if self.fail_at == Some(FailAt::Extract) {
            return Err(OverlayError::decode("fake extract failure"));
        }
        for n in 1..=self.frames {
            write_png(&out_dir.join(format!("{n}.png")), FRAME_W, FRAME_H, raw_color(n));
        }
        scan_frame_sequence(out_dir)
    }

    fn encode(&self, req: &EncodeRequest) -> OverlayResult<PathBuf> {
        self.log("encode");
        if self.fail_at == Some(FailAt::Encode) {
            return Err(OverlayError::encode("fake encode failure"));
        }
        scan_frame_sequence(&req.frame_dir)?;
        copy_dir(&req.frame_dir, &self.capture_dir.join("edited"));
        if let Some(temp) = req.frame_dir.parent() {
            copy_dir(&temp.join("raw-frames"), &self.capture_dir.join("raw"));
        }
        std::fs::write(&req.out_path, b"silent video").unwrap();
        Ok(req.out_path.clone())
    }

    fn remux(&self, _silent: &Path, _original: &Path, out_path: &Path) -> OverlayResult<PathBuf> {
        self.log("remux");
        if self.fail_at == Some(FailAt::Remux) {
            std::fs::write(out_path, b"partial").unwrap();
            return Err(OverlayError::remux("fake remux failure"));
        }
        std::fs::write(out_path, b"finished video").unwrap();
        if let Some(parent) = self.block_removal_of.as_deref().and_then(Path::parent) {
            std::fs::remove_dir_all(parent).unwrap();
            std::fs::write(parent, b"not a directory").unwrap();
        }
        Ok(out_path.to_path_buf())
    }
}

pub fn write_png(path: &Path, w: u32, h: u32, px: [u8; 4]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbaImage::from_pixel(w, h, image::Rgba(px))
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn copy_dir(from: &Path, to: &Path) {
    std::fs::create_dir_all(to).unwrap();
    for entry in std::fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), to.join(entry.file_name())).unwrap();
    }
}

/// Card geometry scaled down to the small test frames.
pub fn small_config() -> PipelineConfig {
    let mut cfg = PipelineConfig::default();
    cfg.layout = OverlayLayout {
        bio_card: BioCardLayout {
            top: 10,
            slide_width: 40.0,
            bubble: Anchor::new(1, 1),
            avatar: Anchor::new(2, 2),
            avatar_height: 8,
            name: Anchor::new(12, 1),
            name_size_px: 6.0,
            line1: Anchor::new(12, 6),
            line2: Anchor::new(12, 9),
            body_size_px: 3.0,
        },
        logo_card: LogoCardLayout {
            top: 30,
            slide_width: 30.0,
            logo: Anchor::new(2, 2),
            logo_width: 10,
            logo_height: 4,
        },
        ..OverlayLayout::default()
    };
    cfg
}

/// Write the static art and the three uploaded inputs.
pub fn seed_workspace(ws: &Workspace) {
    write_png(&ws.bio_card_art(), 40, 12, [240, 240, 240, 255]);
    write_png(&ws.bubble_art(), 10, 10, [0, 0, 0, 0]);
    write_png(&ws.avatar_stencil(), 8, 8, [255, 255, 255, 255]);
    write_png(&ws.logo_card_art(), 30, 10, [20, 200, 20, 255]);
    seed_inputs(ws);
}

/// Write only the uploaded inputs.
pub fn seed_inputs(ws: &Workspace) {
    if let Some(parent) = ws.input_video().parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(ws.input_video(), b"not really an mp4").unwrap();
    write_png(&ws.creator_image(), 16, 16, [200, 40, 40, 255]);
    write_png(&ws.logo_image(), 20, 8, [10, 10, 10, 255]);
}

pub fn frame_pixels(path: &Path) -> Vec<u8> {
    image::open(path).unwrap().to_rgba8().into_raw()
}
