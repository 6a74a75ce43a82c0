//! Bioslide stamps an animated creator bio card and a logo card onto a short video.
//!
//! A job splits the uploaded video into numbered PNG frames with `ffmpeg`, composites the two
//! cards onto the frames inside the slide window, re-encodes the frames and copies the original
//! audio back on. The entry points are:
//!
//! - [`Pipeline::run`] for one job against a working directory
//! - [`handle_process`] for the request-level contract (status code plus message)
//! - [`OverlayCompositor`] for annotating individual frames
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Slide-in / slide-out schedule.
pub mod animation;
/// Request handling and download lookup.
pub mod api;
/// Raster images and the per-job asset store.
pub mod assets;
/// Pixel compositing, masking and resampling.
pub mod effects;
/// External media tool integration.
pub mod encode;
/// Card construction and per-frame placement.
pub mod overlay;
/// Job configuration, working directory and stage orchestration.
pub mod pipeline;
/// Bio wrapping and text rasterization.
pub mod text;

pub use crate::foundation::core::{Fps, FrameIndex};
pub use crate::foundation::error::{ErrorKind, OverlayError, OverlayResult};

pub use crate::animation::timeline::{AnimationOffsets, AnimationTimeline, SlidePhase};
pub use crate::api::process::{
    ProcessRequest, ProcessResponse, handle_process, locate_download,
};
pub use crate::assets::image::PremulImage;
pub use crate::assets::store::OverlayAssets;
pub use crate::encode::ffmpeg::FfmpegTranscoder;
pub use crate::encode::transcoder::{EncodeRequest, MediaTranscoder, VideoProbe};
pub use crate::overlay::compositor::OverlayCompositor;
pub use crate::overlay::layout::OverlayLayout;
pub use crate::pipeline::config::{AnnotateThreading, PipelineConfig, PipelineOpts};
pub use crate::pipeline::job::{JobOutcome, JobReport, JobRequest, JobStage};
pub use crate::pipeline::orchestrator::Pipeline;
pub use crate::pipeline::progress::{ProgressTracker, ProgressUpdate};
pub use crate::pipeline::workspace::{Workspace, WorkspaceLayout};
pub use crate::text::wrap::{BioLines, wrap_bio};
