use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::assets::store::OverlayAssets;
use crate::encode::ffmpeg::FfmpegTranscoder;
use crate::encode::transcoder::{EncodeRequest, MediaTranscoder};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::overlay::compositor::OverlayCompositor;
use crate::pipeline::config::PipelineConfig;
use crate::pipeline::job::{Job, JobOutcome, JobReport, JobRequest, JobStage};
use crate::pipeline::progress::ProgressTracker;
use crate::pipeline::workspace::Workspace;
use crate::text::svg::TextRenderer;
use crate::text::wrap::wrap_bio;

/// Runs overlay jobs against one working directory.
///
/// Jobs on the same pipeline must not overlap; the working directory is shared state.
pub struct Pipeline {
    workspace: Workspace,
    config: PipelineConfig,
    transcoder: Box<dyn MediaTranscoder>,
}

impl Pipeline {
    /// Pipeline over `root` using the `ffmpeg`/`ffprobe` binaries named in `config`.
    pub fn new(root: impl Into<PathBuf>, config: PipelineConfig) -> Self {
        let transcoder =
            FfmpegTranscoder::new(config.opts.ffmpeg_bin.clone(), config.opts.ffprobe_bin.clone());
        Self::with_transcoder(root, config, Box::new(transcoder))
    }

    /// Pipeline over `root` with a caller-supplied transcoder.
    pub fn with_transcoder(
        root: impl Into<PathBuf>,
        config: PipelineConfig,
        transcoder: Box<dyn MediaTranscoder>,
    ) -> Self {
        let workspace = Workspace::new(root, config.workspace.clone());
        Self {
            workspace,
            config,
            transcoder,
        }
    }

    /// The working directory.
    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// The configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run one job to completion.
    ///
    /// Cleanup runs whatever the outcome; cleanup problems are logged and never change it.
    #[tracing::instrument(skip_all, fields(root = %self.workspace.root().display()))]
    pub fn run(&self, request: &JobRequest) -> JobReport {
        tracing::info!(creator_name = %request.creator_name, "job started");
        let mut job = Job::new(request.clone());

        let result = self.run_stages(&mut job);
        let failed_stage = job.stage();
        if let Err(e) = &result {
            tracing::error!(stage = %failed_stage, kind = ?e.kind(), error = %e, "job stage failed");
        }

        if let Err(e) = job.enter(JobStage::CleaningUp) {
            tracing::warn!(error = %e, "could not enter cleanup stage");
        }
        for failure in self.workspace.cleanup(result.is_ok()) {
            tracing::warn!(
                path = %failure.path.display(),
                error = %failure.error,
                "cleanup step failed"
            );
        }

        let report = job.finish(result, failed_stage);
        match &report.outcome {
            JobOutcome::Succeeded { output } => {
                tracing::info!(output = %output.display(), frames = report.frames, "job succeeded");
            }
            JobOutcome::Failed { stage, .. } => {
                tracing::info!(stage = %stage, "job failed");
            }
        }
        report
    }

    fn run_stages(&self, job: &mut Job) -> OverlayResult<PathBuf> {
        self.config.validate()?;
        job.request().validate()?;
        self.workspace.validate_inputs()?;
        self.workspace.prepare_temp()?;

        let video = self.workspace.input_video();
        let raw_dir = self.workspace.raw_frames_dir();

        job.enter(JobStage::Decoding)?;
        let probe = self.transcoder.probe(&video)?;
        let frames = self
            .transcoder
            .extract(&video, &raw_dir, self.config.opts.scale_width)?;
        if frames == 0 {
            return Err(OverlayError::decode("decoder produced no frames"));
        }
        job.set_frames(frames);
        tracing::info!(frames, fps = ?probe.fps, has_audio = probe.has_audio, "frames decoded");

        job.enter(JobStage::Annotating)?;
        let layout = &self.config.layout;
        let lines = wrap_bio(&job.request().bio, layout.wrap_budget);
        let assets = OverlayAssets::load(&self.workspace)?;
        let fonts_dir = self.workspace.fonts_dir();
        let text = TextRenderer::new(&[fonts_dir.as_path()]);
        let compositor = OverlayCompositor::new(
            &assets,
            &job.request().creator_name,
            &lines,
            layout,
            self.config.timeline,
            &text,
        )?;
        self.annotate_frames(&compositor, frames, job)?;

        job.enter(JobStage::Encoding)?;
        let silent = self.transcoder.encode(&EncodeRequest {
            frame_dir: self.workspace.edited_frames_dir(),
            start_number: FrameIndex::FIRST.0,
            codec: self.config.opts.codec.clone(),
            pixel_format: self.config.opts.pixel_format.clone(),
            fps: probe.fps,
            out_path: self.workspace.silent_video(),
        })?;

        job.enter(JobStage::Remuxing)?;
        if !probe.has_audio {
            tracing::info!("source has no audio stream, output will be silent");
        }
        self.transcoder
            .remux(&silent, &video, &self.workspace.output_video())
    }

    fn annotate_frames(
        &self,
        compositor: &OverlayCompositor,
        total: u64,
        job: &mut Job,
    ) -> OverlayResult<()> {
        let raw_dir = self.workspace.raw_frames_dir();
        let edited_dir = self.workspace.edited_frames_dir();
        let threading = &self.config.opts.threading;
        let mut tracker = ProgressTracker::new();

        if !threading.parallel {
            for f in FrameIndex::FIRST.0..=total {
                let index = FrameIndex(f);
                annotate_one(compositor, &raw_dir, &edited_dir, index)?;
                report_progress(&mut tracker, job, index, total);
            }
            return Ok(());
        }

        let pool = build_thread_pool(threading.threads)?;
        let chunk_size = normalized_chunk_size(threading.chunk_size);

        let mut chunk_start = FrameIndex::FIRST.0;
        while chunk_start <= total {
            let chunk_end = (chunk_start + chunk_size - 1).min(total);
            let indices: Vec<FrameIndex> = (chunk_start..=chunk_end).map(FrameIndex).collect();
            let results: Vec<OverlayResult<()>> = pool.install(|| {
                indices
                    .par_iter()
                    .map(|&index| annotate_one(compositor, &raw_dir, &edited_dir, index))
                    .collect()
            });
            for (index, res) in indices.into_iter().zip(results) {
                res?;
                report_progress(&mut tracker, job, index, total);
            }
            chunk_start = chunk_end + 1;
        }
        Ok(())
    }
}

fn annotate_one(
    compositor: &OverlayCompositor,
    raw_dir: &Path,
    edited_dir: &Path,
    index: FrameIndex,
) -> OverlayResult<()> {
    let name = index.file_name();
    compositor.annotate_file(&raw_dir.join(&name), &edited_dir.join(&name), index)
}

fn report_progress(tracker: &mut ProgressTracker, job: &mut Job, index: FrameIndex, total: u64) {
    if let Some(update) = tracker.on_frame(index, total) {
        tracing::info!(
            frame = update.frame.0,
            total = update.total_frames,
            "Progress: {}%",
            update.percent
        );
        job.record_progress(update.percent);
    }
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    if chunk_size == 0 { 1 } else { chunk_size as u64 }
}

fn build_thread_pool(threads: Option<usize>) -> OverlayResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(OverlayError::validation(
            "annotate threading 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| anyhow::anyhow!("failed to build rayon thread pool: {e}").into())
}
