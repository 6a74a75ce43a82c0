use std::path::PathBuf;

use crate::foundation::error::{OverlayError, OverlayResult};

/// Longest accepted `bio` / `creatorName`, in characters.
pub const MAX_FIELD_CHARS: usize = 40;

/// Text fields submitted with a job.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    /// Short creator bio, wrapped over at most two lines.
    pub bio: String,
    /// Creator display name.
    pub creator_name: String,
}

impl JobRequest {
    /// Build a request.
    pub fn new(creator_name: impl Into<String>, bio: impl Into<String>) -> Self {
        Self {
            bio: bio.into(),
            creator_name: creator_name.into(),
        }
    }

    /// Enforce the length limit on both fields.
    pub fn validate(&self) -> OverlayResult<()> {
        for (field, value) in [("creatorName", &self.creator_name), ("bio", &self.bio)] {
            let n = value.chars().count();
            if n > MAX_FIELD_CHARS {
                return Err(OverlayError::validation(format!(
                    "{field} must be at most {MAX_FIELD_CHARS} characters, got {n}"
                )));
            }
        }
        Ok(())
    }
}

/// Lifecycle state of a job.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStage {
    /// Inputs and workspace being checked.
    Init,
    /// Source video being split into frames.
    Decoding,
    /// Cards being built and frames annotated.
    Annotating,
    /// Annotated frames being encoded.
    Encoding,
    /// Original audio being copied onto the encode.
    Remuxing,
    /// Temp files and inputs being removed.
    CleaningUp,
    /// Output written.
    Succeeded,
    /// A stage failed.
    Failed,
}

impl JobStage {
    /// `true` for [`JobStage::Succeeded`] and [`JobStage::Failed`].
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Whether the state machine allows moving from `self` to `next`.
    ///
    /// Work stages advance strictly in order; any non-terminal stage may drop to cleanup, and
    /// cleanup ends in one of the terminal stages.
    pub fn can_advance(self, next: JobStage) -> bool {
        use JobStage::*;
        match (self, next) {
            (Init, Decoding)
            | (Decoding, Annotating)
            | (Annotating, Encoding)
            | (Encoding, Remuxing)
            | (CleaningUp, Succeeded)
            | (CleaningUp, Failed) => true,
            (from, CleaningUp) => !from.is_terminal() && from != CleaningUp,
            _ => false,
        }
    }

    /// Stable lowercase name for logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Decoding => "decoding",
            Self::Annotating => "annotating",
            Self::Encoding => "encoding",
            Self::Remuxing => "remuxing",
            Self::CleaningUp => "cleaning_up",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for JobStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a job ended.
#[derive(Debug)]
pub enum JobOutcome {
    /// The finished video was written.
    Succeeded {
        /// Finished video path.
        output: PathBuf,
    },
    /// A stage failed; cleanup still ran.
    Failed {
        /// Stage that was active when the error surfaced.
        stage: JobStage,
        /// The error.
        error: OverlayError,
    },
}

impl JobOutcome {
    /// `true` for [`JobOutcome::Succeeded`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// The error of a failed job.
    pub fn error(&self) -> Option<&OverlayError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            Self::Succeeded { .. } => None,
        }
    }
}

/// Final record of a job run.
#[derive(Debug)]
pub struct JobReport {
    /// The request that was processed.
    pub request: JobRequest,
    /// Every stage the job passed through, in order.
    pub stages: Vec<JobStage>,
    /// Frames decoded from the source (0 if decoding never finished).
    pub frames: u64,
    /// Last reported progress percent.
    pub progress_percent: u8,
    /// Result.
    pub outcome: JobOutcome,
}

/// In-flight state of one job.
#[derive(Debug)]
pub struct Job {
    request: JobRequest,
    stage: JobStage,
    stages: Vec<JobStage>,
    frames: u64,
    progress_percent: u8,
}

impl Job {
    /// New job in [`JobStage::Init`].
    pub fn new(request: JobRequest) -> Self {
        Self {
            request,
            stage: JobStage::Init,
            stages: vec![JobStage::Init],
            frames: 0,
            progress_percent: 0,
        }
    }

    /// The submitted request.
    pub fn request(&self) -> &JobRequest {
        &self.request
    }

    /// Current stage.
    pub fn stage(&self) -> JobStage {
        self.stage
    }

    /// Stages visited so far.
    pub fn stages(&self) -> &[JobStage] {
        &self.stages
    }

    /// Decoded frame count.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Last reported progress percent.
    pub fn progress_percent(&self) -> u8 {
        self.progress_percent
    }

    /// Move to `next`, rejecting transitions the lifecycle does not allow.
    pub fn enter(&mut self, next: JobStage) -> OverlayResult<()> {
        if !self.stage.can_advance(next) {
            return Err(OverlayError::validation(format!(
                "illegal job transition {} -> {}",
                self.stage, next
            )));
        }
        tracing::info!(from = %self.stage, to = %next, "job stage");
        self.stage = next;
        self.stages.push(next);
        Ok(())
    }

    pub(crate) fn set_frames(&mut self, frames: u64) {
        self.frames = frames;
    }

    pub(crate) fn record_progress(&mut self, percent: u8) {
        self.progress_percent = percent;
    }

    /// Close the job from [`JobStage::CleaningUp`] with the pipeline result.
    ///
    /// `failed_stage` is the stage that was active when `result` was produced.
    pub fn finish(mut self, result: OverlayResult<PathBuf>, failed_stage: JobStage) -> JobReport {
        let outcome = match result {
            Ok(output) => match self.enter(JobStage::Succeeded) {
                Ok(()) => JobOutcome::Succeeded { output },
                Err(error) => JobOutcome::Failed {
                    stage: self.stage,
                    error,
                },
            },
            Err(error) => {
                if let Err(e) = self.enter(JobStage::Failed) {
                    tracing::warn!(error = %e, "could not mark job failed");
                }
                JobOutcome::Failed {
                    stage: failed_stage,
                    error,
                }
            }
        };

        JobReport {
            request: self.request,
            stages: self.stages,
            frames: self.frames,
            progress_percent: self.progress_percent,
            outcome,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/job.rs"]
mod tests;
