use std::path::PathBuf;

use crate::foundation::error::OverlayResult;
use crate::pipeline::orchestrator::Pipeline;
use crate::pipeline::workspace::Workspace;

pub use crate::pipeline::job::JobRequest as ProcessRequest;

/// Status and message returned to the caller of a `process` request.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ProcessResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Human-readable message.
    pub message: String,
}

impl ProcessResponse {
    fn new(status: u16, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }

    /// 200 "Success".
    pub fn success() -> Self {
        Self::new(200, "Success")
    }

    /// 405 "Method Not Allowed".
    pub fn method_not_allowed() -> Self {
        Self::new(405, "Method Not Allowed")
    }

    /// 500 for a body that cannot be parsed or exceeds field limits.
    pub fn bad_fields() -> Self {
        Self::new(500, "Failed to process bio and creatorName")
    }

    /// 500 for a job that failed in any stage.
    pub fn video_failed() -> Self {
        Self::new(500, "Failed to process video")
    }

    /// `true` for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Handle one `process` request: `method` must be `POST` and `body` a JSON
/// `{ "bio": ..., "creatorName": ... }` document.
///
/// Runs the whole job synchronously. Failure details go to the log; the response only says which
/// side failed.
pub fn handle_process(method: &str, body: &[u8], pipeline: &Pipeline) -> ProcessResponse {
    if !method.eq_ignore_ascii_case("POST") {
        tracing::warn!(method, "rejecting non-POST process request");
        return ProcessResponse::method_not_allowed();
    }

    let request: ProcessRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(error = %e, "unparseable process request body");
            return ProcessResponse::bad_fields();
        }
    };
    if let Err(e) = request.validate() {
        tracing::warn!(error = %e, "process request rejected");
        return ProcessResponse::bad_fields();
    }

    let report = pipeline.run(&request);
    match report.outcome.error() {
        None => ProcessResponse::success(),
        Some(e) => {
            tracing::error!(error = %e, "video processing failed");
            ProcessResponse::video_failed()
        }
    }
}

/// Path of the finished video to hand out for download.
pub fn locate_download(workspace: &Workspace) -> OverlayResult<PathBuf> {
    workspace.finished_output()
}

#[cfg(test)]
#[path = "../../tests/unit/api/process.rs"]
mod tests;
