//! Job orchestration: configuration, workspace handling, lifecycle and progress.

/// Serde-backed job configuration.
pub mod config;
/// Job request, lifecycle stages and final report.
pub mod job;
/// Stage sequencing for one job.
pub mod orchestrator;
/// Threshold-crossing progress notifications.
pub mod progress;
/// Working-directory paths, temp setup and cleanup.
pub mod workspace;
