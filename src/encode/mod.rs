//! External media tool adapters.
//!
//! Decoding, encoding and remuxing are delegated to the system `ffmpeg`/`ffprobe` binaries. The
//! [`transcoder::MediaTranscoder`] trait is the seam the pipeline talks to.

/// `ffmpeg`/`ffprobe` implementation of the transcoder seam.
pub mod ffmpeg;
/// Argument-vector subprocess wrapper with typed failures.
pub mod tool;
/// Transcoder trait and frame sequence helpers.
pub mod transcoder;
