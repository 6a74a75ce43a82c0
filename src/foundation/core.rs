use crate::foundation::error::{OverlayError, OverlayResult};

/// 1-based index of a decoded frame within a job.
///
/// The external decoder numbers its output images starting at 1, so the whole pipeline keeps
/// that convention instead of translating to 0-based indices.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// The first frame of every extracted sequence.
    pub const FIRST: FrameIndex = FrameIndex(1);

    /// File name of this frame inside a frame directory (`"<n>.png"`).
    pub fn file_name(self) -> String {
        format!("{}.png", self.0)
    }
}

impl std::fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> OverlayResult<Self> {
        if den == 0 {
            return Err(OverlayError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(OverlayError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Parse the `num/den` (or bare integer) notation used by `ffprobe`.
    pub fn parse_ratio(s: &str) -> OverlayResult<Self> {
        let s = s.trim();
        let (num, den) = match s.split_once('/') {
            Some((n, d)) => (n.trim(), d.trim()),
            None => (s, "1"),
        };
        let num = num
            .parse::<u32>()
            .map_err(|e| OverlayError::validation(format!("invalid fps numerator '{num}': {e}")))?;
        let den = den.parse::<u32>().map_err(|e| {
            OverlayError::validation(format!("invalid fps denominator '{den}': {e}"))
        })?;
        Self::new(num, den)
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl std::fmt::Display for Fps {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
