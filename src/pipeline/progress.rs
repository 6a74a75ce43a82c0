use crate::foundation::core::FrameIndex;

/// One emitted progress notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProgressUpdate {
    /// Frame that triggered the notification.
    pub frame: FrameIndex,
    /// Total frames in the job.
    pub total_frames: u64,
    /// Floored percent complete.
    pub percent: u8,
}

/// Threshold-crossing progress throttle, owned by a single job.
///
/// A notification fires only when the floored percent exceeds the last reported percent by more
/// than ten points. Large jumps between calls can skip several deciles at once.
#[derive(Clone, Debug, Default)]
pub struct ProgressTracker {
    last_reported_percent: u8,
}

impl ProgressTracker {
    /// Fresh tracker with `last_reported_percent = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last percent that produced a notification (0 before the first one).
    pub fn last_reported_percent(&self) -> u8 {
        self.last_reported_percent
    }

    /// Record that frame `current` of `total_frames` is done.
    pub fn on_frame(&mut self, current: FrameIndex, total_frames: u64) -> Option<ProgressUpdate> {
        if total_frames == 0 {
            return None;
        }
        let percent = (u128::from(current.0) * 100 / u128::from(total_frames)).min(100) as u8;
        if u16::from(percent) <= u16::from(self.last_reported_percent) + 10 {
            return None;
        }
        self.last_reported_percent = percent;
        Some(ProgressUpdate {
            frame: current,
            total_frames,
            percent,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/progress.rs"]
mod tests;
