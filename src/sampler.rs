//! Frame duration sampling and rate statistics.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::error::FrameLoopError;

/// Number of recent frame durations retained for the rolling average.
pub const FRAME_HISTORY_LEN: usize = 60;

/// A frame counts as dropped when its duration exceeds this multiple of the
/// current target interval.
pub const DROPPED_FRAME_FACTOR: f64 = 1.5;

/// Floor applied to durations before rate math. A zero-length frame yields a
/// large finite FPS instead of infinity.
pub const MIN_FRAME_DURATION_MS: f64 = 1.0e-3;

/// Frame rate statistics for one sampling session.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameStats {
    /// Instantaneous rate: 1000 / last frame duration in ms.
    pub current_fps: f64,
    /// Rolling rate: 1000 / mean of the retained frame durations.
    pub average_fps: f64,
    /// Last frame duration in ms.
    pub frame_time_ms: f64,
    /// Frames whose duration exceeded the dropped-frame threshold.
    pub dropped: u64,
    /// Frames processed since the last reset. Always >= `dropped`.
    pub total: u64,
}

impl FrameStats {
    /// Create zeroed stats.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all fields to zero.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Records consecutive frame durations and derives [`FrameStats`].
///
/// The caller guarantees monotonically increasing timestamps upstream, so a
/// duration is always a non-negative finite number of milliseconds.
#[derive(Debug, Clone, Default)]
pub struct FrameSampler {
    history: VecDeque<f64>,
    stats: FrameStats,
}

impl FrameSampler {
    /// Create a new sampler with empty history.
    pub fn new() -> Self {
        Self {
            history: VecDeque::with_capacity(FRAME_HISTORY_LEN),
            stats: FrameStats::new(),
        }
    }

    /// Record one frame duration and refresh the statistics.
    ///
    /// `target_interval_ms` is the pacer's current target interval, used only
    /// for the dropped-frame comparison (against the raw duration).
    pub fn record_frame(
        &mut self,
        duration_ms: f64,
        target_interval_ms: f64,
    ) -> Result<&FrameStats, FrameLoopError> {
        if duration_ms < 0.0 || !duration_ms.is_finite() {
            return Err(FrameLoopError::InvalidTime { time: duration_ms });
        }

        let clamped = duration_ms.max(MIN_FRAME_DURATION_MS);
        if self.history.len() == FRAME_HISTORY_LEN {
            self.history.pop_front();
        }
        self.history.push_back(clamped);

        let mean = self.history.iter().sum::<f64>() / self.history.len() as f64;

        self.stats.frame_time_ms = duration_ms;
        self.stats.current_fps = 1000.0 / clamped;
        self.stats.average_fps = 1000.0 / mean;
        self.stats.total += 1;
        if duration_ms > DROPPED_FRAME_FACTOR * target_interval_ms {
            self.stats.dropped += 1;
        }

        Ok(&self.stats)
    }

    /// Current statistics.
    #[inline]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Number of retained duration samples.
    #[inline]
    pub fn sample_count(&self) -> usize {
        self.history.len()
    }

    /// Zero the statistics and clear the duration history.
    pub fn reset(&mut self) {
        self.history.clear();
        self.stats.reset();
    }
}
