use serde::{Deserialize, Serialize};

use crate::error::FrameLoopError;

/// Returns the default steady-state frame rate.
fn default_target_fps() -> f64 {
    60.0
}

/// Configuration for a [`FramePacer`](crate::pacer::FramePacer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PacerConfig {
    /// Desired steady-state frame rate.
    #[serde(default = "default_target_fps")]
    pub target_fps: f64,
    /// Enable automatic target-interval adjustment.
    pub adaptive: bool,
    /// Lower bound the adaptive controller may throttle down to.
    pub min_fps: f64,
    /// Upper bound the adaptive controller may speed up to.
    pub max_fps: f64,
}

impl PacerConfig {
    /// Create the default configuration (60 FPS target, adaptive, 15..120).
    #[inline]
    pub fn new() -> Self {
        Self {
            target_fps: default_target_fps(),
            adaptive: true,
            min_fps: 15.0,
            max_fps: 120.0,
        }
    }

    /// Set the target frame rate.
    #[inline]
    pub fn with_target_fps(mut self, fps: f64) -> Self {
        self.target_fps = fps;
        self
    }

    /// Enable or disable adaptive interval adjustment.
    #[inline]
    pub fn with_adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Set the adaptive bounds.
    #[inline]
    pub fn with_fps_bounds(mut self, min_fps: f64, max_fps: f64) -> Self {
        self.min_fps = min_fps;
        self.max_fps = max_fps;
        self
    }

    /// Validate rates: all positive and finite, `min_fps <= max_fps`.
    pub fn validate(&self) -> Result<(), FrameLoopError> {
        for fps in [self.target_fps, self.min_fps, self.max_fps] {
            if fps <= 0.0 || !fps.is_finite() {
                return Err(FrameLoopError::InvalidFrameRate { fps });
            }
        }
        if self.min_fps > self.max_fps {
            return Err(FrameLoopError::InvalidConfig {
                reason: format!(
                    "min_fps {} exceeds max_fps {}",
                    self.min_fps, self.max_fps
                ),
            });
        }
        Ok(())
    }

    /// Clamp a requested rate into the configured bounds.
    #[inline]
    pub fn clamp_fps(&self, fps: f64) -> f64 {
        fps.clamp(self.min_fps, self.max_fps)
    }

    /// Interval for the configured target rate, clamped into bounds.
    #[inline]
    pub fn target_interval_ms(&self) -> f64 {
        1000.0 / self.clamp_fps(self.target_fps)
    }

    /// Shortest interval the adaptive controller may reach (1000 / max_fps).
    #[inline]
    pub fn min_interval_ms(&self) -> f64 {
        1000.0 / self.max_fps
    }

    /// Longest interval the adaptive controller may reach (1000 / min_fps).
    #[inline]
    pub fn max_interval_ms(&self) -> f64 {
        1000.0 / self.min_fps
    }
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self::new()
    }
}
