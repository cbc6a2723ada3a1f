use serde::{Deserialize, Serialize};

use crate::ease::Easing;
use crate::error::FrameLoopError;
use crate::time::FrameTime;

/// Defines what happens when a cycle completes with repeats remaining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Restart each cycle from the beginning.
    Loop,
    /// Alternate direction: reversed cycles report progress from 1 to 0.
    Reverse,
    /// Alternate direction by mirroring the easing curve; progress still runs
    /// 0 to 1 every cycle.
    Mirror,
}

impl Default for RepeatMode {
    fn default() -> Self {
        RepeatMode::Loop
    }
}

/// Configurable settings for a [`Timeline`](crate::timeline::Timeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Length of one cycle.
    pub duration: FrameTime,
    /// Deferral between `start` and the first running tick.
    pub delay: FrameTime,
    /// Easing applied to the elapsed fraction.
    pub easing: Easing,
    /// Number of additional cycles after the first.
    pub repeat: u32,
    /// Behavior at each cycle boundary.
    pub repeat_mode: RepeatMode,
    /// Deferral before each repeated cycle begins.
    pub repeat_delay: FrameTime,
}

impl TimelineConfig {
    /// Create the default configuration: one 1000 ms cycle, no delay,
    /// ease-in/out, no repeats.
    #[inline]
    pub fn new() -> Self {
        Self {
            duration: FrameTime::from_nanos(1_000_000_000),
            delay: FrameTime::zero(),
            easing: Easing::default(),
            repeat: 0,
            repeat_mode: RepeatMode::default(),
            repeat_delay: FrameTime::zero(),
        }
    }

    /// Set the cycle duration.
    #[inline]
    pub fn with_duration(mut self, duration: impl Into<FrameTime>) -> Self {
        self.duration = duration.into();
        self
    }

    /// Set the initial delay.
    #[inline]
    pub fn with_delay(mut self, delay: impl Into<FrameTime>) -> Self {
        self.delay = delay.into();
        self
    }

    /// Set the easing policy.
    #[inline]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Set the repeat count and boundary behavior.
    #[inline]
    pub fn with_repeat(mut self, repeat: u32, mode: RepeatMode) -> Self {
        self.repeat = repeat;
        self.repeat_mode = mode;
        self
    }

    /// Set the deferral before each repeated cycle.
    #[inline]
    pub fn with_repeat_delay(mut self, delay: impl Into<FrameTime>) -> Self {
        self.repeat_delay = delay.into();
        self
    }

    /// Validate the configuration: the cycle duration must be positive.
    pub fn validate(&self) -> Result<(), FrameLoopError> {
        if self.duration == FrameTime::zero() {
            return Err(FrameLoopError::InvalidConfig {
                reason: "duration must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self::new()
    }
}
