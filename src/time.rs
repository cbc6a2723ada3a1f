/**
 * Time handling for the frame loop.
 * Timestamps and durations share one representation: u64 nanoseconds,
 * which keeps Ord cheap and avoids float drift when accumulating frames.
 */
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::FrameLoopError;

/// A point (or span) on the frame clock.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Serialize, Deserialize, Default)]
pub struct FrameTime(u64);

impl FrameTime {
    /// Create a frame time from nanoseconds.
    #[inline]
    pub fn from_nanos(nanoseconds: u64) -> Self {
        Self(nanoseconds)
    }

    /// Create a frame time from milliseconds.
    #[inline]
    pub fn from_millis(milliseconds: f64) -> Result<Self, FrameLoopError> {
        Self::from_seconds(milliseconds / 1000.0)
    }

    /// Create a frame time from seconds.
    #[inline]
    pub fn from_seconds(seconds: f64) -> Result<Self, FrameLoopError> {
        if seconds < 0.0 || !seconds.is_finite() {
            return Err(FrameLoopError::InvalidTime { time: seconds });
        }
        let nanos = (seconds * 1_000_000_000.0) as u64;
        Ok(Self(nanos))
    }

    /// Zero time.
    #[inline]
    pub fn zero() -> Self {
        Self(0)
    }

    /// Get time in seconds.
    #[inline]
    pub fn as_seconds(&self) -> f64 {
        self.0 as f64 / 1_000_000_000.0
    }

    /// Get time in milliseconds.
    #[inline]
    pub fn as_millis(&self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Get time in nanoseconds.
    #[inline]
    pub fn as_nanos(&self) -> u64 {
        self.0
    }

    /// Difference between two times. Errors when `earlier` is actually later.
    #[inline]
    pub fn duration_since(&self, earlier: FrameTime) -> Result<FrameTime, FrameLoopError> {
        if self.0 < earlier.0 {
            return Err(FrameLoopError::InvalidTime {
                time: (self.0 as f64 - earlier.0 as f64) / 1_000_000_000.0,
            });
        }
        Ok(FrameTime(self.0 - earlier.0))
    }

    /// Difference between two times, clamped to zero when `earlier` is later.
    #[inline]
    pub fn saturating_since(&self, earlier: FrameTime) -> FrameTime {
        FrameTime(self.0.saturating_sub(earlier.0))
    }

    /// Clamp time to a range.
    #[inline]
    pub fn clamp(&self, min: FrameTime, max: FrameTime) -> Self {
        if self.0 < min.0 {
            min
        } else if self.0 > max.0 {
            max
        } else {
            *self
        }
    }
}

impl std::ops::Add for FrameTime {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::ops::AddAssign for FrameTime {
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl std::ops::Sub for FrameTime {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl std::ops::SubAssign for FrameTime {
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl From<Duration> for FrameTime {
    fn from(duration: Duration) -> Self {
        FrameTime::from_nanos(duration.as_nanos() as u64)
    }
}

impl From<FrameTime> for Duration {
    fn from(time: FrameTime) -> Self {
        Duration::from_nanos(time.0)
    }
}

/// A half-open window on the frame clock, used for progress math.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub start: FrameTime,
    pub end: FrameTime,
}

impl TimeSpan {
    /// Create a new span. `start` must not come after `end`.
    #[inline]
    pub fn new(start: FrameTime, end: FrameTime) -> Result<Self, FrameLoopError> {
        if start > end {
            return Err(FrameLoopError::TimeOutOfRange {
                time: start.as_seconds(),
                start: 0.0,
                end: end.as_seconds(),
            });
        }
        Ok(Self { start, end })
    }

    /// Span from zero to the given duration.
    #[inline]
    pub fn from_duration(duration: FrameTime) -> Self {
        Self {
            start: FrameTime::zero(),
            end: duration,
        }
    }

    /// Length of this span.
    #[inline]
    pub fn duration(&self) -> FrameTime {
        FrameTime(self.end.0 - self.start.0)
    }

    /// Check if a time falls within this span (inclusive).
    #[inline]
    pub fn contains(&self, time: FrameTime) -> bool {
        time >= self.start && time <= self.end
    }

    /// Normalize a time within this span to [0, 1].
    #[inline]
    pub fn normalize_time(&self, time: FrameTime) -> f64 {
        if self.duration().as_seconds() == 0.0 {
            return 0.0;
        }
        ((time.as_seconds() - self.start.as_seconds()) / self.duration().as_seconds())
            .clamp(0.0, 1.0)
    }

    /// Denormalize a fraction in [0, 1] back into this span.
    #[inline]
    pub fn denormalize_time(&self, normalized: f64) -> FrameTime {
        let clamped = normalized.clamp(0.0, 1.0);
        let seconds = self.start.as_seconds() + clamped * self.duration().as_seconds();
        FrameTime::from_seconds(seconds).unwrap_or_else(|_| self.end)
    }
}
