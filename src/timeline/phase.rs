use serde::{Deserialize, Serialize};

/// Discrete lifecycle state of one animation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Not yet started
    Idle,
    /// Started, waiting for the first tick (or an initial delay) to elapse
    Starting,
    /// Advancing progress every tick
    Running,
    /// Frozen mid-run
    Paused,
    /// Reached the end of the final cycle
    Completed,
    /// Cancelled by the caller
    Cancelled,
}

impl Phase {
    /// Get the name of this phase
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Check if a run can be started from this phase
    #[inline]
    pub fn can_start(&self) -> bool {
        matches!(self, Self::Idle | Self::Completed | Self::Cancelled)
    }

    /// Check if the run can be paused
    #[inline]
    pub fn can_pause(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Check if the run can be resumed
    #[inline]
    pub fn can_resume(&self) -> bool {
        matches!(self, Self::Paused)
    }

    /// Check if the run still consumes ticks
    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Starting | Self::Running)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}
