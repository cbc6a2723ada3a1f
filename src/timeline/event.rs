use serde::{Deserialize, Serialize};

/// Discrete semantic signals emitted while a timeline advances.
///
/// Events accumulate inside the timeline and are drained by the caller after
/// driving it; they carry only what a host needs to mirror the lifecycle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TimelineEvent {
    /// The first tick after `start` (and any initial delay) landed.
    Started,
    /// Progress was recomputed this tick.
    Updated { progress: f64 },
    /// A cycle completed and another one begins.
    Repeated { count: u32 },
    /// The playback direction flipped (Reverse repeat policy).
    Reversed,
    /// The final cycle completed.
    Completed,
    /// The run was cancelled.
    Cancelled,
}
