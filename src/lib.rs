//! Frameloop
//!
//! An engine-agnostic core for adaptive frame pacing and animation lifecycle
//! control: frame-rate monitoring with adaptive throttling, per-frame
//! listener fan-out, and an eased, repeatable timeline state machine. The
//! host supplies timestamps and a frame-scheduling facility through the
//! [`clock::ClockSource`] boundary; everything else is synchronous, local
//! computation.

pub mod clock;
pub mod ease;
pub mod env;
pub mod error;
pub mod pacer;
pub mod sampler;
pub mod time;
pub mod timeline;

// Re-export common types for convenience
pub use clock::{ClockHandle, ClockSource, ManualClock, NullClock, SystemClock};
pub use ease::{CubicBezier, Easing};
pub use env::{ColorScheme, HostPreferences, PreferenceSource, StaticPreferences};
pub use error::FrameLoopError;
pub use pacer::{FramePacer, FrameThrottle, ListenerId, PacerConfig};
pub use sampler::{FrameSampler, FrameStats};
pub use time::{FrameTime, TimeSpan};
pub use timeline::{Phase, RepeatMode, Timeline, TimelineConfig, TimelineEvent};

/// Frame loop result type
pub type Result<T> = core::result::Result<T, FrameLoopError>;
