//! Adaptive frame pacing: throttle gate, statistics, listener fan-out

pub mod config;
pub mod frame_pacer;
pub mod registry;
pub mod throttle;

pub use config::*;
pub use frame_pacer::*;
pub use registry::*;
pub use throttle::*;
