use crate::clock::{ClockHandle, ClockSource};
use crate::error::FrameLoopError;
use crate::pacer::config::PacerConfig;
use crate::pacer::registry::{ListenerId, ListenerRegistry};
use crate::sampler::{FrameSampler, FrameStats};
use crate::time::FrameTime;

/// Growth factor applied to the target interval when throttling down.
const INTERVAL_GROWTH: f64 = 1.1;
/// Shrink factor applied to the target interval when speeding back up.
const INTERVAL_SHRINK: f64 = 0.9;
/// Measured rate below this fraction of the target triggers throttling.
const UNDERSHOOT_RATIO: f64 = 0.8;
/// Measured rate above this fraction of the target triggers speed-up.
const OVERSHOOT_RATIO: f64 = 1.1;

/// Listener notified with the new effective rate after an adaptive retune.
pub type FpsChangeListener = Box<dyn FnMut(f64)>;

/// Adaptive frame-rate controller.
///
/// The host delivers every display frame to [`on_frame`](Self::on_frame); the
/// pacer gates how many of those frames are *processed* (stats update and
/// listener fan-out) by the current target interval, and while `adaptive` is
/// enabled it retunes that interval from the measured rate within
/// `[1000/max_fps, 1000/min_fps]`.
///
/// The outstanding clock request is cancelled on [`stop`](Self::stop) and on
/// drop, so a torn-down pacer never receives callbacks.
pub struct FramePacer<C: ClockSource> {
    config: PacerConfig,
    clock: C,
    sampler: FrameSampler,
    registry: ListenerRegistry,
    /// Minimum ms between processed frames under the current adaptive rate.
    target_interval_ms: f64,
    /// Timestamp of the last processed frame; None right after start.
    last_timestamp: Option<FrameTime>,
    pending: Option<ClockHandle>,
    running: bool,
    on_fps_change: Option<FpsChangeListener>,
}

impl<C: ClockSource> FramePacer<C> {
    /// Create a pacer over the given clock.
    pub fn new(config: PacerConfig, clock: C) -> Result<Self, FrameLoopError> {
        config.validate()?;
        let target_interval_ms = config.target_interval_ms();
        Ok(Self {
            config,
            clock,
            sampler: FrameSampler::new(),
            registry: ListenerRegistry::new(),
            target_interval_ms,
            last_timestamp: None,
            pending: None,
            running: false,
            on_fps_change: None,
        })
    }

    /// Create a pacer with the default configuration.
    pub fn with_defaults(clock: C) -> Result<Self, FrameLoopError> {
        Self::new(PacerConfig::default(), clock)
    }

    /// Begin requesting host frames. Idempotent: a second call while a frame
    /// is already scheduled does not create a second subscription.
    ///
    /// On a host without a frame facility the request is refused and the
    /// pacer stays stopped; `is_running` is the capability signal.
    pub fn start(&mut self) {
        if self.running && self.pending.is_some() {
            return;
        }
        self.pending = self.clock.request_frame();
        self.running = self.pending.is_some();
        if self.running {
            self.last_timestamp = None;
        } else {
            log::debug!("frame scheduling unavailable; pacer stays stopped");
        }
    }

    /// Cancel the outstanding frame request. No-op when unscheduled.
    /// Statistics are kept; use [`reset`](Self::reset) to clear them.
    pub fn stop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.clock.cancel_frame(handle);
        }
        self.running = false;
        self.last_timestamp = None;
    }

    /// Stop, zero the statistics, clear the duration history, and restore the
    /// configured target interval.
    pub fn reset(&mut self) {
        self.stop();
        self.sampler.reset();
        self.target_interval_ms = self.config.target_interval_ms();
    }

    /// Register a per-frame listener; returns the handle for removal.
    pub fn add_listener<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(f64) -> Result<(), FrameLoopError> + 'static,
    {
        self.registry.add(Box::new(listener))
    }

    /// Remove a previously registered listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> Result<(), FrameLoopError> {
        self.registry.remove(id)
    }

    /// Set the listener notified when the adaptive controller retunes.
    pub fn on_fps_change<F>(&mut self, listener: F)
    where
        F: FnMut(f64) + 'static,
    {
        self.on_fps_change = Some(Box::new(listener));
    }

    /// Change the target rate. The request is clamped into the configured
    /// bounds and the interval recomputed immediately.
    pub fn set_target_fps(&mut self, fps: f64) -> Result<(), FrameLoopError> {
        if fps <= 0.0 || !fps.is_finite() {
            return Err(FrameLoopError::InvalidFrameRate { fps });
        }
        self.config.target_fps = self.config.clamp_fps(fps);
        self.target_interval_ms = self.config.target_interval_ms();
        Ok(())
    }

    /// Deliver one host frame.
    ///
    /// Returns whether the frame was processed (cleared the throttle gate).
    /// The first frame after `start` only anchors the timestamp. While still
    /// running afterwards, the next host frame is requested unconditionally;
    /// a `stop` issued by a listener during dispatch wins and suppresses the
    /// re-request.
    pub fn on_frame(&mut self, timestamp: FrameTime) -> Result<bool, FrameLoopError> {
        if let Some(handle) = self.pending.take() {
            // The fired request is consumed; clearing the host bookkeeping is
            // a cancel of an already-delivered handle, which hosts ignore.
            self.clock.cancel_frame(handle);
        }
        if !self.running {
            return Ok(false);
        }

        let processed = match self.last_timestamp {
            None => {
                self.last_timestamp = Some(timestamp);
                false
            }
            Some(last) => {
                let delta_ms = timestamp.saturating_since(last).as_millis();
                if delta_ms >= self.target_interval_ms {
                    self.process_frame(delta_ms)?;
                    self.last_timestamp = Some(timestamp);
                    true
                } else {
                    false
                }
            }
        };

        if self.running {
            self.pending = self.clock.request_frame();
            if self.pending.is_none() {
                self.running = false;
            }
        }

        Ok(processed)
    }

    fn process_frame(&mut self, delta_ms: f64) -> Result<(), FrameLoopError> {
        self.sampler.record_frame(delta_ms, self.target_interval_ms)?;
        self.registry.dispatch(delta_ms);
        if self.config.adaptive {
            self.adapt();
        }
        Ok(())
    }

    /// One adaptive evaluation against the latest instantaneous rate.
    fn adapt(&mut self) {
        let current_fps = self.sampler.stats().current_fps;
        let target_fps = self.config.clamp_fps(self.config.target_fps);
        let min_interval = self.config.min_interval_ms();
        let max_interval = self.config.max_interval_ms();

        let new_interval = if current_fps < target_fps * UNDERSHOOT_RATIO
            && self.target_interval_ms < max_interval
        {
            (self.target_interval_ms * INTERVAL_GROWTH).min(max_interval)
        } else if current_fps > target_fps * OVERSHOOT_RATIO
            && self.target_interval_ms > min_interval
        {
            (self.target_interval_ms * INTERVAL_SHRINK).max(min_interval)
        } else {
            return;
        };

        if new_interval != self.target_interval_ms {
            self.target_interval_ms = new_interval;
            let fps = 1000.0 / new_interval;
            log::debug!(
                "adaptive retune: interval {:.3} ms ({:.1} fps)",
                new_interval,
                fps
            );
            if let Some(listener) = self.on_fps_change.as_mut() {
                listener(fps);
            }
        }
    }

    /// Current frame statistics.
    #[inline]
    pub fn stats(&self) -> &FrameStats {
        self.sampler.stats()
    }

    /// Whether a frame subscription is active.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Whether a host frame is currently scheduled.
    #[inline]
    pub fn has_pending_frame(&self) -> bool {
        self.pending.is_some()
    }

    /// Current target interval in ms.
    #[inline]
    pub fn target_interval_ms(&self) -> f64 {
        self.target_interval_ms
    }

    /// Number of registered listeners.
    #[inline]
    pub fn listener_count(&self) -> usize {
        self.registry.len()
    }

    /// Pacer configuration.
    #[inline]
    pub fn config(&self) -> &PacerConfig {
        &self.config
    }

    /// The underlying clock.
    #[inline]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the underlying clock (test drivers advance it).
    #[inline]
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }
}

impl<C: ClockSource> Drop for FramePacer<C> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<C: ClockSource> std::fmt::Debug for FramePacer<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePacer")
            .field("running", &self.running)
            .field("target_interval_ms", &self.target_interval_ms)
            .field("listeners", &self.registry.len())
            .field("stats", self.sampler.stats())
            .finish()
    }
}
