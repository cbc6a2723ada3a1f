use crate::error::FrameLoopError;
use crate::time::{FrameTime, TimeSpan};
use crate::timeline::config::{RepeatMode, TimelineConfig};
use crate::timeline::event::TimelineEvent;
use crate::timeline::phase::Phase;

/// Lifecycle state machine for one animation run.
///
/// A timeline is driven by [`tick`](Self::tick) once per qualifying frame and
/// mutated through `start`/`pause`/`resume`/`cancel`/`reset`. It owns no
/// clock: callers pass the current time into every time-dependent operation,
/// which keeps the machine deterministic and delay deadlines cancellable.
///
/// Events accumulate across operations and are collected with
/// [`drain_events`](Self::drain_events).
#[derive(Debug)]
pub struct Timeline {
    config: TimelineConfig,
    phase: Phase,
    /// Anchor of the current cycle; None while a deferral is pending.
    cycle_start: Option<FrameTime>,
    /// Deadline gating the next running tick (initial delay or repeat delay).
    deferred_until: Option<FrameTime>,
    elapsed: FrameTime,
    progress: f64,
    repeat_count: u32,
    reversed: bool,
    paused_at: Option<FrameTime>,
    events: Vec<TimelineEvent>,
}

impl Timeline {
    /// Create a timeline from the given configuration.
    pub fn new(config: TimelineConfig) -> Result<Self, FrameLoopError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    /// Create a timeline with the default configuration.
    pub fn with_defaults() -> Self {
        Self::from_config(TimelineConfig::default())
    }

    fn from_config(config: TimelineConfig) -> Self {
        Self {
            config,
            phase: Phase::Idle,
            cycle_start: None,
            deferred_until: None,
            elapsed: FrameTime::zero(),
            progress: 0.0,
            repeat_count: 0,
            reversed: false,
            paused_at: None,
            events: Vec::new(),
        }
    }

    /// Begin a run. Admitted from `Idle`, `Completed`, and `Cancelled`;
    /// clears any previous run state. The transition to `Running` lands on
    /// the first tick at or after `now + delay`.
    pub fn start(&mut self, now: FrameTime) -> Result<(), FrameLoopError> {
        if !self.phase.can_start() {
            return Err(self.transition_error("start"));
        }
        self.clear_run_state();
        self.phase = Phase::Starting;
        if self.config.delay > FrameTime::zero() {
            self.deferred_until = Some(now + self.config.delay);
        }
        Ok(())
    }

    /// Freeze the run. Admitted only while `Running`.
    pub fn pause(&mut self, now: FrameTime) -> Result<(), FrameLoopError> {
        if !self.phase.can_pause() {
            return Err(self.transition_error("pause"));
        }
        self.paused_at = Some(now);
        self.phase = Phase::Paused;
        Ok(())
    }

    /// Continue a paused run. The cycle anchor (and any pending deferral) is
    /// shifted by the accumulated pause so elapsed time excludes the pause.
    pub fn resume(&mut self, now: FrameTime) -> Result<(), FrameLoopError> {
        if !self.phase.can_resume() {
            return Err(self.transition_error("resume"));
        }
        let paused_at = self.paused_at.take().unwrap_or(now);
        let pause_span = now.saturating_since(paused_at);
        if let Some(start) = self.cycle_start {
            self.cycle_start = Some(start + pause_span);
        }
        if let Some(deadline) = self.deferred_until {
            self.deferred_until = Some(deadline + pause_span);
        }
        self.phase = Phase::Running;
        Ok(())
    }

    /// Cancel the run from any phase: progress, elapsed time, repeat count,
    /// and reversal return to their initial values and `Cancelled` is emitted
    /// exactly once. Idempotent once cancelled.
    pub fn cancel(&mut self) {
        if self.phase == Phase::Cancelled {
            return;
        }
        self.clear_run_state();
        self.phase = Phase::Cancelled;
        self.events.push(TimelineEvent::Cancelled);
    }

    /// Silently re-initialize to `Idle` from any phase. Undrained events are
    /// discarded.
    pub fn reset(&mut self) {
        self.clear_run_state();
        self.events.clear();
        self.phase = Phase::Idle;
    }

    /// Advance the machine to `now`. Ticks are no-ops outside `Starting` and
    /// `Running`, and while a delay deadline has not yet been reached.
    pub fn tick(&mut self, now: FrameTime) {
        match self.phase {
            Phase::Starting => {
                if let Some(deadline) = self.deferred_until {
                    if now < deadline {
                        return;
                    }
                }
                self.deferred_until = None;
                self.cycle_start = Some(now);
                self.elapsed = FrameTime::zero();
                self.phase = Phase::Running;
                self.events.push(TimelineEvent::Started);
            }
            Phase::Running => self.advance(now),
            Phase::Idle | Phase::Paused | Phase::Completed | Phase::Cancelled => {}
        }
    }

    fn advance(&mut self, now: FrameTime) {
        if let Some(deadline) = self.deferred_until {
            if now < deadline {
                return;
            }
            // Repeat deferral elapsed: the new cycle anchors here.
            self.deferred_until = None;
            self.cycle_start = Some(now);
        }
        let start = match self.cycle_start {
            Some(start) => start,
            None => return,
        };

        self.elapsed = now
            .saturating_since(start)
            .clamp(FrameTime::zero(), self.config.duration);
        let span = TimeSpan::from_duration(self.config.duration);
        let t = span.normalize_time(self.elapsed);
        self.progress = self.eased_progress(t);
        self.events.push(TimelineEvent::Updated {
            progress: self.progress,
        });

        if t >= 1.0 {
            if self.repeat_count < self.config.repeat {
                self.begin_next_cycle(now);
            } else {
                self.phase = Phase::Completed;
                self.events.push(TimelineEvent::Completed);
            }
        }
    }

    fn begin_next_cycle(&mut self, now: FrameTime) {
        self.repeat_count += 1;
        self.events.push(TimelineEvent::Repeated {
            count: self.repeat_count,
        });
        match self.config.repeat_mode {
            RepeatMode::Reverse => {
                self.reversed = !self.reversed;
                self.events.push(TimelineEvent::Reversed);
            }
            RepeatMode::Mirror => {
                self.reversed = !self.reversed;
            }
            RepeatMode::Loop => {}
        }
        self.elapsed = FrameTime::zero();
        if self.config.repeat_delay > FrameTime::zero() {
            self.deferred_until = Some(now + self.config.repeat_delay);
            self.cycle_start = None;
        } else {
            self.cycle_start = Some(now);
        }
    }

    /// Eased progress for the normalized elapsed fraction `t`, honoring the
    /// current direction: `Reverse` reports reversed cycles from 1 down to 0,
    /// `Mirror` mirrors the easing curve but keeps progress running 0 to 1.
    fn eased_progress(&self, t: f64) -> f64 {
        match (self.reversed, self.config.repeat_mode) {
            (true, RepeatMode::Reverse) => 1.0 - self.config.easing.apply(t),
            (true, RepeatMode::Mirror) => 1.0 - self.config.easing.apply(1.0 - t),
            _ => self.config.easing.apply(t),
        }
    }

    fn clear_run_state(&mut self) {
        self.cycle_start = None;
        self.deferred_until = None;
        self.elapsed = FrameTime::zero();
        self.progress = 0.0;
        self.repeat_count = 0;
        self.reversed = false;
        self.paused_at = None;
    }

    fn transition_error(&self, requested: &str) -> FrameLoopError {
        FrameLoopError::InvalidTransition {
            current: self.phase.name().to_string(),
            requested: requested.to_string(),
        }
    }

    /// Take all accumulated events, oldest first.
    pub fn drain_events(&mut self) -> Vec<TimelineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Current lifecycle phase.
    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Eased progress fraction in [0, 1].
    #[inline]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Time consumed within the current cycle.
    #[inline]
    pub fn elapsed(&self) -> FrameTime {
        self.elapsed
    }

    /// Time left within the current cycle.
    #[inline]
    pub fn remaining(&self) -> FrameTime {
        self.config.duration - self.elapsed
    }

    /// Length of one cycle.
    #[inline]
    pub fn duration(&self) -> FrameTime {
        self.config.duration
    }

    /// Completed cycle boundaries so far.
    #[inline]
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Whether the current cycle runs in the reversed direction.
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Timeline configuration.
    #[inline]
    pub fn config(&self) -> &TimelineConfig {
        &self.config
    }

    /// Check if a run can be started.
    #[inline]
    pub fn can_start(&self) -> bool {
        self.phase.can_start()
    }

    /// Check if the run can be paused.
    #[inline]
    pub fn can_pause(&self) -> bool {
        self.phase.can_pause()
    }

    /// Check if the run can be resumed.
    #[inline]
    pub fn can_resume(&self) -> bool {
        self.phase.can_resume()
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::with_defaults()
    }
}
