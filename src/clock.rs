//! Host clock boundary.
//!
//! The frame loop never reads wall-clock time on its own: a [`ClockSource`]
//! hands it timestamps and grants (or refuses) per-frame callbacks. Hosts
//! without a frame scheduling facility refuse every request and the loop
//! degrades to a no-op, observable through `FramePacer::is_running`.

use crate::time::FrameTime;

/// Opaque handle to one pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClockHandle(u64);

impl ClockHandle {
    #[inline]
    fn new(id: u64) -> Self {
        Self(id)
    }
}

/// Abstraction over the host's per-frame callback scheduling primitive.
///
/// `request_frame` asks for exactly one callback at the host's next display
/// refresh; the host glue delivers it by calling the consumer (e.g.
/// `FramePacer::on_frame`) with `now()`. There are no retries: a request is
/// granted once or not at all.
pub trait ClockSource {
    /// Current monotonic time on this clock.
    fn now(&self) -> FrameTime;

    /// Request one callback at the next display refresh. Returns `None` when
    /// the host has no frame scheduling facility.
    fn request_frame(&mut self) -> Option<ClockHandle>;

    /// Cancel a pending request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: ClockHandle);
}

/// Test clock with manually advanced time.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: FrameTime,
    next_handle: u64,
    pending: Vec<ClockHandle>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock by `millis`.
    pub fn advance_millis(&mut self, millis: f64) {
        let step = FrameTime::from_millis(millis.max(0.0))
            .unwrap_or_else(|_| FrameTime::zero());
        self.now += step;
    }

    /// Number of requests granted and not yet cancelled or consumed.
    #[inline]
    pub fn pending_requests(&self) -> usize {
        self.pending.len()
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> FrameTime {
        self.now
    }

    fn request_frame(&mut self) -> Option<ClockHandle> {
        self.next_handle += 1;
        let handle = ClockHandle::new(self.next_handle);
        self.pending.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: ClockHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

/// Monotonic host clock anchored at construction time.
///
/// This source always grants requests: it models hosts that drive their own
/// render loop and call into the pacer once per iteration. `instant` keeps
/// `now()` working on wasm targets as well as native ones.
#[derive(Debug)]
pub struct SystemClock {
    epoch: instant::Instant,
    next_handle: u64,
    pending: Option<ClockHandle>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            epoch: instant::Instant::now(),
            next_handle: 0,
            pending: None,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockSource for SystemClock {
    fn now(&self) -> FrameTime {
        FrameTime::from(self.epoch.elapsed())
    }

    fn request_frame(&mut self) -> Option<ClockHandle> {
        self.next_handle += 1;
        let handle = ClockHandle::new(self.next_handle);
        self.pending = Some(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: ClockHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}

/// Clock for headless contexts: time stands still and no frame is ever
/// granted.
#[derive(Debug, Default)]
pub struct NullClock;

impl NullClock {
    pub fn new() -> Self {
        Self
    }
}

impl ClockSource for NullClock {
    fn now(&self) -> FrameTime {
        FrameTime::zero()
    }

    fn request_frame(&mut self) -> Option<ClockHandle> {
        None
    }

    fn cancel_frame(&mut self, _handle: ClockHandle) {}
}
