use approx::assert_relative_eq;

use frameloop::ease::Easing;
use frameloop::time::FrameTime;
use frameloop::timeline::{Phase, RepeatMode, Timeline, TimelineConfig, TimelineEvent};

fn at(ms: f64) -> FrameTime {
    FrameTime::from_millis(ms).unwrap()
}

fn linear_timeline(duration_ms: f64) -> Timeline {
    Timeline::new(
        TimelineConfig::default()
            .with_duration(at(duration_ms))
            .with_easing(Easing::Linear),
    )
    .unwrap()
}

#[test]
fn test_phase_guards() {
    assert!(Phase::Idle.can_start());
    assert!(Phase::Completed.can_start());
    assert!(Phase::Cancelled.can_start());
    assert!(!Phase::Running.can_start());
    assert!(!Phase::Paused.can_start());

    assert!(Phase::Running.can_pause());
    assert!(!Phase::Paused.can_pause());

    assert!(Phase::Paused.can_resume());
    assert!(!Phase::Running.can_resume());

    assert_eq!(Phase::Starting.name(), "starting");
    assert!(Phase::Starting.is_active());
    assert!(!Phase::Completed.is_active());
}

#[test]
fn test_start_admissibility() {
    let mut timeline = linear_timeline(100.0);
    timeline.start(at(0.0)).unwrap();
    assert_eq!(timeline.phase(), Phase::Starting);

    // Starting again mid-run is a typed error, not a silent restart.
    assert!(timeline.start(at(10.0)).is_err());
    timeline.tick(at(10.0));
    assert_eq!(timeline.phase(), Phase::Running);
    assert!(timeline.start(at(20.0)).is_err());

    timeline.cancel();
    timeline.start(at(30.0)).unwrap();
    assert_eq!(timeline.phase(), Phase::Starting);
}

#[test]
fn test_first_tick_starts_and_anchors() {
    let mut timeline = Timeline::new(
        TimelineConfig::default().with_duration(at(500.0)), // default ease-in/out
    )
    .unwrap();

    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    assert_eq!(timeline.phase(), Phase::Running);
    assert_eq!(timeline.drain_events(), vec![TimelineEvent::Started]);

    // Halfway through: ease-in/out of 0.5 is exactly 0.5.
    timeline.tick(at(250.0));
    assert_relative_eq!(timeline.progress(), 0.5, epsilon = 1e-9);
    assert_eq!(timeline.phase(), Phase::Running);
    assert_eq!(timeline.elapsed(), at(250.0));
    assert_eq!(timeline.remaining(), at(250.0));
}

#[test]
fn test_progress_monotonic_and_completes_once() {
    let mut timeline = linear_timeline(1000.0);
    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));

    let mut last_progress = 0.0;
    let mut completions = 0;
    for step in 1..=13 {
        let now = at(step as f64 * 100.0);
        timeline.tick(now);
        assert!(timeline.progress() >= last_progress);
        last_progress = timeline.progress();
        for event in timeline.drain_events() {
            if event == TimelineEvent::Completed {
                completions += 1;
            }
        }
    }

    assert_eq!(completions, 1);
    assert_eq!(timeline.phase(), Phase::Completed);
    assert_relative_eq!(timeline.progress(), 1.0);
    assert_eq!(timeline.elapsed(), timeline.duration());
    assert_eq!(timeline.remaining(), FrameTime::zero());

    // Ticks after completion are inert.
    timeline.tick(at(2000.0));
    assert!(timeline.drain_events().is_empty());
}

#[test]
fn test_elapsed_plus_remaining_is_duration() {
    let mut timeline = linear_timeline(1000.0);
    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    for step in [137.0, 271.5, 600.0, 999.0] {
        timeline.tick(at(step));
        assert_eq!(timeline.elapsed() + timeline.remaining(), timeline.duration());
    }
}

#[test]
fn test_delay_defers_first_running_tick() {
    let mut timeline = Timeline::new(
        TimelineConfig::default()
            .with_duration(at(100.0))
            .with_delay(at(200.0))
            .with_easing(Easing::Linear),
    )
    .unwrap();

    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(100.0));
    assert_eq!(timeline.phase(), Phase::Starting);
    assert!(timeline.drain_events().is_empty());

    timeline.tick(at(250.0));
    assert_eq!(timeline.phase(), Phase::Running);
    assert_eq!(timeline.drain_events(), vec![TimelineEvent::Started]);

    // The cycle anchors at the tick that crossed the deadline.
    timeline.tick(at(300.0));
    assert_relative_eq!(timeline.progress(), 0.5, epsilon = 1e-9);
}

#[test]
fn test_repeat_reverse_semantics() {
    let mut timeline = Timeline::new(
        TimelineConfig::default()
            .with_duration(at(100.0))
            .with_easing(Easing::Linear)
            .with_repeat(2, RepeatMode::Reverse),
    )
    .unwrap();

    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    timeline.drain_events();

    // First cycle completes forward at progress 1.
    timeline.tick(at(100.0));
    let events = timeline.drain_events();
    assert!(events.contains(&TimelineEvent::Repeated { count: 1 }));
    assert!(events.contains(&TimelineEvent::Reversed));
    assert!(timeline.is_reversed());

    // Reversed cycle reports progress from 1 down to 0.
    timeline.tick(at(150.0));
    assert_relative_eq!(timeline.progress(), 0.5, epsilon = 1e-9);
    timeline.tick(at(200.0));
    let events = timeline.drain_events();
    assert!(events.contains(&TimelineEvent::Repeated { count: 2 }));
    assert!(!timeline.is_reversed()); // toggled back on the 2nd boundary

    // Third cycle has no repeats left.
    timeline.tick(at(300.0));
    let events = timeline.drain_events();
    assert!(events.contains(&TimelineEvent::Completed));
    assert_eq!(timeline.repeat_count(), 2);
    assert_eq!(timeline.phase(), Phase::Completed);
    assert_relative_eq!(timeline.progress(), 1.0);
}

#[test]
fn test_mirror_mirrors_easing_without_reversed_event() {
    let mut timeline = Timeline::new(
        TimelineConfig::default()
            .with_duration(at(100.0))
            .with_easing(Easing::EaseIn)
            .with_repeat(1, RepeatMode::Mirror),
    )
    .unwrap();

    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));

    // Forward cycle: plain ease-in.
    timeline.tick(at(50.0));
    assert_relative_eq!(timeline.progress(), 0.25, epsilon = 1e-9);

    timeline.tick(at(100.0));
    let events = timeline.drain_events();
    assert!(events.contains(&TimelineEvent::Repeated { count: 1 }));
    assert!(!events.contains(&TimelineEvent::Reversed));
    assert!(timeline.is_reversed());

    // Mirrored cycle still runs 0 -> 1, but on the flipped curve:
    // progress(t) = 1 - ease(1 - t).
    timeline.tick(at(150.0));
    assert_relative_eq!(timeline.progress(), 0.75, epsilon = 1e-9);
    timeline.tick(at(200.0));
    assert_relative_eq!(timeline.progress(), 1.0, epsilon = 1e-9);
    assert_eq!(timeline.phase(), Phase::Completed);
}

#[test]
fn test_repeat_delay_gates_next_cycle() {
    let mut timeline = Timeline::new(
        TimelineConfig::default()
            .with_duration(at(100.0))
            .with_easing(Easing::Linear)
            .with_repeat(1, RepeatMode::Loop)
            .with_repeat_delay(at(50.0)),
    )
    .unwrap();

    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    timeline.tick(at(100.0));
    assert_eq!(timeline.repeat_count(), 1);
    timeline.drain_events();

    // Within the deferral window nothing advances.
    timeline.tick(at(120.0));
    assert!(timeline.drain_events().is_empty());

    // The next cycle anchors at the tick that crossed the deadline.
    timeline.tick(at(160.0));
    assert_relative_eq!(timeline.progress(), 0.0, epsilon = 1e-9);
    timeline.tick(at(210.0));
    assert_relative_eq!(timeline.progress(), 0.5, epsilon = 1e-9);
    timeline.tick(at(260.0));
    assert_eq!(timeline.phase(), Phase::Completed);
}

#[test]
fn test_cancel_resets_everything_and_fires_once() {
    let mut timeline = Timeline::new(
        TimelineConfig::default()
            .with_duration(at(100.0))
            .with_easing(Easing::Linear)
            .with_repeat(3, RepeatMode::Reverse),
    )
    .unwrap();

    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    timeline.tick(at(100.0)); // one boundary: repeat_count 1, reversed
    timeline.tick(at(150.0));
    assert!(timeline.is_reversed());
    timeline.drain_events();

    timeline.cancel();
    assert_eq!(timeline.phase(), Phase::Cancelled);
    assert_eq!(timeline.progress(), 0.0);
    assert_eq!(timeline.elapsed(), FrameTime::zero());
    assert_eq!(timeline.repeat_count(), 0);
    assert!(!timeline.is_reversed());

    let cancels = timeline
        .drain_events()
        .into_iter()
        .filter(|event| *event == TimelineEvent::Cancelled)
        .count();
    assert_eq!(cancels, 1);

    // Cancelling again is inert.
    timeline.cancel();
    assert!(timeline.drain_events().is_empty());
}

#[test]
fn test_cancel_honors_pending_repeat_delay() {
    let mut timeline = Timeline::new(
        TimelineConfig::default()
            .with_duration(at(100.0))
            .with_easing(Easing::Linear)
            .with_repeat(1, RepeatMode::Loop)
            .with_repeat_delay(at(500.0)),
    )
    .unwrap();

    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    timeline.tick(at(100.0)); // boundary: deferral until 600
    timeline.drain_events();

    timeline.cancel();
    assert_eq!(timeline.phase(), Phase::Cancelled);

    // The deferred cycle never fires after cancellation.
    timeline.tick(at(700.0));
    let events = timeline.drain_events();
    assert_eq!(events, vec![TimelineEvent::Cancelled]);
}

#[test]
fn test_pause_resume_excludes_paused_time() {
    let mut timeline = linear_timeline(1000.0);
    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    timeline.tick(at(250.0));
    assert_relative_eq!(timeline.progress(), 0.25, epsilon = 1e-9);

    timeline.pause(at(300.0)).unwrap();
    assert_eq!(timeline.phase(), Phase::Paused);

    // Ticks while paused change nothing.
    timeline.tick(at(400.0));
    assert_relative_eq!(timeline.progress(), 0.25, epsilon = 1e-9);

    // Paused for 200ms: elapsed time excludes the pause.
    timeline.resume(at(500.0)).unwrap();
    timeline.tick(at(750.0));
    assert_relative_eq!(timeline.progress(), 0.55, epsilon = 1e-9);
}

#[test]
fn test_misuse_is_a_typed_error() {
    let mut timeline = linear_timeline(100.0);

    assert!(timeline.pause(at(0.0)).is_err());
    assert!(timeline.resume(at(0.0)).is_err());

    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    timeline.pause(at(10.0)).unwrap();
    assert!(timeline.pause(at(20.0)).is_err());

    timeline.resume(at(30.0)).unwrap();
    assert!(timeline.resume(at(40.0)).is_err());
}

#[test]
fn test_reset_returns_to_idle_silently() {
    let mut timeline = linear_timeline(100.0);
    timeline.start(at(0.0)).unwrap();
    timeline.tick(at(0.0));
    timeline.tick(at(50.0));

    timeline.reset();
    assert_eq!(timeline.phase(), Phase::Idle);
    assert!(timeline.can_start());
    assert_eq!(timeline.progress(), 0.0);
    assert!(timeline.drain_events().is_empty());
}
