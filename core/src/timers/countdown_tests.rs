//! Tests for CountdownTimer lifecycle
//!
//! Async tests run on a paused clock, so sleeping advances simulated time
//! deterministically and fires every tick due along the way.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use countdown_types::DisplayFormat;
use tokio::time::sleep;

use super::{
    ChannelObserver, CountdownTimer, FnObserver, TimeBreakdown, TimerEvent, TimerObserver,
    TimerOptions, TimerState,
};

/// Records every notification a timer produces
#[derive(Default)]
struct Recorder {
    ticks: Mutex<Vec<TimeBreakdown>>,
    completions: AtomicUsize,
}

impl Recorder {
    fn tick_count(&self) -> usize {
        self.ticks.lock().unwrap().len()
    }

    fn last_tick(&self) -> Option<TimeBreakdown> {
        self.ticks.lock().unwrap().last().copied()
    }

    fn completions(&self) -> usize {
        self.completions.load(Ordering::SeqCst)
    }
}

impl TimerObserver for Recorder {
    fn on_tick(&self, remaining: &TimeBreakdown) {
        self.ticks.lock().unwrap().push(*remaining);
    }

    fn on_complete(&self) {
        self.completions.fetch_add(1, Ordering::SeqCst);
    }
}

fn recorded_timer(offset_ms: i64) -> (CountdownTimer, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let timer = CountdownTimer::new(
        TimerOptions::new()
            .start_offset_ms(offset_ms)
            .shared_observer(recorder.clone()),
    );
    (timer, recorder)
}

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

#[tokio::test(start_paused = true)]
async fn test_new_timer_is_armed() {
    let (timer, recorder) = recorded_timer(60_000);

    assert_eq!(timer.state(), TimerState::Armed);
    assert!(!timer.is_running());
    assert_eq!(timer.offset_millis(), 60_000);
    assert_eq!(timer.display_format(), DisplayFormat::Full);
    assert_eq!(recorder.tick_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_start_emits_immediate_tick() {
    let (timer, recorder) = recorded_timer(60_000);

    timer.start();

    assert!(timer.is_running());
    assert_eq!(recorder.tick_count(), 1, "first tick must be synchronous");
    assert_eq!(recorder.last_tick().unwrap().total_millis, 60_000);

    let remaining = timer.get_time_remaining().unwrap().total_millis;
    assert!(60_000 - remaining < 1_000);
}

#[tokio::test(start_paused = true)]
async fn test_initial_full_format() {
    let (timer, recorder) = recorded_timer(3_661_000);

    timer.start();

    let first = recorder.last_tick().unwrap();
    assert_eq!(timer.format_time(&first), "00:01:01:01");
}

#[tokio::test(start_paused = true)]
async fn test_format_follows_display_format() {
    let timer = CountdownTimer::new(
        TimerOptions::new()
            .start_offset_ms(90_061_000)
            .display_format(DisplayFormat::Compact),
    );
    let remaining = timer.get_time_remaining().unwrap();
    assert_eq!(timer.format_time(&remaining), "1d 1h 1m 1s");

    let minimal = CountdownTimer::new(
        TimerOptions::new()
            .start_offset_ms(90_061_000)
            .display_format(DisplayFormat::Minimal),
    );
    assert_eq!(minimal.format_time(&remaining), "01:01:01");
}

#[tokio::test(start_paused = true)]
async fn test_ticks_once_per_interval() {
    let (timer, recorder) = recorded_timer(60_000);

    timer.start();
    sleep(ms(3_500)).await;

    let ticks = recorder.ticks.lock().unwrap().clone();
    let totals: Vec<u64> = ticks.iter().map(|t| t.total_millis).collect();
    assert_eq!(totals, vec![60_000, 59_000, 58_000, 57_000]);
}

#[tokio::test(start_paused = true)]
async fn test_zero_offset_completes_without_ticking() {
    let (timer, recorder) = recorded_timer(0);

    timer.start();
    sleep(ms(5_000)).await;

    assert_eq!(recorder.completions(), 1);
    assert_eq!(recorder.tick_count(), 0);
    assert_eq!(timer.state(), TimerState::Completed);
    assert!(timer.get_time_remaining().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_negative_offset_completes_immediately() {
    let (timer, recorder) = recorded_timer(-5_000);

    assert!(timer.get_time_remaining().is_none());
    timer.start();

    assert_eq!(recorder.completions(), 1);
    assert_eq!(recorder.tick_count(), 0);
    assert_eq!(timer.state(), TimerState::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_completes_exactly_once() {
    let (timer, recorder) = recorded_timer(1_500);

    timer.start();
    sleep(ms(2_050)).await;

    assert_eq!(recorder.completions(), 1);
    // 1500ms at start, 500ms one second later, then completion
    assert_eq!(recorder.tick_count(), 2);
    assert_eq!(timer.state(), TimerState::Completed);

    sleep(ms(10_000)).await;
    assert_eq!(recorder.completions(), 1);
    assert_eq!(recorder.tick_count(), 2, "no ticks after completion");
}

#[tokio::test(start_paused = true)]
async fn test_start_after_completion_is_ignored() {
    let (timer, recorder) = recorded_timer(1_000);

    timer.start();
    sleep(ms(1_500)).await;
    assert_eq!(recorder.completions(), 1);

    timer.start();
    sleep(ms(3_000)).await;

    assert_eq!(recorder.completions(), 1);
    assert_eq!(timer.state(), TimerState::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_double_start_has_single_source() {
    let (timer, recorder) = recorded_timer(60_000);

    timer.start();
    timer.start();
    assert_eq!(recorder.tick_count(), 1);

    sleep(ms(3_500)).await;
    assert_eq!(recorder.tick_count(), 4);

    // One stop must silence the timer completely
    timer.stop();
    sleep(ms(5_000)).await;
    assert_eq!(recorder.tick_count(), 4);
    assert_eq!(timer.state(), TimerState::Armed);
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent_and_keeps_target() {
    let (timer, recorder) = recorded_timer(60_000);
    let target = timer.target_instant();

    timer.stop();
    assert_eq!(timer.state(), TimerState::Armed);

    timer.start();
    timer.stop();
    timer.stop();
    assert_eq!(timer.target_instant(), target);

    // The countdown is wall-clock based, so stopped time still elapses
    sleep(ms(10_000)).await;
    timer.start();
    assert_eq!(recorder.last_tick().unwrap().total_millis, 50_000);
}

#[tokio::test(start_paused = true)]
async fn test_reset_from_every_state() {
    // Running
    let (running, _) = recorded_timer(60_000);
    running.start();
    sleep(ms(2_000)).await;
    running.reset_to(5_000);
    assert_eq!(running.state(), TimerState::Running);
    assert!(5_000 - running.get_time_remaining().unwrap().total_millis < 1_000);

    // Stopped
    let (stopped, _) = recorded_timer(60_000);
    stopped.start();
    stopped.stop();
    stopped.reset_to(5_000);
    assert_eq!(stopped.state(), TimerState::Running);
    assert!(5_000 - stopped.get_time_remaining().unwrap().total_millis < 1_000);

    // Never started
    let (armed, _) = recorded_timer(60_000);
    armed.reset_to(5_000);
    assert_eq!(armed.state(), TimerState::Running);

    // Completed
    let (completed, recorder) = recorded_timer(500);
    completed.start();
    sleep(ms(1_200)).await;
    assert_eq!(completed.state(), TimerState::Completed);
    completed.reset_to(5_000);
    assert_eq!(completed.state(), TimerState::Running);
    assert!(5_000 - completed.get_time_remaining().unwrap().total_millis < 1_000);
    assert_eq!(recorder.completions(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_reset_retains_duration() {
    let (timer, _) = recorded_timer(60_000);

    timer.reset_to(5_000);
    assert_eq!(timer.offset_millis(), 5_000);

    sleep(ms(3_000)).await;
    timer.reset();
    assert_eq!(timer.offset_millis(), 5_000);
    assert_eq!(timer.get_time_remaining().unwrap().total_millis, 5_000);
}

#[tokio::test(start_paused = true)]
async fn test_reset_gives_one_fresh_completion() {
    let (timer, recorder) = recorded_timer(1_000);

    timer.start();
    sleep(ms(1_500)).await;
    assert_eq!(recorder.completions(), 1);

    timer.reset();
    sleep(ms(1_500)).await;
    assert_eq!(recorder.completions(), 2);

    sleep(ms(5_000)).await;
    assert_eq!(recorder.completions(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_reset_while_running_replaces_source() {
    let (timer, recorder) = recorded_timer(60_000);

    timer.start();
    sleep(ms(500)).await;
    timer.reset();
    assert_eq!(recorder.tick_count(), 2);

    // Only the new cycle ticks: at 1500ms and 2500ms absolute
    sleep(ms(2_200)).await;
    let totals: Vec<u64> = recorder
        .ticks
        .lock()
        .unwrap()
        .iter()
        .map(|t| t.total_millis)
        .collect();
    assert_eq!(totals, vec![60_000, 60_000, 59_000, 58_000]);
}

#[tokio::test(start_paused = true)]
async fn test_missed_ticks_do_not_drift() {
    let (timer, recorder) = recorded_timer(60_000);

    timer.start();
    tokio::time::advance(ms(10_500)).await;
    sleep(ms(1)).await;

    let last = recorder.last_tick().unwrap().total_millis;
    assert!((49_000..=49_500).contains(&last), "got {last}");
    let remaining = timer.get_time_remaining().unwrap().total_millis;
    assert!((49_000..=49_500).contains(&remaining));
}

#[tokio::test(start_paused = true)]
async fn test_stop_from_inside_tick_callback() {
    let slot: Arc<Mutex<Option<CountdownTimer>>> = Arc::new(Mutex::new(None));
    let ticks = Arc::new(AtomicUsize::new(0));

    let observer = {
        let slot = slot.clone();
        let ticks = ticks.clone();
        FnObserver::new(
            move |_: &TimeBreakdown| {
                if ticks.fetch_add(1, Ordering::SeqCst) + 1 == 3 {
                    if let Some(timer) = slot.lock().unwrap().as_ref() {
                        timer.stop();
                    }
                }
            },
            || {},
        )
    };

    let timer = CountdownTimer::new(TimerOptions::new().observer(observer));
    *slot.lock().unwrap() = Some(timer.clone());

    timer.start();
    sleep(ms(10_000)).await;

    assert_eq!(ticks.load(Ordering::SeqCst), 3);
    assert_eq!(timer.state(), TimerState::Armed);
}

#[tokio::test(start_paused = true)]
async fn test_channel_observer_streams_events() {
    let (observer, mut rx) = ChannelObserver::new();
    let timer = CountdownTimer::new(
        TimerOptions::new()
            .start_offset_ms(2_500)
            .observer(observer),
    );

    timer.start();
    sleep(ms(3_500)).await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }

    assert_eq!(
        events,
        vec![
            TimerEvent::Tick(TimeBreakdown::from_millis(2_500)),
            TimerEvent::Tick(TimeBreakdown::from_millis(1_500)),
            TimerEvent::Tick(TimeBreakdown::from_millis(500)),
            TimerEvent::Complete,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_custom_tick_interval() {
    let recorder = Arc::new(Recorder::default());
    let timer = CountdownTimer::new(
        TimerOptions::new()
            .start_offset_ms(10_000)
            .tick_interval(ms(250))
            .shared_observer(recorder.clone()),
    );

    timer.start();
    sleep(ms(1_100)).await;

    assert_eq!(recorder.tick_count(), 5);
}

#[test]
fn test_start_without_runtime_stays_armed() {
    let (timer, recorder) = recorded_timer(60_000);

    timer.start();

    // The immediate tick still happens, but no source can be scheduled
    assert_eq!(recorder.tick_count(), 1);
    assert_eq!(timer.state(), TimerState::Armed);
    assert!(!timer.is_running());
}
