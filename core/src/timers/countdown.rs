//! Countdown timer instances (runtime state)
//!
//! A `CountdownTimer` counts down to a fixed target instant and notifies its
//! observer once per tick interval while running, and once on completion.
//!
//! # Lifecycle
//!
//! 1. Created with a duration → target = now + duration, state `Armed`
//! 2. `start()` emits one tick immediately, then a tick task fires every interval
//! 3. Remaining time reaches zero → observer `on_complete`, state `Completed`
//! 4. `reset()` recomputes the target and starts a fresh cycle from any state
//!
//! Every tick derives the remaining time from `target - now`. Nothing is
//! decremented, so late or skipped ticks never accumulate drift.

use std::fmt;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use countdown_types::DisplayFormat;
use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{TimeBreakdown, TimerObserver, TimerOptions};

/// Where a timer is in its countdown cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerState {
    /// Target set, no tick source scheduled
    Armed,
    /// Tick source scheduled
    Running,
    /// Countdown reached zero; terminal until `reset()`
    Completed,
}

struct Inner {
    offset_ms: i64,
    target: Instant,
    state: TimerState,
    display_format: DisplayFormat,
    tick_interval: Duration,
    tick_task: Option<JoinHandle<()>>,
    /// Bumped whenever a cycle is started or cancelled; ticks carrying an
    /// older generation are dropped.
    generation: u64,
}

struct Shared {
    inner: Mutex<Inner>,
    observer: Arc<dyn TimerObserver>,
}

enum Emit {
    Tick(TimeBreakdown),
    Complete,
}

/// Handle to a countdown. Cloning shares the same timer.
#[derive(Clone)]
pub struct CountdownTimer {
    shared: Arc<Shared>,
}

impl CountdownTimer {
    /// Create an armed (not running) timer
    pub fn new(options: TimerOptions) -> Self {
        let TimerOptions {
            start_offset_ms,
            observer,
            display_format,
            tick_interval,
        } = options;

        let inner = Inner {
            offset_ms: start_offset_ms,
            target: target_from(Instant::now(), start_offset_ms),
            state: TimerState::Armed,
            display_format,
            tick_interval: tick_interval.max(Duration::from_millis(1)),
            tick_task: None,
            generation: 0,
        };

        Self {
            shared: Arc::new(Shared {
                inner: Mutex::new(inner),
                observer,
            }),
        }
    }

    /// Start ticking. No effect if already running or completed.
    pub fn start(&self) {
        let generation = {
            let mut inner = self.lock();
            match inner.state {
                TimerState::Running => return,
                TimerState::Completed => {
                    tracing::debug!("start ignored on completed timer");
                    return;
                }
                TimerState::Armed => {}
            }
            inner.state = TimerState::Running;
            inner.generation += 1;
            tracing::debug!(offset_ms = inner.offset_ms, "timer started");
            inner.generation
        };

        self.run_cycle(generation);
    }

    /// Cancel the tick source. The target instant is left untouched.
    pub fn stop(&self) {
        let task = {
            let mut inner = self.lock();
            if inner.state == TimerState::Running {
                inner.state = TimerState::Armed;
                inner.generation += 1;
                tracing::debug!("timer stopped");
            }
            inner.tick_task.take()
        };

        if let Some(task) = task {
            task.abort();
        }
    }

    /// Restart the countdown with the retained duration
    pub fn reset(&self) {
        self.reset_with(None);
    }

    /// Restart the countdown with a new duration, which is retained for later resets
    pub fn reset_to(&self, offset_ms: i64) {
        self.reset_with(Some(offset_ms));
    }

    fn reset_with(&self, offset_ms: Option<i64>) {
        let (task, generation) = {
            let mut inner = self.lock();
            let offset_ms = offset_ms.unwrap_or(inner.offset_ms);
            inner.offset_ms = offset_ms;
            inner.target = target_from(Instant::now(), offset_ms);
            inner.state = TimerState::Running;
            inner.generation += 1;
            tracing::debug!(offset_ms, "timer reset");
            (inner.tick_task.take(), inner.generation)
        };

        if let Some(task) = task {
            task.abort();
        }
        self.run_cycle(generation);
    }

    /// Remaining time, or `None` once the target has passed
    pub fn get_time_remaining(&self) -> Option<TimeBreakdown> {
        let remaining = remaining_millis(self.lock().target);
        (remaining > 0).then(|| TimeBreakdown::from_millis(remaining))
    }

    /// Render a breakdown using this timer's display format
    pub fn format_time(&self, remaining: &TimeBreakdown) -> String {
        remaining.format(self.display_format())
    }

    pub fn state(&self) -> TimerState {
        self.lock().state
    }

    pub fn is_running(&self) -> bool {
        self.state() == TimerState::Running
    }

    pub fn offset_millis(&self) -> i64 {
        self.lock().offset_ms
    }

    pub fn display_format(&self) -> DisplayFormat {
        self.lock().display_format
    }

    pub fn target_instant(&self) -> Instant {
        self.lock().target
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Observers never run under the lock, so a poisoned guard still holds consistent state
        self.shared
            .inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Emit the immediate tick, then schedule the periodic source unless it completed
    fn run_cycle(&self, generation: u64) {
        if self.tick(generation).is_continue() {
            self.arm(generation);
        }
    }

    fn tick(&self, generation: u64) -> ControlFlow<()> {
        let emit = {
            let mut inner = self.lock();
            if inner.generation != generation || inner.state != TimerState::Running {
                return ControlFlow::Break(());
            }

            let remaining = remaining_millis(inner.target);
            if remaining == 0 {
                inner.state = TimerState::Completed;
                inner.generation += 1;
                // Detach rather than abort: the caller may be the tick task itself
                inner.tick_task = None;
                Emit::Complete
            } else {
                Emit::Tick(TimeBreakdown::from_millis(remaining))
            }
        };

        match emit {
            Emit::Tick(remaining) => {
                tracing::trace!(total_millis = remaining.total_millis, "tick");
                self.shared.observer.on_tick(&remaining);
                ControlFlow::Continue(())
            }
            Emit::Complete => {
                tracing::debug!("countdown complete");
                self.shared.observer.on_complete();
                ControlFlow::Break(())
            }
        }
    }

    fn arm(&self, generation: u64) {
        let period = {
            let inner = self.lock();
            if inner.generation != generation || inner.state != TimerState::Running {
                return;
            }
            inner.tick_interval
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                tracing::warn!("no async runtime available, timer left armed");
                let mut inner = self.lock();
                if inner.generation == generation && inner.state == TimerState::Running {
                    inner.state = TimerState::Armed;
                    inner.generation += 1;
                }
                return;
            }
        };

        let first = Instant::now() + period;
        let task = runtime.spawn(drive_ticks(
            Arc::downgrade(&self.shared),
            generation,
            first,
            period,
        ));

        let mut inner = self.lock();
        if inner.generation == generation && inner.state == TimerState::Running {
            inner.tick_task = Some(task);
        } else {
            // Stopped or reset while spawning
            drop(inner);
            task.abort();
        }
    }
}

impl fmt::Debug for CountdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("CountdownTimer")
            .field("state", &inner.state)
            .field("offset_ms", &inner.offset_ms)
            .field("display_format", &inner.display_format)
            .field("tick_interval", &inner.tick_interval)
            .finish_non_exhaustive()
    }
}

/// Periodic tick source for one countdown cycle.
///
/// Holds only a weak reference, so dropping every handle ends the task.
async fn drive_ticks(shared: Weak<Shared>, generation: u64, first: Instant, period: Duration) {
    let mut interval = tokio::time::interval_at(first, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let Some(shared) = shared.upgrade() else {
            break;
        };
        if (CountdownTimer { shared }).tick(generation).is_break() {
            break;
        }
    }
}

fn target_from(now: Instant, offset_ms: i64) -> Instant {
    let offset = Duration::from_millis(offset_ms.unsigned_abs());
    if offset_ms >= 0 {
        now.checked_add(offset).unwrap_or_else(|| far_future(now))
    } else {
        now.checked_sub(offset).unwrap_or(now)
    }
}

fn far_future(now: Instant) -> Instant {
    // Roughly 30 years, which is what tokio itself uses as "never"
    now + Duration::from_secs(86_400 * 365 * 30)
}

/// Whole milliseconds until `target`, zero once it has passed
fn remaining_millis(target: Instant) -> u64 {
    let remaining = target.saturating_duration_since(Instant::now());
    u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX)
}
