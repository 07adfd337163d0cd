//! Timer observers
//!
//! A running timer produces a sequence of breakdowns terminated by a single
//! completion signal. Observers receive that sequence; they are invoked with
//! no timer lock held, so they may call back into the timer.

use tokio::sync::mpsc;

use super::TimeBreakdown;

/// Receives tick and completion notifications from a `CountdownTimer`.
pub trait TimerObserver: Send + Sync {
    /// Called once per tick while the timer is running
    fn on_tick(&self, _remaining: &TimeBreakdown) {}

    /// Called exactly once per countdown cycle, when the remaining time reaches zero
    fn on_complete(&self) {
        tracing::info!("Sale is live");
    }
}

/// Observer used when the caller supplies none: ignores ticks, logs completion.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingObserver;

impl TimerObserver for LoggingObserver {}

/// Observer built from plain closures
pub struct FnObserver<T, C> {
    on_tick: T,
    on_complete: C,
}

impl<T, C> FnObserver<T, C>
where
    T: Fn(&TimeBreakdown) + Send + Sync,
    C: Fn() + Send + Sync,
{
    pub fn new(on_tick: T, on_complete: C) -> Self {
        Self {
            on_tick,
            on_complete,
        }
    }
}

impl<T, C> TimerObserver for FnObserver<T, C>
where
    T: Fn(&TimeBreakdown) + Send + Sync,
    C: Fn() + Send + Sync,
{
    fn on_tick(&self, remaining: &TimeBreakdown) {
        (self.on_tick)(remaining)
    }

    fn on_complete(&self) {
        (self.on_complete)()
    }
}

/// A single notification from a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick(TimeBreakdown),
    Complete,
}

/// Forwards timer notifications into a channel, turning a timer into an event stream.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    tx: mpsc::UnboundedSender<TimerEvent>,
}

impl ChannelObserver {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TimerObserver for ChannelObserver {
    fn on_tick(&self, remaining: &TimeBreakdown) {
        // Receiver gone means nobody is listening anymore
        let _ = self.tx.send(TimerEvent::Tick(*remaining));
    }

    fn on_complete(&self) {
        let _ = self.tx.send(TimerEvent::Complete);
    }
}
