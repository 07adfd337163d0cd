//! Countdown timer system
//!
//! This module provides:
//! - **Countdown timers**: independent countdowns to a target instant
//! - **Observers**: receivers for tick and completion notifications
//! - **Registry**: keyed collection with bulk start/stop/reset
//!
//! # Timer States
//!
//! - `Armed` → `start()` → `Running`
//! - `Running` → `stop()` → `Armed`
//! - `Running` → remaining time reaches zero → `Completed`
//! - any state → `reset()` → `Running`

mod breakdown;
mod countdown;
mod error;
mod observer;
mod options;
mod registry;

#[cfg(test)]
mod countdown_tests;

pub use breakdown::{MS_PER_DAY, MS_PER_HOUR, MS_PER_MINUTE, MS_PER_SECOND, TimeBreakdown};
pub use countdown::{CountdownTimer, TimerState};
pub use error::TimerError;
pub use observer::{ChannelObserver, FnObserver, LoggingObserver, TimerEvent, TimerObserver};
pub use options::TimerOptions;
pub use registry::TimerRegistry;
