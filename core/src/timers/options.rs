//! Timer construction options

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use countdown_types::{AppConfig, DEFAULT_OFFSET_MS, DEFAULT_TICK_INTERVAL_MS, DisplayFormat, TimerPreset};

use super::{LoggingObserver, TimerObserver};

/// Configuration for a new `CountdownTimer`
#[derive(Clone)]
pub struct TimerOptions {
    /// Duration to count down from. Zero or negative completes on first start.
    pub start_offset_ms: i64,
    pub observer: Arc<dyn TimerObserver>,
    pub display_format: DisplayFormat,
    pub tick_interval: Duration,
}

impl TimerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_offset_ms(mut self, offset_ms: i64) -> Self {
        self.start_offset_ms = offset_ms;
        self
    }

    pub fn observer(mut self, observer: impl TimerObserver + 'static) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    pub fn shared_observer(mut self, observer: Arc<dyn TimerObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn display_format(mut self, format: DisplayFormat) -> Self {
        self.display_format = format;
        self
    }

    /// Period of the tick source. Clamped to at least one millisecond.
    pub fn tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(1));
        self
    }

    /// Options for a configured page timer
    pub fn from_preset(config: &AppConfig, preset: &TimerPreset) -> Self {
        Self::default()
            .start_offset_ms(config.offset_for(preset))
            .display_format(config.format_for(preset))
            .tick_interval(Duration::from_millis(config.tick_interval_ms))
    }
}

impl Default for TimerOptions {
    fn default() -> Self {
        Self {
            start_offset_ms: DEFAULT_OFFSET_MS,
            observer: Arc::new(LoggingObserver),
            display_format: DisplayFormat::default(),
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl fmt::Debug for TimerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerOptions")
            .field("start_offset_ms", &self.start_offset_ms)
            .field("display_format", &self.display_format)
            .field("tick_interval", &self.tick_interval)
            .finish_non_exhaustive()
    }
}
