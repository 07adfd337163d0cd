//! Console stand-in for the page countdown widgets

use countdown_core::{DisplayFormat, TimeBreakdown, TimerObserver};

/// Renders a timer's ticks to the log, and announces the sale on completion.
#[derive(Debug, Clone)]
pub struct CountdownWidget {
    key: String,
    format: DisplayFormat,
}

impl CountdownWidget {
    pub fn new(key: impl Into<String>, format: DisplayFormat) -> Self {
        Self {
            key: key.into(),
            format,
        }
    }

    pub fn render(&self, remaining: &TimeBreakdown) -> String {
        format!("{} {}", self.key, remaining.format(self.format))
    }
}

impl TimerObserver for CountdownWidget {
    fn on_tick(&self, remaining: &TimeBreakdown) {
        tracing::debug!(timer = %self.key, "{}", self.render(remaining));
    }

    fn on_complete(&self) {
        tracing::info!(timer = %self.key, "SALE IS LIVE");
    }
}
