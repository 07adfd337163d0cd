//! Timer registry
//!
//! Keyed collection of countdowns hosted by one page. The registry owns no
//! timing state; it only fans bulk operations out to its timers. Hosts build
//! one registry at startup and pass it to whatever needs bulk control.

use std::sync::Arc;

use countdown_types::{AppConfig, TimerPreset};
use hashbrown::HashMap;

use super::{CountdownTimer, TimerError, TimerObserver, TimerOptions};

#[derive(Debug, Default)]
pub struct TimerRegistry {
    timers: HashMap<String, CountdownTimer>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a timer under `key`.
    ///
    /// A timer already registered under the same key is stopped before it is
    /// replaced, so no orphaned tick source is left behind.
    pub fn create(&mut self, key: impl Into<String>, options: TimerOptions) -> CountdownTimer {
        let key = key.into();
        let timer = CountdownTimer::new(options);

        if let Some(previous) = self.timers.insert(key.clone(), timer.clone()) {
            previous.stop();
            tracing::debug!(timer = %key, "replaced existing timer");
        } else {
            tracing::debug!(timer = %key, "timer created");
        }

        timer
    }

    /// Look up a timer. Never creates one.
    pub fn get(&self, key: &str) -> Option<&CountdownTimer> {
        self.timers.get(key)
    }

    pub fn try_get(&self, key: &str) -> Result<&CountdownTimer, TimerError> {
        self.get(key).ok_or_else(|| TimerError::NotFound {
            key: key.to_string(),
        })
    }

    /// Reset every timer to its own retained duration
    pub fn reset_all(&self) {
        for timer in self.timers.values() {
            timer.reset();
        }
        tracing::info!(count = self.timers.len(), "all timers reset");
    }

    pub fn stop_all(&self) {
        for timer in self.timers.values() {
            timer.stop();
        }
        tracing::info!(count = self.timers.len(), "all timers stopped");
    }

    pub fn start_all(&self) {
        for timer in self.timers.values() {
            timer.start();
        }
        tracing::info!(count = self.timers.len(), "all timers started");
    }

    /// Install the configured page timers, starting them when live countdown is on.
    pub fn install_presets<F>(&mut self, config: &AppConfig, mut observer_for: F) -> Vec<CountdownTimer>
    where
        F: FnMut(&TimerPreset) -> Arc<dyn TimerObserver>,
    {
        let mut installed = Vec::with_capacity(config.timers.len());
        for preset in &config.timers {
            let options = TimerOptions::from_preset(config, preset).shared_observer(observer_for(preset));
            let timer = self.create(preset.key.clone(), options);
            if config.live_countdown {
                timer.start();
            }
            installed.push(timer);
        }
        installed
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Registered keys, sorted for stable display
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.timers.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CountdownTimer)> {
        self.timers.iter().map(|(k, t)| (k.as_str(), t))
    }
}
