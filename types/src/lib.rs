//! Shared configuration types for the countdown engine
//!
//! This crate contains serializable types that are shared between the timer
//! engine (countdown-core) and the CLI host.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Default countdown duration (one minute)
pub const DEFAULT_OFFSET_MS: i64 = 60_000;

/// Default period between ticks
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1_000;

/// Timer keys hosted by the promo page variants
pub const DEFAULT_TIMER_KEYS: [&str; 3] = ["v1", "v2-main", "v3-main"];

// ─────────────────────────────────────────────────────────────────────────────
// Display Format
// ─────────────────────────────────────────────────────────────────────────────

/// How a remaining-time breakdown is rendered as text.
///
/// Purely presentational; has no effect on timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayFormat {
    /// `DD:HH:MM:SS`, each field zero-padded to two digits
    #[default]
    Full,
    /// `{d}d {h}h {m}m {s}s`, no padding
    Compact,
    /// `HH:MM:SS`, days are not shown
    Minimal,
}

impl DisplayFormat {
    pub const ALL: [DisplayFormat; 3] = [
        DisplayFormat::Full,
        DisplayFormat::Compact,
        DisplayFormat::Minimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayFormat::Full => "full",
            DisplayFormat::Compact => "compact",
            DisplayFormat::Minimal => "minimal",
        }
    }
}

impl fmt::Display for DisplayFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown display format name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown display format '{0}' (expected full, compact or minimal)")]
pub struct UnknownDisplayFormat(pub String);

impl FromStr for DisplayFormat {
    type Err = UnknownDisplayFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        DisplayFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == lowered)
            .ok_or_else(|| UnknownDisplayFormat(s.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Timer Presets
// ─────────────────────────────────────────────────────────────────────────────

/// A countdown hosted by a page, installed into the registry at startup.
///
/// Unset fields fall back to the global values in [`AppConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerPreset {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset_ms: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<DisplayFormat>,
}

impl TimerPreset {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            offset_ms: None,
            display_format: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// App Config
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Countdown duration used by presets without their own offset
    #[serde(default = "default_offset_ms")]
    pub default_offset_ms: i64,

    /// Period between ticks of every timer
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    #[serde(default)]
    pub display_format: DisplayFormat,

    /// Start preset timers as soon as they are installed
    #[serde(default = "default_true")]
    pub live_countdown: bool,

    #[serde(default = "default_timers")]
    pub timers: Vec<TimerPreset>,
}

impl AppConfig {
    /// Effective duration for a preset
    pub fn offset_for(&self, preset: &TimerPreset) -> i64 {
        preset.offset_ms.unwrap_or(self.default_offset_ms)
    }

    /// Effective display format for a preset
    pub fn format_for(&self, preset: &TimerPreset) -> DisplayFormat {
        preset.display_format.unwrap_or(self.display_format)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_offset_ms: default_offset_ms(),
            tick_interval_ms: default_tick_interval_ms(),
            display_format: DisplayFormat::default(),
            live_countdown: true,
            timers: default_timers(),
        }
    }
}

fn default_offset_ms() -> i64 {
    DEFAULT_OFFSET_MS
}
fn default_tick_interval_ms() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}
fn default_true() -> bool {
    true
}
fn default_timers() -> Vec<TimerPreset> {
    DEFAULT_TIMER_KEYS.into_iter().map(TimerPreset::new).collect()
}
