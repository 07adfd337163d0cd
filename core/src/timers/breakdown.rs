//! Remaining-time breakdown and text formatting
//!
//! A `TimeBreakdown` splits a millisecond duration into day/hour/minute/second
//! buckets with plain integer division. There is no calendar or timezone
//! handling: a "day" is always 86 400 000 ms.

use countdown_types::DisplayFormat;
use serde::{Deserialize, Serialize};

pub const MS_PER_SECOND: u64 = 1_000;
pub const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
pub const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Remaining time split into display buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
    /// Raw remaining milliseconds the buckets were derived from
    pub total_millis: u64,
}

impl TimeBreakdown {
    pub fn from_millis(total_millis: u64) -> Self {
        Self {
            days: total_millis / MS_PER_DAY,
            hours: (total_millis % MS_PER_DAY) / MS_PER_HOUR,
            minutes: (total_millis % MS_PER_HOUR) / MS_PER_MINUTE,
            seconds: (total_millis % MS_PER_MINUTE) / MS_PER_SECOND,
            total_millis,
        }
    }

    /// Milliseconds below whole-second resolution
    pub fn sub_second_millis(&self) -> u64 {
        self.total_millis % MS_PER_SECOND
    }

    pub fn format(&self, format: DisplayFormat) -> String {
        match format {
            DisplayFormat::Full => format!(
                "{:02}:{:02}:{:02}:{:02}",
                self.days, self.hours, self.minutes, self.seconds
            ),
            DisplayFormat::Compact => format!(
                "{}d {}h {}m {}s",
                self.days, self.hours, self.minutes, self.seconds
            ),
            DisplayFormat::Minimal => {
                format!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
            }
        }
    }
}
