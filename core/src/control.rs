//! Page-level countdown controls
//!
//! The promo page exposes a "reset timers" button, a live-countdown
//! play/pause toggle and a reset shortcut. Each maps onto one registry bulk
//! operation and produces the notification shown to the user.

use crate::timers::TimerRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    ResetAll,
    StartAll,
    StopAll,
}

impl ControlCommand {
    /// Command for the live-countdown toggle
    pub fn from_live_toggle(live: bool) -> Self {
        if live {
            ControlCommand::StartAll
        } else {
            ControlCommand::StopAll
        }
    }

    pub fn notification(&self) -> &'static str {
        match self {
            ControlCommand::ResetAll => "All timers reset",
            ControlCommand::StartAll => "Timers started",
            ControlCommand::StopAll => "Timers paused",
        }
    }

    /// Run the bulk operation and return the user-facing notification
    pub fn apply(&self, registry: &TimerRegistry) -> &'static str {
        match self {
            ControlCommand::ResetAll => registry.reset_all(),
            ControlCommand::StartAll => registry.start_all(),
            ControlCommand::StopAll => registry.stop_all(),
        }
        self.notification()
    }
}
