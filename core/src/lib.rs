pub mod context;
pub mod control;
pub mod timers;

// Re-exports for convenience
pub use context::{AppConfig, AppConfigExt, ConfigError, DisplayFormat, TimerPreset};
pub use control::ControlCommand;
pub use timers::{
    ChannelObserver, CountdownTimer, FnObserver, LoggingObserver, TimeBreakdown, TimerError,
    TimerEvent, TimerObserver, TimerOptions, TimerRegistry, TimerState,
};
