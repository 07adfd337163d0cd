mod config;
mod error;

pub use config::{AppConfig, AppConfigExt, DisplayFormat, TimerPreset};
pub use error::ConfigError;
