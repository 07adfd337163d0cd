//! Error types for timer operations

use thiserror::Error;

/// Errors surfaced by the timer registry
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("no timer registered under '{key}'")]
    NotFound { key: String },
}
