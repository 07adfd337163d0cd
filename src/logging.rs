//! Logging for the countdown REPL.
//!
//! Stdout belongs to the prompt and command output, so log lines never go
//! there. Everything at INFO+ (timer completions, bulk resets, preset
//! installation) is written to `~/.config/countdown/countdown.log`, rotated at
//! 10 MB. The terminal only sees WARN+ on stderr. Set `DEBUG_LOGGING=1` to get
//! per-tick debug output from the countdown crates in both sinks.
//!
//! Without a usable log file, stderr becomes the only sink and keeps INFO+.

use std::path::PathBuf;

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

const LOG_FILE_MAX_BYTES: u64 = 10 * 1024 * 1024;
const PROJECT_DEBUG: &str = "countdown=debug,countdown_core=debug";

/// Where a layer writes, which decides how chatty it may be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sink {
    File,
    Terminal,
    /// stderr standing in for a missing log file
    TerminalOnly,
}

fn directive(sink: Sink, debug_logging: bool) -> String {
    let base = match sink {
        Sink::File | Sink::TerminalOnly => "info",
        Sink::Terminal => "warn",
    };
    if debug_logging {
        format!("{base},{PROJECT_DEBUG}")
    } else {
        base.to_string()
    }
}

fn filter(sink: Sink, debug_logging: bool) -> EnvFilter {
    EnvFilter::new(directive(sink, debug_logging))
}

fn terminal_layer<S>(sink: Sink, debug_logging: bool) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter(sink, debug_logging))
}

fn log_path() -> Result<PathBuf, String> {
    let dir = dirs::config_dir()
        .map(|config| config.join("countdown"))
        .ok_or("no config directory on this platform")?;
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("cannot create log directory {}: {e}", dir.display()))?;
    Ok(dir.join("countdown.log"))
}

/// Install the global subscriber.
///
/// Hold the returned guard until the REPL exits so queued file writes are flushed.
pub fn init() -> Option<WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let appender = log_path().and_then(|path| {
        match BasicRollingFileAppender::new(
            &path,
            RollingConditionBasic::new().max_size(LOG_FILE_MAX_BYTES),
            1, // countdown.log plus one rotated file
        ) {
            Ok(appender) => Ok((path, appender)),
            Err(e) => Err(format!("cannot open log file {}: {e}", path.display())),
        }
    });

    match appender {
        Ok((path, appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter(Sink::File, debug_logging));

            tracing_subscriber::registry()
                .with(file_layer)
                .with(terminal_layer(Sink::Terminal, debug_logging))
                .init();

            tracing::info!(log_file = %path.display(), debug_logging, "logging started");
            Some(guard)
        }
        Err(reason) => {
            tracing_subscriber::registry()
                .with(terminal_layer(Sink::TerminalOnly, debug_logging))
                .init();

            tracing::warn!(%reason, "file logging unavailable, logging to stderr");
            None
        }
    }
}
