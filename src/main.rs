use clap::{Parser, Subcommand};
use std::io::Write;

use countdown::commands;
use countdown::logging;
use countdown::readline;
use countdown::CliContext;
use countdown_core::{ControlCommand, DisplayFormat};

#[tokio::main]
async fn main() -> Result<(), String> {
    let _log_guard = logging::init();
    let ctx = CliContext::new();

    ctx.install_presets().await;

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "countdown")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create (or replace) a timer
    Create {
        #[arg(short, long)]
        key: String,
        #[arg(short, long, allow_negative_numbers = true)]
        offset_ms: Option<i64>,
        #[arg(short, long)]
        format: Option<DisplayFormat>,
        /// Start the timer right away
        #[arg(short, long)]
        start: bool,
    },
    Start {
        #[arg(short, long)]
        key: String,
    },
    Stop {
        #[arg(short, long)]
        key: String,
    },
    Reset {
        #[arg(short, long)]
        key: String,
        #[arg(short, long, allow_negative_numbers = true)]
        offset_ms: Option<i64>,
    },
    ResetAll,
    StartAll,
    StopAll,
    /// Toggle the live countdown (play/pause every timer)
    Live {
        #[arg(long, conflicts_with = "off", required_unless_present = "off")]
        on: bool,
        #[arg(long)]
        off: bool,
    },
    Status {
        #[arg(short, long)]
        key: Option<String>,
    },
    List,
    Config,
    SaveConfig,
    Exit,
}

async fn respond(line: &str, ctx: &CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "countdown".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Create {
            key,
            offset_ms,
            format,
            start,
        }) => commands::create_timer(key, *offset_ms, *format, *start, ctx).await,
        Some(Commands::Start { key }) => commands::start_timer(key, ctx).await?,
        Some(Commands::Stop { key }) => commands::stop_timer(key, ctx).await?,
        Some(Commands::Reset { key, offset_ms }) => {
            commands::reset_timer(key, *offset_ms, ctx).await?
        }
        Some(Commands::ResetAll) => commands::control(ControlCommand::ResetAll, ctx).await,
        Some(Commands::StartAll) => commands::control(ControlCommand::StartAll, ctx).await,
        Some(Commands::StopAll) => commands::control(ControlCommand::StopAll, ctx).await,
        Some(Commands::Live { on, .. }) => commands::set_live(*on, ctx).await,
        Some(Commands::Status { key }) => commands::show_status(key.as_deref(), ctx).await?,
        Some(Commands::List) => commands::list_timers(ctx).await,
        Some(Commands::Config) => commands::show_settings(ctx).await,
        Some(Commands::SaveConfig) => commands::save_settings(ctx).await?,
        Some(Commands::Exit) => {
            commands::exit(ctx).await?;
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
