use std::io::Write;

use countdown_core::{
    AppConfig, AppConfigExt, ControlCommand, CountdownTimer, DisplayFormat, TimerOptions,
};

use crate::context::CliContext;
use crate::widget::CountdownWidget;

pub async fn create_timer(
    key: &str,
    offset_ms: Option<i64>,
    format: Option<DisplayFormat>,
    start: bool,
    ctx: &CliContext,
) {
    let (offset_ms, format, interval) = {
        let config = ctx.config.read().await;
        (
            offset_ms.unwrap_or(config.default_offset_ms),
            format.unwrap_or(config.display_format),
            config.tick_interval_ms,
        )
    };

    let options = TimerOptions::new()
        .start_offset_ms(offset_ms)
        .display_format(format)
        .tick_interval(std::time::Duration::from_millis(interval))
        .observer(CountdownWidget::new(key, format));

    let timer = ctx.registry.write().await.create(key, options);
    if start {
        timer.start();
    }
    println!("created {key} ({offset_ms}ms, {format})");
}

pub async fn start_timer(key: &str, ctx: &CliContext) -> Result<(), String> {
    let registry = ctx.registry.read().await;
    registry.try_get(key).map_err(|e| e.to_string())?.start();
    Ok(())
}

pub async fn stop_timer(key: &str, ctx: &CliContext) -> Result<(), String> {
    let registry = ctx.registry.read().await;
    registry.try_get(key).map_err(|e| e.to_string())?.stop();
    Ok(())
}

pub async fn reset_timer(key: &str, offset_ms: Option<i64>, ctx: &CliContext) -> Result<(), String> {
    let registry = ctx.registry.read().await;
    let timer = registry.try_get(key).map_err(|e| e.to_string())?;
    match offset_ms {
        Some(offset_ms) => timer.reset_to(offset_ms),
        None => timer.reset(),
    }
    Ok(())
}

pub async fn control(command: ControlCommand, ctx: &CliContext) {
    let notification = command.apply(&*ctx.registry.read().await);
    println!("{notification}");
}

pub async fn set_live(live: bool, ctx: &CliContext) {
    ctx.config.write().await.live_countdown = live;
    control(ControlCommand::from_live_toggle(live), ctx).await;
}

pub async fn show_status(key: Option<&str>, ctx: &CliContext) -> Result<(), String> {
    let registry = ctx.registry.read().await;
    match key {
        Some(key) => {
            let timer = registry.try_get(key).map_err(|e| e.to_string())?;
            println!("{}", status_line(key, timer));
        }
        None => {
            if registry.is_empty() {
                println!("no timers registered");
            }
            for key in registry.keys() {
                if let Some(timer) = registry.get(key) {
                    println!("{}", status_line(key, timer));
                }
            }
        }
    }
    Ok(())
}

fn status_line(key: &str, timer: &CountdownTimer) -> String {
    let remaining = timer
        .get_time_remaining()
        .map(|r| timer.format_time(&r))
        .unwrap_or_else(|| "sale is live".to_string());
    format!("{key:<12} {:<10} {remaining}", format!("{:?}", timer.state()))
}

pub async fn list_timers(ctx: &CliContext) {
    let registry = ctx.registry.read().await;
    for key in registry.keys() {
        if let Some(timer) = registry.get(key) {
            println!(
                "{key:<12} {:>10}ms  {}",
                timer.offset_millis(),
                timer.display_format()
            );
        }
    }
}

pub async fn show_settings(ctx: &CliContext) {
    let config = ctx.config.read().await;
    print_config(&config);
    match AppConfig::config_path() {
        Ok(path) => println!("config file: {}", path.display()),
        Err(e) => println!("config file: unavailable ({e})"),
    }
}

fn print_config(config: &AppConfig) {
    println!("default offset: {}ms", config.default_offset_ms);
    println!("tick interval:  {}ms", config.tick_interval_ms);
    println!("display format: {}", config.display_format);
    println!("live countdown: {}", config.live_countdown);
    for preset in &config.timers {
        println!(
            "  {:<12} {}ms {}",
            preset.key,
            config.offset_for(preset),
            config.format_for(preset)
        );
    }
}

pub async fn save_settings(ctx: &CliContext) -> Result<(), String> {
    ctx.config.read().await.save().map_err(|e| e.to_string())?;
    println!("configuration saved");
    Ok(())
}

pub async fn exit(ctx: &CliContext) -> Result<(), String> {
    ctx.teardown().await;
    write!(std::io::stdout(), "quitting...").map_err(|e| e.to_string())?;
    std::io::stdout().flush().map_err(|e| e.to_string())
}
