use std::sync::Arc;

use countdown_core::{AppConfig, AppConfigExt, TimerObserver, TimerRegistry};
use tokio::sync::RwLock;

use crate::widget::CountdownWidget;

/// Holds all shared state for the CLI application.
/// The registry is the single place bulk controls go through.
#[derive(Clone)]
pub struct CliContext {
    pub config: Arc<RwLock<AppConfig>>,
    pub registry: Arc<RwLock<TimerRegistry>>,
}

impl CliContext {
    pub fn new() -> Self {
        Self::with_config(AppConfig::load())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            registry: Arc::new(RwLock::new(TimerRegistry::new())),
        }
    }

    /// Install the configured page timers, each rendered by its own widget.
    pub async fn install_presets(&self) -> usize {
        let config = self.config.read().await;
        let mut registry = self.registry.write().await;
        let installed = registry.install_presets(&config, |preset| {
            let widget = CountdownWidget::new(preset.key.clone(), config.format_for(preset));
            Arc::new(widget) as Arc<dyn TimerObserver>
        });
        tracing::info!(
            count = installed.len(),
            live = config.live_countdown,
            "page timers installed"
        );
        installed.len()
    }

    /// Stop every timer before the host goes away
    pub async fn teardown(&self) {
        self.registry.read().await.stop_all();
    }
}

impl Default for CliContext {
    fn default() -> Self {
        Self::new()
    }
}
