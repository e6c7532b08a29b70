// Application state module
// Shared by every connection task

use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::app::App;
use crate::controllers;
use crate::template::Renderer;

/// Application state
pub struct AppState {
    pub config: Config,
    pub app: Arc<App>,
    /// Fired once when the server should stop accepting connections
    pub shutdown: Arc<Notify>,
}

impl AppState {
    /// Build the application from the controller manifest and views config
    pub fn new(config: &Config) -> Self {
        let renderer =
            Renderer::with_options(&config.views.root, config.views.renderer_options());
        Self::with_app(config, App::new(controllers::manifest(), renderer))
    }

    pub fn with_app(config: &Config, app: App) -> Self {
        Self {
            config: config.clone(),
            app: Arc::new(app),
            shutdown: Arc::new(Notify::new()),
        }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
