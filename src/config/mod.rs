// Configuration module entry point
// Layered configuration: built-in defaults, then config file, then environment

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, ViewsConfig,
};

/// Environment variable prefix, e.g. `MVC_SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "MVC";

impl Config {
    /// Load configuration from a file path without extension
    /// (`"config"` reads `config.toml`; a missing file is not an error)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "mvc-micro/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("views.root", "views")?
            .set_default(
                "views.max_partial_expansions",
                crate::template::DEFAULT_MAX_PARTIAL_EXPANSIONS as u64,
            )?
            .set_default("views.cache", false)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
