// Configuration module entry point
// Manages the launcher's ambient configuration and shared runtime state

mod state;
mod types;

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig};

impl Config {
    /// Load configuration from "config.toml" in the working directory.
    /// Every setting has a built-in default, so the file is optional.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from the specified file path (without extension).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "menuserve/0.1")?
            .set_default(
                "http.index_files",
                vec!["index.html".to_string(), "index.htm".to_string()],
            )?
            .build()?;

        settings.try_deserialize()
    }
}
