//! Configuration management for the self-checkout service and kiosk

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    /// When set, a daily-rolling `app.log` is written here as well as stdout
    #[serde(default)]
    pub directory: Option<String>,
}

/// Upstream library-management API and its OAuth2 client-credentials grant
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LibraryConfig {
    pub base_api_url: String,
    pub oauth_server_token: String,
    pub wskey: String,
    pub secret: String,
    pub scope: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    #[serde(default)]
    pub library: LibraryConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix SELFCHECK_)
            .add_source(
                Environment::with_prefix("SELFCHECK")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Credentials are usually injected by the deployment
            .set_override_option("library.wskey", env::var("LIBRARY_WSKEY").ok())?
            .set_override_option("library.secret", env::var("LIBRARY_SECRET").ok())?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations missing any upstream key
    pub fn validate(&self) -> Result<(), ConfigError> {
        let library = &self.library;
        let required = [
            ("wskey", &library.wskey),
            ("secret", &library.secret),
            ("oauth_server_token", &library.oauth_server_token),
            ("base_api_url", &library.base_api_url),
            ("scope", &library.scope),
        ];

        for (key, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Message(format!(
                    "Missing required key 'library.{}' in configuration",
                    key
                )));
            }
        }

        if self.rate_limit.requests_per_minute == 0 {
            return Err(ConfigError::Message(
                "rate_limit.requests_per_minute must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Settings for the terminal kiosk, which only needs to reach the service
#[derive(Debug, Deserialize, Clone)]
pub struct KioskConfig {
    pub server_url: String,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl KioskConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("server_url", "http://127.0.0.1:8080")?
            .set_default("request_timeout_secs", 15)?
            .add_source(File::with_name("config/kiosk").required(false))
            .add_source(
                Environment::with_prefix("SELFCHECK_KIOSK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: None,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            base_api_url: String::new(),
            oauth_server_token: String::new(),
            wskey: String::new(),
            secret: String::new(),
            scope: String::new(),
            request_timeout_secs: 10,
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_minute: 100,
        }
    }
}
