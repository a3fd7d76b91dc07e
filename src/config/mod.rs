use crate::core::{AppError, Currency, Result};
use std::env;

pub mod backend;
pub mod server;

pub use backend::BackendConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub backend: BackendConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    /// Level for this crate's events when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
    pub default_currency: Currency,
}

/// Output format of the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pretty" | "text" | "" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("Invalid log format: {}", other)),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(AppConfig {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "debug".to_string()),
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_default()
                .parse()
                .map_err(AppError::Configuration)?,
            default_currency: env::var("DEFAULT_CURRENCY")
                .unwrap_or_else(|_| "CDF".to_string())
                .parse()
                .map_err(AppError::Configuration)?,
        })
    }
}

impl AppConfig {
    /// `EnvFilter` directives built from `LOG_LEVEL`
    pub fn log_filter(&self) -> String {
        format!("facturix={},actix_web=info", self.log_level.trim())
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        Ok(Config {
            app: AppConfig::from_env()?,
            server: ServerConfig::from_env()?,
            backend: BackendConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "Server workers must be greater than 0".to_string(),
            ));
        }

        self.backend.validate()
    }
}
