use crate::core::{AppError, Result};
use std::env;

/// Connection settings for the ERP backend REST API
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        Ok(BackendConfig {
            base_url: env::var("BACKEND_BASE_URL")
                .map_err(|_| AppError::Configuration("BACKEND_BASE_URL not set".to_string()))?,
            timeout_secs: env::var("BACKEND_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid BACKEND_TIMEOUT_SECS".to_string())
                })?,
            max_retries: env::var("BACKEND_MAX_RETRIES")
                .unwrap_or_else(|_| "3".to_string())
                .parse()
                .map_err(|_| {
                    AppError::Configuration("Invalid BACKEND_MAX_RETRIES".to_string())
                })?,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AppError::Configuration(format!(
                "BACKEND_BASE_URL must be an http(s) URL, got: {}",
                self.base_url
            )));
        }

        if self.timeout_secs == 0 {
            return Err(AppError::Configuration(
                "Backend timeout must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
