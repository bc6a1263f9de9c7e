//! Configuration management for the Certificate Service
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

use crate::handlers::DEFAULT_MAX_BODY_BYTES;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub api_host: String,

    /// API server port
    pub api_port: u16,

    /// Directory holding persisted data
    pub data_dir: PathBuf,

    /// Certificate collection file name, relative to `data_dir`
    pub data_file: PathBuf,

    /// Request body limit in bytes
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            api_host: env::var("CERTIFY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            api_port: env::var("CERTIFY_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("Invalid CERTIFY_PORT")?,

            data_dir: env::var("CERTIFY_DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),

            data_file: env::var("CERTIFY_DATA_FILE")
                .unwrap_or_else(|_| "certificates.json".to_string())
                .into(),

            max_body_bytes: match env::var("CERTIFY_MAX_BODY_BYTES") {
                Ok(value) => value.parse().context("Invalid CERTIFY_MAX_BODY_BYTES")?,
                Err(_) => DEFAULT_MAX_BODY_BYTES,
            },
        };

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.api_port == 0 {
            anyhow::bail!("CERTIFY_PORT must be greater than 0");
        }

        if self.max_body_bytes == 0 {
            anyhow::bail!("CERTIFY_MAX_BODY_BYTES must be greater than 0");
        }

        if self.data_file.as_os_str().is_empty() {
            anyhow::bail!("CERTIFY_DATA_FILE must not be empty");
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }

    /// Full path of the certificate collection file
    pub fn certificates_file(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }
}
