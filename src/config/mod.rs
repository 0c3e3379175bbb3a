use std::env;

use crate::error::AppError;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub logging: LoggingConfig,
    pub request: RequestConfig,
}

/// Analysis service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// HTTP request configuration
///
/// The analysis response is a long-lived stream, so only the connection
/// phase is bounded; there is no total-request timeout.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub connect_timeout_ms: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, AppError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let service = ServiceConfig {
            base_url: env::var("FACTCHECK_BASE_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string()),
        };

        if service.base_url.trim().is_empty() {
            return Err(AppError::Config {
                message: "FACTCHECK_BASE_URL must not be empty".to_string(),
            });
        }

        let logging = LoggingConfig {
            level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: match env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .to_lowercase()
                .as_str()
            {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        let request = RequestConfig {
            connect_timeout_ms: env::var("CONNECT_TIMEOUT_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10000),
        };

        Ok(Config {
            service,
            logging,
            request,
        })
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10000,
        }
    }
}
