//! Config environment variable tests
//!
//! These tests verify that Config::from_env() correctly reads and applies
//! environment variable overrides. Note that Config::from_env() also loads
//! from .env file via dotenvy, so these tests focus on override behavior.
//!
//! Tests use #[serial] to prevent race conditions with shared env vars.

use factcheck_stream::config::{Config, LogFormat};
use serial_test::serial;
use std::env;

#[test]
#[serial]
fn test_config_from_env_has_defaults() {
    env::remove_var("FACTCHECK_BASE_URL");
    env::remove_var("LOG_LEVEL");
    env::remove_var("LOG_FORMAT");
    env::remove_var("CONNECT_TIMEOUT_MS");

    let config = Config::from_env().unwrap();
    assert_eq!(config.service.base_url, "http://127.0.0.1:8000");
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.format, LogFormat::Pretty);
    assert_eq!(config.request.connect_timeout_ms, 10000);
}

#[test]
#[serial]
fn test_config_from_env_custom_base_url() {
    env::set_var("FACTCHECK_BASE_URL", "https://factcheck.example.com");

    let config = Config::from_env().unwrap();
    assert_eq!(config.service.base_url, "https://factcheck.example.com");

    env::remove_var("FACTCHECK_BASE_URL");
}

#[test]
#[serial]
fn test_config_from_env_blank_base_url_is_rejected() {
    env::set_var("FACTCHECK_BASE_URL", "   ");

    let result = Config::from_env();
    assert!(result.is_err());

    env::remove_var("FACTCHECK_BASE_URL");
}

#[test]
#[serial]
fn test_config_from_env_json_log_format() {
    env::set_var("LOG_FORMAT", "json");

    let config = Config::from_env().unwrap();
    assert_eq!(config.logging.format, LogFormat::Json);

    env::remove_var("LOG_FORMAT");
}

#[test]
#[serial]
fn test_config_from_env_custom_connect_timeout() {
    env::set_var("CONNECT_TIMEOUT_MS", "2500");

    let config = Config::from_env().unwrap();
    assert_eq!(config.request.connect_timeout_ms, 2500);

    env::remove_var("CONNECT_TIMEOUT_MS");
}

#[test]
#[serial]
fn test_config_from_env_invalid_timeout_falls_back() {
    env::set_var("CONNECT_TIMEOUT_MS", "not-a-number");

    let config = Config::from_env().unwrap();
    assert_eq!(config.request.connect_timeout_ms, 10000);

    env::remove_var("CONNECT_TIMEOUT_MS");
}
