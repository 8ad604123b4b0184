// ABOUTME: Tests for environment-driven configuration loading
// ABOUTME: Validates required variables, defaults, and logging format selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use nutriplan::config::RemoteStoreConfig;
use nutriplan::logging::{LogFormat, LoggingConfig};
use nutriplan::store::PostgrestStore;
use serial_test::serial;
use std::env;

const ALL_VARS: [&str; 6] = [
    "NUTRIPLAN_STORE_URL",
    "NUTRIPLAN_STORE_API_KEY",
    "NUTRIPLAN_HTTP_TIMEOUT_SECS",
    "NUTRIPLAN_HTTP_CONNECT_TIMEOUT_SECS",
    "LOG_FORMAT",
    "RUST_LOG",
];

/// Helper: start each test from a clean slate
fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_reads_every_variable() {
    clear_env();
    env::set_var("NUTRIPLAN_STORE_URL", "https://example.supabase.co/rest/v1");
    env::set_var("NUTRIPLAN_STORE_API_KEY", "test-key");
    env::set_var("NUTRIPLAN_HTTP_TIMEOUT_SECS", "45");
    env::set_var("NUTRIPLAN_HTTP_CONNECT_TIMEOUT_SECS", "5");

    let config = RemoteStoreConfig::from_env().unwrap();

    assert_eq!(config.base_url, "https://example.supabase.co/rest/v1");
    assert_eq!(config.api_key, "test-key");
    assert_eq!(config.timeout_secs, 45);
    assert_eq!(config.connect_timeout_secs, 5);
    assert!(config.validate().is_ok());
    clear_env();
}

#[test]
#[serial]
fn test_from_env_applies_timeout_defaults() {
    clear_env();
    env::set_var("NUTRIPLAN_STORE_URL", "https://example.supabase.co/rest/v1");
    env::set_var("NUTRIPLAN_STORE_API_KEY", "test-key");

    let config = RemoteStoreConfig::from_env().unwrap();

    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.connect_timeout_secs, 10);
    clear_env();
}

#[test]
#[serial]
fn test_from_env_requires_the_store_url() {
    clear_env();
    env::set_var("NUTRIPLAN_STORE_API_KEY", "test-key");

    let err = RemoteStoreConfig::from_env().unwrap_err();

    assert!(err.to_string().contains("NUTRIPLAN_STORE_URL"));
    clear_env();
}

#[test]
#[serial]
fn test_from_env_rejects_unparseable_timeout() {
    clear_env();
    env::set_var("NUTRIPLAN_STORE_URL", "https://example.supabase.co/rest/v1");
    env::set_var("NUTRIPLAN_STORE_API_KEY", "test-key");
    env::set_var("NUTRIPLAN_HTTP_TIMEOUT_SECS", "soon");

    let err = RemoteStoreConfig::from_env().unwrap_err();

    assert!(err.to_string().contains("NUTRIPLAN_HTTP_TIMEOUT_SECS"));
    clear_env();
}

#[test]
#[serial]
fn test_postgrest_store_builds_from_a_valid_environment() {
    clear_env();
    env::set_var("NUTRIPLAN_STORE_URL", "https://example.supabase.co/rest/v1");
    env::set_var("NUTRIPLAN_STORE_API_KEY", "test-key");

    assert!(PostgrestStore::from_env().is_ok());

    env::set_var("NUTRIPLAN_STORE_URL", "ftp://example.com");
    assert!(PostgrestStore::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_logging_config_reads_format_and_level() {
    clear_env();
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "debug");

    let config = LoggingConfig::from_env();
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, "debug");

    env::set_var("LOG_FORMAT", "compact");
    assert_eq!(LoggingConfig::from_env().format, LogFormat::Compact);

    clear_env();
    let config = LoggingConfig::from_env();
    assert_eq!(config.format, LogFormat::Pretty);
    assert_eq!(config.level, "info");
}
