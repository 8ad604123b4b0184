// ABOUTME: Environment-driven configuration for the remote table store connection
// ABOUTME: Reads base URL, API key, and HTTP timeouts with validation and a loggable summary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Nutriplan Project

//! Remote store configuration.
//!
//! Loaded from environment variables so embedding applications can wire a
//! hosted store without touching code. Validation is separate from loading,
//! letting callers construct configurations programmatically as well.

use std::env;

use anyhow::{bail, Context, Result};
use tracing::info;
use url::Url;

use crate::constants::{defaults, env_vars};

/// Connection settings for the hosted table store.
#[derive(Debug, Clone)]
pub struct RemoteStoreConfig {
    /// Base URL of the store's REST endpoint, e.g.
    /// `https://xyz.supabase.co/rest/v1`.
    pub base_url: String,
    /// API key, sent as both the `apikey` header and the bearer token.
    pub api_key: String,
    /// Overall request timeout in seconds.
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl RemoteStoreConfig {
    /// Load configuration from environment variables.
    ///
    /// `NUTRIPLAN_STORE_URL` and `NUTRIPLAN_STORE_API_KEY` are required; the
    /// timeout variables fall back to crate defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when a required variable is missing or a timeout
    /// value does not parse as an integer.
    pub fn from_env() -> Result<Self> {
        info!("Loading remote store configuration from environment");

        let base_url = env::var(env_vars::STORE_URL)
            .with_context(|| format!("{} must be set", env_vars::STORE_URL))?;
        let api_key = env::var(env_vars::STORE_API_KEY)
            .with_context(|| format!("{} must be set", env_vars::STORE_API_KEY))?;
        let timeout_secs = env_var_or(
            env_vars::HTTP_TIMEOUT_SECS,
            &defaults::HTTP_TIMEOUT_SECS.to_string(),
        )?
        .parse()
        .with_context(|| format!("Invalid {} value", env_vars::HTTP_TIMEOUT_SECS))?;
        let connect_timeout_secs = env_var_or(
            env_vars::HTTP_CONNECT_TIMEOUT_SECS,
            &defaults::HTTP_CONNECT_TIMEOUT_SECS.to_string(),
        )?
        .parse()
        .with_context(|| format!("Invalid {} value", env_vars::HTTP_CONNECT_TIMEOUT_SECS))?;

        Ok(Self {
            base_url,
            api_key,
            timeout_secs,
            connect_timeout_secs,
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is not an absolute http(s) URL, the
    /// API key is blank, or a timeout is zero.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)
            .with_context(|| format!("{} is not a valid URL", env_vars::STORE_URL))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            bail!("{} must use http or https", env_vars::STORE_URL);
        }
        if self.api_key.trim().is_empty() {
            bail!("{} must not be blank", env_vars::STORE_API_KEY);
        }
        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            bail!("HTTP timeouts must be greater than zero");
        }
        Ok(())
    }

    /// One-line summary for startup logging, without the API key.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Remote store: {} (timeout {}s, connect timeout {}s, api key {})",
            self.base_url,
            self.timeout_secs,
            self.connect_timeout_secs,
            if self.api_key.trim().is_empty() {
                "missing"
            } else {
                "set"
            }
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> Result<String> {
    Ok(env::var(key).unwrap_or_else(|_| default.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_config() -> RemoteStoreConfig {
        RemoteStoreConfig {
            base_url: "https://example.supabase.co/rest/v1".into(),
            api_key: "anon-key".into(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        valid_config().validate().unwrap();
    }

    #[test]
    fn rejects_non_http_urls() {
        let mut config = valid_config();
        config.base_url = "ftp://example.com".into();
        assert!(config.validate().is_err());

        config.base_url = "not a url".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_blank_api_key_and_zero_timeouts() {
        let mut config = valid_config();
        config.api_key = "   ".into();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn summary_never_contains_the_key() {
        let summary = valid_config().summary();
        assert!(!summary.contains("anon-key"));
        assert!(summary.contains("api key set"));
    }
}
