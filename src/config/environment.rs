// ABOUTME: Environment-based configuration for the Asana client
// ABOUTME: Reads credentials, base URL, retry budget, timeouts and cipher mode from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Client Configuration
//!
//! Configuration comes from the process environment only; there is no
//! configuration file. Every value except the access token has a default.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::constants::{api, env_vars, retry, timeouts};
use crate::crypto::{KeyDerivation, TokenCipher};
use crate::errors::{ApiError, ApiResult};
use crate::oauth2_client::Credentials;

/// Settings needed to build an [`AsanaClient`](crate::client::AsanaClient)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL; request paths are resolved relative to it
    pub base_url: Url,
    /// Credentials used for the bearer `Authorization` header
    pub credentials: Credentials,
    /// Attempt budget for calls answered with HTTP 429
    pub max_retries: u32,
    /// TCP/TLS connect timeout
    pub connect_timeout: Duration,
    /// Whole-request timeout enforced by the transport
    pub request_timeout: Duration,
    /// Key-derivation mode for persisted token encryption
    pub key_derivation: KeyDerivation,
    /// User agent header value
    pub user_agent: String,
}

impl ClientConfig {
    /// Configuration with defaults for everything but the credentials
    ///
    /// # Errors
    ///
    /// Never fails for the built-in base URL; the `Result` keeps the signature
    /// aligned with [`ClientConfig::with_base_url`]
    pub fn new(credentials: Credentials) -> ApiResult<Self> {
        Ok(Self {
            base_url: parse_base_url(api::DEFAULT_BASE_URL)?,
            credentials,
            max_retries: retry::DEFAULT_MAX_RETRIES,
            connect_timeout: Duration::from_secs(timeouts::DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(timeouts::DEFAULT_REQUEST_TIMEOUT_SECS),
            key_derivation: KeyDerivation::default(),
            user_agent: api::USER_AGENT.to_owned(),
        })
    }

    /// Load configuration from the environment
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `ASANA_ACCESS_TOKEN` is missing or any
    /// variable holds an unparseable value
    pub fn from_env() -> ApiResult<Self> {
        let token = env::var(env_vars::ACCESS_TOKEN)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| {
                ApiError::config(format!("{} must be set", env_vars::ACCESS_TOKEN))
            })?;

        let mut config = Self::new(Credentials::personal_access_token(token.trim()))?;

        if let Some(base_url) = read_var(env_vars::BASE_URL) {
            config.base_url = parse_base_url(&base_url)?;
        }
        if let Some(max_retries) = read_parsed::<u32>(env_vars::MAX_RETRIES)? {
            config.max_retries = max_retries;
        }
        if let Some(secs) = read_parsed::<u64>(env_vars::CONNECT_TIMEOUT_SECS)? {
            config.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = read_parsed::<u64>(env_vars::REQUEST_TIMEOUT_SECS)? {
            config.request_timeout = Duration::from_secs(secs);
        }
        config.key_derivation = key_derivation_from_env()?;

        config.validate()?;
        Ok(config)
    }

    /// Override the base URL
    ///
    /// # Errors
    ///
    /// Returns a configuration error unless the URL is absolute http(s)
    pub fn with_base_url(mut self, base_url: &str) -> ApiResult<Self> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    /// Override the rate-limit attempt budget
    #[must_use]
    pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Override the request timeout
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Cipher for persisting tokens in the configured derivation mode
    #[must_use]
    pub const fn token_cipher(&self) -> TokenCipher {
        TokenCipher::new(self.key_derivation)
    }

    /// Check cross-field invariants
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero timeout
    pub fn validate(&self) -> ApiResult<()> {
        if self.request_timeout.is_zero() {
            return Err(ApiError::config(format!(
                "{} must be greater than zero",
                env_vars::REQUEST_TIMEOUT_SECS
            )));
        }
        if self.connect_timeout.is_zero() {
            return Err(ApiError::config(format!(
                "{} must be greater than zero",
                env_vars::CONNECT_TIMEOUT_SECS
            )));
        }
        Ok(())
    }
}

/// Key-derivation mode from `ASANA_TOKEN_KDF`, defaulting to HKDF
///
/// Does not require an access token, so token tooling can use it alone.
///
/// # Errors
///
/// Returns a configuration error for an unknown mode
pub fn key_derivation_from_env() -> ApiResult<KeyDerivation> {
    Ok(read_parsed::<KeyDerivation>(env_vars::TOKEN_KDF)?.unwrap_or_default())
}

fn read_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn read_parsed<T>(name: &str) -> ApiResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    read_var(name)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| ApiError::config(format!("{name}: invalid value `{raw}`: {e}")))
        })
        .transpose()
}

/// Parse and normalize a base URL so relative joins keep its path
fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let mut normalized = raw.trim().trim_end_matches('/').to_owned();
    normalized.push('/');

    let url = Url::parse(&normalized)
        .map_err(|e| ApiError::config(format!("invalid base URL `{raw}`: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::config(format!(
            "base URL must use http or https, got `{other}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_keeps_api_prefix_for_relative_joins() {
        let url = parse_base_url("https://app.asana.com/api/1.0").unwrap();
        assert_eq!(url.as_str(), "https://app.asana.com/api/1.0/");
        assert_eq!(
            url.join("tasks/123").unwrap().as_str(),
            "https://app.asana.com/api/1.0/tasks/123"
        );
    }

    #[test]
    fn rejects_non_http_base_url() {
        assert!(parse_base_url("ftp://example.com").is_err());
        assert!(parse_base_url("not a url").is_err());
    }
}
