// ABOUTME: Structured logging setup and secret redaction for diagnostics
// ABOUTME: Installs a tracing subscriber and scrubs bearer tokens from any logged text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Logging
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the embedding application. [`init_logging`] is provided for binaries and
//! tests that want the same output format everywhere.
//!
//! Authorization header values must never reach a log line or an error
//! message. Any text derived from transport errors passes through
//! [`redact_secrets`] before it is stored or emitted.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing_subscriber::{fmt as subscriber_fmt, EnvFilter};

use crate::constants::env_vars;
use crate::errors::{ApiError, ApiResult};

/// Replacement text for scrubbed secrets
pub const REDACTED: &str = "[REDACTED]";

static BEARER_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\b(bearer)\s+[A-Za-z0-9\-._~+/=:]+").ok());

static AUTHORIZATION_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)(authorization)(\s*[:=]\s*)[^\s,;]+").ok());

static TOKEN_PARAM_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?i)((?:access_token|refresh_token|client_secret)=)[^&\s]+").ok()
});

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, one event per line
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ApiError::config(format!(
                "{}: unsupported log format `{other}`",
                env_vars::LOG_FORMAT
            ))),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => f.write_str("pretty"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `asana_client=debug`
    pub filter: String,
    /// Output format
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    /// Read `RUST_LOG` and `LOG_FORMAT`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `LOG_FORMAT` holds an unknown value
    pub fn from_env() -> ApiResult<Self> {
        let filter = env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| "info".to_owned());
        let format = match env::var(env_vars::LOG_FORMAT) {
            Ok(value) => value.parse()?,
            Err(_) => LogFormat::default(),
        };
        Ok(Self { filter, format })
    }
}

/// Install a global `tracing` subscriber
///
/// # Errors
///
/// Returns a configuration error if the filter directive is invalid or a
/// global subscriber is already installed
pub fn init_logging(config: &LoggingConfig) -> ApiResult<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| ApiError::config(format!("invalid log filter `{}`: {e}", config.filter)))?;

    let builder = subscriber_fmt().with_env_filter(filter).with_target(true);
    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    result.map_err(|e| ApiError::config(format!("failed to install log subscriber: {e}")))
}

/// Scrub bearer tokens, `Authorization` values and token query parameters
#[must_use]
pub fn redact_secrets(text: &str) -> String {
    let mut redacted = text.to_owned();
    if let Some(pattern) = BEARER_PATTERN.as_ref() {
        redacted = pattern
            .replace_all(&redacted, format!("$1 {REDACTED}"))
            .into_owned();
    }
    if let Some(pattern) = AUTHORIZATION_PATTERN.as_ref() {
        redacted = pattern
            .replace_all(&redacted, format!("$1$2{REDACTED}"))
            .into_owned();
    }
    if let Some(pattern) = TOKEN_PARAM_PATTERN.as_ref() {
        redacted = pattern
            .replace_all(&redacted, format!("$1{REDACTED}"))
            .into_owned();
    }
    redacted
}
