// ABOUTME: Error taxonomy shared by the request pipeline, token cipher and resource layer
// ABOUTME: Every failure carries a message, a numeric code, a data payload and its cause
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Error Taxonomy
//!
//! A single tagged error type, [`ApiError`], covers every failure the client
//! can surface. Callers branch on the variant (or on [`ErrorCode`]) instead
//! of parsing message strings.
//!
//! Each variant exposes:
//! - a human-readable [`message`](ApiError::message)
//! - a numeric [`code`](ApiError::code): the HTTP status when one exists, `0` otherwise
//! - a structured [`data`](ApiError::data) payload: the decoded API error body, or `{}`
//! - the lower-level cause through [`std::error::Error::source`]

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Boxed lower-level cause retained for diagnostics
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Result alias used across the client
pub type ApiResult<T> = Result<T, ApiError>;

/// Stable error kinds for programmatic branching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// No response was obtained (DNS, TLS, connect or read timeout)
    Transport,
    /// HTTP 429 after the retry budget was spent
    RateLimited,
    /// Any other non-2xx response
    ApiStatus,
    /// Caller-side input rejected before any network call
    Validation,
    /// Platform cryptographic primitives unavailable
    CryptoUnavailable,
    /// MAC mismatch or malformed encrypted blob
    Integrity,
    /// Cipher failure while encrypting
    Encryption,
    /// Cipher failure while decrypting
    Decryption,
    /// Invalid client configuration
    Config,
    /// Caller-imposed deadline elapsed
    DeadlineExceeded,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::RateLimited => "rate_limited",
            Self::ApiStatus => "api_status",
            Self::Validation => "validation",
            Self::CryptoUnavailable => "crypto_unavailable",
            Self::Integrity => "integrity",
            Self::Encryption => "encryption",
            Self::Decryption => "decryption",
            Self::Config => "config",
            Self::DeadlineExceeded => "deadline_exceeded",
        };
        f.write_str(name)
    }
}

/// Every failure mode of the client
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection-level failure with no response available
    #[error("transport error: {message}")]
    Transport {
        /// Sanitized description of the failure
        message: String,
        /// Underlying transport error
        #[source]
        source: Option<BoxError>,
    },

    /// HTTP 429 that outlasted the retry budget
    #[error("rate limited after {attempts} attempt(s), retry after {retry_after}s: {message}")]
    RateLimited {
        /// Method and path of the throttled call
        message: String,
        /// Last retry-after duration observed, in seconds
        retry_after: u64,
        /// Number of requests issued for the logical call
        attempts: u32,
        /// Decoded error body of the final 429 response
        data: Value,
    },

    /// Non-2xx response other than 429
    #[error("{message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Message built from the upstream error envelope, or the raw body
        message: String,
        /// Decoded error body, or the raw body as a JSON string
        data: Value,
        /// Decode failure when the body was not JSON
        #[source]
        source: Option<BoxError>,
    },

    /// Malformed identifier or missing required field
    #[error("invalid {field}: {message}")]
    Validation {
        /// Name of the offending input
        field: String,
        /// What was wrong with it
        message: String,
    },

    /// Cryptographic primitives are not usable on this platform
    #[error("cryptographic primitives unavailable: {message}")]
    CryptoUnavailable {
        /// Description of the missing primitive
        message: String,
    },

    /// Encrypted blob failed its integrity check
    #[error("integrity check failed: {message}")]
    Integrity {
        /// Reason the blob was rejected
        message: String,
        /// Decoding error when the blob was not valid base64
        #[source]
        source: Option<BoxError>,
    },

    /// Cipher failed during encryption
    #[error("encryption failed: {message}")]
    Encryption {
        /// Description of the failure
        message: String,
    },

    /// Cipher failed during decryption
    #[error("decryption failed: {message}")]
    Decryption {
        /// Description of the failure
        message: String,
        /// Underlying error, for example invalid UTF-8 in the plaintext
        #[source]
        source: Option<BoxError>,
    },

    /// Invalid configuration value
    #[error("configuration error: {message}")]
    Config {
        /// Description of the invalid setting
        message: String,
    },

    /// Call did not finish within the caller's deadline
    #[error("request {method} {path} exceeded its deadline of {deadline:?}")]
    DeadlineExceeded {
        /// HTTP method of the abandoned call
        method: String,
        /// Relative path of the abandoned call
        path: String,
        /// Deadline that elapsed
        deadline: Duration,
    },
}

impl ApiError {
    /// Transport failure with a retained cause
    pub fn transport(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Validation failure for a named input
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Integrity failure with no lower-level cause
    pub fn integrity(message: impl Into<String>) -> Self {
        Self::Integrity {
            message: message.into(),
            source: None,
        }
    }

    /// Missing cryptographic primitive
    pub fn crypto_unavailable(message: impl Into<String>) -> Self {
        Self::CryptoUnavailable {
            message: message.into(),
        }
    }

    /// Encryption primitive failure
    pub fn encryption(message: impl Into<String>) -> Self {
        Self::Encryption {
            message: message.into(),
        }
    }

    /// Decryption primitive failure
    pub fn decryption(message: impl Into<String>) -> Self {
        Self::Decryption {
            message: message.into(),
            source: None,
        }
    }

    /// Configuration failure
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Stable kind of this error
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Transport { .. } => ErrorCode::Transport,
            Self::RateLimited { .. } => ErrorCode::RateLimited,
            Self::Status { .. } => ErrorCode::ApiStatus,
            Self::Validation { .. } => ErrorCode::Validation,
            Self::CryptoUnavailable { .. } => ErrorCode::CryptoUnavailable,
            Self::Integrity { .. } => ErrorCode::Integrity,
            Self::Encryption { .. } => ErrorCode::Encryption,
            Self::Decryption { .. } => ErrorCode::Decryption,
            Self::Config { .. } => ErrorCode::Config,
            Self::DeadlineExceeded { .. } => ErrorCode::DeadlineExceeded,
        }
    }

    /// HTTP status when applicable, `0` for transport and local failures
    #[must_use]
    pub const fn code(&self) -> u16 {
        match self {
            Self::RateLimited { .. } => 429,
            Self::Status { status, .. } => *status,
            _ => 0,
        }
    }

    /// Human-readable message without the variant prefix
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Transport { message, .. }
            | Self::RateLimited { message, .. }
            | Self::Status { message, .. }
            | Self::CryptoUnavailable { message }
            | Self::Integrity { message, .. }
            | Self::Encryption { message }
            | Self::Decryption { message, .. }
            | Self::Config { message } => message.clone(),
            Self::Validation { .. } | Self::DeadlineExceeded { .. } => self.to_string(),
        }
    }

    /// Structured payload: the decoded API error body, or an empty object
    #[must_use]
    pub fn data(&self) -> Value {
        match self {
            Self::RateLimited { data, .. } | Self::Status { data, .. } => data.clone(),
            _ => Value::Object(Map::new()),
        }
    }

    /// Retry-after duration observed on the final 429, if this is a rate-limit error
    #[must_use]
    pub const fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::RateLimited { retry_after, .. } => Some(Duration::from_secs(*retry_after)),
            _ => None,
        }
    }

    /// Whether a caller-level retry could plausibly succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Transport { .. } | Self::DeadlineExceeded { .. } => {
                true
            }
            Self::Status { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Whether the upstream reported the resource as missing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}
