// ABOUTME: Application constants for the Asana client
// ABOUTME: Upstream endpoints, retry defaults, header names and key-derivation labels
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

/// Upstream API endpoint defaults
pub mod api {
    /// Production REST base URL
    pub const DEFAULT_BASE_URL: &str = "https://app.asana.com/api/1.0";
    /// Member of the success envelope holding the resource payload
    pub const DATA_MEMBER: &str = "data";
    /// Member of the error envelope holding the error list
    pub const ERRORS_MEMBER: &str = "errors";
    /// Query parameter selecting optional fields
    pub const OPT_FIELDS: &str = "opt_fields";
    /// User agent sent with every request
    pub const USER_AGENT: &str = concat!("asana-client-rust/", env!("CARGO_PKG_VERSION"));
}

/// HTTP header names used by the pipeline
pub mod headers {
    /// Rate-limit hint, integer seconds
    pub const RETRY_AFTER: &str = "retry-after";
}

/// Rate-limit retry defaults
pub mod retry {
    /// Attempt budget for throttled calls
    pub const DEFAULT_MAX_RETRIES: u32 = 3;
    /// Base of the exponential backoff used when `Retry-After` is absent
    pub const BACKOFF_BASE_SECS: u64 = 2;
    /// HTTP status signalling throttling
    pub const RATE_LIMIT_STATUS: u16 = 429;
}

/// Transport timeouts
pub mod timeouts {
    /// Default TCP/TLS connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Default whole-request timeout in seconds
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Token cipher layout and derivation labels
pub mod crypto {
    /// HMAC-SHA-512 digest length
    pub const MAC_LEN: usize = 64;
    /// AES-CTR nonce (initial counter block) length
    pub const NONCE_LEN: usize = 16;
    /// AES-256 key length
    pub const ENCRYPTION_KEY_LEN: usize = 32;
    /// HMAC-SHA-512 key length produced by HKDF
    pub const MAC_KEY_LEN: usize = 64;

    /// HKDF extraction salt, fixed per blob format version
    pub const HKDF_EXTRACT_SALT: &[u8] = b"asana-client/token-cipher/v1";
    /// HKDF info label for the cipher key
    pub const HKDF_ENCRYPTION_INFO: &[u8] = b"encryption-key";
    /// HKDF info label for the MAC key
    pub const HKDF_MAC_INFO: &[u8] = b"authentication-key";

    /// Legacy scheme prefix for the cipher key
    pub const LEGACY_ENCRYPTION_PREFIX: &str = "EncryptionKey_";
    /// Legacy scheme prefix for the MAC key
    pub const LEGACY_MAC_PREFIX: &str = "AuthenticationKey_";
}

/// Environment variable names read by configuration
pub mod env_vars {
    /// Personal access token or OAuth access token
    pub const ACCESS_TOKEN: &str = "ASANA_ACCESS_TOKEN";
    /// API base URL override
    pub const BASE_URL: &str = "ASANA_BASE_URL";
    /// Rate-limit attempt budget
    pub const MAX_RETRIES: &str = "ASANA_MAX_RETRIES";
    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: &str = "ASANA_CONNECT_TIMEOUT_SECS";
    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: &str = "ASANA_REQUEST_TIMEOUT_SECS";
    /// Key-derivation mode for the token cipher (`hkdf` or `legacy`)
    pub const TOKEN_KDF: &str = "ASANA_TOKEN_KDF";
    /// Secret salt used by the CLI token commands
    pub const TOKEN_SALT: &str = "ASANA_TOKEN_SALT";
    /// Log output format (`json` or `pretty`)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}
