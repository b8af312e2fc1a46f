// ABOUTME: Bearer credential types: personal access tokens and OAuth 2.0 tokens
// ABOUTME: Debug output redacts every secret so credentials are safe to log
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::logging::REDACTED;

/// Credentials attached as `Authorization: Bearer <token>`
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Personal access token issued from the developer console
    PersonalAccessToken(String),
    /// Token pair obtained through OAuth 2.0
    OAuth2(OAuth2Token),
}

impl Credentials {
    /// Wrap a personal access token
    pub fn personal_access_token(token: impl Into<String>) -> Self {
        Self::PersonalAccessToken(token.into())
    }

    /// Token value placed in the bearer header
    #[must_use]
    pub fn bearer_token(&self) -> &str {
        match self {
            Self::PersonalAccessToken(token) => token,
            Self::OAuth2(token) => &token.access_token,
        }
    }

    /// Whether the credentials are known to be expired
    #[must_use]
    pub fn is_expired(&self, skew: Duration) -> bool {
        match self {
            Self::PersonalAccessToken(_) => false,
            Self::OAuth2(token) => token.is_expired(skew),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PersonalAccessToken(_) => f
                .debug_tuple("PersonalAccessToken")
                .field(&REDACTED)
                .finish(),
            Self::OAuth2(token) => f.debug_tuple("OAuth2").field(token).finish(),
        }
    }
}

/// OAuth 2.0 token pair
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Token {
    /// Short-lived access token
    pub access_token: String,
    /// Refresh token, absent for some grant types
    pub refresh_token: Option<String>,
    /// Token type, normally `bearer`
    pub token_type: String,
    /// Access token expiry
    pub expires_at: Option<DateTime<Utc>>,
    /// Granted scopes, space separated
    pub scope: Option<String>,
}

impl OAuth2Token {
    /// Whether the access token expires within `skew` of now
    #[must_use]
    pub fn is_expired(&self, skew: Duration) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - skew <= Utc::now())
    }

    /// Build a token from a token-endpoint response received at `received_at`
    #[must_use]
    pub fn from_response(response: TokenResponse, received_at: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type,
            expires_at: response
                .expires_in
                .map(|secs| received_at + Duration::seconds(secs)),
            scope: response.scope,
        }
    }
}

impl fmt::Debug for OAuth2Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuth2Token")
            .field("access_token", &REDACTED)
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| REDACTED))
            .field("token_type", &self.token_type)
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Body of a successful OAuth 2.0 token-endpoint response
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    /// Issued access token
    pub access_token: String,
    /// Issued refresh token
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Token type
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime of the access token in seconds
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Granted scopes
    #[serde(default)]
    pub scope: Option<String>,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}
