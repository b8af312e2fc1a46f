// ABOUTME: Encrypted OAuth token record for persistence by the embedding application
// ABOUTME: Seals access and refresh tokens with the token cipher, keeps metadata in clear
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::credentials::OAuth2Token;
use crate::crypto::{KeyDerivation, TokenCipher};
use crate::errors::ApiResult;

/// OAuth token pair with both secrets encrypted
///
/// Serializable as-is; the embedding application chooses the storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedOAuth2Token {
    /// Encrypted access token blob
    pub access_token: String,
    /// Encrypted refresh token blob
    pub refresh_token: Option<String>,
    /// Token type
    pub token_type: String,
    /// Access token expiry
    pub expires_at: Option<DateTime<Utc>>,
    /// Granted scopes
    pub scope: Option<String>,
    /// Key derivation used for both blobs
    pub key_derivation: KeyDerivation,
    /// When the record was sealed
    pub sealed_at: DateTime<Utc>,
}

impl EncryptedOAuth2Token {
    /// Encrypt a token pair for storage
    ///
    /// # Errors
    ///
    /// Returns an error if either token fails to encrypt
    pub fn seal(
        token: &OAuth2Token,
        cipher: &TokenCipher,
        salt: impl AsRef<[u8]>,
    ) -> ApiResult<Self> {
        let salt = salt.as_ref();
        let access_token = cipher.encrypt(&token.access_token, salt)?;
        let refresh_token = token
            .refresh_token
            .as_ref()
            .map(|refresh| cipher.encrypt(refresh, salt))
            .transpose()?;

        debug!(
            derivation = %cipher.derivation(),
            has_refresh_token = refresh_token.is_some(),
            "Sealed OAuth token record"
        );

        Ok(Self {
            access_token,
            refresh_token,
            token_type: token.token_type.clone(),
            expires_at: token.expires_at,
            scope: token.scope.clone(),
            key_derivation: cipher.derivation(),
            sealed_at: Utc::now(),
        })
    }

    /// Verify and decrypt the stored token pair
    ///
    /// # Errors
    ///
    /// Returns an integrity error if either blob was tampered with or the salt
    /// is wrong; no partial token is returned
    pub fn open(&self, salt: impl AsRef<[u8]>) -> ApiResult<OAuth2Token> {
        let salt = salt.as_ref();
        let cipher = TokenCipher::new(self.key_derivation);

        let access_token = cipher.decrypt_to_string(&self.access_token, salt)?;
        let refresh_token = self
            .refresh_token
            .as_deref()
            .map(|blob| cipher.decrypt_to_string(blob, salt))
            .transpose()?;

        Ok(OAuth2Token {
            access_token,
            refresh_token,
            token_type: self.token_type.clone(),
            expires_at: self.expires_at,
            scope: self.scope.clone(),
        })
    }
}
