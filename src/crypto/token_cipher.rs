// ABOUTME: At-rest encryption for OAuth tokens with encrypt-then-MAC integrity
// ABOUTME: AES-256-CTR with HMAC-SHA-512, keys derived from a caller-supplied secret salt
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Token Cipher
//!
//! Blob layout, base64-encoded as one string:
//!
//! ```text
//! +----------------+-------------+----------------------+
//! | HMAC-SHA-512   | nonce       | AES-256-CTR output   |
//! | 64 bytes       | 16 bytes    | len(plaintext) bytes |
//! +----------------+-------------+----------------------+
//! ```
//!
//! The MAC covers `nonce || ciphertext` and is checked in constant time
//! before any decryption happens.
//!
//! The salt is the only key material. With [`KeyDerivation::Hkdf`] the
//! cipher and MAC keys are expanded from it with HKDF-SHA256 under distinct
//! labels. [`KeyDerivation::Legacy`] reproduces the prefix-concatenation
//! scheme for blobs written by older token stores. Either way the salt must
//! be a high-entropy secret.

use std::fmt;
use std::str::FromStr;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use ctr::cipher::{KeyIvInit, StreamCipher};
use ring::digest::{digest, SHA256};
use ring::hkdf::{KeyType, Salt, HKDF_SHA256};
use ring::hmac;
use ring::rand::{SecureRandom, SystemRandom};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::warn;
use zeroize::Zeroizing;

use crate::constants::crypto::{
    ENCRYPTION_KEY_LEN, HKDF_ENCRYPTION_INFO, HKDF_EXTRACT_SALT, HKDF_MAC_INFO,
    LEGACY_ENCRYPTION_PREFIX, LEGACY_MAC_PREFIX, MAC_KEY_LEN, MAC_LEN, NONCE_LEN,
};
use crate::errors::{ApiError, ApiResult};

type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// How the cipher and MAC keys are derived from the salt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDerivation {
    /// HKDF-SHA256 expansion under distinct labels
    #[default]
    Hkdf,
    /// `SHA-256("EncryptionKey_" || salt)` and `"AuthenticationKey_" || salt`
    Legacy,
}

impl fmt::Display for KeyDerivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hkdf => f.write_str("hkdf"),
            Self::Legacy => f.write_str("legacy"),
        }
    }
}

impl FromStr for KeyDerivation {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hkdf" => Ok(Self::Hkdf),
            "legacy" => Ok(Self::Legacy),
            other => Err(ApiError::config(format!(
                "unknown key derivation `{other}` (expected `hkdf` or `legacy`)"
            ))),
        }
    }
}

/// HKDF output length selector
struct OkmLen(usize);

impl KeyType for OkmLen {
    fn len(&self) -> usize {
        self.0
    }
}

/// Cipher and MAC keys, wiped on drop
struct DerivedKeys {
    encryption: Zeroizing<[u8; ENCRYPTION_KEY_LEN]>,
    mac: Zeroizing<Vec<u8>>,
}

impl DerivedKeys {
    fn derive(mode: KeyDerivation, salt: &[u8]) -> ApiResult<Self> {
        match mode {
            KeyDerivation::Hkdf => Self::derive_hkdf(salt),
            KeyDerivation::Legacy => Ok(Self::derive_legacy(salt)),
        }
    }

    fn derive_hkdf(salt: &[u8]) -> ApiResult<Self> {
        let prk = Salt::new(HKDF_SHA256, HKDF_EXTRACT_SALT).extract(salt);

        let mut encryption = Zeroizing::new([0u8; ENCRYPTION_KEY_LEN]);
        prk.expand(&[HKDF_ENCRYPTION_INFO], OkmLen(ENCRYPTION_KEY_LEN))
            .and_then(|okm| okm.fill(&mut encryption[..]))
            .map_err(|_| ApiError::crypto_unavailable("HKDF expansion of the cipher key failed"))?;

        let mut mac = Zeroizing::new(vec![0u8; MAC_KEY_LEN]);
        prk.expand(&[HKDF_MAC_INFO], OkmLen(MAC_KEY_LEN))
            .and_then(|okm| okm.fill(&mut mac[..]))
            .map_err(|_| ApiError::crypto_unavailable("HKDF expansion of the MAC key failed"))?;

        Ok(Self { encryption, mac })
    }

    fn derive_legacy(salt: &[u8]) -> Self {
        let enc_input = Zeroizing::new([LEGACY_ENCRYPTION_PREFIX.as_bytes(), salt].concat());
        let mut encryption = Zeroizing::new([0u8; ENCRYPTION_KEY_LEN]);
        encryption.copy_from_slice(digest(&SHA256, &enc_input).as_ref());

        let mac = Zeroizing::new([LEGACY_MAC_PREFIX.as_bytes(), salt].concat());

        Self { encryption, mac }
    }

    fn sign(&self, nonce: &[u8], ciphertext: &[u8]) -> hmac::Tag {
        let key = hmac::Key::new(hmac::HMAC_SHA512, &self.mac);
        let mut context = hmac::Context::with_key(&key);
        context.update(nonce);
        context.update(ciphertext);
        context.sign()
    }

    fn keystream(&self, nonce: &[u8]) -> Result<Aes256Ctr, String> {
        Aes256Ctr::new_from_slices(&self.encryption[..], nonce)
            .map_err(|e| format!("invalid key or nonce length: {e}"))
    }
}

/// Encrypts and decrypts persisted token material
///
/// Stateless: each call derives its keys from the salt it is given.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenCipher {
    derivation: KeyDerivation,
}

impl TokenCipher {
    /// Cipher using the given key-derivation mode
    #[must_use]
    pub const fn new(derivation: KeyDerivation) -> Self {
        Self { derivation }
    }

    /// Key-derivation mode in use
    #[must_use]
    pub const fn derivation(&self) -> KeyDerivation {
        self.derivation
    }

    /// Encrypt `plaintext` into an opaque base64 blob
    ///
    /// Decrypting the blob with the same salt returns `plaintext` for every
    /// non-empty salt. An empty salt carries no key material and is refused
    /// here rather than producing a blob anyone could open.
    ///
    /// # Errors
    ///
    /// - `Validation` if the salt is empty
    /// - `CryptoUnavailable` if the system RNG or HKDF cannot be used
    /// - `Encryption` if the cipher rejects its inputs
    pub fn encrypt(&self, plaintext: impl AsRef<[u8]>, salt: impl AsRef<[u8]>) -> ApiResult<String> {
        let keys = self.keys_for(salt.as_ref())?;

        let mut nonce = [0u8; NONCE_LEN];
        SystemRandom::new().fill(&mut nonce).map_err(|_| {
            ApiError::crypto_unavailable("system random number generator is unavailable")
        })?;

        let mut ciphertext = plaintext.as_ref().to_vec();
        keys.keystream(&nonce)
            .and_then(|mut cipher| {
                cipher
                    .try_apply_keystream(&mut ciphertext)
                    .map_err(|e| format!("keystream application failed: {e}"))
            })
            .map_err(ApiError::encryption)?;

        let tag = keys.sign(&nonce, &ciphertext);

        let mut blob = Vec::with_capacity(MAC_LEN + NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(tag.as_ref());
        blob.extend_from_slice(&nonce);
        blob.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(blob))
    }

    /// Verify and decrypt a blob produced by [`TokenCipher::encrypt`]
    ///
    /// The salt must be the non-empty salt used to encrypt; an empty salt is
    /// refused before the blob is inspected.
    ///
    /// # Errors
    ///
    /// - `Validation` if the salt is empty
    /// - `Integrity` if the blob is malformed or its MAC does not verify;
    ///   nothing is decrypted in that case
    /// - `Decryption` if the cipher rejects its inputs
    pub fn decrypt(
        &self,
        blob: &str,
        salt: impl AsRef<[u8]>,
    ) -> ApiResult<Zeroizing<Vec<u8>>> {
        let keys = self.keys_for(salt.as_ref())?;

        let raw = STANDARD.decode(blob).map_err(|e| ApiError::Integrity {
            message: "encrypted blob is not valid base64".to_owned(),
            source: Some(Box::new(e)),
        })?;
        if raw.len() < MAC_LEN + NONCE_LEN {
            return Err(ApiError::integrity(format!(
                "encrypted blob is {} bytes, shorter than the {} byte header",
                raw.len(),
                MAC_LEN + NONCE_LEN
            )));
        }

        let (stored_mac, rest) = raw.split_at(MAC_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        let expected = keys.sign(nonce, ciphertext);
        if !bool::from(expected.as_ref().ct_eq(stored_mac)) {
            warn!(
                blob_len = raw.len(),
                derivation = %self.derivation,
                "Rejected encrypted token blob"
            );
            return Err(ApiError::integrity("MAC verification failed"));
        }

        let mut plaintext = Zeroizing::new(ciphertext.to_vec());
        keys.keystream(nonce)
            .and_then(|mut cipher| {
                cipher
                    .try_apply_keystream(&mut plaintext)
                    .map_err(|e| format!("keystream application failed: {e}"))
            })
            .map_err(ApiError::decryption)?;

        Ok(plaintext)
    }

    /// Decrypt a blob whose plaintext is UTF-8 text
    ///
    /// # Errors
    ///
    /// Same as [`TokenCipher::decrypt`], plus `Decryption` if the plaintext is
    /// not valid UTF-8
    pub fn decrypt_to_string(&self, blob: &str, salt: impl AsRef<[u8]>) -> ApiResult<String> {
        let plaintext = self.decrypt(blob, salt)?;
        String::from_utf8(plaintext.to_vec()).map_err(|e| ApiError::Decryption {
            message: "decrypted token is not valid UTF-8".to_owned(),
            source: Some(Box::new(e)),
        })
    }

    fn keys_for(&self, salt: &[u8]) -> ApiResult<DerivedKeys> {
        if salt.is_empty() {
            return Err(ApiError::validation("salt", "must not be empty"));
        }
        DerivedKeys::derive(self.derivation, salt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hkdf_and_legacy_keys_differ_per_purpose() {
        for mode in [KeyDerivation::Hkdf, KeyDerivation::Legacy] {
            let keys = DerivedKeys::derive(mode, b"salt").unwrap();
            assert_ne!(keys.encryption.to_vec(), *keys.mac);
        }
    }

    #[test]
    fn legacy_cipher_key_is_sha256_of_prefixed_salt() {
        let keys = DerivedKeys::derive(KeyDerivation::Legacy, b"pepper").unwrap();
        let expected = digest(&SHA256, b"EncryptionKey_pepper");

        assert_eq!(&keys.encryption[..], expected.as_ref());
        assert_eq!(&keys.mac[..], b"AuthenticationKey_pepper");
    }

    #[test]
    fn parses_derivation_names() {
        assert_eq!("HKDF".parse::<KeyDerivation>().ok(), Some(KeyDerivation::Hkdf));
        assert_eq!("legacy".parse::<KeyDerivation>().ok(), Some(KeyDerivation::Legacy));
        assert!("pbkdf2".parse::<KeyDerivation>().is_err());
    }
}
