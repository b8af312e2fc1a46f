// ABOUTME: OAuth 2.0 and personal-access-token credentials for the Asana client
// ABOUTME: Bearer credential types plus encrypted token records for persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Credentials
//!
//! The client authenticates with a bearer token, obtained either as a
//! personal access token or through an OAuth 2.0 flow run by the embedding
//! application. The authorization-code exchange itself is out of scope; this
//! module only models the resulting tokens and how they are persisted.

/// Bearer credential types
pub mod credentials;
/// Encrypted-at-rest token records
pub mod token_store;

pub use credentials::{Credentials, OAuth2Token, TokenResponse};
pub use token_store::EncryptedOAuth2Token;
