// ABOUTME: Cryptographic utilities for persisted credentials
// ABOUTME: Re-exports the token cipher and its key-derivation modes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

/// Encrypt-then-MAC cipher for OAuth tokens at rest
pub mod token_cipher;

pub use token_cipher::{KeyDerivation, TokenCipher};
