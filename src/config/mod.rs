// ABOUTME: Configuration module for the Asana client
// ABOUTME: Environment-only configuration with validated defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

/// Environment-driven client configuration
pub mod environment;

pub use environment::{key_derivation_from_env, ClientConfig};
