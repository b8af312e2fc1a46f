// ABOUTME: Shared foundation crate for the Asana API client
// ABOUTME: Hosts the error taxonomy and the wire-level models used by every layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

#![deny(unsafe_code)]

//! # Asana Core
//!
//! Types shared between the request pipeline, the token cipher and the
//! resource layer. Nothing in this crate performs I/O.

/// Error taxonomy (`ApiError`, `ErrorCode`)
pub mod errors;

/// Wire-level models (methods, response shapes, identifiers)
pub mod models;

pub use errors::{ApiError, ApiResult, BoxError, ErrorCode};
pub use models::{ApiOutput, FullResponse, Gid, HttpMethod, RequestEcho, ResponseShape};
