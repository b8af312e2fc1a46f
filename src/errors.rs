// ABOUTME: Error module re-exports from the asana-core crate
// ABOUTME: Keeps `crate::errors` as the single import path for the taxonomy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! Unified error handling.
//!
//! The canonical definitions live in `asana_core::errors` so that code
//! depending only on the wire models can still name the error types.

pub use asana_core::errors::{ApiError, ApiResult, BoxError, ErrorCode};
