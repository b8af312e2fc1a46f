// ABOUTME: Subcommand implementations for asana-cli
// ABOUTME: Raw request passthrough and token cipher commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

pub mod request;
pub mod token;
