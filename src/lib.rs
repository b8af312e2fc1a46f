// ABOUTME: Main library entry point for the Asana REST API client
// ABOUTME: Request pipeline with rate-limit retry, typed errors and encrypted token storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

// Crate-level attributes:
// - deny(unsafe_code): no unsafe anywhere in the client
#![deny(unsafe_code)]

//! # Asana Client
//!
//! An async client for the Asana REST API.
//!
//! ## Features
//!
//! - **Request pipeline**: one path for every call, with response shaping
//!   (`Full`, `Normal`, `Data`) and retry on HTTP 429 honouring `Retry-After`
//! - **Typed errors**: a single [`ApiError`](errors::ApiError) taxonomy with
//!   status code, upstream message and decoded body
//! - **Token cipher**: AES-256-CTR with HMAC-SHA-512 for OAuth tokens at rest
//! - **Resource layer**: one generic client covering tasks, projects, users,
//!   workspaces, goals and the other collections
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use asana_client::client::AsanaClient;
//! use asana_client::config::ClientConfig;
//! use asana_client::errors::ApiResult;
//! use asana_client::http_client::RequestOptions;
//!
//! #[tokio::main]
//! async fn main() -> ApiResult<()> {
//!     let config = ClientConfig::from_env()?;
//!     let client = AsanaClient::new(&config)?;
//!
//!     let me = client
//!         .users()
//!         .get("me", RequestOptions::new().opt_fields(&["name", "email"]))
//!         .await?;
//!     println!("Authenticated as {}", me["name"]);
//!
//!     Ok(())
//! }
//! ```

/// Client facade handing out resource clients
pub mod client;

/// Environment-based configuration
pub mod config;

/// Application constants
pub mod constants;

/// Token encryption at rest
pub mod crypto;

/// Error taxonomy re-exported from `asana-core`
pub mod errors;

/// Request descriptors, transport and retry pipeline
pub mod http_client;

/// Tracing setup and secret redaction
pub mod logging;

/// Bearer credentials and encrypted token records
pub mod oauth2_client;

/// Generic resource client and input validation
pub mod resources;

pub use asana_core::models;
