// ABOUTME: Wire-level model re-exports for the Asana client
// ABOUTME: Groups HTTP method, identifier and response-shape types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

mod gid;
mod http;
mod response;

pub use gid::{Gid, ME};
pub use http::HttpMethod;
pub use response::{ApiOutput, FullResponse, RequestEcho, ResponseShape};
