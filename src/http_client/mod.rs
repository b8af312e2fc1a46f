// ABOUTME: HTTP layer of the Asana client: request descriptors, transport and retry pipeline
// ABOUTME: The pipeline is the single path every API call takes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

/// Retrying request executor
pub mod pipeline;
/// Request descriptor types
pub mod request;
/// Response decoding and shaping
mod response;
/// Transport trait and reqwest implementation
pub mod transport;

pub use pipeline::{RequestPipeline, RetryPolicy, Sleeper, TokioSleeper};
pub use request::{MultipartField, QueryValue, RequestBody, RequestOptions, TransportRequest};
pub use transport::{HttpTransport, ReqwestTransport, TransportError, TransportResponse};
