// ABOUTME: Shared test doubles for integration tests
// ABOUTME: Scripted transport that records requests and a sleeper that records delays
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `asana_client`
//!
//! The pipeline is exercised without sockets: [`StubTransport`] replays a
//! script of responses and records each request it was given, and
//! [`RecordingSleeper`] records requested delays and returns immediately.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use asana_client::http_client::{
    HttpTransport, RequestPipeline, RetryPolicy, Sleeper, TransportError, TransportRequest,
    TransportResponse,
};
use async_trait::async_trait;

/// One scripted transport outcome
pub enum Scripted {
    Response(TransportResponse),
    Failure(String),
}

/// Transport replaying scripted outcomes in order
///
/// When the script runs out the last entry is repeated, so an "always 429"
/// transport is a script of one.
#[derive(Default)]
pub struct StubTransport {
    script: Mutex<VecDeque<Scripted>>,
    last: Mutex<Option<TransportResponse>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl StubTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_responses(responses: Vec<TransportResponse>) -> Arc<Self> {
        let stub = Self::default();
        stub.script
            .lock()
            .unwrap()
            .extend(responses.into_iter().map(Scripted::Response));
        Arc::new(stub)
    }

    pub fn failing(message: &str) -> Arc<Self> {
        let stub = Self::default();
        stub.script
            .lock()
            .unwrap()
            .push_back(Scripted::Failure(message.to_owned()));
        Arc::new(stub)
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());

        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Scripted::Response(response)) => {
                *self.last.lock().unwrap() = Some(response.clone());
                Ok(response)
            }
            Some(Scripted::Failure(message)) => Err(TransportError::new(message, None)),
            None => self
                .last
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| TransportError::new("stub script exhausted", None)),
        }
    }
}

/// Sleeper that records every requested delay
#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Pipeline over a stub transport and a recording sleeper
pub fn pipeline(
    transport: &Arc<StubTransport>,
    sleeper: &Arc<RecordingSleeper>,
    max_retries: u32,
) -> RequestPipeline {
    RequestPipeline::new(transport.clone())
        .with_sleeper(sleeper.clone())
        .with_retry_policy(RetryPolicy::new(max_retries))
}

pub fn json_response(status: u16, body: &str) -> TransportResponse {
    TransportResponse::new(status, body).with_header("content-type", "application/json")
}

pub fn rate_limited(retry_after: Option<u64>) -> TransportResponse {
    let response = json_response(429, r#"{"errors":[{"message":"Rate limit exceeded"}]}"#);
    match retry_after {
        Some(secs) => response.with_header("Retry-After", secs.to_string()),
        None => response,
    }
}
