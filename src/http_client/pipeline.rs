// ABOUTME: Request pipeline: sends through the transport, shapes responses, retries HTTP 429
// ABOUTME: Backoff honours Retry-After and falls back to exponential delays
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Request Pipeline
//!
//! Every API call goes through [`RequestPipeline::execute`]. The request is
//! resolved once and re-sent unchanged on each retry. Only HTTP 429 is
//! retried; transport failures and other statuses surface immediately.
//!
//! The wait between attempts is the `Retry-After` header when it is a whole
//! number of seconds, otherwise `2^(attempt-1)` seconds. Waiting goes through
//! an injected [`Sleeper`] so tests can record delays instead of sleeping.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use asana_core::models::{ApiOutput, HttpMethod, ResponseShape};
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument, warn};

use super::request::{RequestOptions, TransportRequest};
use super::response::{error_body, into_output, parse_retry_after, status_error};
use super::transport::{HttpTransport, TransportResponse};
use crate::constants::retry;
use crate::errors::{ApiError, ApiResult};

/// Asynchronous wait between attempts
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Suspend the current task for `duration`
    async fn sleep(&self, duration: Duration);
}

/// Sleeper backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Attempt budget for throttled calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total requests allowed per logical call while throttled
    pub max_retries: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: retry::DEFAULT_MAX_RETRIES,
        }
    }
}

impl RetryPolicy {
    /// Policy with the given budget
    #[must_use]
    pub const fn new(max_retries: u32) -> Self {
        Self { max_retries }
    }

    /// Requests issued before giving up; never less than one
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        if self.max_retries == 0 {
            1
        } else {
            self.max_retries
        }
    }

    /// Exponential delay after the 1-based `attempt`: 1s, 2s, 4s, ...
    #[must_use]
    pub fn backoff(attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1);
        Duration::from_secs(retry::BACKOFF_BASE_SECS.saturating_pow(exponent))
    }

    /// Delay in whole seconds: the server hint when present, else the backoff
    #[must_use]
    pub fn delay_secs(retry_after: Option<u64>, attempt: u32) -> u64 {
        retry_after.unwrap_or_else(|| Self::backoff(attempt).as_secs())
    }
}

/// Outcome of a single send
enum Attempt {
    /// Final response, successful or not
    Done(TransportResponse),
    /// HTTP 429 with the delay to wait before re-sending
    Throttled {
        response: TransportResponse,
        retry_after: u64,
    },
}

/// Retrying, shape-aware request executor
#[derive(Clone)]
pub struct RequestPipeline {
    transport: Arc<dyn HttpTransport>,
    sleeper: Arc<dyn Sleeper>,
    policy: RetryPolicy,
}

impl std::fmt::Debug for RequestPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestPipeline")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl RequestPipeline {
    /// Pipeline over a transport with the default sleeper and retry budget
    #[must_use]
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            sleeper: Arc::new(TokioSleeper),
            policy: RetryPolicy::default(),
        }
    }

    /// Replace the sleeper
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Replace the retry policy
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Active retry policy
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Execute one logical call
    ///
    /// # Errors
    ///
    /// - [`ApiError::Validation`] for an unusable path, before any network call
    /// - [`ApiError::Transport`] when no response was obtained
    /// - [`ApiError::RateLimited`] once the attempt budget is spent on 429s
    /// - [`ApiError::Status`] for any other non-2xx, or a non-JSON 2xx body
    ///   under the `Normal` and `Data` shapes
    #[instrument(skip_all, fields(method = %method, path = %path, shape = ?shape))]
    pub async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
        shape: ResponseShape,
    ) -> ApiResult<ApiOutput> {
        let request = TransportRequest::new(method, path, options)?;
        let max_attempts = self.policy.max_attempts();
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            debug!(attempt, max_attempts, "Sending request");

            match self.send_once(&request, attempt).await? {
                Attempt::Done(response) if response.is_success() => {
                    debug!(attempt, status = response.status, "Request succeeded");
                    return into_output(&request, response, shape);
                }
                Attempt::Done(response) => {
                    let err = status_error(&request.echo(), &response);
                    debug!(attempt, status = response.status, error = %err, "Request failed");
                    return Err(err);
                }
                Attempt::Throttled {
                    response,
                    retry_after,
                } => {
                    if attempt >= max_attempts {
                        error!(
                            attempt,
                            retry_after, "Rate limit persisted after every attempt"
                        );
                        return Err(ApiError::RateLimited {
                            message: format!("{} /{}", request.method, request.path),
                            retry_after,
                            attempts: attempt,
                            data: error_body(&response),
                        });
                    }

                    warn!(attempt, retry_after, "Rate limited, backing off before retry");
                    self.sleeper.sleep(Duration::from_secs(retry_after)).await;
                }
            }
        }
    }

    /// Execute with an overall deadline covering every attempt and backoff
    ///
    /// # Errors
    ///
    /// Same as [`RequestPipeline::execute`], plus
    /// [`ApiError::DeadlineExceeded`] when `deadline` elapses first
    pub async fn execute_with_deadline(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
        shape: ResponseShape,
        deadline: Duration,
    ) -> ApiResult<ApiOutput> {
        tokio::time::timeout(deadline, self.execute(method, path, options, shape))
            .await
            .unwrap_or_else(|_| {
                warn!(method = %method, path, ?deadline, "Request abandoned at deadline");
                Err(ApiError::DeadlineExceeded {
                    method: method.to_string(),
                    path: path.trim().trim_start_matches('/').to_owned(),
                    deadline,
                })
            })
    }

    /// Execute and deserialize the shaped value into `T`
    ///
    /// # Errors
    ///
    /// Same as [`RequestPipeline::execute`], plus a status error when the
    /// value does not match `T`
    pub async fn execute_as<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        options: RequestOptions,
        shape: ResponseShape,
    ) -> ApiResult<T> {
        self.execute(method, path, options, shape)
            .await?
            .deserialize()
    }

    async fn send_once(&self, request: &TransportRequest, attempt: u32) -> ApiResult<Attempt> {
        let response = self.transport.send(request).await.map_err(|e| {
            warn!(attempt, error = %e, "Transport failure");
            e.into_api_error()
        })?;

        if response.status == retry::RATE_LIMIT_STATUS {
            let retry_after = RetryPolicy::delay_secs(parse_retry_after(&response), attempt);
            return Ok(Attempt::Throttled {
                response,
                retry_after,
            });
        }
        Ok(Attempt::Done(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_from_one_second() {
        let delays: Vec<u64> = (1..=4).map(|a| RetryPolicy::backoff(a).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8]);
    }

    #[test]
    fn zero_budget_still_sends_once() {
        assert_eq!(RetryPolicy::new(0).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().max_attempts(), 3);
    }

    #[test]
    fn header_wins_over_backoff() {
        assert_eq!(RetryPolicy::delay_secs(Some(7), 3), 7);
        assert_eq!(RetryPolicy::delay_secs(None, 3), 4);
    }
}
