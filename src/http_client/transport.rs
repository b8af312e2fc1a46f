// ABOUTME: HTTP transport abstraction and its reqwest-backed implementation
// ABOUTME: Owns the base URL and bearer header; the pipeline only sees plain request/response data
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

//! # Transport
//!
//! [`HttpTransport`] is the seam between the request pipeline and the
//! network. The production implementation, [`ReqwestTransport`], holds one
//! pooled `reqwest::Client` whose default headers carry the bearer token, set
//! once at construction and marked sensitive. Tests substitute their own
//! implementation and never open a socket.

use std::collections::BTreeMap;

use async_trait::async_trait;
use asana_core::models::HttpMethod;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder};
use thiserror::Error;
use tracing::debug;
use url::Url;

use super::request::{MultipartField, RequestBody, TransportRequest};
use crate::config::ClientConfig;
use crate::errors::{ApiError, ApiResult, BoxError};
use crate::logging::redact_secrets;

/// Raw response as received from the network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Reason phrase
    pub reason: String,
    /// Headers keyed by lower-cased name; repeated headers are comma-joined
    pub headers: BTreeMap<String, String>,
    /// Body text
    pub body: String,
}

impl TransportResponse {
    /// Response with the given status and body and no headers
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            reason: String::new(),
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Set the reason phrase
    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Case-insensitive header lookup
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Whether the status is 2xx
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Failure to obtain any response
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl TransportError {
    /// Error with a sanitized message and an optional cause
    pub fn new(message: impl AsRef<str>, source: Option<BoxError>) -> Self {
        Self {
            message: redact_secrets(message.as_ref()),
            source,
        }
    }

    /// Sanitized description
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Convert into the public taxonomy, keeping the cause chain
    #[must_use]
    pub fn into_api_error(self) -> ApiError {
        ApiError::Transport {
            message: self.message.clone(),
            source: Some(Box::new(self)),
        }
    }
}

/// Sends one request and returns whatever response came back
///
/// Implementations must be safe to share across tasks; the pipeline calls
/// `send` concurrently from independent logical calls.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issue the request; `Err` only when no response was obtained
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError>;
}

/// Production transport on top of a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build the transport, baking the bearer token into default headers
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the token is not a valid header value
    /// or the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let mut authorization =
            HeaderValue::from_str(&format!("Bearer {}", config.credentials.bearer_token()))
                .map_err(|_| {
                    ApiError::config("access token contains characters not allowed in a header")
                })?;
        authorization.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, authorization);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                ApiError::config(format!(
                    "failed to build HTTP client: {}",
                    redact_secrets(&e.to_string())
                ))
            })?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    /// Base URL requests are resolved against
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL; the result must stay under it
    fn url(&self, path: &str) -> Result<Url, TransportError> {
        let url = self.base_url.join(path).map_err(|e| {
            TransportError::new(format!("invalid request path `{path}`: {e}"), Some(Box::new(e)))
        })?;

        let base = &self.base_url;
        let same_origin = url.scheme() == base.scheme()
            && url.host_str() == base.host_str()
            && url.port_or_known_default() == base.port_or_known_default();
        if !same_origin || !url.path().starts_with(base.path()) {
            return Err(TransportError::new(
                format!("request path `{path}` resolves outside the API base URL"),
                None,
            ));
        }
        Ok(url)
    }

    fn builder(&self, request: &TransportRequest, url: Url) -> Result<RequestBuilder, TransportError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        };

        let mut builder = self.http.request(method, url);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        Ok(match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        })
    }
}

fn build_form(fields: &[MultipartField]) -> Result<Form, TransportError> {
    fields.iter().try_fold(Form::new(), |form, field| {
        let mut part = Part::bytes(field.content.clone());
        if let Some(file_name) = &field.file_name {
            part = part.file_name(file_name.clone());
        }
        if let Some(content_type) = &field.content_type {
            part = part.mime_str(content_type).map_err(|e| {
                TransportError::new(
                    format!("invalid content type `{content_type}` for `{}`", field.name),
                    Some(Box::new(e)),
                )
            })?;
        }
        Ok(form.part(field.name.clone(), part))
    })
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &TransportRequest) -> Result<TransportResponse, TransportError> {
        let url = self.url(&request.path)?;
        let response = self
            .builder(request, url)?
            .send()
            .await
            .map_err(|e| {
                TransportError::new(
                    format!("{} {}: {e}", request.method, request.path),
                    Some(Box::new(e)),
                )
            })?;

        let status = response.status();
        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            let Ok(value) = value.to_str() else {
                continue;
            };
            headers
                .entry(name.as_str().to_owned())
                .and_modify(|existing: &mut String| {
                    existing.push_str(", ");
                    existing.push_str(value);
                })
                .or_insert_with(|| value.to_owned());
        }

        let body = response.text().await.map_err(|e| {
            TransportError::new(
                format!("{} {}: failed to read response body: {e}", request.method, request.path),
                Some(Box::new(e)),
            )
        })?;

        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            body_len = body.len(),
            "Received upstream response"
        );

        Ok(TransportResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            headers,
            body,
        })
    }
}
