// ABOUTME: Request descriptor types for the pipeline: query, JSON and multipart bodies
// ABOUTME: Built once per logical call and re-sent unchanged on every retry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use asana_core::models::{HttpMethod, RequestEcho};
use serde_json::Value;

use crate::constants::api;
use crate::errors::{ApiError, ApiResult};

/// Query parameter value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// Single value
    Single(String),
    /// Several values, sent comma-joined
    List(Vec<String>),
}

impl QueryValue {
    /// Value as it appears on the wire
    #[must_use]
    pub fn to_wire(&self) -> String {
        match self {
            Self::Single(value) => value.clone(),
            Self::List(values) => values.join(","),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<&[&str]> for QueryValue {
    fn from(values: &[&str]) -> Self {
        Self::List(values.iter().map(|v| (*v).to_owned()).collect())
    }
}

/// One part of a multipart form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartField {
    /// Form field name
    pub name: String,
    /// Raw field content
    pub content: Vec<u8>,
    /// File name, present for file parts
    pub file_name: Option<String>,
    /// MIME type, present for file parts
    pub content_type: Option<String>,
}

impl MultipartField {
    /// Plain text field
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: value.into().into_bytes(),
            file_name: None,
            content_type: None,
        }
    }

    /// File field
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content: Vec<u8>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content,
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
        }
    }
}

/// Request payload
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON document
    Json(Value),
    /// Multipart form
    Multipart(Vec<MultipartField>),
}

/// Optional query and body of a call
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RequestOptions {
    query: Vec<(String, QueryValue)>,
    body: RequestBody,
}

impl RequestOptions {
    /// Options with no query and no body
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a query parameter, replacing an earlier value for the same key
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.query.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.query.push((key, value));
        }
        self
    }

    /// Request optional fields via `opt_fields`
    #[must_use]
    pub fn opt_fields(self, fields: &[&str]) -> Self {
        self.query(api::OPT_FIELDS, fields)
    }

    /// Attach a JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a multipart body
    #[must_use]
    pub fn multipart(mut self, fields: Vec<MultipartField>) -> Self {
        self.body = RequestBody::Multipart(fields);
        self
    }

    /// Query parameters in insertion order
    #[must_use]
    pub fn query_params(&self) -> &[(String, QueryValue)] {
        &self.query
    }

    /// Request body
    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }
}

/// Fully resolved request handed to the transport
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    /// HTTP method
    pub method: HttpMethod,
    /// Path relative to the transport's base URL, without leading slash
    pub path: String,
    /// Query pairs in wire form
    pub query: Vec<(String, String)>,
    /// Payload
    pub body: RequestBody,
}

impl TransportRequest {
    /// Resolve a call into its wire form
    ///
    /// # Errors
    ///
    /// Returns a validation error if the path is empty, carries a scheme or
    /// host, or could resolve outside the API base URL
    pub fn new(method: HttpMethod, path: &str, options: RequestOptions) -> ApiResult<Self> {
        let path = path.trim().trim_start_matches('/');
        if path.is_empty() {
            return Err(ApiError::validation("path", "must not be empty"));
        }
        if !is_relative_api_path(path) {
            return Err(ApiError::validation(
                "path",
                "must be relative to the API base URL",
            ));
        }

        let RequestOptions { query, body } = options;
        Ok(Self {
            method,
            path: path.to_owned(),
            query: query
                .into_iter()
                .map(|(key, value)| (key, value.to_wire()))
                .collect(),
            body,
        })
    }

    /// Header-free echo used in full responses and diagnostics
    #[must_use]
    pub fn echo(&self) -> RequestEcho {
        RequestEcho {
            method: self.method,
            path: self.path.clone(),
            query: self.query.clone(),
        }
    }
}

/// Only `[A-Za-z0-9_.-]` segments, none of them `.` or `..`
fn is_relative_api_path(path: &str) -> bool {
    path.split('/').all(|segment| {
        segment != "."
            && segment != ".."
            && segment
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_keeps_order_and_replaces_duplicates() {
        let options = RequestOptions::new()
            .query("workspace", "1")
            .opt_fields(&["name", "notes"])
            .query("workspace", "2");

        let request = TransportRequest::new(HttpMethod::Get, "/tasks", options).unwrap();
        assert_eq!(request.path, "tasks");
        assert_eq!(
            request.query,
            vec![
                ("workspace".to_owned(), "2".to_owned()),
                ("opt_fields".to_owned(), "name,notes".to_owned()),
            ]
        );
    }

    #[test]
    fn rejects_absolute_and_empty_paths() {
        assert!(TransportRequest::new(HttpMethod::Get, "", RequestOptions::new()).is_err());
        assert!(TransportRequest::new(
            HttpMethod::Get,
            "https://evil.example/tasks",
            RequestOptions::new()
        )
        .is_err());
    }

    #[test]
    fn rejects_paths_that_escape_the_base_url() {
        for path in [
            "http:127.0.0.1:8080/steal",
            "mailto:someone",
            "\\\\evil.example/tasks",
            "tasks/../../oauth_token",
            "tasks/./1",
            "tasks?opt_fields=name",
            "tasks#frag",
            "tasks/1 2",
        ] {
            assert!(
                TransportRequest::new(HttpMethod::Get, path, RequestOptions::new()).is_err(),
                "{path}"
            );
        }
        assert!(
            TransportRequest::new(HttpMethod::Get, "tasks/42/addProject", RequestOptions::new())
                .is_ok()
        );
    }

    #[test]
    fn echo_omits_body() {
        let options = RequestOptions::new().json(json!({"data": {"name": "x"}}));
        let request = TransportRequest::new(HttpMethod::Post, "tasks", options).unwrap();

        let echo = request.echo();
        assert_eq!(echo.method, HttpMethod::Post);
        assert_eq!(echo.path, "tasks");
        assert!(echo.query.is_empty());
    }
}
