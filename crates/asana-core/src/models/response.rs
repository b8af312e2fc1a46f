// ABOUTME: Response projection types returned by the request pipeline
// ABOUTME: FULL / NORMAL / DATA shapes over a decoded upstream response
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::HttpMethod;
use crate::errors::{ApiError, ApiResult};

/// How much of the upstream response a caller wants back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseShape {
    /// Status, reason, headers, decoded body, raw body and the request echo
    Full,
    /// The whole decoded JSON body, envelope included
    Normal,
    /// Only the `data` member of the decoded body
    #[default]
    Data,
}

/// Echo of the request that produced a [`FullResponse`]
///
/// Headers are deliberately absent so credentials never travel with results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEcho {
    /// HTTP method
    pub method: HttpMethod,
    /// Relative resource path
    pub path: String,
    /// Query pairs as sent on the wire
    pub query: Vec<(String, String)>,
}

/// Everything the transport returned, plus the decoded body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullResponse {
    /// HTTP status code
    pub status: u16,
    /// HTTP reason phrase
    pub reason: String,
    /// Response headers, names lower-cased
    pub headers: BTreeMap<String, String>,
    /// Decoded JSON body (`null` when the body was not JSON)
    pub body: Value,
    /// Body exactly as received
    pub raw_body: String,
    /// The originating request
    pub request: RequestEcho,
}

/// Result of a successful pipeline call, projected per [`ResponseShape`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutput {
    /// [`ResponseShape::Full`] projection
    Full(Box<FullResponse>),
    /// [`ResponseShape::Normal`] projection
    Normal(Value),
    /// [`ResponseShape::Data`] projection
    Data(Value),
}

impl ApiOutput {
    /// Shape this output was projected with
    #[must_use]
    pub const fn shape(&self) -> ResponseShape {
        match self {
            Self::Full(_) => ResponseShape::Full,
            Self::Normal(_) => ResponseShape::Normal,
            Self::Data(_) => ResponseShape::Data,
        }
    }

    /// Flatten into a JSON value; `Full` becomes an object with every field
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Full(full) => serde_json::to_value(*full).unwrap_or(Value::Null),
            Self::Normal(value) | Self::Data(value) => value,
        }
    }

    /// Deserialize the projected value into a caller type
    ///
    /// # Errors
    ///
    /// Returns a status error carrying the value if it does not match `T`
    pub fn deserialize<T: DeserializeOwned>(self) -> ApiResult<T> {
        let status = match &self {
            Self::Full(full) => full.status,
            Self::Normal(_) | Self::Data(_) => 200,
        };
        let value = self.into_json();
        serde_json::from_value(value.clone()).map_err(|e| ApiError::Status {
            status,
            message: format!("response did not match the expected type: {e}"),
            data: value,
            source: Some(Box::new(e)),
        })
    }
}
