// ABOUTME: Response decoding and shaping for the request pipeline
// ABOUTME: Projects 2xx bodies per shape and turns error envelopes into status errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use asana_core::models::{ApiOutput, FullResponse, RequestEcho, ResponseShape};
use serde_json::{Map, Value};

use super::request::TransportRequest;
use super::transport::TransportResponse;
use crate::constants::{api, headers};
use crate::errors::ApiError;

/// Decode a body once; an empty or whitespace-only body is `{}`
pub(crate) fn decode_body(raw: &str) -> Result<Value, serde_json::Error> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(raw)
}

/// Project a 2xx response into the requested shape
pub(crate) fn into_output(
    request: &TransportRequest,
    response: TransportResponse,
    shape: ResponseShape,
) -> Result<ApiOutput, ApiError> {
    let decoded = decode_body(&response.body);

    match shape {
        ResponseShape::Full => {
            let TransportResponse {
                status,
                reason,
                headers,
                body,
            } = response;
            Ok(ApiOutput::Full(Box::new(FullResponse {
                status,
                reason,
                headers,
                body: decoded.unwrap_or(Value::Null),
                raw_body: body,
                request: request.echo(),
            })))
        }
        ResponseShape::Normal | ResponseShape::Data => {
            let value = decoded.map_err(|e| ApiError::Status {
                status: response.status,
                message: format!(
                    "{} /{} returned a body that is not JSON: {e}",
                    request.method, request.path
                ),
                data: Value::String(response.body.clone()),
                source: Some(Box::new(e)),
            })?;

            if shape == ResponseShape::Normal {
                return Ok(ApiOutput::Normal(value));
            }
            let data = match value {
                Value::Object(mut members) => {
                    members.remove(api::DATA_MEMBER).unwrap_or(Value::Null)
                }
                _ => Value::Null,
            };
            Ok(ApiOutput::Data(data))
        }
    }
}

/// Decoded error body, or the raw text as a JSON string
pub(crate) fn error_body(response: &TransportResponse) -> Value {
    decode_body(&response.body).unwrap_or_else(|_| Value::String(response.body.clone()))
}

/// First `message` and `help` of an `{"errors": [...]}` envelope
fn envelope_message(body: &Value) -> Option<(String, Option<String>)> {
    let first = body.get(api::ERRORS_MEMBER)?.as_array()?.first()?;
    let message = first.get("message")?.as_str()?.to_owned();
    let help = first
        .get("help")
        .and_then(Value::as_str)
        .filter(|help| !help.is_empty())
        .map(str::to_owned);
    Some((message, help))
}

/// Build the status error for a non-2xx, non-429 response
pub(crate) fn status_error(echo: &RequestEcho, response: &TransportResponse) -> ApiError {
    match decode_body(&response.body) {
        Ok(body) => {
            let detail = envelope_message(&body).map_or_else(
                || {
                    if response.body.trim().is_empty() {
                        response.reason.clone()
                    } else {
                        response.body.clone()
                    }
                },
                |(message, help)| match help {
                    Some(help) => format!("{message} ({help})"),
                    None => message,
                },
            );
            ApiError::Status {
                status: response.status,
                message: format!(
                    "{} /{} failed with status {}: {detail}",
                    echo.method, echo.path, response.status
                ),
                data: body,
                source: None,
            }
        }
        Err(e) => ApiError::Status {
            status: response.status,
            message: response.body.clone(),
            data: Value::String(response.body.clone()),
            source: Some(Box::new(e)),
        },
    }
}

/// `Retry-After` as whole seconds, if present and numeric
pub(crate) fn parse_retry_after(response: &TransportResponse) -> Option<u64> {
    response
        .header(headers::RETRY_AFTER)
        .and_then(|value| value.trim().parse::<u64>().ok())
}
