// ABOUTME: Pre-network input checks for resource calls
// ABOUTME: Identifier shape, path segment names and required payload fields
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use asana_core::models::Gid;
use serde_json::{Map, Value};

use super::kind::ResourceKind;
use crate::errors::{ApiError, ApiResult};

/// Create-time field requirement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredFields {
    /// Every listed field must be present
    AllOf(&'static [&'static str]),
    /// At least one listed field must be present
    AnyOf(&'static [&'static str]),
}

impl RequiredFields {
    /// Check a payload object against the rule
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing field, or the
    /// alternatives when none of an `AnyOf` set is present
    pub fn check(&self, payload: &Map<String, Value>) -> ApiResult<()> {
        let present = |field: &str| payload.get(field).is_some_and(|v| !v.is_null());

        match self {
            Self::AllOf(fields) => fields
                .iter()
                .copied()
                .find(|field| !present(*field))
                .map_or(Ok(()), |field| Err(ApiError::validation(field, "is required"))),
            Self::AnyOf(fields) => {
                if fields.iter().copied().any(present) {
                    Ok(())
                } else {
                    Err(ApiError::validation(
                        "data",
                        format!("one of {} is required", fields.join(", ")),
                    ))
                }
            }
        }
    }
}

/// Validate an identifier for `kind`, accepting `me` where the kind allows it
///
/// # Errors
///
/// Returns a validation error for empty or non-numeric identifiers
pub fn validate_gid(kind: ResourceKind, value: &str) -> ApiResult<Gid> {
    if kind.allows_me() {
        Gid::parse_or_me(kind.gid_field(), value)
    } else {
        Gid::parse(kind.gid_field(), value)
    }
}

/// Validate a relation or action name used as a path segment
///
/// # Errors
///
/// Returns a validation error unless the name is non-empty ASCII letters,
/// digits or underscores
pub fn validate_segment(field: &str, value: &str) -> ApiResult<()> {
    if value.is_empty() {
        return Err(ApiError::validation(field, "must not be empty"));
    }
    if !value
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'_')
    {
        return Err(ApiError::validation(
            field,
            format!("`{value}` is not a valid path segment"),
        ));
    }
    Ok(())
}

/// Require a JSON object payload
///
/// # Errors
///
/// Returns a validation error if the payload is not an object, or is empty
/// when `allow_empty` is false
pub fn payload_object(payload: &Value, allow_empty: bool) -> ApiResult<&Map<String, Value>> {
    let object = payload
        .as_object()
        .ok_or_else(|| ApiError::validation("data", "must be a JSON object"))?;
    if !allow_empty && object.is_empty() {
        return Err(ApiError::validation("data", "must contain at least one field"));
    }
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_of_names_first_missing_field() {
        let payload = json!({"name": "Q3 goal"});
        let err = RequiredFields::AllOf(&["name", "workspace"])
            .check(payload.as_object().unwrap())
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid workspace: is required");
    }

    #[test]
    fn any_of_accepts_a_single_alternative() {
        let payload = json!({"projects": ["12"], "workspace": null});
        let rule = RequiredFields::AnyOf(&["workspace", "projects", "parent"]);
        assert!(rule.check(payload.as_object().unwrap()).is_ok());
        assert!(rule.check(&Map::new()).is_err());
    }

    #[test]
    fn segments_reject_traversal() {
        assert!(validate_segment("relation", "addProject").is_ok());
        assert!(validate_segment("relation", "../users").is_err());
        assert!(validate_segment("relation", "").is_err());
    }

    #[test]
    fn user_gid_accepts_me() {
        assert!(validate_gid(ResourceKind::Users, "me").is_ok());
        assert!(validate_gid(ResourceKind::Tasks, "me").is_err());
    }
}
