// ABOUTME: Global identifier newtype for Asana resources
// ABOUTME: Validates the numeric-string shape before an identifier reaches a URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ApiError, ApiResult};

/// Alias accepted in place of a user GID for the authenticated user
pub const ME: &str = "me";

/// A validated global identifier
///
/// Deserialization goes through [`Gid::parse_or_me`], so a decoded `Gid` is
/// always well formed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Gid(String);

impl Gid {
    /// Parse a GID, reporting failures against `field`
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is empty or not all ASCII digits
    pub fn parse(field: &str, value: &str) -> ApiResult<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ApiError::validation(field, "must not be empty"));
        }
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ApiError::validation(
                field,
                format!("`{value}` is not a numeric identifier"),
            ));
        }
        Ok(Self(value.to_owned()))
    }

    /// Parse a GID that may also be the `me` alias
    ///
    /// # Errors
    ///
    /// Returns a validation error if the value is neither `me` nor a valid GID
    pub fn parse_or_me(field: &str, value: &str) -> ApiResult<Self> {
        if value.trim() == ME {
            return Ok(Self(ME.to_owned()));
        }
        Self::parse(field, value)
    }

    /// Borrow the identifier text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Gid {
    type Error = ApiError;

    fn try_from(value: String) -> ApiResult<Self> {
        Self::parse_or_me("gid", &value)
    }
}

impl From<Gid> for String {
    fn from(gid: Gid) -> Self {
        gid.0
    }
}

impl AsRef<str> for Gid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialization_validates() {
        let gid: Gid = serde_json::from_str(r#""1204567890""#).unwrap();
        assert_eq!(gid.as_str(), "1204567890");
        assert_eq!(serde_json::to_string(&gid).unwrap(), r#""1204567890""#);

        let me: Gid = serde_json::from_str(r#""me""#).unwrap();
        assert_eq!(me.as_str(), ME);

        assert!(serde_json::from_str::<Gid>(r#""../oauth_token""#).is_err());
        assert!(serde_json::from_str::<Gid>(r#""""#).is_err());
    }

    #[test]
    fn accepts_numeric_strings() {
        let gid = Gid::parse("task_gid", " 1204567890 ").unwrap();
        assert_eq!(gid.as_str(), "1204567890");
    }

    #[test]
    fn rejects_empty_and_non_numeric() {
        assert!(Gid::parse("task_gid", "").is_err());
        assert!(Gid::parse("task_gid", "12/../34").is_err());
        assert!(Gid::parse("task_gid", "me").is_err());
    }

    #[test]
    fn me_alias_only_where_allowed() {
        assert_eq!(Gid::parse_or_me("user_gid", "me").unwrap().as_str(), "me");
        assert!(Gid::parse_or_me("user_gid", "you").is_err());
    }
}
