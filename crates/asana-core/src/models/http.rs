// ABOUTME: HTTP method enumeration for upstream API calls
// ABOUTME: Restricted to the verbs the Asana REST API uses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/// HTTP method of an upstream call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// Read a resource or collection
    Get,
    /// Create a resource or invoke an action
    Post,
    /// Update a resource
    Put,
    /// Delete a resource
    Delete,
}

impl HttpMethod {
    /// Canonical upper-case verb
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(ApiError::validation(
                "method",
                format!("unsupported HTTP method `{other}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("get".parse::<HttpMethod>().ok(), Some(HttpMethod::Get));
        assert_eq!("Delete".parse::<HttpMethod>().ok(), Some(HttpMethod::Delete));
        assert!("PATCH".parse::<HttpMethod>().is_err());
    }
}
