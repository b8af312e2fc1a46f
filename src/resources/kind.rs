// ABOUTME: Catalogue of Asana resource kinds handled by the generic resource client
// ABOUTME: Each kind maps to a collection path, an identifier field and a create rule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Asana Client Contributors

use std::fmt;
use std::str::FromStr;

use super::validation::RequiredFields;
use crate::errors::ApiError;

/// Resource kinds reachable through [`ResourceClient`](super::ResourceClient)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Tasks and subtasks
    Tasks,
    /// Projects
    Projects,
    /// Users
    Users,
    /// Workspaces and organizations
    Workspaces,
    /// Goals
    Goals,
    /// Custom field definitions
    CustomFields,
    /// File attachments
    Attachments,
    /// Project sections
    Sections,
    /// Tags
    Tags,
    /// Teams
    Teams,
    /// Portfolios
    Portfolios,
    /// Stories (comments and activity)
    Stories,
}

impl ResourceKind {
    /// Every kind, in declaration order
    pub const ALL: [Self; 12] = [
        Self::Tasks,
        Self::Projects,
        Self::Users,
        Self::Workspaces,
        Self::Goals,
        Self::CustomFields,
        Self::Attachments,
        Self::Sections,
        Self::Tags,
        Self::Teams,
        Self::Portfolios,
        Self::Stories,
    ];

    /// Collection path segment, e.g. `tasks`
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Tasks => "tasks",
            Self::Projects => "projects",
            Self::Users => "users",
            Self::Workspaces => "workspaces",
            Self::Goals => "goals",
            Self::CustomFields => "custom_fields",
            Self::Attachments => "attachments",
            Self::Sections => "sections",
            Self::Tags => "tags",
            Self::Teams => "teams",
            Self::Portfolios => "portfolios",
            Self::Stories => "stories",
        }
    }

    /// Name used for this kind's identifier in validation errors
    #[must_use]
    pub const fn gid_field(self) -> &'static str {
        match self {
            Self::Tasks => "task_gid",
            Self::Projects => "project_gid",
            Self::Users => "user_gid",
            Self::Workspaces => "workspace_gid",
            Self::Goals => "goal_gid",
            Self::CustomFields => "custom_field_gid",
            Self::Attachments => "attachment_gid",
            Self::Sections => "section_gid",
            Self::Tags => "tag_gid",
            Self::Teams => "team_gid",
            Self::Portfolios => "portfolio_gid",
            Self::Stories => "story_gid",
        }
    }

    /// Whether `me` may stand in for an identifier
    #[must_use]
    pub const fn allows_me(self) -> bool {
        matches!(self, Self::Users)
    }

    /// Fields a create payload must carry, or `None` when the kind cannot be
    /// created through its top-level collection
    ///
    /// Sections and stories are created under their parent
    /// (`projects/{gid}/sections`, `tasks/{gid}/stories`), attachments by upload.
    #[must_use]
    pub const fn create_rule(self) -> Option<RequiredFields> {
        match self {
            Self::Tasks => Some(RequiredFields::AnyOf(&["workspace", "projects", "parent"])),
            Self::Projects => Some(RequiredFields::AnyOf(&["workspace", "team"])),
            Self::Goals => Some(RequiredFields::AllOf(&["name", "workspace"])),
            Self::CustomFields => Some(RequiredFields::AllOf(&[
                "workspace",
                "name",
                "resource_subtype",
            ])),
            Self::Tags => Some(RequiredFields::AllOf(&["workspace"])),
            Self::Teams => Some(RequiredFields::AllOf(&["name", "organization"])),
            Self::Portfolios => Some(RequiredFields::AllOf(&["name", "workspace"])),
            Self::Users
            | Self::Workspaces
            | Self::Attachments
            | Self::Sections
            | Self::Stories => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for ResourceKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection() == wanted)
            .ok_or_else(|| ApiError::validation("resource", format!("unknown resource kind `{s}`")))
    }
}
