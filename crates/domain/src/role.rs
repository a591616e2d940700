use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use subportal_core::{AppError, AppResult};

/// Role names granted access when no explicit allow-list is configured.
pub const DEFAULT_AUTHORIZED_ROLE_NAMES: &[&str] = &[
    "Administrator",
    "Moderator",
    "Curator",
    "Tester",
    "Mechanic",
    "Hunter",
    "Hacker",
];

/// Parses a directory role identifier as a decimal 64-bit integer.
pub fn parse_role_id(value: &str) -> AppResult<i64> {
    value
        .parse::<i64>()
        .map_err(|_| AppError::MalformedRoleId(value.to_owned()))
}

/// Display color of a community role, always `#` followed by six lowercase hex digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleColor(String);

impl RoleColor {
    /// Builds a color from the directory's packed RGB integer.
    #[must_use]
    pub fn from_rgb(value: u32) -> Self {
        Self(format!("#{:06x}", value & 0x00FF_FFFF))
    }

    /// Returns the `#rrggbb` representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// A role defined in the community, translated from the directory's raw record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityRole {
    id: i64,
    name: String,
    color: RoleColor,
}

impl CommunityRole {
    /// Creates a role from already-parsed values.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, color: RoleColor) -> Self {
        Self {
            id,
            name: name.into(),
            color,
        }
    }

    /// Translates a raw directory record, rejecting non-decimal identifiers.
    pub fn from_directory(raw_id: &str, name: impl Into<String>, rgb: u32) -> AppResult<Self> {
        Ok(Self::new(
            parse_role_id(raw_id)?,
            name,
            RoleColor::from_rgb(rgb),
        ))
    }

    /// Returns the numeric role id.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the role display name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Returns the role color.
    #[must_use]
    pub fn color(&self) -> &RoleColor {
        &self.color
    }
}

/// Role names that grant access to the portal.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedRoleNames(BTreeSet<String>);

impl AuthorizedRoleNames {
    /// Creates an allow-list from explicit names.
    pub fn new<I, S>(names: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.trim().is_empty())
            .collect::<BTreeSet<_>>();

        if names.is_empty() {
            return Err(AppError::Validation(
                "authorized role list must contain at least one role name".to_owned(),
            ));
        }

        Ok(Self(names))
    }

    /// Parses a comma-separated list of role names.
    pub fn from_csv(value: &str) -> AppResult<Self> {
        Self::new(value.split(',').map(str::trim))
    }

    /// Returns whether the name is on the allow-list.
    #[must_use]
    pub fn contains(&self, role_name: &str) -> bool {
        self.0.contains(role_name)
    }

    /// Returns the configured names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for AuthorizedRoleNames {
    fn default() -> Self {
        Self(
            DEFAULT_AUTHORIZED_ROLE_NAMES
                .iter()
                .map(|name| (*name).to_owned())
                .collect(),
        )
    }
}
