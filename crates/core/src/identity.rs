use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::AppError;

/// Verified numeric identifier of a chat-platform user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberId(i64);

impl MemberId {
    /// Creates a member identifier from a verified numeric id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }
}

impl Display for MemberId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .parse::<i64>()
            .map(Self)
            .map_err(|error| AppError::Validation(format!("invalid member id '{value}': {error}")))
    }
}

/// Identifier of the community whose roles govern site access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunityId(i64);

impl CommunityId {
    /// Creates a community identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }
}

impl Display for CommunityId {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

impl FromStr for CommunityId {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.trim().parse::<i64>().map(Self).map_err(|error| {
            AppError::Validation(format!("invalid community id '{value}': {error}"))
        })
    }
}
