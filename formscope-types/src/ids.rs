//! Form identity types.
//!
//! A form is either named explicitly by the caller (stable across remounts,
//! used to bind page-level responses) or given a generated token that is
//! unique per mount. Generated tokens use UUID v7 so they are never reused
//! within a process.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque per-mount token for forms without an explicit id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormToken(Uuid);

impl FormToken {
    /// Creates a new token with the current timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a token from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parses a token from a string.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for FormToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FormToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for FormToken {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The key under which one form's state is scoped.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FormId {
    /// Caller-supplied id. Only page-level responses tagged with the same id
    /// are ever matched to this form.
    Explicit(String),
    /// Generated per mount when the caller gives no id.
    Generated(FormToken),
}

impl FormId {
    /// Creates an explicit form id.
    pub fn explicit(id: impl Into<String>) -> Self {
        Self::Explicit(id.into())
    }

    /// Generates a fresh, never-reused form id.
    #[must_use]
    pub fn generate() -> Self {
        Self::Generated(FormToken::new())
    }

    /// Returns true if the id was supplied by the caller.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }

    /// Returns the explicit id string, if any.
    pub fn as_explicit(&self) -> Option<&str> {
        match self {
            Self::Explicit(id) => Some(id),
            Self::Generated(_) => None,
        }
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Explicit(id) => f.write_str(id),
            Self::Generated(token) => write!(f, "form:{token}"),
        }
    }
}

impl From<&str> for FormId {
    fn from(id: &str) -> Self {
        Self::explicit(id)
    }
}

impl From<String> for FormId {
    fn from(id: String) -> Self {
        Self::Explicit(id)
    }
}

impl From<FormToken> for FormId {
    fn from(token: FormToken) -> Self {
        Self::Generated(token)
    }
}
