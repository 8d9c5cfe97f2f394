//! Identifier newtypes
//!
//! Destination collections are addressed by opaque Notion database IDs. Wrapping
//! them keeps an activities ID from being passed where a sleep ID is expected
//! without noticing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Notion database identifier
///
/// Notion accepts IDs with or without hyphens, so the value is stored exactly as
/// configured.
///
/// # Examples
///
/// ```
/// use garmin_backfill::domain::ids::DatabaseId;
/// use std::str::FromStr;
///
/// let id = DatabaseId::from_str("a8aec43384f447ed84390e8e42c2e089").unwrap();
/// assert_eq!(id.as_str(), "a8aec43384f447ed84390e8e42c2e089");
/// assert!(DatabaseId::new("  ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DatabaseId(String);

impl DatabaseId {
    /// Creates a new DatabaseId, rejecting blank values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Database ID cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatabaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DatabaseId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for DatabaseId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
