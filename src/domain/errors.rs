//! Domain error types
//!
//! This module defines the error hierarchy for the backfill. Errors are grouped by
//! the granularity at which the run reacts to them: setup errors abort the run,
//! page errors stop activity pagination, record errors skip a single record.
//! Adapter errors never expose third-party HTTP client types.

use thiserror::Error;

/// Main backfill error type
///
/// This is the primary error type used throughout the crate.
#[derive(Debug, Error)]
pub enum BackfillError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Fatal setup errors (credentials, login)
    #[error("Setup error: {0}")]
    Setup(#[from] SetupError),

    /// Garmin Connect errors
    #[error("Garmin Connect error: {0}")]
    Garmin(#[from] GarminError),

    /// Notion errors
    #[error("Notion error: {0}")]
    Notion(#[from] NotionError),

    /// A provider record could not be mapped to the destination schema
    #[error("Transform error: {0}")]
    Transform(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors that prevent the run from starting
///
/// Every variant is fatal: the run stops before any record is processed.
#[derive(Debug, Error)]
pub enum SetupError {
    /// One or more required credentials are not set
    #[error("Missing required credentials: {}", .0.join(", "))]
    MissingCredentials(Vec<String>),

    /// The configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Garmin Connect rejected the login
    #[error("Login failed: {0}")]
    LoginFailed(String),
}

/// Garmin Connect errors
#[derive(Debug, Error)]
pub enum GarminError {
    /// Failed to reach Garmin Connect
    #[error("Failed to connect to Garmin Connect: {0}")]
    ConnectionFailed(String),

    /// Sign-in was rejected or the SSO flow returned something unexpected
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// An API call was made before `login`
    #[error("Not logged in")]
    NotAuthenticated,

    /// Unexpected response payload
    #[error("Invalid response from Garmin Connect: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Non-success HTTP status
    #[error("Request failed: {status} - {message}")]
    RequestFailed { status: u16, message: String },
}

/// Notion errors
#[derive(Debug, Error)]
pub enum NotionError {
    /// Failed to reach the Notion API
    #[error("Failed to connect to Notion: {0}")]
    ConnectionFailed(String),

    /// Database query failed
    #[error("Failed to query database {database_id}: {message}")]
    QueryFailed { database_id: String, message: String },

    /// Page creation failed (validation, missing property, permissions)
    #[error("Failed to create page in database {database_id}: {message}")]
    CreateFailed { database_id: String, message: String },

    /// Rate limit exceeded (429)
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Unexpected response payload
    #[error("Invalid response from Notion: {0}")]
    InvalidResponse(String),
}

impl From<std::io::Error> for BackfillError {
    fn from(err: std::io::Error) -> Self {
        BackfillError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BackfillError {
    fn from(err: serde_json::Error) -> Self {
        BackfillError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for BackfillError {
    fn from(err: toml::de::Error) -> Self {
        BackfillError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backfill_error_display() {
        let err = BackfillError::Configuration("batch_size must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: batch_size must be positive"
        );
    }

    #[test]
    fn test_missing_credentials_lists_names() {
        let err = SetupError::MissingCredentials(vec![
            "GARMIN_EMAIL".to_string(),
            "NOTION_TOKEN".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Missing required credentials: GARMIN_EMAIL, NOTION_TOKEN"
        );
    }

    #[test]
    fn test_garmin_error_conversion() {
        let err: BackfillError = GarminError::NotAuthenticated.into();
        assert!(matches!(err, BackfillError::Garmin(GarminError::NotAuthenticated)));
    }

    #[test]
    fn test_notion_error_display() {
        let err = NotionError::CreateFailed {
            database_id: "db-1".to_string(),
            message: "Calories is not a property that exists.".to_string(),
        };
        assert!(err.to_string().contains("db-1"));
        assert!(err.to_string().contains("Calories"));
    }

    #[test]
    fn test_setup_error_conversion() {
        let err: BackfillError = SetupError::LoginFailed("bad password".to_string()).into();
        assert!(matches!(err, BackfillError::Setup(SetupError::LoginFailed(_))));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err: BackfillError = json_err.into();
        assert!(matches!(err, BackfillError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("a = = b").unwrap_err();
        let err: BackfillError = toml_err.into();
        assert!(err.to_string().contains("TOML parse error"));
    }
}
