//! Configuration schema types
//!
//! Every section has defaults, so an empty file (or no file at all) is a valid
//! starting point; credentials are normally supplied through the environment.

use crate::config::SecretString;
use crate::domain::errors::SetupError;
use crate::domain::DatabaseId;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Environment variable holding the Garmin account email
pub const ENV_GARMIN_EMAIL: &str = "GARMIN_EMAIL";
/// Environment variable holding the Garmin account password
pub const ENV_GARMIN_PASSWORD: &str = "GARMIN_PASSWORD";
/// Environment variable holding the Notion integration token
pub const ENV_NOTION_TOKEN: &str = "NOTION_TOKEN";
/// Environment variable holding the activities database ID
pub const ENV_NOTION_ACTIVITIES_DB: &str = "NOTION_DB_ID";
/// Environment variable holding the steps database ID
pub const ENV_NOTION_STEPS_DB: &str = "NOTION_STEPS_DB_ID";
/// Environment variable holding the sleep database ID
pub const ENV_NOTION_SLEEP_DB: &str = "NOTION_SLEEP_DB_ID";

/// Garmin Connect region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GarminRegion {
    /// garmin.cn
    #[default]
    Cn,
    /// garmin.com
    Global,
}

impl GarminRegion {
    /// Top-level domain suffix of the region's Garmin hosts
    pub fn domain(&self) -> &'static str {
        match self {
            Self::Cn => "garmin.cn",
            Self::Global => "garmin.com",
        }
    }
}

/// Main configuration
///
/// This is the root structure of `backfill.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BackfillConfig {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub garmin: GarminConfig,

    #[serde(default)]
    pub notion: NotionConfig,

    #[serde(default)]
    pub backfill: RunConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BackfillConfig {
    /// Validates the configuration
    ///
    /// Credentials are not checked here; see [`BackfillConfig::credentials`].
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.garmin.validate()?;
        self.notion.validate()?;
        self.backfill.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Collects the credentials and database IDs required for a run
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::MissingCredentials`] naming every missing value by
    /// its environment variable.
    pub fn credentials(&self) -> Result<Credentials, SetupError> {
        let mut missing = Vec::new();

        let email = self
            .garmin
            .email
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        if email.is_none() {
            missing.push(ENV_GARMIN_EMAIL.to_string());
        }

        let password = self
            .garmin
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().is_empty());
        if password.is_none() {
            missing.push(ENV_GARMIN_PASSWORD.to_string());
        }

        let token = self
            .notion
            .token
            .as_ref()
            .filter(|t| !t.expose_secret().is_empty());
        if token.is_none() {
            missing.push(ENV_NOTION_TOKEN.to_string());
        }

        let database = |value: &Option<String>, env: &str, missing: &mut Vec<String>| {
            match value.as_deref().map(DatabaseId::new) {
                Some(Ok(id)) => Some(id),
                _ => {
                    missing.push(env.to_string());
                    None
                }
            }
        };
        let activities = database(
            &self.notion.activities_database_id,
            ENV_NOTION_ACTIVITIES_DB,
            &mut missing,
        );
        let steps = database(
            &self.notion.steps_database_id,
            ENV_NOTION_STEPS_DB,
            &mut missing,
        );
        let sleep = database(
            &self.notion.sleep_database_id,
            ENV_NOTION_SLEEP_DB,
            &mut missing,
        );

        match (email, password, token, activities, steps, sleep) {
            (Some(email), Some(password), Some(token), Some(activities), Some(steps), Some(sleep)) => {
                Ok(Credentials {
                    garmin_email: email.to_string(),
                    garmin_password: password.clone(),
                    notion_token: token.clone(),
                    databases: DatabaseIds {
                        activities,
                        steps,
                        sleep,
                    },
                })
            }
            _ => Err(SetupError::MissingCredentials(missing)),
        }
    }
}

/// Credentials and database IDs needed to start a run
#[derive(Debug, Clone)]
pub struct Credentials {
    pub garmin_email: String,
    pub garmin_password: SecretString,
    pub notion_token: SecretString,
    pub databases: DatabaseIds,
}

/// Destination databases, one per record kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseIds {
    pub activities: DatabaseId,
    pub steps: DatabaseId,
    pub sleep: DatabaseId,
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (check for duplicates but never create pages)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Garmin Connect configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarminConfig {
    /// Account email
    #[serde(default)]
    pub email: Option<String>,

    /// Account password
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub password: Option<SecretString>,

    /// Region the account is registered in
    #[serde(default)]
    pub region: GarminRegion,

    /// Override for the SSO host, e.g. `https://sso.garmin.cn`
    #[serde(default)]
    pub sso_base_url: Option<String>,

    /// Override for the Connect host, e.g. `https://connect.garmin.cn`
    #[serde(default)]
    pub connect_base_url: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for GarminConfig {
    fn default() -> Self {
        Self {
            email: None,
            password: None,
            region: GarminRegion::default(),
            sso_base_url: None,
            connect_base_url: None,
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl GarminConfig {
    /// SSO base URL, derived from the region unless overridden
    pub fn sso_base_url(&self) -> String {
        self.sso_base_url
            .clone()
            .unwrap_or_else(|| format!("https://sso.{}", self.region.domain()))
    }

    /// Connect base URL, derived from the region unless overridden
    pub fn connect_base_url(&self) -> String {
        self.connect_base_url
            .clone()
            .unwrap_or_else(|| format!("https://connect.{}", self.region.domain()))
    }

    fn validate(&self) -> Result<(), String> {
        if self.timeout_seconds == 0 {
            return Err("garmin.timeout_seconds must be greater than 0".to_string());
        }
        for (name, value) in [
            ("garmin.sso_base_url", &self.sso_base_url),
            ("garmin.connect_base_url", &self.connect_base_url),
        ] {
            if let Some(url) = value {
                url::Url::parse(url).map_err(|e| format!("Invalid {name} '{url}': {e}"))?;
            }
        }
        Ok(())
    }
}

/// Notion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token
    #[serde(default)]
    pub token: Option<SecretString>,

    #[serde(default)]
    pub activities_database_id: Option<String>,

    #[serde(default)]
    pub steps_database_id: Option<String>,

    #[serde(default)]
    pub sleep_database_id: Option<String>,

    /// API base URL
    #[serde(default = "default_notion_base_url")]
    pub base_url: String,

    /// Value of the `Notion-Version` header
    #[serde(default = "default_notion_version")]
    pub api_version: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: None,
            activities_database_id: None,
            steps_database_id: None,
            sleep_database_id: None,
            base_url: default_notion_base_url(),
            api_version: default_notion_version(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl NotionConfig {
    fn validate(&self) -> Result<(), String> {
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("Invalid notion.base_url '{}': {e}", self.base_url))?;
        if self.api_version.trim().is_empty() {
            return Err("notion.api_version cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("notion.timeout_seconds must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Backfill range and pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of most recent activities to backfill
    #[serde(default = "default_total_activities")]
    pub total_activities: usize,

    /// Activities requested per page
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Number of calendar days before today to backfill steps and sleep for
    #[serde(default = "default_days_to_backfill")]
    pub days_to_backfill: u32,

    /// Pause after every Garmin call, in milliseconds
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_activities: default_total_activities(),
            batch_size: default_batch_size(),
            days_to_backfill: default_days_to_backfill(),
            pacing_delay_ms: default_pacing_delay_ms(),
        }
    }
}

impl RunConfig {
    fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 || self.batch_size > 1000 {
            return Err(format!(
                "backfill.batch_size must be between 1 and 1000, got {}",
                self.batch_size
            ));
        }
        if self.days_to_backfill > 3650 {
            return Err(format!(
                "backfill.days_to_backfill must be at most 3650, got {}",
                self.days_to_backfill
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation (daily, hourly, never)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid = ["daily", "hourly", "never"];
        if !valid.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path is required when local_enabled = true".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_notion_base_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

fn default_total_activities() -> usize {
    1000
}

fn default_batch_size() -> usize {
    100
}

fn default_days_to_backfill() -> u32 {
    180
}

fn default_pacing_delay_ms() -> u64 {
    1000
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn complete() -> BackfillConfig {
        let mut config = BackfillConfig::default();
        config.garmin.email = Some("runner@example.com".to_string());
        config.garmin.password = Some(secret_string("hunter2".to_string()));
        config.notion.token = Some(secret_string("secret_abc".to_string()));
        config.notion.activities_database_id = Some("db-act".to_string());
        config.notion.steps_database_id = Some("db-steps".to_string());
        config.notion.sleep_database_id = Some("db-sleep".to_string());
        config
    }

    #[test]
    fn test_defaults() {
        let config = BackfillConfig::default();
        assert_eq!(config.backfill.total_activities, 1000);
        assert_eq!(config.backfill.batch_size, 100);
        assert_eq!(config.backfill.days_to_backfill, 180);
        assert_eq!(config.backfill.pacing_delay_ms, 1000);
        assert_eq!(config.garmin.region, GarminRegion::Cn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_region_urls() {
        let mut garmin = GarminConfig::default();
        assert_eq!(garmin.sso_base_url(), "https://sso.garmin.cn");
        assert_eq!(garmin.connect_base_url(), "https://connect.garmin.cn");

        garmin.region = GarminRegion::Global;
        assert_eq!(garmin.connect_base_url(), "https://connect.garmin.com");

        garmin.connect_base_url = Some("http://127.0.0.1:9999".to_string());
        assert_eq!(garmin.connect_base_url(), "http://127.0.0.1:9999");
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut config = BackfillConfig::default();
        config.backfill.batch_size = 0;
        assert!(config.validate().unwrap_err().contains("batch_size"));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = BackfillConfig::default();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_credentials_complete() {
        let credentials = complete().credentials().unwrap();
        assert_eq!(credentials.garmin_email, "runner@example.com");
        assert_eq!(credentials.databases.sleep.as_str(), "db-sleep");
    }

    #[test]
    fn test_credentials_report_every_missing_value() {
        let mut config = complete();
        config.garmin.password = None;
        config.notion.steps_database_id = Some("  ".to_string());

        match config.credentials() {
            Err(SetupError::MissingCredentials(missing)) => {
                assert_eq!(missing, vec!["GARMIN_PASSWORD", "NOTION_STEPS_DB_ID"]);
            }
            other => panic!("expected missing credentials, got {other:?}"),
        }
    }

    #[test]
    fn test_credentials_all_missing() {
        match BackfillConfig::default().credentials() {
            Err(SetupError::MissingCredentials(missing)) => assert_eq!(missing.len(), 6),
            other => panic!("expected missing credentials, got {other:?}"),
        }
    }
}
