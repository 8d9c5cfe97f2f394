//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{
    BackfillConfig, GarminRegion, ENV_GARMIN_EMAIL, ENV_GARMIN_PASSWORD,
    ENV_NOTION_ACTIVITIES_DB, ENV_NOTION_SLEEP_DB, ENV_NOTION_STEPS_DB, ENV_NOTION_TOKEN,
};
use super::secret::secret_string;
use crate::domain::errors::BackfillError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file, or starts from defaults when the file is absent
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`BackfillConfig`]
/// 4. Applies credential variables and `BACKFILL_*` overrides
/// 5. Validates the configuration
///
/// Credentials are checked later, when a run starts, so `validate-config`
/// can report them separately.
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A `${VAR}` placeholder names an unset variable
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use garmin_backfill::config::load_config;
///
/// let config = load_config("backfill.toml").expect("Failed to load config");
/// println!("{} days of steps and sleep", config.backfill.days_to_backfill);
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<BackfillConfig> {
    let path = path.as_ref();

    let mut config = if path.exists() {
        let contents = fs::read_to_string(path).map_err(|e| {
            BackfillError::Configuration(format!(
                "Failed to read configuration file {}: {}",
                path.display(),
                e
            ))
        })?;
        let contents = substitute_env_vars(&contents)?;
        toml::from_str(&contents)?
    } else {
        tracing::debug!(
            path = %path.display(),
            "Configuration file not found, using defaults and environment"
        );
        BackfillConfig::default()
    };

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        BackfillError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format `${VAR_NAME}`
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| BackfillError::Configuration(format!("Invalid placeholder pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&cap[0], &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(BackfillError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match env_value(name) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            BackfillError::Configuration(format!("Invalid value for {name}: '{raw}'"))
        }),
        None => Ok(None),
    }
}

/// Applies credential variables and `BACKFILL_*` overrides
///
/// Environment values take precedence over the file. Overrides follow the
/// pattern `BACKFILL_<SECTION>_<KEY>`, e.g. `BACKFILL_BACKFILL_BATCH_SIZE`.
fn apply_env_overrides(config: &mut BackfillConfig) -> Result<()> {
    // Credentials
    if let Some(val) = env_value(ENV_GARMIN_EMAIL) {
        config.garmin.email = Some(val);
    }
    if let Some(val) = env_value(ENV_GARMIN_PASSWORD) {
        config.garmin.password = Some(secret_string(val));
    }
    if let Some(val) = env_value(ENV_NOTION_TOKEN) {
        config.notion.token = Some(secret_string(val));
    }
    if let Some(val) = env_value(ENV_NOTION_ACTIVITIES_DB) {
        config.notion.activities_database_id = Some(val);
    }
    if let Some(val) = env_value(ENV_NOTION_STEPS_DB) {
        config.notion.steps_database_id = Some(val);
    }
    if let Some(val) = env_value(ENV_NOTION_SLEEP_DB) {
        config.notion.sleep_database_id = Some(val);
    }

    // Application overrides
    if let Some(val) = env_value("BACKFILL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(val) = parse_env("BACKFILL_APPLICATION_DRY_RUN")? {
        config.application.dry_run = val;
    }

    // Garmin overrides
    if let Some(val) = env_value("BACKFILL_GARMIN_REGION") {
        config.garmin.region = match val.to_lowercase().as_str() {
            "cn" => GarminRegion::Cn,
            "global" => GarminRegion::Global,
            other => {
                return Err(BackfillError::Configuration(format!(
                    "Invalid value for BACKFILL_GARMIN_REGION: '{other}'. Must be cn or global"
                )))
            }
        };
    }
    if let Some(val) = env_value("BACKFILL_GARMIN_SSO_BASE_URL") {
        config.garmin.sso_base_url = Some(val);
    }
    if let Some(val) = env_value("BACKFILL_GARMIN_CONNECT_BASE_URL") {
        config.garmin.connect_base_url = Some(val);
    }

    // Notion overrides
    if let Some(val) = env_value("BACKFILL_NOTION_BASE_URL") {
        config.notion.base_url = val;
    }

    // Run overrides
    if let Some(val) = parse_env("BACKFILL_BACKFILL_TOTAL_ACTIVITIES")? {
        config.backfill.total_activities = val;
    }
    if let Some(val) = parse_env("BACKFILL_BACKFILL_BATCH_SIZE")? {
        config.backfill.batch_size = val;
    }
    if let Some(val) = parse_env("BACKFILL_BACKFILL_DAYS_TO_BACKFILL")? {
        config.backfill.days_to_backfill = val;
    }
    if let Some(val) = parse_env("BACKFILL_BACKFILL_PACING_DELAY_MS")? {
        config.backfill.pacing_delay_ms = val;
    }

    // Logging overrides
    if let Some(val) = parse_env("BACKFILL_LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = val;
    }
    if let Some(val) = env_value("BACKFILL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
