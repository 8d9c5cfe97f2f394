//! Result type alias for the backfill

use super::errors::BackfillError;

/// Result type alias using [`BackfillError`]
///
/// # Examples
///
/// ```
/// use garmin_backfill::domain::result::Result;
/// use garmin_backfill::domain::errors::BackfillError;
///
/// fn parse_batch(input: &str) -> Result<usize> {
///     input
///         .parse()
///         .map_err(|_| BackfillError::Configuration(format!("not a number: {input}")))
/// }
///
/// assert_eq!(parse_batch("100").unwrap(), 100);
/// assert!(parse_batch("many").is_err());
/// ```
pub type Result<T> = std::result::Result<T, BackfillError>;
