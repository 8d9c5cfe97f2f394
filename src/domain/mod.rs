//! Domain models and types.
//!
//! This module contains the types shared by every layer of the backfill:
//!
//! - **Raw provider records** ([`RawActivity`], [`RawDailySteps`], [`RawSleepSession`])
//! - **Destination property model** ([`PropertySet`], [`PropertyValue`], [`QueryFilter`])
//! - **Identifiers** ([`DatabaseId`])
//! - **Error types** ([`BackfillError`], [`SetupError`], [`GarminError`], [`NotionError`])
//! - **Result type alias** ([`Result`])
//!
//! # Example
//!
//! ```rust
//! use garmin_backfill::domain::{Predicate, PropertySet, PropertyValue, QueryFilter};
//!
//! let props = PropertySet::new()
//!     .with("Activity Type", PropertyValue::Title("Walking".to_string()))
//!     .with("Date", PropertyValue::date("2024-05-02"));
//!
//! let key = QueryFilter::single(Predicate::date_equals("Date", "2024-05-02"));
//! assert_eq!(props.len(), 2);
//! assert_eq!(key.describe(), "Date=2024-05-02");
//! ```

pub mod errors;
pub mod ids;
pub mod properties;
pub mod records;
pub mod result;

pub use errors::{BackfillError, GarminError, NotionError, SetupError};
pub use ids::DatabaseId;
pub use properties::{Condition, Icon, Predicate, PropertySet, PropertyValue, QueryFilter};
pub use records::{ActivityType, DailySleepSummary, RawActivity, RawDailySteps, RawSleepSession};
pub use result::Result;
