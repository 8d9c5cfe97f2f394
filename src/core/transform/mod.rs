//! Record transformation
//!
//! Each provider record kind has one mapping into the destination schema:
//!
//! - [`activity`] - activity list entries → activities database
//! - [`steps`] - daily step summaries → steps database
//! - [`sleep`] - nightly sleep summaries → sleep database
//!
//! A transformed record carries its own natural key so the existence guard can
//! look for an earlier copy before anything is written.

pub mod activity;
pub mod sleep;
pub mod steps;

pub use activity::{transform_activity, ActivityRecord};
pub use sleep::{transform_sleep, SleepRecord};
pub use steps::{transform_steps, StepsRecord};

use crate::domain::{Icon, PropertySet, QueryFilter};
use std::fmt;

/// Kind of record flowing through the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Activity,
    Steps,
    Sleep,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Steps => "steps",
            Self::Sleep => "sleep",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record ready to be written to the destination
pub trait DestinationRecord {
    /// Which database the record belongs to
    fn kind(&self) -> RecordKind;

    /// Equality filter identifying an existing copy of this record
    fn natural_key(&self) -> QueryFilter;

    /// Destination properties
    fn properties(&self) -> PropertySet;

    /// Icon attached to the created page
    fn icon(&self) -> Option<Icon> {
        None
    }

    /// Short label for progress output, e.g. `2024-05-01 - Morning Run`
    fn label(&self) -> String;
}
