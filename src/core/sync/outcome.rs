//! Per-record and per-page results

use crate::core::transform::RecordKind;
use crate::domain::BackfillError;
use std::fmt;

/// Successful result of processing one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A page was created, or would have been in dry-run mode
    Created,
    /// A page with the same natural key already exists
    SkippedDuplicate,
    /// The provider reported no data for this day
    SkippedNoData,
}

impl RecordOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::SkippedDuplicate => "skipped_duplicate",
            Self::SkippedNoData => "skipped_no_data",
        }
    }
}

impl fmt::Display for RecordOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage at which a record failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStage {
    Fetch,
    Transform,
    Guard,
    Create,
}

impl fmt::Display for RecordStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Transform => "transform",
            Self::Guard => "guard",
            Self::Create => "create",
        })
    }
}

/// A single record could not be processed
///
/// Never aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordError {
    pub kind: RecordKind,
    pub stage: RecordStage,
    /// Day or activity label the error belongs to
    pub label: String,
    pub message: String,
}

impl RecordError {
    pub fn new(
        kind: RecordKind,
        stage: RecordStage,
        label: impl Into<String>,
        error: &BackfillError,
    ) -> Self {
        Self {
            kind,
            stage,
            label: label.into(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} failed at {}: {}",
            self.kind, self.label, self.stage, self.message
        )
    }
}

/// An activity page could not be fetched; pagination stops here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageError {
    pub start: usize,
    pub limit: usize,
    /// Activities handled before the failing page
    pub processed: usize,
    pub message: String,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "activity page {}..{} failed after {} activities: {}",
            self.start,
            self.start + self.limit,
            self.processed,
            self.message
        )
    }
}

pub type RecordResult = std::result::Result<RecordOutcome, RecordError>;
