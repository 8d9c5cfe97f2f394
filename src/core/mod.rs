//! Core backfill logic
//!
//! - [`format`] - display formatting of durations, paces and instants
//! - [`transform`] - provider records into destination property sets
//! - [`guard`] - natural-key existence check before every write
//! - [`sync`] - pagination, calendar iteration and orchestration
//!
//! A run fetches activities page by page, then visits each of the last N
//! calendar days for steps and sleep. Every record is transformed, checked
//! against the destination by its natural key and created only when absent,
//! so running the backfill twice writes nothing the second time.

pub mod format;
pub mod guard;
pub mod sync;
pub mod transform;
