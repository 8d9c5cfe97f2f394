//! Destination store abstraction
//!
//! [`DocumentStore`] is implemented by the Notion adapter; tests provide an
//! in-memory implementation.

pub mod traits;

pub use traits::{DocumentStore, StoredPage};
