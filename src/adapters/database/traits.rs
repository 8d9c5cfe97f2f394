//! Destination store abstraction
//!
//! The backfill only needs two operations from the destination: look up pages
//! matching a filter, and create a page. Neither offers upsert semantics, which
//! is why writes go through the existence guard.

use crate::domain::{DatabaseId, Icon, PropertySet, QueryFilter, Result};
use async_trait::async_trait;

/// A page that exists in the destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredPage {
    /// Store-assigned page ID
    pub id: String,

    /// Link to the page, when the store provides one
    pub url: Option<String>,
}

impl StoredPage {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
        }
    }
}

/// Document store holding the destination databases
///
/// Implementations must be usable behind `Arc<dyn DocumentStore>`.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Returns pages of `database_id` matching every predicate of `filter`
    ///
    /// An empty vector means no page matched. Implementations may stop after
    /// the first match; callers only test for emptiness.
    ///
    /// # Errors
    ///
    /// Returns an error if the query cannot be executed.
    async fn query(&self, database_id: &DatabaseId, filter: &QueryFilter)
        -> Result<Vec<StoredPage>>;

    /// Creates a page in `database_id`
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the page, e.g. because a property
    /// does not exist in the database schema.
    async fn create(
        &self,
        database_id: &DatabaseId,
        properties: &PropertySet,
        icon: Option<&Icon>,
    ) -> Result<StoredPage>;
}
