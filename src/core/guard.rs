//! Existence guard
//!
//! The destination has no upsert, so idempotence is a read-then-write: look for
//! a page matching the record's natural key and only create when none exists.
//! There is no transactional guarantee between the query and the create; the
//! backfill is the only writer while it runs.

use crate::adapters::database::{DocumentStore, StoredPage};
use crate::domain::{DatabaseId, QueryFilter, Result};
use std::sync::Arc;

/// Outcome of an existence check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// No matching page, the record may be created
    Proceed,
    /// A matching page already exists
    Duplicate(StoredPage),
}

impl GuardDecision {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate(_))
    }
}

/// Natural-key lookup against a [`DocumentStore`]
#[derive(Clone)]
pub struct ExistenceGuard {
    store: Arc<dyn DocumentStore>,
}

impl ExistenceGuard {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Queries `database_id` for a page matching `key`
    ///
    /// # Errors
    ///
    /// Propagates the store's query error. The caller must not create the
    /// record in that case.
    pub async fn check(&self, database_id: &DatabaseId, key: &QueryFilter) -> Result<GuardDecision> {
        let mut matches = self.store.query(database_id, key).await?;
        if matches.is_empty() {
            return Ok(GuardDecision::Proceed);
        }

        tracing::trace!(
            database_id = %database_id,
            key = %key.describe(),
            matches = matches.len(),
            "Natural key already present"
        );
        Ok(GuardDecision::Duplicate(matches.swap_remove(0)))
    }
}
