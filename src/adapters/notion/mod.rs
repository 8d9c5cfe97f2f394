//! Notion adapter
//!
//! Implements [`DocumentStore`](crate::adapters::database::DocumentStore) on
//! top of the Notion REST API: database queries for the existence guard and
//! page creation for new records.

pub mod client;
pub mod models;

pub use client::NotionClient;
