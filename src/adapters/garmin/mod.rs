//! Garmin Connect adapter
//!
//! Implements [`FitnessProvider`](crate::adapters::provider::FitnessProvider)
//! against the Garmin Connect web API for both the China (`garmin.cn`) and the
//! global (`garmin.com`) regions.

pub mod auth;
pub mod client;

pub use client::GarminClient;
