//! Fitness data provider abstraction
//!
//! [`FitnessProvider`] is implemented by the Garmin Connect adapter.

pub mod traits;

pub use traits::FitnessProvider;
