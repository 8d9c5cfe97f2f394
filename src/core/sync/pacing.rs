//! Pacing between provider calls
//!
//! Garmin Connect throttles aggressive clients, so the engine pauses after
//! every provider call. The pause sits behind [`Pacer`] so tests can count
//! calls instead of sleeping.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

#[async_trait]
pub trait Pacer: Send + Sync {
    /// Called once after each provider call, successful or not
    async fn pause(&self);
}

/// Sleeps for a fixed delay
#[derive(Debug, Clone, Copy)]
pub struct FixedDelayPacer {
    delay: Duration,
}

impl FixedDelayPacer {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl Pacer for FixedDelayPacer {
    async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPacer;

#[async_trait]
impl Pacer for NoopPacer {
    async fn pause(&self) {}
}

/// Pacer for the configured delay; a zero delay never waits
pub fn pacer_for(delay: Duration) -> Arc<dyn Pacer> {
    if delay.is_zero() {
        Arc::new(NoopPacer)
    } else {
        Arc::new(FixedDelayPacer::new(delay))
    }
}
