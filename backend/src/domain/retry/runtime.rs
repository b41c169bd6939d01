//! Production sleeping and jitter strategies for the retry policy.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;

use super::{BackoffJitter, RetrySleeper};

/// Runtime helpers used by [`super::RetryPolicy::execute`].
#[derive(Clone)]
pub struct RetryRuntime {
    /// Async sleep implementation.
    pub sleeper: Arc<dyn RetrySleeper>,
    /// Jitter strategy for retry delays.
    pub jitter: Arc<dyn BackoffJitter>,
}

impl RetryRuntime {
    /// Build a runtime from explicit strategies.
    pub fn new(sleeper: Arc<dyn RetrySleeper>, jitter: Arc<dyn BackoffJitter>) -> Self {
        Self { sleeper, jitter }
    }
}

impl Default for RetryRuntime {
    fn default() -> Self {
        Self::new(Arc::new(TokioSleeper), Arc::new(RandomJitter::default()))
    }
}

/// Tokio timer based sleeper; cancelled when the awaiting future is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl RetrySleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Adds a random extra delay of up to `factor_percent` percent of the base.
#[derive(Debug, Clone, Copy)]
pub struct RandomJitter {
    factor_percent: u64,
}

impl RandomJitter {
    /// Build a jitter strategy adding at most `factor_percent`% to each delay.
    pub fn new(factor_percent: u64) -> Self {
        Self { factor_percent }
    }
}

impl Default for RandomJitter {
    fn default() -> Self {
        Self::new(50)
    }
}

impl BackoffJitter for RandomJitter {
    fn jittered_delay(&self, base: Duration, _retry: u32) -> Duration {
        let base_ms = u64::try_from(base.as_millis()).unwrap_or(u64::MAX);
        let max_extra = base_ms.saturating_mul(self.factor_percent) / 100;
        if max_extra == 0 {
            return base;
        }
        let extra = rand::thread_rng().gen_range(0..=max_extra);
        Duration::from_millis(base_ms.saturating_add(extra))
    }
}
