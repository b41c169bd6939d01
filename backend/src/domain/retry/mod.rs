//! Retry policy shared by the upstream source adapters.
//!
//! The policy decides which failures are retried, how long to wait between
//! attempts (exponential backoff with jitter), and how an exhausted budget is
//! reported. Sleeping and jitter are injected through [`RetryRuntime`] so the
//! loop stays deterministic under test.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::UpstreamError;

mod runtime;

pub use runtime::{RandomJitter, RetryRuntime, TokioSleeper};

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(300);
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

/// Async sleeping abstraction used between retry attempts.
#[async_trait]
pub trait RetrySleeper: Send + Sync {
    /// Suspend the calling task for `duration` without blocking the thread.
    ///
    /// ```rust,no_run
    /// use async_trait::async_trait;
    /// use movies_service::domain::RetrySleeper;
    /// use std::sync::Mutex;
    /// use std::time::Duration;
    /// #[derive(Default)]
    /// struct CountingSleeper {
    ///     calls: Mutex<u32>,
    /// }
    /// #[async_trait]
    /// impl RetrySleeper for CountingSleeper {
    ///     async fn sleep(&self, _duration: Duration) {
    ///         *self.calls.lock().expect("calls mutex") += 1;
    ///     }
    /// }
    /// # async fn demo() {
    /// let sleeper = CountingSleeper::default();
    /// sleeper.sleep(Duration::from_millis(25)).await;
    /// assert_eq!(*sleeper.calls.lock().expect("calls mutex"), 1);
    /// # }
    /// ```
    async fn sleep(&self, duration: Duration);
}

/// Backoff jitter abstraction.
pub trait BackoffJitter: Send + Sync {
    /// Return the delay to wait for `retry` given the exponential `base`.
    ///
    /// ```rust
    /// use movies_service::domain::BackoffJitter;
    /// use std::time::Duration;
    /// struct FixedJitter;
    /// impl BackoffJitter for FixedJitter {
    ///     fn jittered_delay(&self, base: Duration, retry: u32) -> Duration {
    ///         base + Duration::from_millis(u64::from(retry))
    ///     }
    /// }
    /// let delay = FixedJitter.jittered_delay(Duration::from_millis(300), 2);
    /// assert_eq!(delay, Duration::from_millis(302));
    /// ```
    fn jittered_delay(&self, base: Duration, retry: u32) -> Duration;
}

/// Backoff specification applied around a fallible upstream call.
///
/// Total attempts are `1 + max_retries`. Only errors accepted by the retry
/// predicate are retried; everything else is returned after the first
/// attempt. When the budget runs out the last error is wrapped in
/// [`UpstreamError::RetriesExhausted`], which still displays the original
/// message.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use movies_service::domain::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts(), 4);
/// assert_eq!(policy.backoff_delay(1), Duration::from_millis(300));
/// assert_eq!(policy.backoff_delay(3), Duration::from_millis(1200));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_delay: Duration,
    should_retry: fn(&UpstreamError) -> bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_BASE_DELAY)
    }
}

impl RetryPolicy {
    /// Build a policy retrying server failures `max_retries` times.
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            max_delay: DEFAULT_MAX_DELAY.max(base_delay),
            should_retry: UpstreamError::is_retryable,
        }
    }

    /// Cap individual backoff delays at `max_delay`.
    #[must_use]
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Replace the retry predicate.
    #[must_use]
    pub fn with_predicate(mut self, should_retry: fn(&UpstreamError) -> bool) -> Self {
        self.should_retry = should_retry;
        self
    }

    /// Number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total number of attempts including the first call.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Base delay before the first retry.
    pub fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Return whether the policy retries `error`.
    pub fn should_retry(&self, error: &UpstreamError) -> bool {
        (self.should_retry)(error)
    }

    /// Un-jittered delay before retry number `retry` (1-based).
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let exponent = 2_u32.saturating_pow(retry.saturating_sub(1));
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(u64::from(exponent)).min(max_ms))
    }

    /// Run `operation` under this policy.
    ///
    /// `operation` receives the 1-based attempt number. Dropping the returned
    /// future cancels both the in-flight attempt and any pending backoff.
    ///
    /// # Errors
    ///
    /// Returns the first non-retryable error unchanged, or
    /// [`UpstreamError::RetriesExhausted`] wrapping the last retryable error
    /// once every attempt failed.
    pub async fn execute<T, F, Fut>(
        &self,
        runtime: &RetryRuntime,
        mut operation: F,
    ) -> Result<T, UpstreamError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;
        loop {
            let error = match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(error) => error,
            };

            if !self.should_retry(&error) {
                return Err(error);
            }
            if attempt >= max_attempts {
                warn!(attempts = attempt, error = %error, "upstream retries exhausted");
                return Err(UpstreamError::retries_exhausted(attempt, error));
            }

            let delay = runtime
                .jitter
                .jittered_delay(self.backoff_delay(attempt), attempt);
            debug!(
                attempt,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %error,
                "retrying upstream call after backoff"
            );
            runtime.sleeper.sleep(delay).await;
            attempt += 1;
        }
    }
}
