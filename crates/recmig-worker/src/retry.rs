//! Fixed-delay retry executor.
//!
//! Runs a unit of work up to a fixed number of attempts, sleeping a fixed
//! delay between attempts, and reports either the first success or the
//! last error once attempts are exhausted.

use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

/// Default number of attempts, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay between attempts.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(3000);

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial attempt).
    pub max_attempts: u32,
    /// Delay slept before each attempt after the first.
    pub delay: Duration,
    /// Operation name for logging.
    pub operation_name: String,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_RETRY_DELAY,
            operation_name: "operation".to_string(),
        }
    }
}

impl RetryConfig {
    /// Create a new retry config with the given operation name.
    pub fn new(operation_name: impl Into<String>) -> Self {
        Self {
            operation_name: operation_name.into(),
            ..Default::default()
        }
    }

    /// Set the maximum number of attempts. Zero is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the delay between attempts.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Same policy under another operation name.
    pub fn named(&self, operation_name: impl Into<String>) -> Self {
        Self {
            operation_name: operation_name.into(),
            ..self.clone()
        }
    }
}

/// Result of a retry operation.
#[derive(Debug)]
pub enum RetryResult<T, E> {
    /// Operation succeeded on attempt `attempts`.
    Success { value: T, attempts: u32 },
    /// Every attempt failed; `error` is the last one.
    Exhausted { error: E, attempts: u32 },
}

impl<T, E> RetryResult<T, E> {
    /// Returns true if the operation succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, RetryResult::Success { .. })
    }

    /// Number of attempts that ran.
    pub fn attempts(&self) -> u32 {
        match self {
            RetryResult::Success { attempts, .. } | RetryResult::Exhausted { attempts, .. } => {
                *attempts
            }
        }
    }
}

/// Execute an async operation with fixed-delay retry.
///
/// `operation` receives the 1-based attempt number. The delay is slept only
/// between attempts: never after a success and never after the final failure.
///
/// # Example
/// ```ignore
/// let config = RetryConfig::new("migrate RE123");
/// let result = retry_async(&config, |_attempt| async {
///     migrate_once().await
/// }).await;
/// ```
pub async fn retry_async<F, Fut, T, E>(config: &RetryConfig, mut operation: F) -> RetryResult<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = config.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                return RetryResult::Success {
                    value,
                    attempts: attempt,
                }
            }
            Err(e) => {
                warn!(
                    attempt = attempt,
                    "Attempt {} - {} failed: {}", attempt, config.operation_name, e
                );

                if attempt >= max_attempts {
                    error!(
                        attempts = attempt,
                        "{} failed after {} attempts", config.operation_name, attempt
                    );
                    return RetryResult::Exhausted {
                        error: e,
                        attempts: attempt,
                    };
                }

                info!("Retrying in {} seconds...", config.delay.as_secs_f64());
                tokio::time::sleep(config.delay).await;
                attempt += 1;
            }
        }
    }
}
