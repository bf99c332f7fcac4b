// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Exponential backoff for GitHub API calls.
///
/// GraphQL requests against the GitHub API fail transiently under secondary
/// rate limits; every network call in the crate goes through
/// [`retry_with_backoff`].
use std::time::Duration;

use masterror::AppError;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Backoff schedule applied to a retried operation.
#[derive(Debug, Clone, PartialEq,)]
pub struct RetryConfig
{
    /// Total number of attempts, including the first one.
    pub max_attempts:     u32,
    /// Delay before the second attempt in milliseconds.
    pub initial_delay_ms: u64,
    /// Multiplier applied to the delay after each failure.
    pub backoff_factor:   f64,
    /// Upper bound for a single delay in milliseconds.
    pub max_delay_ms:     u64,
}

impl Default for RetryConfig
{
    fn default() -> Self
    {
        Self {
            max_attempts: 3, initial_delay_ms: 1000, backoff_factor: 2.0, max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig
{
    /// Single attempt, no waiting. Used by tests and offline runs.
    pub fn no_retry() -> Self
    {
        Self {
            max_attempts: 1, initial_delay_ms: 0, backoff_factor: 1.0, max_delay_ms: 0,
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    ///
    /// ```
    /// use labyrinth::RetryConfig;
    ///
    /// let config = RetryConfig::default();
    /// assert_eq!(config.delay_after(1,).as_millis(), 1000);
    /// assert_eq!(config.delay_after(3,).as_millis(), 4000);
    /// ```
    pub fn delay_after(&self, attempt: u32,) -> Duration
    {
        let exponent = attempt.saturating_sub(1,).min(i32::MAX as u32,) as i32;
        let scaled = self.initial_delay_ms as f64 * self.backoff_factor.powi(exponent,);
        let capped = scaled.min(self.max_delay_ms as f64,).max(0.0,);
        Duration::from_millis(capped as u64,)
    }
}

/// Runs `f` until it succeeds or the configured attempts are exhausted.
///
/// # Errors
///
/// Returns the error of the last attempt.
///
/// # Example
///
/// ```no_run
/// use labyrinth::{RetryConfig, retry_with_backoff};
/// use masterror::AppError;
///
/// # async fn example() -> Result<(), AppError> {
/// let config = RetryConfig::default();
/// let stars = retry_with_backoff(&config, "stargazer count", || async {
///     Ok::<_, AppError,>(42,)
/// },)
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<F, Fut, T,>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F,
) -> Result<T, AppError,>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AppError,>,>,
{
    let max_attempts = config.max_attempts.max(1,);
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(result,) => {
                if attempt > 1 {
                    debug!(operation = operation_name, attempt, "request recovered");
                }
                return Ok(result,);
            }
            Err(error,) if attempt >= max_attempts => {
                warn!(operation = operation_name, attempts = max_attempts, %error, "giving up");
                return Err(error,);
            }
            Err(error,) => {
                let delay = config.delay_after(attempt,);
                warn!(
                    operation = operation_name,
                    attempt,
                    max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    %error,
                    "request failed, retrying"
                );
                sleep(delay,).await;
                attempt += 1;
            }
        }
    }
}
