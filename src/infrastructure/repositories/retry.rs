//! Bounded retry with exponential backoff for upstream calls.

use std::future::Future;
use std::time::Duration;

use super::upstream_error::UpstreamError;

/// Retry policy for a single logical upstream operation.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles after each further failure.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Where a retry loop currently stands. Attempts are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryState {
    Attempting(u32),
    Waiting { attempt: u32, delay: Duration },
    Succeeded,
    FailedTerminal,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Backoff after failed attempt `attempt`: `base * 2^(attempt-1)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        self.base_delay.saturating_mul(1u32 << exponent)
    }

    /// Transition taken after attempt `attempt` failed with `error`.
    pub fn after_failure(&self, attempt: u32, error: &UpstreamError) -> RetryState {
        if !error.is_retryable() || attempt >= self.max_attempts {
            RetryState::FailedTerminal
        } else {
            RetryState::Waiting {
                attempt,
                delay: self.delay_for(attempt),
            }
        }
    }

    /// Run `operation` until it succeeds, fails terminally or the attempt
    /// budget is spent. Attempts are strictly sequential; the only suspension
    /// between them is the backoff sleep. The last observed error is returned.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T, UpstreamError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        let mut state = RetryState::Attempting(1);
        let mut outcome = None;

        loop {
            state = match state {
                RetryState::Attempting(attempt) => match operation(attempt).await {
                    Ok(value) => {
                        if attempt > 1 {
                            tracing::info!(attempt, "Upstream call succeeded after retry");
                        }
                        outcome = Some(Ok(value));
                        RetryState::Succeeded
                    }
                    Err(error) => {
                        let next = self.after_failure(attempt, &error);
                        if let RetryState::Waiting { delay, .. } = next {
                            tracing::warn!(
                                attempt,
                                max_attempts = self.max_attempts,
                                status = error.status(),
                                delay_ms = delay.as_millis() as u64,
                                error = %error,
                                "Upstream call failed, retrying"
                            );
                        }
                        outcome = Some(Err(error));
                        next
                    }
                },
                RetryState::Waiting { attempt, delay } => {
                    tokio::time::sleep(delay).await;
                    RetryState::Attempting(attempt + 1)
                }
                RetryState::Succeeded | RetryState::FailedTerminal => break,
            };
        }

        match outcome {
            Some(result) => result,
            None => Err(UpstreamError::Unknown {
                message: "no attempt was made".to_string(),
            }),
        }
    }
}
