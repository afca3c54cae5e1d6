//! Retry scheduling for transport failures.
//!
//! Both schedules implement `reqwest_retry`'s [`RetryPolicy`], so the client
//! loop treats the built-in fixed interval and the opt-in exponential backoff
//! the same way.

use reqwest_retry::policies::ExponentialBackoff;
use reqwest_retry::{RetryDecision, RetryPolicy};
use std::time::{Duration, SystemTime};

use crate::config::Backoff;

/// Retries up to `max_retries` times, waiting the same delay before each attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedInterval {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy for FixedInterval {
    fn should_retry(&self, _request_start_time: SystemTime, n_past_retries: u32) -> RetryDecision {
        if n_past_retries < self.max_retries {
            RetryDecision::Retry {
                execute_after: SystemTime::now() + self.delay,
            }
        } else {
            RetryDecision::DoNotRetry
        }
    }
}

/// Build the policy for one request
pub(crate) fn policy_for(
    backoff: Backoff,
    max_retries: u32,
    delay: Duration,
) -> Box<dyn RetryPolicy + Send + Sync> {
    match backoff {
        Backoff::Fixed => Box::new(FixedInterval { max_retries, delay }),
        Backoff::Exponential { max_delay } => Box::new(
            ExponentialBackoff::builder()
                .retry_bounds(delay, max_delay.max(delay))
                .build_with_max_retries(max_retries),
        ),
    }
}

/// Time left until a retry decision's `execute_after`
pub(crate) fn wait_until(execute_after: SystemTime) -> Duration {
    execute_after
        .duration_since(SystemTime::now())
        .unwrap_or_default()
}
