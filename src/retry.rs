//! Retry strategies and predicates for transient failures.
//!
//! Retries are disabled by default. [`Client::enable_retries`] switches to a
//! fixed-interval [`RetryStrategy::Linear`] policy; exponential backoff is
//! available through [`ClientBuilder::retry_strategy`].
//!
//! [`Client::enable_retries`]: crate::Client::enable_retries
//! [`ClientBuilder::retry_strategy`]: crate::ClientBuilder::retry_strategy

use crate::Error;
use rand::Rng;
use std::time::Duration;

/// Defines when and how to retry failed requests.
///
/// # Examples
///
/// ```
/// use db2saas::RetryStrategy;
/// use std::time::Duration;
///
/// let no_retry = RetryStrategy::None;
///
/// // 1s, 1s, 1s
/// let linear = RetryStrategy::Linear {
///     delay: Duration::from_secs(1),
///     max_retries: 3,
/// };
///
/// // 100ms, 200ms, 400ms, ... capped at 30s
/// let exponential = RetryStrategy::ExponentialBackoff {
///     initial_delay: Duration::from_millis(100),
///     max_delay: Duration::from_secs(30),
///     max_retries: 5,
///     jitter: true,
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RetryStrategy {
    /// Do not retry failed requests.
    #[default]
    None,

    /// Retry with a fixed delay between attempts.
    Linear {
        /// The delay between retry attempts.
        delay: Duration,
        /// The maximum number of retry attempts.
        max_retries: usize,
    },

    /// Retry with exponentially increasing delays.
    ///
    /// Each retry waits for `initial_delay * 2^(attempt - 1)`, capped at
    /// `max_delay`.
    ExponentialBackoff {
        /// The delay before the first retry.
        initial_delay: Duration,
        /// The maximum delay between retries.
        max_delay: Duration,
        /// The maximum number of retry attempts.
        max_retries: usize,
        /// Scale each delay by a random factor in `[0.5, 1.0]`.
        jitter: bool,
    },
}

impl RetryStrategy {
    /// Returns the delay before the given retry attempt, or `None` if retries are exhausted.
    ///
    /// `attempt` is 1-indexed: 1 is the first retry.
    pub fn delay_for_attempt(&self, attempt: usize) -> Option<Duration> {
        match self {
            RetryStrategy::None => None,
            RetryStrategy::Linear { delay, max_retries } => {
                if attempt > *max_retries {
                    None
                } else {
                    Some(*delay)
                }
            }
            RetryStrategy::ExponentialBackoff {
                initial_delay,
                max_delay,
                max_retries,
                jitter,
            } => {
                if attempt > *max_retries {
                    return None;
                }

                let multiplier = 2u64.saturating_pow(attempt.saturating_sub(1) as u32);
                let base_delay =
                    initial_delay.saturating_mul(multiplier.try_into().unwrap_or(u32::MAX));
                let delay = base_delay.min(*max_delay);

                if *jitter {
                    let jitter_factor = rand::thread_rng().gen_range(0.5..=1.0);
                    Some(delay.mul_f64(jitter_factor))
                } else {
                    Some(delay)
                }
            }
        }
    }

    /// Returns the maximum number of retries.
    pub fn max_retries(&self) -> usize {
        match self {
            RetryStrategy::None => 0,
            RetryStrategy::Linear { max_retries, .. } => *max_retries,
            RetryStrategy::ExponentialBackoff { max_retries, .. } => *max_retries,
        }
    }

    /// Returns `true` unless this is [`RetryStrategy::None`].
    pub fn is_enabled(&self) -> bool {
        !matches!(self, RetryStrategy::None)
    }
}

/// Decides whether a failed attempt should be retried.
///
/// # Examples
///
/// ```
/// use db2saas::{Error, RetryPredicate};
///
/// struct RetryOnUnavailable;
///
/// impl RetryPredicate for RetryOnUnavailable {
///     fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
///         matches!(error, Error::Http { status, .. } if status.as_u16() == 503)
///     }
/// }
/// ```
pub trait RetryPredicate: Send + Sync {
    /// Returns `true` if the request should be retried. `attempt` is 1-indexed.
    fn should_retry(&self, error: &Error, attempt: usize) -> bool;
}

/// Retries every error for which [`Error::is_retryable`] is `true`.
///
/// This is the default predicate.
#[derive(Debug, Clone, Copy)]
pub struct RetryOnRetryable;

impl RetryPredicate for RetryOnRetryable {
    fn should_retry(&self, error: &Error, _attempt: usize) -> bool {
        error.is_retryable()
    }
}
