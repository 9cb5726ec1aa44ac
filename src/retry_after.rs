//! `Retry-After` handling for throttled and unavailable responses.
//!
//! When retries are enabled and the service answers `429 Too Many Requests`
//! or `503 Service Unavailable` with a `Retry-After` header, the client waits
//! for the indicated time instead of the retry strategy's delay.

use crate::Error;
use http::{HeaderMap, StatusCode};
use std::time::{Duration, SystemTime};

/// Configuration for `Retry-After` handling.
///
/// # Examples
///
/// ```
/// use db2saas::retry_after::RetryAfterConfig;
/// use std::time::Duration;
///
/// let config = RetryAfterConfig::builder()
///     .max_wait(Duration::from_secs(30))
///     .build();
/// assert!(config.enabled);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryAfterConfig {
    /// Whether the `Retry-After` header is honored.
    pub enabled: bool,

    /// Upper bound for a single wait. Defaults to 5 minutes.
    pub max_wait: Duration,
}

impl Default for RetryAfterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_wait: Duration::from_secs(300),
        }
    }
}

impl RetryAfterConfig {
    /// Creates a new builder.
    pub fn builder() -> RetryAfterConfigBuilder {
        RetryAfterConfigBuilder::default()
    }

    /// A configuration that ignores `Retry-After`.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Returns the wait requested by the service for this error, capped by
    /// `max_wait`, or `None` if the error carries no usable `Retry-After`.
    pub fn delay_for(&self, error: &Error) -> Option<Duration> {
        if !self.enabled {
            return None;
        }
        match error {
            Error::Http {
                status, headers, ..
            } if *status == StatusCode::TOO_MANY_REQUESTS
                || *status == StatusCode::SERVICE_UNAVAILABLE =>
            {
                parse_retry_after(headers).map(|d| d.min(self.max_wait))
            }
            _ => None,
        }
    }
}

/// Builder for [`RetryAfterConfig`].
#[derive(Default)]
pub struct RetryAfterConfigBuilder {
    enabled: Option<bool>,
    max_wait: Option<Duration>,
}

impl RetryAfterConfigBuilder {
    /// Sets whether `Retry-After` is honored.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    /// Sets the maximum single wait.
    pub fn max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Builds the [`RetryAfterConfig`].
    pub fn build(self) -> RetryAfterConfig {
        let default = RetryAfterConfig::default();
        RetryAfterConfig {
            enabled: self.enabled.unwrap_or(default.enabled),
            max_wait: self.max_wait.unwrap_or(default.max_wait),
        }
    }
}

/// Parses `Retry-After` as delay-seconds or an HTTP date.
pub fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let header = headers.get(http::header::RETRY_AFTER)?.to_str().ok()?;

    if let Ok(seconds) = header.trim().parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    // Dates in the past mean "retry now".
    let date = httpdate::parse_http_date(header).ok()?;
    Some(
        date.duration_since(SystemTime::now())
            .unwrap_or(Duration::ZERO),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn throttled(status: StatusCode, retry_after: &'static str) -> Error {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static(retry_after));
        Error::Http {
            status,
            message: "slow down".to_string(),
            raw_response: String::new(),
            headers: Box::new(headers),
        }
    }

    #[test]
    fn test_parse_retry_after_seconds() {
        let mut headers = HeaderMap::new();
        headers.insert("retry-after", HeaderValue::from_static("60"));
        assert_eq!(parse_retry_after(&headers), Some(Duration::from_secs(60)));
    }

    #[test]
    fn test_parse_retry_after_http_date() {
        let future = SystemTime::now() + Duration::from_secs(120);
        let mut headers = HeaderMap::new();
        headers.insert(
            "retry-after",
            HeaderValue::from_str(&httpdate::fmt_http_date(future)).unwrap(),
        );
        let delay = parse_retry_after(&headers).unwrap();
        assert!(delay > Duration::from_secs(100) && delay <= Duration::from_secs(120));
    }

    #[test]
    fn test_parse_retry_after_past_date_is_zero() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "retry-after",
            HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"),
        );
        assert_eq!(parse_retry_after(&headers), Some(Duration::ZERO));
    }

    #[test]
    fn test_delay_capped_by_max_wait() {
        let config = RetryAfterConfig::builder()
            .max_wait(Duration::from_secs(10))
            .build();
        let error = throttled(StatusCode::TOO_MANY_REQUESTS, "600");
        assert_eq!(config.delay_for(&error), Some(Duration::from_secs(10)));
    }

    #[test]
    fn test_only_throttling_statuses_are_honored() {
        let config = RetryAfterConfig::default();
        assert_eq!(
            config.delay_for(&throttled(StatusCode::SERVICE_UNAVAILABLE, "2")),
            Some(Duration::from_secs(2))
        );
        assert_eq!(
            config.delay_for(&throttled(StatusCode::INTERNAL_SERVER_ERROR, "2")),
            None
        );
    }

    #[test]
    fn test_disabled_config_ignores_header() {
        let error = throttled(StatusCode::TOO_MANY_REQUESTS, "5");
        assert_eq!(RetryAfterConfig::disabled().delay_for(&error), None);
    }
}
