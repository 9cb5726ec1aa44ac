//! Response wrapper that keeps both the decoded result and the raw response.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// A successful (2xx) response.
///
/// `result` is `None` when the service answered with an empty body, which is
/// a success and not a decode failure. The raw body, status and headers are
/// always available.
///
/// # Examples
///
/// ```no_run
/// use db2saas::{Db2saas, GetDb2SaasBackupOptions};
///
/// # async fn example(service: Db2saas) -> Result<(), db2saas::Error> {
/// let options = GetDb2SaasBackupOptions::new("crn%3Av1%3A...");
/// let response = service.get_db2_saas_backup(&options).await?;
///
/// println!("Status: {}", response.status);
/// println!("Request took {:?}", response.latency);
/// if let Some(backups) = response.result {
///     println!("{} backups", backups.backups.map_or(0, |b| b.len()));
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DetailedResponse<T> {
    /// The decoded body, absent for empty bodies.
    pub result: Option<T>,

    /// The raw response body.
    pub raw_body: String,

    /// The HTTP status code of the response.
    pub status: StatusCode,

    /// The response headers.
    pub headers: HeaderMap,

    /// Time from the first attempt until this response, including retries.
    pub latency: Duration,

    /// Number of attempts made, `1` when no retry was needed.
    pub attempts: usize,
}

impl<T> DetailedResponse<T> {
    /// Creates a new `DetailedResponse`.
    pub fn new(
        result: Option<T>,
        raw_body: String,
        status: StatusCode,
        headers: HeaderMap,
        latency: Duration,
        attempts: usize,
    ) -> Self {
        Self {
            result,
            raw_body,
            status,
            headers,
            latency,
            attempts,
        }
    }

    /// Maps the decoded result, keeping the response metadata.
    ///
    /// # Examples
    ///
    /// ```
    /// # use db2saas::DetailedResponse;
    /// # use http::{HeaderMap, StatusCode};
    /// # use std::time::Duration;
    /// let response = DetailedResponse::new(
    ///     Some(42),
    ///     "42".to_string(),
    ///     StatusCode::OK,
    ///     HeaderMap::new(),
    ///     Duration::from_millis(100),
    ///     1,
    /// );
    ///
    /// let mapped = response.map(|n| n.to_string());
    /// assert_eq!(mapped.result.as_deref(), Some("42"));
    /// ```
    pub fn map<U, F>(self, f: F) -> DetailedResponse<U>
    where
        F: FnOnce(T) -> U,
    {
        DetailedResponse {
            result: self.result.map(f),
            raw_body: self.raw_body,
            status: self.status,
            headers: self.headers,
            latency: self.latency,
            attempts: self.attempts,
        }
    }

    /// Returns `true` if the request required retries.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }

    /// Returns a header value by name.
    ///
    /// # Examples
    ///
    /// ```
    /// # use db2saas::DetailedResponse;
    /// # use http::{HeaderMap, HeaderValue, StatusCode};
    /// # use std::time::Duration;
    /// let mut headers = HeaderMap::new();
    /// headers.insert("content-type", HeaderValue::from_static("application/json"));
    ///
    /// let response = DetailedResponse::<()>::new(
    ///     None,
    ///     String::new(),
    ///     StatusCode::NO_CONTENT,
    ///     headers,
    ///     Duration::from_millis(5),
    ///     1,
    /// );
    ///
    /// assert_eq!(response.header("content-type"), Some("application/json"));
    /// ```
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Returns the decoded result, or `None` for an empty body.
    pub fn into_result(self) -> Option<T> {
        self.result
    }
}
