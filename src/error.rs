//! Error types for Db2 SaaS API calls.
//!
//! Every failure of the request pipeline is returned as an [`Error`]. The
//! variants keep the categories apart: bad caller input is never confused
//! with a transport failure, and a response that failed to decode still
//! carries the raw body and status for diagnostics.

use http::{HeaderMap, StatusCode};
use std::time::Duration;

/// The main error type for Db2 SaaS API calls.
///
/// # Examples
///
/// ```no_run
/// use db2saas::{Db2saas, Error, GetDb2SaasAutoscaleOptions};
///
/// # async fn example(service: Db2saas) {
/// let options = GetDb2SaasAutoscaleOptions::new("crn%3Av1%3A...");
/// match service.get_db2_saas_autoscale(&options).await {
///     Ok(response) => println!("Autoscale: {:?}", response.result),
///     Err(Error::DeserializationFailed { raw_response, serde_error, .. }) => {
///         eprintln!("Failed to decode {raw_response}: {serde_error}");
///     }
///     Err(Error::Http { status, message, .. }) => {
///         eprintln!("HTTP error {status}: {message}");
///     }
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required parameter was missing or invalid. Raised before any I/O.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The client was configured incorrectly, e.g. the service URL is unset
    /// or a header value is not valid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The authenticator could not be built or refused to authenticate.
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A network-level error occurred (connection failed, DNS lookup failed, etc.).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A single attempt exceeded the client's per-attempt timeout.
    #[error("Request timed out")]
    Timeout,

    /// The per-call deadline elapsed before the call completed. Retries stop
    /// once the deadline is reached.
    #[error("context deadline exceeded after {deadline:?}")]
    DeadlineExceeded {
        /// The deadline that was given to the call.
        deadline: Duration,
    },

    /// A 2xx response body could not be decoded into the expected type.
    ///
    /// The raw body, status and headers are kept so callers can inspect what
    /// the service actually returned.
    #[error("Failed to deserialize response (status {status}): {serde_error}")]
    DeserializationFailed {
        /// The raw response body that failed to deserialize
        raw_response: String,
        /// The serde error message
        serde_error: String,
        /// The HTTP status code
        status: StatusCode,
        /// The response headers
        headers: Box<HeaderMap>,
    },

    /// The service returned a non-2xx status code.
    #[error("HTTP error {status}: {message}")]
    Http {
        /// The HTTP status code
        status: StatusCode,
        /// The error message extracted from the body, or the status reason
        message: String,
        /// The raw response body
        raw_response: String,
        /// The response headers
        headers: Box<HeaderMap>,
    },

    /// All retry attempts were used up.
    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        /// The number of attempts made
        attempts: usize,
        /// The error of the final attempt
        last_error: Box<Error>,
    },

    /// Failed to serialize the request body.
    #[error("Failed to serialize request: {0}")]
    SerializationFailed(String),

    /// An invalid URL was provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing caller input, detected before I/O.
    Validation,
    /// Missing service URL, bad header values or bad auth setup.
    Configuration,
    /// DNS, connect, timeout or deadline failures.
    Transport,
    /// The service answered with a non-2xx status.
    Server,
    /// The service answered 2xx but the body did not match the expected type.
    Decode,
}

impl Error {
    /// Returns `true` if this error is potentially retryable.
    ///
    /// Network errors, per-attempt timeouts, 429 and 5xx responses are
    /// retryable. Validation, configuration and decode errors never are, and
    /// neither is an elapsed deadline.
    ///
    /// # Examples
    ///
    /// ```
    /// use db2saas::Error;
    /// use http::{HeaderMap, StatusCode};
    ///
    /// let err = Error::Http {
    ///     status: StatusCode::SERVICE_UNAVAILABLE,
    ///     message: "Service Unavailable".to_string(),
    ///     raw_response: String::new(),
    ///     headers: Box::new(HeaderMap::new()),
    /// };
    /// assert!(err.is_retryable());
    ///
    /// let err = Error::Validation("x-deployment-id must be set".to_string());
    /// assert!(!err.is_retryable());
    /// ```
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Timeout => true,
            Error::Http { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Error::DeadlineExceeded { .. } => false,
            Error::Validation(_) => false,
            Error::ConfigurationError(_) => false,
            Error::Authentication(_) => false,
            Error::DeserializationFailed { .. } => false,
            Error::MaxRetriesExceeded { .. } => false,
            Error::SerializationFailed(_) => false,
            Error::InvalidUrl(_) => false,
        }
    }

    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) | Error::SerializationFailed(_) => ErrorKind::Validation,
            Error::ConfigurationError(_) | Error::Authentication(_) | Error::InvalidUrl(_) => {
                ErrorKind::Configuration
            }
            Error::Network(_) | Error::Timeout | Error::DeadlineExceeded { .. } => {
                ErrorKind::Transport
            }
            Error::Http { .. } => ErrorKind::Server,
            Error::DeserializationFailed { .. } => ErrorKind::Decode,
            Error::MaxRetriesExceeded { last_error, .. } => last_error.kind(),
        }
    }

    /// Returns the HTTP status code if the service answered.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Http { status, .. } => Some(*status),
            Error::DeserializationFailed { status, .. } => Some(*status),
            Error::MaxRetriesExceeded { last_error, .. } => last_error.status(),
            _ => None,
        }
    }

    /// Returns the raw response body if the service answered.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::Http { raw_response, .. } => Some(raw_response),
            Error::DeserializationFailed { raw_response, .. } => Some(raw_response),
            Error::MaxRetriesExceeded { last_error, .. } => last_error.raw_response(),
            _ => None,
        }
    }

    /// Returns the response headers if the service answered.
    pub fn headers(&self) -> Option<&HeaderMap> {
        match self {
            Error::Http { headers, .. } => Some(headers),
            Error::DeserializationFailed { headers, .. } => Some(headers),
            Error::MaxRetriesExceeded { last_error, .. } => last_error.headers(),
            _ => None,
        }
    }

    /// Returns the server supplied error message for non-2xx responses.
    pub fn message(&self) -> Option<&str> {
        match self {
            Error::Http { message, .. } => Some(message),
            Error::MaxRetriesExceeded { last_error, .. } => last_error.message(),
            _ => None,
        }
    }
}

/// A specialized `Result` type for Db2 SaaS API calls.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: StatusCode) -> Error {
        Error::Http {
            status,
            message: "boom".to_string(),
            raw_response: r#"{"message":"boom"}"#.to_string(),
            headers: Box::new(HeaderMap::new()),
        }
    }

    #[test]
    fn test_retryable_categories() {
        assert!(http_error(StatusCode::INTERNAL_SERVER_ERROR).is_retryable());
        assert!(http_error(StatusCode::TOO_MANY_REQUESTS).is_retryable());
        assert!(!http_error(StatusCode::NOT_FOUND).is_retryable());
        assert!(Error::Timeout.is_retryable());
        assert!(!Error::DeadlineExceeded {
            deadline: Duration::from_millis(80)
        }
        .is_retryable());
        assert!(!Error::Validation("missing".to_string()).is_retryable());
        assert!(!Error::ConfigurationError("no url".to_string()).is_retryable());
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            Error::Validation("x".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(
            Error::ConfigurationError("x".to_string()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(http_error(StatusCode::BAD_REQUEST).kind(), ErrorKind::Server);
        assert_eq!(Error::Timeout.kind(), ErrorKind::Transport);
        let decode = Error::DeserializationFailed {
            raw_response: "nope".to_string(),
            serde_error: "expected value".to_string(),
            status: StatusCode::OK,
            headers: Box::new(HeaderMap::new()),
        };
        assert_eq!(decode.kind(), ErrorKind::Decode);
        assert_eq!(decode.raw_response(), Some("nope"));
    }

    #[test]
    fn test_max_retries_delegates_to_last_error() {
        let err = Error::MaxRetriesExceeded {
            attempts: 3,
            last_error: Box::new(http_error(StatusCode::BAD_GATEWAY)),
        };
        assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
        assert_eq!(err.message(), Some("boom"));
        assert_eq!(err.raw_response(), Some(r#"{"message":"boom"}"#));
        assert_eq!(err.kind(), ErrorKind::Server);
        assert!(!err.is_retryable());
    }
}
