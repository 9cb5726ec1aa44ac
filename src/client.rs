//! HTTP client that runs the request pipeline shared by every operation.
//!
//! The [`Client`] type holds the service URL, the authenticator and the retry
//! settings. Use [`ClientBuilder`] to configure and create one.

use crate::{
    auth::Authenticator,
    operation::{CallParameters, Operation},
    retry::{RetryOnRetryable, RetryPredicate, RetryStrategy},
    retry_after::RetryAfterConfig,
    DetailedResponse, Error, Result,
};
use http::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

const APPLICATION_JSON: &str = "application/json";

/// A request that passed validation and is ready to send, possibly more than once.
struct PreparedRequest {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

/// The shared HTTP client of a service.
///
/// Cloning a `Client` is cheap and shares the connection pool. Use
/// [`Client::clone_service`] for an independent copy with its own transport.
///
/// # Examples
///
/// ```no_run
/// use db2saas::auth::BearerTokenAuthenticator;
/// use db2saas::operation::{CallParameters, GET_DB2_SAAS_TUNEABLE_PARAM};
/// use db2saas::{Client, SuccessTuneableParams};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), db2saas::Error> {
/// let client = Client::builder()
///     .service_url("https://us-south.db2.saas.ibm.com/dbapi/v4")?
///     .authenticator(Arc::new(BearerTokenAuthenticator::new("token")?))
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let response = client
///     .execute::<SuccessTuneableParams>(&GET_DB2_SAAS_TUNEABLE_PARAM, CallParameters::new())
///     .await?;
/// println!("{:?}", response.result);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<reqwest::Client>,
    service_url: Option<Url>,
    authenticator: Arc<dyn Authenticator>,
    default_headers: HeaderMap,
    retry_strategy: RetryStrategy,
    retry_predicate: Arc<dyn RetryPredicate>,
    timeout: Option<Duration>,
    retry_after: RetryAfterConfig,
    user_agent: HeaderValue,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("service_url", &self.service_url.as_ref().map(Url::as_str))
            .field("authenticator", &self.authenticator)
            .field("retry_strategy", &self.retry_strategy)
            .field("timeout", &self.timeout)
            .field("retry_after", &self.retry_after)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a new `ClientBuilder`.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Runs one operation: validate, build, serialize, send with retries, decode.
    ///
    /// Validation and configuration errors are returned before any I/O. If
    /// the parameters carry a deadline, it bounds the whole send step
    /// including retries and yields [`Error::DeadlineExceeded`] when it elapses.
    ///
    /// # Type Parameters
    ///
    /// * `T` - The decoded body type
    pub async fn execute<T>(
        &self,
        operation: &Operation,
        params: CallParameters,
    ) -> Result<DetailedResponse<T>>
    where
        T: DeserializeOwned,
    {
        params.validate(operation)?;
        let request = self.prepare(operation, &params)?;

        match params.deadline_value() {
            Some(deadline) => {
                tokio::time::timeout(deadline, self.send_with_retries(operation, &request))
                    .await
                    .unwrap_or_else(|_| {
                        tracing::warn!(
                            operation = operation.name,
                            deadline_ms = deadline.as_millis(),
                            "Deadline exceeded"
                        );
                        Err(Error::DeadlineExceeded { deadline })
                    })
            }
            None => self.send_with_retries(operation, &request).await,
        }
    }

    /// Builds the URL, headers and body of a request.
    fn prepare(&self, operation: &Operation, params: &CallParameters) -> Result<PreparedRequest> {
        let service_url = self.service_url.as_ref().ok_or_else(|| {
            Error::ConfigurationError("the service URL is not set".to_string())
        })?;
        let url = params.build_url(service_url, operation)?;

        let mut headers = self.default_headers.clone();

        for (name, value) in params.extra_header_values() {
            headers.insert(header_name(name)?, header_value(value)?);
        }

        // Operation headers overwrite caller supplied ones.
        for (name, value) in params.headers() {
            headers.insert(header_name(name)?, header_value(value)?);
        }

        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(USER_AGENT, self.user_agent.clone());

        let body = match params.body_value() {
            Some(body) if operation.has_body => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
                let bytes =
                    serde_json::to_vec(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
                Some(bytes)
            }
            _ => None,
        };

        self.authenticator.authenticate(&mut headers)?;

        Ok(PreparedRequest {
            method: operation.method.clone(),
            url,
            headers,
            body,
        })
    }

    async fn send_with_retries<T>(
        &self,
        operation: &Operation,
        request: &PreparedRequest,
    ) -> Result<DetailedResponse<T>>
    where
        T: DeserializeOwned,
    {
        let start_time = Instant::now();
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = match self.send_once(request, attempt).await {
                Ok(response) => {
                    let latency = start_time.elapsed();
                    parse_response(response, latency, attempt).await
                }
                Err(e) => Err(e),
            };

            let error = match result {
                Ok(response) => return Ok(response),
                Err(e) => e,
            };

            tracing::warn!(
                error = %error,
                attempt = attempt,
                operation = operation.name,
                method = %request.method,
                "Request failed"
            );

            if !self.retry_predicate.should_retry(&error, attempt) {
                return Err(error);
            }

            let Some(strategy_delay) = self.retry_strategy.delay_for_attempt(attempt) else {
                if attempt == 1 {
                    return Err(error);
                }
                return Err(Error::MaxRetriesExceeded {
                    attempts: attempt,
                    last_error: Box::new(error),
                });
            };

            let delay = match self.retry_after.delay_for(&error) {
                Some(delay) => {
                    tracing::info!(
                        retry_after_ms = delay.as_millis(),
                        attempt = attempt,
                        max_wait_secs = self.retry_after.max_wait.as_secs(),
                        "Throttled - honoring Retry-After"
                    );
                    delay
                }
                None => strategy_delay,
            };

            tracing::info!(
                delay_ms = delay.as_millis(),
                attempt = attempt,
                "Retrying request after delay"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Executes a single attempt.
    async fn send_once(
        &self,
        request: &PreparedRequest,
        attempt: usize,
    ) -> Result<reqwest::Response> {
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            attempt = attempt,
            "Executing HTTP request"
        );

        let mut builder = self
            .transport
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        builder.send().await.map_err(map_send_error)
    }

    /// The service URL, if set.
    pub fn service_url(&self) -> Option<&Url> {
        self.service_url.as_ref()
    }

    /// Replaces the service URL. An empty string unsets it, and later calls
    /// fail with a configuration error until a URL is set again.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn set_service_url(&mut self, url: &str) -> Result<()> {
        self.service_url = parse_service_url(url)?;
        Ok(())
    }

    /// The authenticator. Clones made by [`Client::clone_service`] share it.
    pub fn authenticator(&self) -> &Arc<dyn Authenticator> {
        &self.authenticator
    }

    /// Replaces the authenticator after validating it.
    pub fn set_authenticator(&mut self, authenticator: Arc<dyn Authenticator>) -> Result<()> {
        authenticator.validate()?;
        self.authenticator = authenticator;
        Ok(())
    }

    /// The underlying transport.
    pub fn http_client(&self) -> &Arc<reqwest::Client> {
        &self.transport
    }

    /// Replaces the headers sent with every request.
    pub fn set_default_headers(&mut self, headers: HeaderMap) {
        self.default_headers = headers;
    }

    /// The current retry strategy.
    pub fn retry_strategy(&self) -> &RetryStrategy {
        &self.retry_strategy
    }

    /// Retries network errors, 429 and 5xx responses up to `max_retries`
    /// times, waiting `interval` between attempts.
    pub fn enable_retries(&mut self, max_retries: usize, interval: Duration) {
        self.retry_strategy = RetryStrategy::Linear {
            delay: interval,
            max_retries,
        };
    }

    /// Sends each request exactly once.
    pub fn disable_retries(&mut self) {
        self.retry_strategy = RetryStrategy::None;
    }

    /// Returns an independent copy of this client with a new transport.
    ///
    /// The copy's URL and authenticator can be changed without affecting
    /// `self`. Until then, both share the same authenticator instance.
    pub fn clone_service(&self) -> Result<Client> {
        Ok(Client {
            transport: Arc::new(new_transport()?),
            ..self.clone()
        })
    }
}

async fn parse_response<T>(
    response: reqwest::Response,
    latency: Duration,
    attempts: usize,
) -> Result<DetailedResponse<T>>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let headers = response.headers().clone();

    tracing::info!(
        status = status.as_u16(),
        latency_ms = latency.as_millis(),
        attempts = attempts,
        "Received HTTP response"
    );

    if !status.is_success() {
        let raw_response = response.text().await.map_err(|e| {
            tracing::error!(
                error = %e,
                status = status.as_u16(),
                "Failed to read error response body"
            );
            Error::Network(e)
        })?;
        let message = error_message(status, &raw_response);

        if status.is_client_error() {
            tracing::error!(
                status = status.as_u16(),
                message = %message,
                "Client error (4xx)"
            );
        } else if status.is_server_error() {
            tracing::warn!(
                status = status.as_u16(),
                message = %message,
                "Server error (5xx)"
            );
        }

        return Err(Error::Http {
            status,
            message,
            raw_response,
            headers: Box::new(headers),
        });
    }

    let raw_body = response.text().await?;

    if raw_body.trim().is_empty() {
        return Ok(DetailedResponse::new(
            None, raw_body, status, headers, latency, attempts,
        ));
    }

    match serde_json::from_str::<T>(&raw_body) {
        Ok(data) => Ok(DetailedResponse::new(
            Some(data),
            raw_body,
            status,
            headers,
            latency,
            attempts,
        )),
        Err(e) => {
            tracing::error!(
                error = %e,
                status = status.as_u16(),
                "Failed to deserialize response"
            );

            Err(Error::DeserializationFailed {
                raw_response: raw_body,
                serde_error: e.to_string(),
                status,
                headers: Box::new(headers),
            })
        }
    }
}

/// Extracts a readable message from an error body, falling back to the
/// status' canonical reason.
fn error_message(status: StatusCode, body: &str) -> String {
    extract_error_message(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string()
    })
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    let candidates = [
        value.pointer("/errors/0/message"),
        value.get("error"),
        value.get("message"),
        value.get("errorMessage"),
        value.get("msg"),
    ];
    let message = candidates
        .into_iter()
        .flatten()
        .find_map(|v| v.as_str())
        .filter(|message| !message.is_empty())
        .map(str::to_string);
    message
}

fn map_send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else {
        Error::Network(err)
    }
}

fn new_transport() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .build()
        .map_err(|e| Error::ConfigurationError(format!("Failed to build HTTP client: {}", e)))
}

fn parse_service_url(url: &str) -> Result<Option<Url>> {
    if url.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(Url::parse(url)?))
}

fn header_name(name: &str) -> Result<HeaderName> {
    HeaderName::try_from(name)
        .map_err(|e| Error::ConfigurationError(format!("Invalid header name '{}': {}", name, e)))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::try_from(value)
        .map_err(|e| Error::ConfigurationError(format!("Invalid header value: {}", e)))
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use db2saas::auth::BasicAuthenticator;
/// use db2saas::{ClientBuilder, RetryStrategy};
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), db2saas::Error> {
/// let client = ClientBuilder::new()
///     .service_url("https://eu-de.db2.saas.ibm.com/dbapi/v4")?
///     .authenticator(Arc::new(BasicAuthenticator::new("bluadmin", "secret")?))
///     .retry_strategy(RetryStrategy::Linear {
///         delay: Duration::from_secs(1),
///         max_retries: 3,
///     })
///     .default_header("X-Correlation-Id", "abc-123")?
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    service_url: Option<Url>,
    authenticator: Option<Arc<dyn Authenticator>>,
    default_headers: HeaderMap,
    retry_strategy: RetryStrategy,
    retry_predicate: Option<Arc<dyn RetryPredicate>>,
    timeout: Option<Duration>,
    retry_after: RetryAfterConfig,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Creates a new `ClientBuilder` with retries disabled and no service URL.
    pub fn new() -> Self {
        Self {
            service_url: None,
            authenticator: None,
            default_headers: HeaderMap::new(),
            retry_strategy: RetryStrategy::None,
            retry_predicate: None,
            timeout: None,
            retry_after: RetryAfterConfig::default(),
            user_agent: None,
        }
    }

    /// Sets the service URL. An empty string leaves it unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn service_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.service_url = parse_service_url(url.as_ref())?;
        Ok(self)
    }

    /// Sets the authenticator. Required.
    pub fn authenticator(mut self, authenticator: Arc<dyn Authenticator>) -> Self {
        self.authenticator = Some(authenticator);
        self
    }

    /// Adds a header sent with every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        self.default_headers
            .insert(header_name(name.as_ref())?, header_value(value.as_ref())?);
        Ok(self)
    }

    /// Sets the retry strategy for failed requests.
    pub fn retry_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.retry_strategy = strategy;
        self
    }

    /// Sets a custom retry predicate.
    ///
    /// By default, requests are retried based on `Error::is_retryable()`.
    pub fn retry_predicate(mut self, predicate: Box<dyn RetryPredicate>) -> Self {
        self.retry_predicate = Some(Arc::from(predicate));
        self
    }

    /// Sets the per-attempt timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `Retry-After` handling.
    pub fn retry_after(mut self, config: RetryAfterConfig) -> Self {
        self.retry_after = config;
        self
    }

    /// Overrides the `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the configured `Client`.
    ///
    /// # Errors
    ///
    /// Returns an error if no authenticator was provided, the authenticator
    /// is not usable, or the HTTP client cannot be built.
    pub fn build(self) -> Result<Client> {
        let authenticator = self.authenticator.ok_or_else(|| {
            Error::ConfigurationError("an authenticator is required".to_string())
        })?;
        authenticator.validate()?;

        let user_agent = match self.user_agent {
            Some(user_agent) => header_value(&user_agent)?,
            None => HeaderValue::from_static(crate::USER_AGENT),
        };

        let retry_predicate = self
            .retry_predicate
            .unwrap_or_else(|| Arc::new(RetryOnRetryable));

        Ok(Client {
            transport: Arc::new(new_transport()?),
            service_url: self.service_url,
            authenticator,
            default_headers: self.default_headers,
            retry_strategy: self.retry_strategy,
            retry_predicate,
            timeout: self.timeout,
            retry_after: self.retry_after,
            user_agent,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::NoAuthAuthenticator;

    #[test]
    fn test_extract_error_message_shapes() {
        assert_eq!(
            extract_error_message(r#"{"errors":[{"code":"not_found","message":"no such user"}]}"#),
            Some("no such user".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"error":"bad request"}"#),
            Some("bad request".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"message":"denied"}"#),
            Some("denied".to_string())
        );
        assert_eq!(
            extract_error_message(r#"{"errorMessage":"oops"}"#),
            Some("oops".to_string())
        );
        assert_eq!(extract_error_message(r#"{"code":42}"#), None);
        assert_eq!(extract_error_message("<html>gateway</html>"), None);
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "not json"),
            "Bad Gateway"
        );
    }

    #[test]
    fn test_build_requires_authenticator() {
        let result = Client::builder()
            .service_url("https://example.com")
            .unwrap()
            .build();
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_empty_service_url_is_unset() {
        let mut client = Client::builder()
            .authenticator(Arc::new(NoAuthAuthenticator::new()))
            .build()
            .unwrap();
        assert!(client.service_url().is_none());
        client.set_service_url("https://example.com/dbapi/v4").unwrap();
        assert_eq!(
            client.service_url().map(Url::as_str),
            Some("https://example.com/dbapi/v4")
        );
        client.set_service_url("").unwrap();
        assert!(client.service_url().is_none());
    }

    #[test]
    fn test_enable_and_disable_retries() {
        let mut client = Client::builder()
            .authenticator(Arc::new(NoAuthAuthenticator::new()))
            .build()
            .unwrap();
        client.enable_retries(3, Duration::from_millis(20));
        assert_eq!(
            client.retry_strategy(),
            &RetryStrategy::Linear {
                delay: Duration::from_millis(20),
                max_retries: 3
            }
        );
        client.disable_retries();
        assert!(!client.retry_strategy().is_enabled());
    }
}
