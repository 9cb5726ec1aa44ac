//! External configuration: environment variables and regional service URLs.

use crate::{
    auth::{
        Authenticator, BasicAuthenticator, BearerTokenAuthenticator, NoAuthAuthenticator,
        AUTH_TYPE_BASIC, AUTH_TYPE_BEARER_TOKEN, AUTH_TYPE_NOAUTH,
    },
    service::PARAMETERIZED_SERVICE_URL,
    Client, Error, Result,
};
use std::sync::Arc;
use std::time::Duration;

/// Retries used when retries are enabled without an explicit count.
pub const DEFAULT_MAX_RETRIES: usize = 4;

/// Interval used when retries are enabled without an explicit interval.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(30);

/// Regions with a Db2 SaaS endpoint.
pub const REGIONS: &[&str] = &[
    "us-south", "us-east", "ca-tor", "br-sao", "eu-de", "eu-gb", "eu-es", "jp-tok", "jp-osa",
    "au-syd", "in-che",
];

const DEFAULT_REGION: &str = "us-south";

/// Service settings read from `<NAME>_*` variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub url: Option<String>,
    pub auth_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub bearer_token: Option<String>,
    pub enable_retries: bool,
    pub max_retries: Option<usize>,
    pub retry_interval: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl ServiceConfig {
    /// Reads the configuration of `service_name` from the process environment.
    pub fn from_env(service_name: &str) -> Result<Self> {
        Self::from_lookup(service_name, |key| std::env::var(key).ok())
    }

    /// Reads the configuration of `service_name` through `lookup`.
    ///
    /// Keys are `<NAME>_URL`, `<NAME>_AUTH_TYPE` and so on, where `NAME` is
    /// the upper-cased service name with `-` replaced by `_`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationError`] if a numeric or boolean value
    /// cannot be parsed.
    pub fn from_lookup<F>(service_name: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = service_name.to_uppercase().replace('-', "_");
        let get = |suffix: &str| {
            lookup(&format!("{prefix}_{suffix}"))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let enable_retries = match get("ENABLE_RETRIES") {
            Some(value) => parse_bool(&prefix, "ENABLE_RETRIES", &value)?,
            None => false,
        };

        Ok(Self {
            url: get("URL"),
            auth_type: get("AUTH_TYPE").map(|value| value.to_lowercase()),
            username: get("USERNAME"),
            password: get("PASSWORD"),
            bearer_token: get("BEARER_TOKEN"),
            enable_retries,
            max_retries: get("MAX_RETRIES")
                .map(|value| parse_number(&prefix, "MAX_RETRIES", &value))
                .transpose()?,
            retry_interval: get("RETRY_INTERVAL")
                .map(|value| parse_number(&prefix, "RETRY_INTERVAL", &value))
                .transpose()?
                .map(Duration::from_secs),
            timeout: get("TIMEOUT")
                .map(|value| parse_number(&prefix, "TIMEOUT", &value))
                .transpose()?
                .map(Duration::from_secs),
        })
    }

    /// Builds the configured authenticator.
    ///
    /// Without an explicit auth type, a bearer token selects bearer token
    /// authentication and a username selects basic authentication.
    pub fn authenticator(&self) -> Result<Arc<dyn Authenticator>> {
        let auth_type = match self.auth_type.as_deref() {
            Some(auth_type) => auth_type,
            None if self.bearer_token.is_some() => AUTH_TYPE_BEARER_TOKEN,
            None if self.username.is_some() => AUTH_TYPE_BASIC,
            None => {
                return Err(Error::ConfigurationError(
                    "no authentication type configured".to_string(),
                ))
            }
        };

        match auth_type {
            AUTH_TYPE_NOAUTH => Ok(Arc::new(NoAuthAuthenticator::new())),
            AUTH_TYPE_BASIC => Ok(Arc::new(BasicAuthenticator::new(
                self.username.as_deref().unwrap_or_default(),
                self.password.as_deref().unwrap_or_default(),
            )?)),
            AUTH_TYPE_BEARER_TOKEN => Ok(Arc::new(BearerTokenAuthenticator::new(
                self.bearer_token.as_deref().unwrap_or_default(),
            )?)),
            other => Err(Error::ConfigurationError(format!(
                "unsupported authentication type '{other}'"
            ))),
        }
    }

    /// Builds a client, falling back to `default_url` when no URL is configured.
    pub fn into_client(self, default_url: &str) -> Result<Client> {
        let authenticator = self.authenticator()?;
        let mut builder = Client::builder()
            .service_url(self.url.as_deref().unwrap_or(default_url))?
            .authenticator(authenticator);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let mut client = builder.build()?;
        if self.enable_retries {
            client.enable_retries(
                self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
                self.retry_interval.unwrap_or(DEFAULT_RETRY_INTERVAL),
            );
        }

        tracing::debug!(
            service_url = ?client.service_url().map(|url| url.as_str()),
            auth_type = client.authenticator().authentication_type(),
            retries = self.enable_retries,
            "Loaded service configuration"
        );
        Ok(client)
    }
}

fn parse_bool(prefix: &str, suffix: &str, value: &str) -> Result<bool> {
    value.to_lowercase().parse().map_err(|_| {
        Error::ConfigurationError(format!("{prefix}_{suffix}: expected true or false, got '{value}'"))
    })
}

fn parse_number<N: std::str::FromStr>(prefix: &str, suffix: &str, value: &str) -> Result<N> {
    value.parse().map_err(|_| {
        Error::ConfigurationError(format!("{prefix}_{suffix}: expected a number, got '{value}'"))
    })
}

/// Fills the `{region}` variable of the service URL template.
///
/// Variables not given take their defaults (`region = us-south`).
///
/// # Errors
///
/// Returns [`Error::ConfigurationError`] for an unknown variable name or an
/// unknown region.
///
/// # Examples
///
/// ```
/// use db2saas::config::construct_service_url;
///
/// assert_eq!(
///     construct_service_url(&[("region", "eu-de")]).unwrap(),
///     "https://eu-de.db2.saas.ibm.com/dbapi/v4"
/// );
/// assert!(construct_service_url(&[("zone", "eu-de")]).is_err());
/// ```
pub fn construct_service_url(variables: &[(&str, &str)]) -> Result<String> {
    let mut region = DEFAULT_REGION;
    for (name, value) in variables {
        match *name {
            "region" => region = *value,
            other => {
                return Err(Error::ConfigurationError(format!(
                    "'{other}' is not a valid service URL variable"
                )))
            }
        }
    }

    if !REGIONS.contains(&region) {
        return Err(Error::ConfigurationError(format!(
            "'{region}' is not a valid region, expected one of: {}",
            REGIONS.join(", ")
        )));
    }
    Ok(PARAMETERIZED_SERVICE_URL.replace("{region}", region))
}

/// The service URL of `region`.
pub fn service_url_for_region(region: &str) -> Result<String> {
    construct_service_url(&[("region", region)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::DEFAULT_SERVICE_URL;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_construct_service_url_defaults_to_us_south() {
        assert_eq!(construct_service_url(&[]).unwrap(), DEFAULT_SERVICE_URL);
    }

    #[test]
    fn test_construct_service_url_rejects_unknown_values() {
        assert!(matches!(
            construct_service_url(&[("invalid_key", "value")]),
            Err(Error::ConfigurationError(_))
        ));
        assert!(service_url_for_region("mars-north").is_err());
        assert_eq!(
            service_url_for_region("jp-tok").unwrap(),
            "https://jp-tok.db2.saas.ibm.com/dbapi/v4"
        );
    }

    #[test]
    fn test_from_lookup_reads_prefixed_keys() {
        let config = ServiceConfig::from_lookup(
            "my-db2",
            lookup(&[
                ("MY_DB2_URL", "http://localhost:9000/dbapi/v4"),
                ("MY_DB2_AUTH_TYPE", "BearerToken"),
                ("MY_DB2_BEARER_TOKEN", "token"),
                ("MY_DB2_ENABLE_RETRIES", "true"),
                ("MY_DB2_MAX_RETRIES", "2"),
                ("MY_DB2_RETRY_INTERVAL", "5"),
                ("MY_DB2_TIMEOUT", " 10 "),
            ]),
        )
        .unwrap();

        assert_eq!(config.url.as_deref(), Some("http://localhost:9000/dbapi/v4"));
        assert_eq!(config.auth_type.as_deref(), Some("bearertoken"));
        assert!(config.enable_retries);
        assert_eq!(config.max_retries, Some(2));
        assert_eq!(config.retry_interval, Some(Duration::from_secs(5)));
        assert_eq!(config.timeout, Some(Duration::from_secs(10)));
        assert_eq!(
            config.authenticator().unwrap().authentication_type(),
            AUTH_TYPE_BEARER_TOKEN
        );
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let result = ServiceConfig::from_lookup("db2saas", lookup(&[("DB2SAAS_MAX_RETRIES", "many")]));
        assert!(matches!(result, Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_auth_type_is_inferred() {
        let config = ServiceConfig::from_lookup(
            "db2saas",
            lookup(&[("DB2SAAS_USERNAME", "bluadmin"), ("DB2SAAS_PASSWORD", "secret")]),
        )
        .unwrap();
        assert_eq!(config.authenticator().unwrap().authentication_type(), AUTH_TYPE_BASIC);

        let empty = ServiceConfig::from_lookup("db2saas", lookup(&[])).unwrap();
        assert!(empty.authenticator().is_err());

        let iam = ServiceConfig::from_lookup("db2saas", lookup(&[("DB2SAAS_AUTH_TYPE", "iam")]))
            .unwrap();
        assert!(iam.authenticator().is_err());
    }

    #[test]
    fn test_into_client_applies_retries_and_default_url() {
        let config = ServiceConfig::from_lookup(
            "db2saas",
            lookup(&[("DB2SAAS_AUTH_TYPE", "noauth"), ("DB2SAAS_ENABLE_RETRIES", "true")]),
        )
        .unwrap();
        let client = config.into_client(DEFAULT_SERVICE_URL).unwrap();
        assert_eq!(
            client.service_url().map(|url| url.as_str()),
            Some(DEFAULT_SERVICE_URL)
        );
        assert_eq!(client.retry_strategy().max_retries(), DEFAULT_MAX_RETRIES);
    }
}
