//! Operation descriptors and per-call parameters.
//!
//! An [`Operation`] is the static description of one endpoint. A
//! [`CallParameters`] value carries the values for a single invocation and is
//! consumed by [`Client::execute`](crate::Client::execute).

use crate::{Error, Result};
use http::Method;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Characters escaped in a path segment.
///
/// Everything except unreserved characters and `$ & + : = @` is escaped,
/// including `%`, so a value that is already percent-encoded is encoded again.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Where a required parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Param {
    /// A `{name}` placeholder in the path template.
    Path(&'static str),
    /// A query parameter.
    Query(&'static str),
    /// A request header.
    Header(&'static str),
    /// A top-level key of the JSON body.
    Body(&'static str),
}

impl Param {
    /// The parameter's wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Param::Path(name) | Param::Query(name) | Param::Header(name) | Param::Body(name) => {
                *name
            }
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Path(name) => write!(f, "{name} (path)"),
            Param::Query(name) => write!(f, "{name} (query)"),
            Param::Header(name) => write!(f, "{name} (header)"),
            Param::Body(name) => write!(f, "{name} (body)"),
        }
    }
}

/// Static metadata for one API call.
#[derive(Debug)]
pub struct Operation {
    /// Operation name, used in logs and error messages.
    pub name: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Path template relative to the service URL, with `{name}` placeholders.
    pub path: &'static str,
    /// Parameters that must be present and non-empty.
    pub required: &'static [Param],
    /// Whether the request carries a JSON body.
    pub has_body: bool,
}

/// Values for a single invocation of an [`Operation`].
///
/// # Examples
///
/// ```
/// use db2saas::operation::{CallParameters, GET_DB2_SAAS_CONNECTION_INFO};
///
/// let params = CallParameters::new()
///     .path_param("deployment_id", Some("crn%3Av1"))
///     .header("x-deployment-id", Some("crn%3Av1"));
///
/// assert!(params.validate(&GET_DB2_SAAS_CONNECTION_INFO).is_ok());
/// assert_eq!(
///     params.expand_path(&GET_DB2_SAAS_CONNECTION_INFO).unwrap(),
///     "/connectioninfo/crn%253Av1"
/// );
/// ```
#[derive(Debug, Default, Clone)]
pub struct CallParameters {
    path_params: Vec<(&'static str, Option<String>)>,
    query_params: Vec<(&'static str, Option<String>)>,
    headers: Vec<(&'static str, Option<String>)>,
    extra_headers: HashMap<String, String>,
    body: Option<serde_json::Value>,
    deadline: Option<Duration>,
}

impl CallParameters {
    /// Creates an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a path parameter. `None` leaves it unset.
    pub fn path_param(mut self, name: &'static str, value: Option<&str>) -> Self {
        self.path_params.push((name, value.map(str::to_string)));
        self
    }

    /// Sets a query parameter. Unset query parameters are not sent.
    pub fn query_param(mut self, name: &'static str, value: Option<&str>) -> Self {
        self.query_params.push((name, value.map(str::to_string)));
        self
    }

    /// Sets a header owned by the operation. These win over extra headers.
    pub fn header(mut self, name: &'static str, value: Option<&str>) -> Self {
        self.headers.push((name, value.map(str::to_string)));
        self
    }

    /// Adds caller supplied headers.
    pub fn extra_headers(mut self, headers: &HashMap<String, String>) -> Self {
        self.extra_headers
            .extend(headers.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationFailed`] if `body` cannot be serialized.
    pub fn body<B: Serialize>(mut self, body: &B) -> Result<Self> {
        let value =
            serde_json::to_value(body).map_err(|e| Error::SerializationFailed(e.to_string()))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Bounds the whole call, including retries.
    pub fn deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// The per-call deadline, if any.
    pub fn deadline_value(&self) -> Option<Duration> {
        self.deadline
    }

    /// The JSON body, if any.
    pub fn body_value(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Set operation-owned headers, in insertion order.
    pub fn headers(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        set_values(&self.headers)
    }

    /// Caller supplied headers.
    pub fn extra_header_values(&self) -> &HashMap<String, String> {
        &self.extra_headers
    }

    /// Checks that every required parameter of `operation` is set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming every missing parameter.
    pub fn validate(&self, operation: &Operation) -> Result<()> {
        let missing: Vec<String> = operation
            .required
            .iter()
            .filter(|param| !self.is_set(param))
            .map(|param| param.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "{}: missing required parameters: {}",
                operation.name,
                missing.join(", ")
            )))
        }
    }

    fn is_set(&self, param: &Param) -> bool {
        match *param {
            Param::Path(name) => has_value(&self.path_params, name),
            Param::Query(name) => has_value(&self.query_params, name),
            Param::Header(name) => has_value(&self.headers, name),
            Param::Body(name) => self
                .body
                .as_ref()
                .and_then(|body| body.get(name))
                .is_some_and(|value| !value.is_null()),
        }
    }

    /// Substitutes path parameters into the operation's path template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a placeholder has no value, or if a
    /// value is `.` or `..`.
    pub fn expand_path(&self, operation: &Operation) -> Result<String> {
        let mut path = operation.path.to_string();
        for (name, value) in set_values(&self.path_params) {
            // URL parsing would resolve these as dot segments.
            if value == "." || value == ".." {
                return Err(Error::Validation(format!(
                    "{}: path parameter '{}' must not be '{}'",
                    operation.name, name, value
                )));
            }
            let pattern = ["{", name, "}"].concat();
            path = path.replace(&pattern, &encode_path_segment(value));
        }
        if let Some(start) = path.find('{') {
            return Err(Error::Validation(format!(
                "{}: unresolved path parameter in '{}'",
                operation.name,
                &path[start..]
            )));
        }
        Ok(path)
    }

    /// Builds the full request URL from the service URL, the expanded path
    /// and the set query parameters.
    ///
    /// The path is appended to the service URL's own path.
    pub fn build_url(&self, service_url: &Url, operation: &Operation) -> Result<Url> {
        let path = self.expand_path(operation)?;
        let mut url = Url::parse(&format!(
            "{}{}",
            service_url.as_str().trim_end_matches('/'),
            path
        ))?;

        let mut query = set_values(&self.query_params).peekable();
        if query.peek().is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

fn has_value(values: &[(&'static str, Option<String>)], name: &str) -> bool {
    values
        .iter()
        .any(|(n, v)| *n == name && v.as_deref().is_some_and(|v| !v.is_empty()))
}

fn set_values<'a>(
    values: &'a [(&'static str, Option<String>)],
) -> impl Iterator<Item = (&'static str, &'a str)> + 'a {
    values
        .iter()
        .filter_map(|(name, value)| value.as_deref().map(|v| (*name, v)))
}

/// Percent-encodes a value for use as one path segment.
pub fn encode_path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

pub static GET_DB2_SAAS_CONNECTION_INFO: Operation = Operation {
    name: "get_db2_saas_connection_info",
    method: Method::GET,
    path: "/connectioninfo/{deployment_id}",
    required: &[Param::Path("deployment_id"), Param::Header("x-deployment-id")],
    has_body: false,
};

pub static POST_DB2_SAAS_ALLOWLIST: Operation = Operation {
    name: "post_db2_saas_allowlist",
    method: Method::POST,
    path: "/dbsettings/whitelistips",
    required: &[Param::Header("x-deployment-id"), Param::Body("ip_addresses")],
    has_body: true,
};

pub static GET_DB2_SAAS_ALLOWLIST: Operation = Operation {
    name: "get_db2_saas_allowlist",
    method: Method::GET,
    path: "/dbsettings/whitelistips",
    required: &[Param::Header("x-deployment-id")],
    has_body: false,
};

pub static POST_DB2_SAAS_USER: Operation = Operation {
    name: "post_db2_saas_user",
    method: Method::POST,
    path: "/users",
    required: &[
        Param::Header("x-deployment-id"),
        Param::Body("id"),
        Param::Body("iam"),
        Param::Body("ibmid"),
        Param::Body("name"),
        Param::Body("password"),
        Param::Body("role"),
        Param::Body("email"),
        Param::Body("locked"),
        Param::Body("authentication"),
    ],
    has_body: true,
};

pub static GET_DB2_SAAS_USER: Operation = Operation {
    name: "get_db2_saas_user",
    method: Method::GET,
    path: "/users",
    required: &[Param::Header("x-deployment-id")],
    has_body: false,
};

pub static PUT_DB2_SAAS_USER: Operation = Operation {
    name: "put_db2_saas_user",
    method: Method::PUT,
    path: "/users/{id}",
    required: &[
        Param::Header("x-deployment-id"),
        Param::Path("id"),
        Param::Body("id"),
        Param::Body("iam"),
        Param::Body("ibmid"),
        Param::Body("name"),
        Param::Body("password"),
        Param::Body("role"),
        Param::Body("email"),
        Param::Body("locked"),
        Param::Body("authentication"),
    ],
    has_body: true,
};

pub static GETBYID_DB2_SAAS_USER: Operation = Operation {
    name: "getbyid_db2_saas_user",
    method: Method::GET,
    path: "/users/{id}",
    required: &[Param::Header("x-deployment-id"), Param::Path("id")],
    has_body: false,
};

pub static DELETE_DB2_SAAS_USER: Operation = Operation {
    name: "delete_db2_saas_user",
    method: Method::DELETE,
    path: "/users/{id}",
    required: &[Param::Header("x-deployment-id"), Param::Path("id")],
    has_body: false,
};

pub static PUT_DB2_SAAS_AUTOSCALE: Operation = Operation {
    name: "put_db2_saas_autoscale",
    method: Method::PUT,
    path: "/manage/scaling/auto",
    required: &[Param::Header("x-deployment-id")],
    has_body: true,
};

pub static GET_DB2_SAAS_AUTOSCALE: Operation = Operation {
    name: "get_db2_saas_autoscale",
    method: Method::GET,
    path: "/manage/scaling/auto",
    required: &[Param::Header("x-deployment-id")],
    has_body: false,
};

pub static POST_DB2_SAAS_DB_CONFIGURATION: Operation = Operation {
    name: "post_db2_saas_db_configuration",
    method: Method::POST,
    path: "/manage/deployments/custom_setting",
    required: &[Param::Header("x-deployment-id")],
    has_body: true,
};

pub static GET_DB2_SAAS_TUNEABLE_PARAM: Operation = Operation {
    name: "get_db2_saas_tuneable_param",
    method: Method::GET,
    path: "/manage/tuneable_param",
    required: &[],
    has_body: false,
};

pub static GET_DB2_SAAS_BACKUP: Operation = Operation {
    name: "get_db2_saas_backup",
    method: Method::GET,
    path: "/manage/backups",
    required: &[Param::Header("x-db-profile")],
    has_body: false,
};

pub static POST_DB2_SAAS_BACKUP: Operation = Operation {
    name: "post_db2_saas_backup",
    method: Method::POST,
    path: "/manage/backups/backup",
    required: &[Param::Header("x-db-profile")],
    has_body: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    const CRN: &str = "crn%3Av1%3Astaging%3Apublic%3Adashdb-for-transactions%3Aus-south%3Aa%2Fe7e3e87b512f474381c0684a5ecbba03%3A69db420f-33d5-4953-8bd8-1950abd356f6%3A%3A";

    #[test]
    fn test_encode_path_segment_matches_path_escape() {
        assert_eq!(encode_path_segment("abc-_.~"), "abc-_.~");
        assert_eq!(encode_path_segment("a:b@c=d"), "a:b@c=d");
        assert_eq!(encode_path_segment("a/b c"), "a%2Fb%20c");
        assert_eq!(encode_path_segment("a;b,c?d"), "a%3Bb%2Cc%3Fd");
        assert_eq!(encode_path_segment("ü"), "%C3%BC");
    }

    #[test]
    fn test_pre_encoded_path_param_is_encoded_again() {
        let params = CallParameters::new()
            .path_param("deployment_id", Some(CRN))
            .header("x-deployment-id", Some(CRN));
        let path = params.expand_path(&GET_DB2_SAAS_CONNECTION_INFO).unwrap();
        assert_eq!(
            path,
            "/connectioninfo/crn%253Av1%253Astaging%253Apublic%253Adashdb-for-transactions%253Aus-south%253Aa%252Fe7e3e87b512f474381c0684a5ecbba03%253A69db420f-33d5-4953-8bd8-1950abd356f6%253A%253A"
        );
    }

    #[test]
    fn test_validate_names_every_missing_parameter() {
        let err = CallParameters::new()
            .path_param("deployment_id", None)
            .header("x-deployment-id", Some(""))
            .validate(&GET_DB2_SAAS_CONNECTION_INFO)
            .unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Validation(_)));
        assert!(message.contains("deployment_id (path)"), "{message}");
        assert!(message.contains("x-deployment-id (header)"), "{message}");
    }

    #[test]
    fn test_validate_body_parameters() {
        let params = CallParameters::new()
            .header("x-deployment-id", Some(CRN))
            .body(&serde_json::json!({ "ip_addresses": null }))
            .unwrap();
        assert!(params.validate(&POST_DB2_SAAS_ALLOWLIST).is_err());

        let params = CallParameters::new()
            .header("x-deployment-id", Some(CRN))
            .body(&serde_json::json!({ "ip_addresses": [] }))
            .unwrap();
        assert!(params.validate(&POST_DB2_SAAS_ALLOWLIST).is_ok());
    }

    #[test]
    fn test_operation_without_required_parameters() {
        assert!(CallParameters::new()
            .validate(&GET_DB2_SAAS_TUNEABLE_PARAM)
            .is_ok());
    }

    #[test]
    fn test_unresolved_placeholder_is_rejected() {
        let err = CallParameters::new()
            .expand_path(&DELETE_DB2_SAAS_USER)
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_build_url_keeps_service_path_and_query_order() {
        let base = Url::parse("https://us-south.db2.saas.ibm.com/dbapi/v4").unwrap();
        let url = CallParameters::new()
            .path_param("id", Some("test user"))
            .query_param("b", Some("2"))
            .query_param("skipped", None)
            .query_param("a", Some("1 1"))
            .build_url(&base, &GETBYID_DB2_SAAS_USER)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://us-south.db2.saas.ibm.com/dbapi/v4/users/test%20user?b=2&a=1+1"
        );
    }

    #[test]
    fn test_dot_segments_are_rejected() {
        let base = Url::parse("https://us-south.db2.saas.ibm.com/dbapi/v4").unwrap();
        for value in [".", ".."] {
            let err = CallParameters::new()
                .path_param("id", Some(value))
                .build_url(&base, &DELETE_DB2_SAAS_USER)
                .unwrap_err();
            assert!(matches!(err, Error::Validation(_)), "{value}: {err:?}");
        }

        let url = CallParameters::new()
            .path_param("id", Some("..user"))
            .build_url(&base, &DELETE_DB2_SAAS_USER)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://us-south.db2.saas.ibm.com/dbapi/v4/users/..user"
        );
    }

    #[test]
    fn test_build_url_with_trailing_slash_and_no_query() {
        let base = Url::parse("http://127.0.0.1:8080/").unwrap();
        let url = CallParameters::new()
            .build_url(&base, &GET_DB2_SAAS_TUNEABLE_PARAM)
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/manage/tuneable_param");
    }
}
