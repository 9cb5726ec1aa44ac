//! Per-operation call options.
//!
//! Each operation of [`Db2saas`](crate::Db2saas) takes one options value.
//! `new` takes the required values; everything else is set with `with_*`.
//! Every options type also carries extra headers and an optional deadline
//! bounding the whole call.
//!
//! Deployment and profile identifiers are CRNs that callers pass already
//! percent-encoded (`crn%3Av1%3A...`). Headers send them verbatim; path
//! parameters encode them once more.

use crate::models::{
    CreateCustomSettingsDb, CreateCustomSettingsDbm, CreateCustomSettingsRegistry,
    CreateUserAuthentication, IpAddress,
};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Values of the `role` field of a user.
pub mod user_role {
    pub const BLUADMIN: &str = "bluadmin";
    pub const BLUUSER: &str = "bluuser";
}

/// Values of the `locked` field of a user.
pub mod user_locked {
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
}

macro_rules! call_options {
    ($($options:ty),+ $(,)?) => {
        $(
            impl $options {
                /// Adds headers sent with this call only.
                pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
                    self.headers.extend(headers);
                    self
                }

                /// Adds one header sent with this call only.
                pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
                    self.headers.insert(name.into(), value.into());
                    self
                }

                /// Bounds the whole call, retries included.
                pub fn with_deadline(mut self, deadline: Duration) -> Self {
                    self.deadline = Some(deadline);
                    self
                }
            }
        )+
    };
}

/// Options for [`Db2saas::get_db2_saas_connection_info`](crate::Db2saas::get_db2_saas_connection_info).
#[derive(Debug, Clone, Default)]
pub struct GetDb2SaasConnectionInfoOptions {
    /// Encoded CRN of the deployment, used in the path.
    pub deployment_id: Option<String>,
    /// Encoded CRN of the deployment, sent as `x-deployment-id`.
    pub x_deployment_id: Option<String>,
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl GetDb2SaasConnectionInfoOptions {
    pub fn new(deployment_id: impl Into<String>, x_deployment_id: impl Into<String>) -> Self {
        Self {
            deployment_id: Some(deployment_id.into()),
            x_deployment_id: Some(x_deployment_id.into()),
            ..Default::default()
        }
    }

    pub fn with_deployment_id(mut self, deployment_id: impl Into<String>) -> Self {
        self.deployment_id = Some(deployment_id.into());
        self
    }

    pub fn with_x_deployment_id(mut self, x_deployment_id: impl Into<String>) -> Self {
        self.x_deployment_id = Some(x_deployment_id.into());
        self
    }
}

/// Options for [`Db2saas::post_db2_saas_allowlist`](crate::Db2saas::post_db2_saas_allowlist).
///
/// The list replaces the current allowlist.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostDb2SaasAllowlistOptions {
    #[serde(skip)]
    pub x_deployment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_addresses: Option<Vec<IpAddress>>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
    #[serde(skip)]
    pub deadline: Option<Duration>,
}

impl PostDb2SaasAllowlistOptions {
    pub fn new(x_deployment_id: impl Into<String>, ip_addresses: Vec<IpAddress>) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            ip_addresses: Some(ip_addresses),
            ..Default::default()
        }
    }

    pub fn with_x_deployment_id(mut self, x_deployment_id: impl Into<String>) -> Self {
        self.x_deployment_id = Some(x_deployment_id.into());
        self
    }

    pub fn with_ip_addresses(mut self, ip_addresses: Vec<IpAddress>) -> Self {
        self.ip_addresses = Some(ip_addresses);
        self
    }
}

/// Options for [`Db2saas::get_db2_saas_allowlist`](crate::Db2saas::get_db2_saas_allowlist).
#[derive(Debug, Clone, Default)]
pub struct GetDb2SaasAllowlistOptions {
    pub x_deployment_id: Option<String>,
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl GetDb2SaasAllowlistOptions {
    pub fn new(x_deployment_id: impl Into<String>) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            ..Default::default()
        }
    }

    pub fn with_x_deployment_id(mut self, x_deployment_id: impl Into<String>) -> Self {
        self.x_deployment_id = Some(x_deployment_id.into());
        self
    }
}

/// Options for [`Db2saas::post_db2_saas_user`](crate::Db2saas::post_db2_saas_user).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostDb2SaasUserOptions {
    #[serde(skip)]
    pub x_deployment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibmid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// See [`user_role`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// See [`user_locked`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<CreateUserAuthentication>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
    #[serde(skip)]
    pub deadline: Option<Duration>,
}

impl PostDb2SaasUserOptions {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x_deployment_id: impl Into<String>,
        id: impl Into<String>,
        iam: bool,
        ibmid: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
        email: impl Into<String>,
        locked: impl Into<String>,
        authentication: CreateUserAuthentication,
    ) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            id: Some(id.into()),
            iam: Some(iam),
            ibmid: Some(ibmid.into()),
            name: Some(name.into()),
            password: Some(password.into()),
            role: Some(role.into()),
            email: Some(email.into()),
            locked: Some(locked.into()),
            authentication: Some(authentication),
            ..Default::default()
        }
    }

    pub fn with_x_deployment_id(mut self, x_deployment_id: impl Into<String>) -> Self {
        self.x_deployment_id = Some(x_deployment_id.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_locked(mut self, locked: impl Into<String>) -> Self {
        self.locked = Some(locked.into());
        self
    }

    pub fn with_authentication(mut self, authentication: CreateUserAuthentication) -> Self {
        self.authentication = Some(authentication);
        self
    }
}

/// Options for [`Db2saas::get_db2_saas_user`](crate::Db2saas::get_db2_saas_user).
#[derive(Debug, Clone, Default)]
pub struct GetDb2SaasUserOptions {
    pub x_deployment_id: Option<String>,
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl GetDb2SaasUserOptions {
    pub fn new(x_deployment_id: impl Into<String>) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            ..Default::default()
        }
    }
}

/// Options for [`Db2saas::put_db2_saas_user`](crate::Db2saas::put_db2_saas_user).
///
/// `id` selects the user in the path; the `new_*` fields are the replacement
/// values sent in the body under their plain names.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PutDb2SaasUserOptions {
    #[serde(skip)]
    pub x_deployment_id: Option<String>,
    #[serde(skip)]
    pub id: Option<String>,
    #[serde(rename = "id", skip_serializing_if = "Option::is_none")]
    pub new_id: Option<String>,
    #[serde(rename = "iam", skip_serializing_if = "Option::is_none")]
    pub new_iam: Option<bool>,
    #[serde(rename = "ibmid", skip_serializing_if = "Option::is_none")]
    pub new_ibmid: Option<String>,
    #[serde(rename = "name", skip_serializing_if = "Option::is_none")]
    pub new_name: Option<String>,
    #[serde(rename = "password", skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
    #[serde(rename = "role", skip_serializing_if = "Option::is_none")]
    pub new_role: Option<String>,
    #[serde(rename = "email", skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,
    #[serde(rename = "locked", skip_serializing_if = "Option::is_none")]
    pub new_locked: Option<String>,
    #[serde(rename = "authentication", skip_serializing_if = "Option::is_none")]
    pub new_authentication: Option<CreateUserAuthentication>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
    #[serde(skip)]
    pub deadline: Option<Duration>,
}

impl PutDb2SaasUserOptions {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        x_deployment_id: impl Into<String>,
        id: impl Into<String>,
        new_id: impl Into<String>,
        new_iam: bool,
        new_ibmid: impl Into<String>,
        new_name: impl Into<String>,
        new_password: impl Into<String>,
        new_role: impl Into<String>,
        new_email: impl Into<String>,
        new_locked: impl Into<String>,
        new_authentication: CreateUserAuthentication,
    ) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            id: Some(id.into()),
            new_id: Some(new_id.into()),
            new_iam: Some(new_iam),
            new_ibmid: Some(new_ibmid.into()),
            new_name: Some(new_name.into()),
            new_password: Some(new_password.into()),
            new_role: Some(new_role.into()),
            new_email: Some(new_email.into()),
            new_locked: Some(new_locked.into()),
            new_authentication: Some(new_authentication),
            ..Default::default()
        }
    }

    pub fn with_new_password(mut self, new_password: impl Into<String>) -> Self {
        self.new_password = Some(new_password.into());
        self
    }

    pub fn with_new_locked(mut self, new_locked: impl Into<String>) -> Self {
        self.new_locked = Some(new_locked.into());
        self
    }
}

/// Options for [`Db2saas::getbyid_db2_saas_user`](crate::Db2saas::getbyid_db2_saas_user).
#[derive(Debug, Clone, Default)]
pub struct GetbyidDb2SaasUserOptions {
    pub x_deployment_id: Option<String>,
    pub id: Option<String>,
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl GetbyidDb2SaasUserOptions {
    pub fn new(x_deployment_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

/// Options for [`Db2saas::delete_db2_saas_user`](crate::Db2saas::delete_db2_saas_user).
#[derive(Debug, Clone, Default)]
pub struct DeleteDb2SaasUserOptions {
    pub x_deployment_id: Option<String>,
    pub id: Option<String>,
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl DeleteDb2SaasUserOptions {
    pub fn new(x_deployment_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            id: Some(id.into()),
            ..Default::default()
        }
    }
}

/// Options for [`Db2saas::put_db2_saas_autoscale`](crate::Db2saas::put_db2_saas_autoscale).
///
/// Only the fields that are set are changed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PutDb2SaasAutoscaleOptions {
    #[serde(skip)]
    pub x_deployment_id: Option<String>,
    /// `"true"` or `"false"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_enabled: Option<String>,
    /// Storage utilization percentage that triggers scaling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_threshold: Option<i64>,
    /// Minutes the threshold must be exceeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_over_time_period: Option<f64>,
    /// Minutes to wait between scaling events.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_pause_limit: Option<i64>,
    /// `"true"` or `"false"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_allow_plan_limit: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
    #[serde(skip)]
    pub deadline: Option<Duration>,
}

impl PutDb2SaasAutoscaleOptions {
    pub fn new(x_deployment_id: impl Into<String>) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            ..Default::default()
        }
    }

    pub fn with_auto_scaling_enabled(mut self, enabled: impl Into<String>) -> Self {
        self.auto_scaling_enabled = Some(enabled.into());
        self
    }

    pub fn with_auto_scaling_threshold(mut self, threshold: i64) -> Self {
        self.auto_scaling_threshold = Some(threshold);
        self
    }

    pub fn with_auto_scaling_over_time_period(mut self, minutes: f64) -> Self {
        self.auto_scaling_over_time_period = Some(minutes);
        self
    }

    pub fn with_auto_scaling_pause_limit(mut self, minutes: i64) -> Self {
        self.auto_scaling_pause_limit = Some(minutes);
        self
    }

    pub fn with_auto_scaling_allow_plan_limit(mut self, allow: impl Into<String>) -> Self {
        self.auto_scaling_allow_plan_limit = Some(allow.into());
        self
    }
}

/// Options for [`Db2saas::get_db2_saas_autoscale`](crate::Db2saas::get_db2_saas_autoscale).
#[derive(Debug, Clone, Default)]
pub struct GetDb2SaasAutoscaleOptions {
    pub x_deployment_id: Option<String>,
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl GetDb2SaasAutoscaleOptions {
    pub fn new(x_deployment_id: impl Into<String>) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            ..Default::default()
        }
    }
}

/// Options for [`Db2saas::post_db2_saas_db_configuration`](crate::Db2saas::post_db2_saas_db_configuration).
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostDb2SaasDbConfigurationOptions {
    #[serde(skip)]
    pub x_deployment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry: Option<CreateCustomSettingsRegistry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<CreateCustomSettingsDb>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dbm: Option<CreateCustomSettingsDbm>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
    #[serde(skip)]
    pub deadline: Option<Duration>,
}

impl PostDb2SaasDbConfigurationOptions {
    pub fn new(x_deployment_id: impl Into<String>) -> Self {
        Self {
            x_deployment_id: Some(x_deployment_id.into()),
            ..Default::default()
        }
    }

    pub fn with_registry(mut self, registry: CreateCustomSettingsRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn with_db(mut self, db: CreateCustomSettingsDb) -> Self {
        self.db = Some(db);
        self
    }

    pub fn with_dbm(mut self, dbm: CreateCustomSettingsDbm) -> Self {
        self.dbm = Some(dbm);
        self
    }
}

/// Options for [`Db2saas::get_db2_saas_tuneable_param`](crate::Db2saas::get_db2_saas_tuneable_param).
#[derive(Debug, Clone, Default)]
pub struct GetDb2SaasTuneableParamOptions {
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl GetDb2SaasTuneableParamOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Options for [`Db2saas::get_db2_saas_backup`](crate::Db2saas::get_db2_saas_backup).
#[derive(Debug, Clone, Default)]
pub struct GetDb2SaasBackupOptions {
    /// Encoded CRN of the deployment, sent as `x-db-profile`.
    pub x_db_profile: Option<String>,
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl GetDb2SaasBackupOptions {
    pub fn new(x_db_profile: impl Into<String>) -> Self {
        Self {
            x_db_profile: Some(x_db_profile.into()),
            ..Default::default()
        }
    }
}

/// Options for [`Db2saas::post_db2_saas_backup`](crate::Db2saas::post_db2_saas_backup).
#[derive(Debug, Clone, Default)]
pub struct PostDb2SaasBackupOptions {
    pub x_db_profile: Option<String>,
    pub headers: HashMap<String, String>,
    pub deadline: Option<Duration>,
}

impl PostDb2SaasBackupOptions {
    pub fn new(x_db_profile: impl Into<String>) -> Self {
        Self {
            x_db_profile: Some(x_db_profile.into()),
            ..Default::default()
        }
    }
}

call_options!(
    GetDb2SaasConnectionInfoOptions,
    PostDb2SaasAllowlistOptions,
    GetDb2SaasAllowlistOptions,
    PostDb2SaasUserOptions,
    GetDb2SaasUserOptions,
    PutDb2SaasUserOptions,
    GetbyidDb2SaasUserOptions,
    DeleteDb2SaasUserOptions,
    PutDb2SaasAutoscaleOptions,
    GetDb2SaasAutoscaleOptions,
    PostDb2SaasDbConfigurationOptions,
    GetDb2SaasTuneableParamOptions,
    GetDb2SaasBackupOptions,
    PostDb2SaasBackupOptions,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_user_body_uses_plain_names() {
        let options = PutDb2SaasUserOptions::new(
            "crn%3Av1",
            "test-user",
            "test-user",
            false,
            "test-ibm-id",
            "test_user",
            "dEkMc43@gfAPl!867^dSbu",
            user_role::BLUUSER,
            "test_user@mycompany.com",
            user_locked::NO,
            CreateUserAuthentication::new("internal", "Default"),
        )
        .with_deadline(Duration::from_secs(5));

        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(body["id"], "test-user");
        assert_eq!(body["iam"], false);
        assert_eq!(body["authentication"]["policy_id"], "Default");
        assert!(body.get("new_id").is_none());
        assert!(body.get("x_deployment_id").is_none());
        assert!(body.get("deadline").is_none());
    }

    #[test]
    fn test_unset_body_fields_are_omitted() {
        let options = PutDb2SaasAutoscaleOptions::new("crn%3Av1").with_auto_scaling_threshold(90);
        let body = serde_json::to_value(&options).unwrap();
        assert_eq!(body, serde_json::json!({ "auto_scaling_threshold": 90 }));
    }

    #[test]
    fn test_extra_headers_accumulate() {
        let options = GetDb2SaasBackupOptions::new("crn%3Av1")
            .with_header("X-Test", "1")
            .with_headers(HashMap::from([("X-Other".to_string(), "2".to_string())]));
        assert_eq!(options.headers.len(), 2);
        assert_eq!(options.headers["X-Test"], "1");
    }
}
