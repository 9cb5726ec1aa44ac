//! The Db2 SaaS management service.

use crate::{
    auth::Authenticator,
    config::ServiceConfig,
    models::*,
    operation::{self, CallParameters},
    options::*,
    Client, DetailedResponse, Result,
};
use std::sync::Arc;

/// Service URL of the `us-south` region.
pub const DEFAULT_SERVICE_URL: &str = "https://us-south.db2.saas.ibm.com/dbapi/v4";

/// Name used to look up external configuration.
pub const DEFAULT_SERVICE_NAME: &str = "db2saas";

/// Service URL template. See [`config::construct_service_url`](crate::config::construct_service_url).
pub const PARAMETERIZED_SERVICE_URL: &str = "https://{region}.db2.saas.ibm.com/dbapi/v4";

/// Client for the Db2 SaaS management API.
///
/// Every operation validates its options, sends one request (retrying when
/// retries are enabled) and returns a [`DetailedResponse`] holding the
/// decoded result, the raw body, the status code and the headers.
///
/// # Examples
///
/// ```no_run
/// use db2saas::auth::BearerTokenAuthenticator;
/// use db2saas::{Db2saas, GetDb2SaasAllowlistOptions};
/// use std::sync::Arc;
///
/// # async fn example() -> Result<(), db2saas::Error> {
/// let service = Db2saas::new(Arc::new(BearerTokenAuthenticator::new("token")?))?;
/// let response = service
///     .get_db2_saas_allowlist(&GetDb2SaasAllowlistOptions::new("crn%3Av1%3A..."))
///     .await?;
/// for ip in response.result.and_then(|r| r.ip_addresses).unwrap_or_default() {
///     println!("{} {}", ip.address, ip.description);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Db2saas {
    client: Client,
}

impl Db2saas {
    /// Creates a service pointed at [`DEFAULT_SERVICE_URL`].
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Result<Self> {
        let client = Client::builder()
            .service_url(DEFAULT_SERVICE_URL)?
            .authenticator(authenticator)
            .build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Creates a service from the `DB2SAAS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_env_named(DEFAULT_SERVICE_NAME)
    }

    /// Creates a service from the `<NAME>_*` environment variables.
    pub fn from_env_named(service_name: &str) -> Result<Self> {
        let config = ServiceConfig::from_env(service_name)?;
        let client = config.into_client(DEFAULT_SERVICE_URL)?;
        Ok(Self { client })
    }

    /// Returns an independent copy with its own transport.
    ///
    /// Changing the copy's URL or authenticator leaves `self` untouched.
    pub fn clone_service(&self) -> Result<Self> {
        Ok(Self {
            client: self.client.clone_service()?,
        })
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }

    /// Retrieves the public and private connection endpoints of a deployment.
    pub async fn get_db2_saas_connection_info(
        &self,
        options: &GetDb2SaasConnectionInfoOptions,
    ) -> Result<DetailedResponse<SuccessConnectionInfo>> {
        let params = CallParameters::new()
            .path_param("deployment_id", options.deployment_id.as_deref())
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::GET_DB2_SAAS_CONNECTION_INFO, params)
            .await
    }

    /// Replaces the IP allowlist of a deployment.
    pub async fn post_db2_saas_allowlist(
        &self,
        options: &PostDb2SaasAllowlistOptions,
    ) -> Result<DetailedResponse<SuccessPostAllowedlistIPs>> {
        let params = CallParameters::new()
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .body(options)?
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::POST_DB2_SAAS_ALLOWLIST, params)
            .await
    }

    /// Lists the IP addresses allowed to connect to a deployment.
    pub async fn get_db2_saas_allowlist(
        &self,
        options: &GetDb2SaasAllowlistOptions,
    ) -> Result<DetailedResponse<SuccessGetAllowlistIPs>> {
        let params = CallParameters::new()
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::GET_DB2_SAAS_ALLOWLIST, params)
            .await
    }

    /// Creates a database user.
    pub async fn post_db2_saas_user(
        &self,
        options: &PostDb2SaasUserOptions,
    ) -> Result<DetailedResponse<SuccessUserResponse>> {
        let params = CallParameters::new()
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .body(options)?
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::POST_DB2_SAAS_USER, params)
            .await
    }

    /// Lists the users of a deployment.
    pub async fn get_db2_saas_user(
        &self,
        options: &GetDb2SaasUserOptions,
    ) -> Result<DetailedResponse<SuccessGetUserInfo>> {
        let params = CallParameters::new()
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::GET_DB2_SAAS_USER, params)
            .await
    }

    /// Replaces a user's attributes.
    pub async fn put_db2_saas_user(
        &self,
        options: &PutDb2SaasUserOptions,
    ) -> Result<DetailedResponse<SuccessUserResponse>> {
        let params = CallParameters::new()
            .path_param("id", options.id.as_deref())
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .body(options)?
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::PUT_DB2_SAAS_USER, params)
            .await
    }

    /// Retrieves one user by id.
    pub async fn getbyid_db2_saas_user(
        &self,
        options: &GetbyidDb2SaasUserOptions,
    ) -> Result<DetailedResponse<SuccessGetUserById>> {
        let params = CallParameters::new()
            .path_param("id", options.id.as_deref())
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::GETBYID_DB2_SAAS_USER, params)
            .await
    }

    /// Deletes a user. The result is usually `None`.
    pub async fn delete_db2_saas_user(
        &self,
        options: &DeleteDb2SaasUserOptions,
    ) -> Result<DetailedResponse<UserDeleted>> {
        let params = CallParameters::new()
            .path_param("id", options.id.as_deref())
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::DELETE_DB2_SAAS_USER, params)
            .await
    }

    /// Updates the autoscaling configuration of a deployment.
    pub async fn put_db2_saas_autoscale(
        &self,
        options: &PutDb2SaasAutoscaleOptions,
    ) -> Result<DetailedResponse<SuccessUpdateAutoScale>> {
        let params = CallParameters::new()
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .body(options)?
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::PUT_DB2_SAAS_AUTOSCALE, params)
            .await
    }

    /// Retrieves the autoscaling configuration of a deployment.
    pub async fn get_db2_saas_autoscale(
        &self,
        options: &GetDb2SaasAutoscaleOptions,
    ) -> Result<DetailedResponse<SuccessAutoScaling>> {
        let params = CallParameters::new()
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::GET_DB2_SAAS_AUTOSCALE, params)
            .await
    }

    /// Applies custom registry, database and database manager settings.
    pub async fn post_db2_saas_db_configuration(
        &self,
        options: &PostDb2SaasDbConfigurationOptions,
    ) -> Result<DetailedResponse<SuccessPostCustomSettings>> {
        let params = CallParameters::new()
            .header("x-deployment-id", options.x_deployment_id.as_deref())
            .body(options)?
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::POST_DB2_SAAS_DB_CONFIGURATION, params)
            .await
    }

    /// Lists the tunable parameters and their descriptions.
    pub async fn get_db2_saas_tuneable_param(
        &self,
        options: &GetDb2SaasTuneableParamOptions,
    ) -> Result<DetailedResponse<SuccessTuneableParams>> {
        let params = CallParameters::new()
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::GET_DB2_SAAS_TUNEABLE_PARAM, params)
            .await
    }

    /// Lists the backups of a deployment.
    pub async fn get_db2_saas_backup(
        &self,
        options: &GetDb2SaasBackupOptions,
    ) -> Result<DetailedResponse<SuccessGetBackups>> {
        let params = CallParameters::new()
            .header("x-db-profile", options.x_db_profile.as_deref())
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::GET_DB2_SAAS_BACKUP, params)
            .await
    }

    /// Starts an on-demand backup.
    pub async fn post_db2_saas_backup(
        &self,
        options: &PostDb2SaasBackupOptions,
    ) -> Result<DetailedResponse<SuccessCreateBackup>> {
        let params = CallParameters::new()
            .header("x-db-profile", options.x_db_profile.as_deref())
            .extra_headers(&options.headers)
            .deadline(options.deadline);
        self.client
            .execute(&operation::POST_DB2_SAAS_BACKUP, params)
            .await
    }
}
