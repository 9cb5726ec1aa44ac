use serde::{Deserialize, Serialize};

/// Public and private endpoints of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessConnectionInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<SuccessConnectionInfoPublic>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private: Option<SuccessConnectionInfoPrivate>,
}

/// Connection details of the public endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessConnectionInfoPublic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_ros: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_version: Option<String>,
}

/// Connection details of the private (VPE) endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessConnectionInfoPrivate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_ros: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl_port: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssl: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_version: Option<String>,
    #[serde(rename = "private_serviceName", skip_serializing_if = "Option::is_none")]
    pub private_service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_service_offering: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpe_service_crn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_vpc: Option<String>,
}
