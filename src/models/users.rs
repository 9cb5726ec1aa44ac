use serde::{Deserialize, Serialize};

/// How a new or updated user authenticates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserAuthentication {
    /// Authentication method, e.g. `"internal"`.
    pub method: String,
    pub policy_id: String,
}

impl CreateUserAuthentication {
    pub fn new(method: impl Into<String>, policy_id: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            policy_id: policy_id.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessUserResponseAuthentication {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy_id: Option<String>,
}

/// A database user as returned by the users endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessUserResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dv_role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formated_ibmid: Option<String>,
    /// `"bluadmin"` or `"bluuser"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iamid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted_actions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_clean: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iam: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ibmid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// `"yes"` or `"no"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_error_msg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authentication: Option<SuccessUserResponseAuthentication>,
}

/// A single user looked up by id. Same shape as [`SuccessUserResponse`].
pub type SuccessGetUserById = SuccessUserResponse;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessGetUserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<SuccessUserResponse>>,
}

/// Body of a delete-user response, usually empty.
pub type UserDeleted = serde_json::Map<String, serde_json::Value>;
