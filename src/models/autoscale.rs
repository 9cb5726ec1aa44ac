use serde::{Deserialize, Serialize};

/// Current autoscaling configuration and storage usage of a deployment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuccessAutoScaling {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_allow_plan_limit: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_max_storage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_over_time_period: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_pause_limit: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_scaling_threshold: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_utilization_percentage: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_auto_scaling: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessUpdateAutoScale {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
