//! Request and response bodies of the Db2 SaaS API.
//!
//! All types are plain serde data. Optional fields are omitted from the JSON
//! when unset.

mod allowlist;
mod autoscale;
mod backups;
mod connection;
mod settings;
mod users;

pub use allowlist::{IpAddress, SuccessGetAllowlistIPs, SuccessPostAllowedlistIPs};
pub use autoscale::{SuccessAutoScaling, SuccessUpdateAutoScale};
pub use backups::{Backup, SuccessCreateBackup, SuccessCreateBackupTask, SuccessGetBackups};
pub use connection::{
    SuccessConnectionInfo, SuccessConnectionInfoPrivate, SuccessConnectionInfoPublic,
};
pub use settings::{
    CreateCustomSettingsDb, CreateCustomSettingsDbm, CreateCustomSettingsRegistry,
    SuccessPostCustomSettings, SuccessTuneableParams, SuccessTuneableParamsTuneableParam,
};
pub use users::{
    CreateUserAuthentication, SuccessGetUserById, SuccessGetUserInfo, SuccessUserResponse,
    SuccessUserResponseAuthentication, UserDeleted,
};
