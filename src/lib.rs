//! # db2saas - Client for the Db2 SaaS management API
//!
//! Manage the connection info, IP allowlist, users, autoscaling, tunable
//! parameters and backups of a Db2 SaaS deployment. Every call goes through
//! one request pipeline built on `reqwest`: required parameters are checked
//! before any I/O, failed attempts are retried when retries are enabled, and
//! the raw response is always kept next to the decoded result.
//!
//! ## Quick Start
//!
//! ```no_run
//! use db2saas::auth::BearerTokenAuthenticator;
//! use db2saas::{Db2saas, GetDb2SaasConnectionInfoOptions};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), db2saas::Error> {
//!     let mut service = Db2saas::new(Arc::new(BearerTokenAuthenticator::new("token")?))?;
//!     service
//!         .client_mut()
//!         .enable_retries(3, Duration::from_secs(1));
//!
//!     // Deployment ids are CRNs, passed already percent-encoded.
//!     let crn = "crn%3Av1%3Abluemix%3Apublic%3Adashdb-for-transactions%3Aus-south%3A...";
//!     let options = GetDb2SaasConnectionInfoOptions::new(crn, crn)
//!         .with_deadline(Duration::from_secs(10));
//!
//!     let response = service.get_db2_saas_connection_info(&options).await?;
//!     println!("status {} after {:?}", response.status, response.latency);
//!     if let Some(public) = response.result.and_then(|info| info.public) {
//!         println!("{:?}:{:?}", public.hostname, public.ssl_port);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration from the environment
//!
//! [`Db2saas::from_env`] reads `DB2SAAS_URL`, `DB2SAAS_AUTH_TYPE`
//! (`noauth`, `basic` or `bearertoken`), `DB2SAAS_USERNAME`,
//! `DB2SAAS_PASSWORD`, `DB2SAAS_BEARER_TOKEN`, `DB2SAAS_ENABLE_RETRIES`,
//! `DB2SAAS_MAX_RETRIES`, `DB2SAAS_RETRY_INTERVAL` and `DB2SAAS_TIMEOUT`.
//!
//! ## Error Handling
//!
//! Server and decode errors keep the status, headers and raw body:
//!
//! ```no_run
//! use db2saas::{Db2saas, Error, GetDb2SaasUserOptions};
//!
//! # async fn example(service: Db2saas) {
//! match service.get_db2_saas_user(&GetDb2SaasUserOptions::new("crn%3Av1")).await {
//!     Ok(response) => println!("{:?}", response.result),
//!     Err(Error::Http { status, message, .. }) => eprintln!("{status}: {message}"),
//!     Err(Error::DeserializationFailed { raw_response, .. }) => {
//!         eprintln!("unexpected body: {raw_response}")
//!     }
//!     Err(e) => eprintln!("{e}"),
//! }
//! # }
//! ```
//!
//! ## Logging
//!
//! Requests, responses and retries are logged with `tracing`. Install a
//! subscriber such as `tracing-subscriber` to see them.

pub mod auth;
mod client;
pub mod config;
mod error;
pub mod models;
pub mod operation;
mod options;
mod response;
pub mod retry;
pub mod retry_after;
mod service;

pub use client::{Client, ClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use models::*;
pub use options::*;
pub use response::DetailedResponse;
pub use retry::{RetryPredicate, RetryStrategy};
pub use service::{Db2saas, DEFAULT_SERVICE_NAME, DEFAULT_SERVICE_URL, PARAMETERIZED_SERVICE_URL};

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("db2saas-rust-sdk/", env!("CARGO_PKG_VERSION"));
