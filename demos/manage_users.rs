//! Example listing the users and allowlist of a deployment.
//!
//! Configure the service through the environment:
//!
//! ```text
//! DB2SAAS_AUTH_TYPE=bearertoken
//! DB2SAAS_BEARER_TOKEN=<token>
//! DB2SAAS_ENABLE_RETRIES=true
//! DB2SAAS_DEPLOYMENT_CRN=crn%3Av1%3A...
//! ```
//!
//! Run with: `cargo run --example manage_users`

use db2saas::{Db2saas, Error, GetDb2SaasAllowlistOptions, GetDb2SaasUserOptions};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("db2saas=info")
        .init();

    let service = Db2saas::from_env()?;
    let crn = std::env::var("DB2SAAS_DEPLOYMENT_CRN")?;

    let options = GetDb2SaasUserOptions::new(&crn).with_deadline(Duration::from_secs(30));
    match service.get_db2_saas_user(&options).await {
        Ok(response) => {
            let users = response.result.and_then(|r| r.resources).unwrap_or_default();
            println!("{} users ({} attempts)", users.len(), response.attempts);
            for user in users {
                println!(
                    "  {} role={} locked={}",
                    user.id.unwrap_or_default(),
                    user.role.unwrap_or_default(),
                    user.locked.unwrap_or_default()
                );
            }
        }
        Err(Error::Http {
            status, message, ..
        }) => println!("HTTP error {status}: {message}"),
        Err(e) => return Err(e.into()),
    }

    let allowlist = service
        .get_db2_saas_allowlist(&GetDb2SaasAllowlistOptions::new(&crn))
        .await?;
    for ip in allowlist
        .result
        .and_then(|r| r.ip_addresses)
        .unwrap_or_default()
    {
        println!("allowed: {} ({})", ip.address, ip.description);
    }

    Ok(())
}
