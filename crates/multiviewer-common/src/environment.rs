//! Deployment environment
//!
//! The account and region a deployment unit targets, read from the
//! `ACCOUNT_ID` and `REGION` environment variables and validated with
//! `garde` before any plan is produced.

use garde::Validate;
use serde::{Deserialize, Serialize};

/// Target account and region of a deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DeploymentEnvironment {
    /// AWS account id (numeric string)
    #[garde(length(min = 1), custom(is_number_string))]
    pub account_id: String,

    /// AWS region
    #[garde(length(min = 1))]
    pub region: String,
}

fn is_number_string(value: &str, _ctx: &()) -> garde::Result {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(garde::Error::new("must contain only digits"))
    }
}

impl DeploymentEnvironment {
    /// Build and validate an environment
    pub fn new(
        account_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, garde::Report> {
        let env = Self {
            account_id: account_id.into(),
            region: region.into(),
        };
        env.validate()?;
        Ok(env)
    }
}
