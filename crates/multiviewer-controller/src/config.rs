//! Configuration types for the controller

use crate::wait::ReconcileConfig;

/// AWS connection settings
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// AWS region
    pub region: String,
    /// AWS profile name (overrides default credential resolution)
    pub aws_profile: Option<String>,
}

/// Everything a controller run needs: where to talk to and how long to wait.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub aws: AwsConfig,
    pub reconcile: ReconcileConfig,
}

impl ControllerConfig {
    pub fn region(&self) -> &str {
        &self.aws.region
    }

    pub fn aws_profile(&self) -> Option<&str> {
        self.aws.aws_profile.as_deref()
    }
}
