//! Default configuration values shared between the controller and its tests
//!
//! These constants keep the CLI, the provider plan, and the reconcile loop
//! agreeing on the same numbers.

/// Delay between status polls in seconds
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 20;

/// Invocation budget of the hosting function in seconds (5 minutes)
pub const DEFAULT_HANDLER_TIMEOUT_SECS: u64 = 300;

/// Reconcile wall-clock budget in seconds
///
/// Kept below [`DEFAULT_HANDLER_TIMEOUT_SECS`] so the loop reports a `Timeout`
/// reason before the host aborts the invocation.
pub const DEFAULT_RECONCILE_TIMEOUT_SECS: u64 = 270;

/// Maximum number of status polls per reconciliation
pub const DEFAULT_MAX_POLLS: u32 = 15;

/// Prefix of the physical resource id reported back to CloudFormation
pub const PHYSICAL_ID_PREFIX: &str = "START";

/// CloudFormation type of the managed flow-start resource
pub const RESOURCE_TYPE: &str = "Custom::StartMediaConnectFlow";

/// Construct id of the backing function within a deployment unit
pub const HANDLER_FUNCTION_ID: &str = "startMediaConnectFlowCustomResourceFunction";

/// Construct id of the custom resource provider within a deployment unit
pub const PROVIDER_ID: &str = "StartMediaConnectFlowProvider";

/// IAM actions the handler needs on MediaConnect flows
pub const HANDLER_ACTIONS: &[&str] = &[
    "mediaconnect:DescribeFlow",
    "mediaconnect:StartFlow",
    "mediaconnect:StopFlow",
];

/// Default AWS region
pub const DEFAULT_REGION: &str = "us-east-1";
