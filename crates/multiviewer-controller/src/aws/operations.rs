//! Flow operations trait for testing

use super::MediaConnectClient;
use super::error::FlowApiError;
use multiviewer_common::FlowStatus;

/// Trait for the MediaConnect operations the reconcile loop depends on.
///
/// This trait abstracts the flow client so the reconcile loop can be unit
/// tested without hitting real AWS.
#[allow(async_fn_in_trait)] // Internal use only, Send+Sync bounds on trait are sufficient
#[cfg_attr(test, mockall::automock)]
pub trait FlowApi: Send + Sync {
    /// Describe the current status of a flow
    async fn describe_flow_status(&self, flow_arn: &str) -> Result<FlowStatus, FlowApiError>;

    /// Request that a flow start
    async fn start_flow(&self, flow_arn: &str) -> Result<(), FlowApiError>;

    /// Request that a flow stop
    async fn stop_flow(&self, flow_arn: &str) -> Result<(), FlowApiError>;
}

impl FlowApi for MediaConnectClient {
    async fn describe_flow_status(&self, flow_arn: &str) -> Result<FlowStatus, FlowApiError> {
        MediaConnectClient::describe_flow_status(self, flow_arn).await
    }

    async fn start_flow(&self, flow_arn: &str) -> Result<(), FlowApiError> {
        MediaConnectClient::start_flow(self, flow_arn).await
    }

    async fn stop_flow(&self, flow_arn: &str) -> Result<(), FlowApiError> {
        MediaConnectClient::stop_flow(self, flow_arn).await
    }
}
