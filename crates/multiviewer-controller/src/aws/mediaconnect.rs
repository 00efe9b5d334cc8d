//! MediaConnect flow client

use crate::aws::context::AwsContext;
use crate::aws::error::{FlowApiError, classify_sdk_error};
use aws_sdk_mediaconnect::Client;
use multiviewer_common::FlowStatus;
use tracing::{debug, info};

/// MediaConnect client for querying and driving flows
pub struct MediaConnectClient {
    client: Client,
}

impl MediaConnectClient {
    /// Create a new MediaConnect client (loads AWS config from environment)
    pub async fn new(region: &str) -> Self {
        let ctx = AwsContext::new(region).await;
        Self::from_context(&ctx)
    }

    /// Create a MediaConnect client from a pre-loaded AWS context
    pub fn from_context(ctx: &AwsContext) -> Self {
        Self {
            client: ctx.mediaconnect_client(),
        }
    }

    /// Describe a flow and return its normalized status.
    ///
    /// Single request, no retries.
    pub async fn describe_flow_status(&self, flow_arn: &str) -> Result<FlowStatus, FlowApiError> {
        let response = self
            .client
            .describe_flow()
            .flow_arn(flow_arn)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        let flow = response.flow().ok_or_else(|| FlowApiError::MissingFlow {
            flow_arn: flow_arn.to_string(),
        })?;

        let status = normalize_status(flow_arn, flow.status().map(|s| s.as_str()))?;
        debug!(flow_arn = %flow_arn, status = %status, "Described flow");
        Ok(status)
    }

    /// Request that a flow start. Returns once the request is accepted.
    pub async fn start_flow(&self, flow_arn: &str) -> Result<(), FlowApiError> {
        info!(flow_arn = %flow_arn, "Starting flow");

        self.client
            .start_flow()
            .flow_arn(flow_arn)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }

    /// Request that a flow stop. Returns once the request is accepted.
    pub async fn stop_flow(&self, flow_arn: &str) -> Result<(), FlowApiError> {
        info!(flow_arn = %flow_arn, "Stopping flow");

        self.client
            .stop_flow()
            .flow_arn(flow_arn)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e))?;

        Ok(())
    }
}

/// Normalize the status carried by a DescribeFlow reply.
///
/// A reply without a status is a query failure, not an unknown state.
fn normalize_status(flow_arn: &str, raw: Option<&str>) -> Result<FlowStatus, FlowApiError> {
    raw.map(FlowStatus::from_raw)
        .ok_or_else(|| FlowApiError::MissingStatus {
            flow_arn: flow_arn.to_string(),
        })
}
