//! CloudFormation custom resource wire types
//!
//! A lifecycle event is the request CloudFormation sends to the flow-start
//! handler; a lifecycle response is what the handler returns to the provider
//! framework. Field names follow the CloudFormation custom resource protocol
//! (PascalCase), except for the resource properties, which keep the names
//! they are declared with in the stack.

use crate::outcome::{ReconcileResult, ReconciliationOutcome};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lifecycle event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum RequestType {
    Create,
    Update,
    Delete,
}

/// Properties declared on a flow-start resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowStartProperties {
    /// ARN of the MediaConnect flow to drive
    #[serde(rename = "flowArn")]
    pub flow_arn: String,

    /// Provider service token, injected by CloudFormation
    #[serde(
        rename = "ServiceToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub service_token: Option<String>,
}

impl FlowStartProperties {
    pub fn new(flow_arn: impl Into<String>) -> Self {
        Self {
            flow_arn: flow_arn.into(),
            service_token: None,
        }
    }
}

/// Errors for malformed lifecycle events
#[derive(Debug, Error)]
pub enum EventError {
    /// Event JSON could not be parsed
    #[error("Failed to parse lifecycle event: {0}")]
    Parse(#[from] serde_json::Error),

    /// `flowArn` property is empty
    #[error("Lifecycle event for '{logical_resource_id}' has an empty flowArn property")]
    EmptyFlowArn { logical_resource_id: String },
}

/// Custom resource request sent by CloudFormation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleEvent {
    pub request_type: RequestType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_token: Option<String>,

    /// Pre-signed URL for the response (unused by the provider framework path)
    #[serde(
        rename = "ResponseURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub response_url: Option<String>,

    pub stack_id: String,

    pub request_id: String,

    pub logical_resource_id: String,

    pub resource_type: String,

    /// Present on update and delete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub physical_resource_id: Option<String>,

    pub resource_properties: FlowStartProperties,

    /// Present on update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_resource_properties: Option<FlowStartProperties>,
}

impl LifecycleEvent {
    /// Parse an event from its JSON representation
    pub fn from_json(json: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The flow ARN this event targets, exactly as declared.
    ///
    /// A blank value is rejected; anything else is passed through untouched
    /// so the physical id matches the declared property.
    pub fn flow_arn(&self) -> Result<&str, EventError> {
        let arn = self.resource_properties.flow_arn.as_str();
        if arn.trim().is_empty() {
            return Err(EventError::EmptyFlowArn {
                logical_resource_id: self.logical_resource_id.clone(),
            });
        }
        Ok(arn)
    }
}

/// Response status reported to CloudFormation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum ResponseStatus {
    #[serde(rename = "SUCCESS")]
    #[strum(to_string = "SUCCESS")]
    Success,
    #[serde(rename = "FAILED")]
    #[strum(to_string = "FAILED")]
    Failed,
}

/// Custom resource response returned to the provider framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LifecycleResponse {
    pub status: ResponseStatus,

    pub physical_resource_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    pub stack_id: String,

    pub request_id: String,

    pub logical_resource_id: String,
}

impl LifecycleResponse {
    /// Build the response for `event` from a terminal outcome.
    ///
    /// Echoes the request's identifying fields so the provider framework can
    /// correlate the reply.
    pub fn from_outcome(event: &LifecycleEvent, outcome: ReconciliationOutcome) -> Self {
        let status = match outcome.result {
            ReconcileResult::Success => ResponseStatus::Success,
            ReconcileResult::Failure => ResponseStatus::Failed,
        };

        Self {
            status,
            physical_resource_id: outcome.resource_handle,
            reason: outcome.reason,
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
        }
    }

    /// Build a FAILED response for an event that could not be reconciled at all
    pub fn rejected(event: &LifecycleEvent, physical_resource_id: String, reason: String) -> Self {
        Self {
            status: ResponseStatus::Failed,
            physical_resource_id,
            reason: Some(reason),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}
