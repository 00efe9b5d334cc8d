//! Sample flow-start lifecycle events

use crate::aws::{TEST_ACCOUNT_ID, get_test_region, test_stack_id};
use multiviewer_common::defaults::{PHYSICAL_ID_PREFIX, PROVIDER_ID, RESOURCE_TYPE};
use multiviewer_common::lifecycle::FlowStartProperties;
use multiviewer_common::{LifecycleEvent, RequestType};

/// Logical id used by sample events
pub const TEST_LOGICAL_ID: &str = "galaxySourceFlowStart";

fn service_token() -> String {
    format!(
        "arn:aws:lambda:{}:{}:function:multiviewer-{}",
        get_test_region(),
        TEST_ACCOUNT_ID,
        PROVIDER_ID
    )
}

/// Event of `request_type` targeting `flow_arn`.
///
/// Update and delete events carry the physical id a prior create would have
/// reported; update events also carry the old properties.
pub fn lifecycle_event(request_type: RequestType, flow_arn: &str) -> LifecycleEvent {
    let token = service_token();
    let properties = FlowStartProperties {
        flow_arn: flow_arn.to_string(),
        service_token: Some(token.clone()),
    };

    let physical_resource_id = match request_type {
        RequestType::Create => None,
        RequestType::Update | RequestType::Delete => {
            Some(format!("{PHYSICAL_ID_PREFIX}{flow_arn}"))
        }
    };
    let old_resource_properties = match request_type {
        RequestType::Update => Some(properties.clone()),
        RequestType::Create | RequestType::Delete => None,
    };

    LifecycleEvent {
        request_type,
        service_token: Some(token),
        response_url: None,
        stack_id: test_stack_id(),
        request_id: format!("req-{}", crate::aws::test_run_id()),
        logical_resource_id: TEST_LOGICAL_ID.to_string(),
        resource_type: RESOURCE_TYPE.to_string(),
        physical_resource_id,
        resource_properties: properties,
        old_resource_properties,
    }
}

pub fn create_event(flow_arn: &str) -> LifecycleEvent {
    lifecycle_event(RequestType::Create, flow_arn)
}

pub fn update_event(flow_arn: &str) -> LifecycleEvent {
    lifecycle_event(RequestType::Update, flow_arn)
}

pub fn delete_event(flow_arn: &str) -> LifecycleEvent {
    lifecycle_event(RequestType::Delete, flow_arn)
}

/// Sample event rendered as CloudFormation would send it
pub fn lifecycle_event_json(request_type: RequestType, flow_arn: &str) -> String {
    serde_json::to_string_pretty(&lifecycle_event(request_type, flow_arn))
        .unwrap_or_else(|e| panic!("sample event must serialize: {e}"))
}
