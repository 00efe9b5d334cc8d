//! Flow-start custom resource handler
//!
//! Maps a lifecycle event to a reconcile direction (create/update start the
//! flow, delete stops it), runs the reconcile loop and answers with a
//! lifecycle response echoing the request's identifiers.

use crate::aws::FlowApi;
use crate::reconcile::Reconciler;
use anyhow::{Context, Result};
use multiviewer_common::{Direction, LifecycleEvent, LifecycleResponse};
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// Handles lifecycle events for flow-start resources.
pub struct FlowStartHandler<A> {
    reconciler: Reconciler<A>,
}

impl<A: FlowApi> FlowStartHandler<A> {
    pub fn new(reconciler: Reconciler<A>) -> Self {
        Self { reconciler }
    }

    pub fn reconciler(&self) -> &Reconciler<A> {
        &self.reconciler
    }

    pub async fn handle(&self, event: &LifecycleEvent) -> LifecycleResponse {
        info!(
            request_type = %event.request_type,
            logical_id = %event.logical_resource_id,
            flow_arn = %event.resource_properties.flow_arn,
            "Received lifecycle event"
        );

        let direction = Direction::from_request_type(event.request_type);

        let flow_arn = match event.flow_arn() {
            Ok(arn) => arn,
            Err(e) => {
                warn!(logical_id = %event.logical_resource_id, error = %e, "Rejecting lifecycle event");
                let physical_id = event
                    .physical_resource_id
                    .clone()
                    .unwrap_or_else(|| event.logical_resource_id.clone());
                return LifecycleResponse::rejected(event, physical_id, e.to_string());
            }
        };

        let outcome = self.reconciler.reconcile(flow_arn, direction).await;
        LifecycleResponse::from_outcome(event, outcome)
    }
}

/// Read and parse a lifecycle event from `path`, or from stdin when `path` is `-`.
pub fn read_event(path: &Path) -> Result<LifecycleEvent> {
    let json = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read lifecycle event from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lifecycle event from {}", path.display()))?
    };

    LifecycleEvent::from_json(&json)
        .with_context(|| format!("Invalid lifecycle event in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aws::{FlowApiError, MockFlowApi};
    use crate::wait::ReconcileConfig;
    use multiviewer_common::FlowStatus;
    use multiviewer_common::lifecycle::{FlowStartProperties, RequestType, ResponseStatus};
    use std::io::Write;
    use std::time::Duration;

    const ARN: &str = "arn:aws:mediaconnect:us-east-1:123456789012:flow:1-abc:galaxy";

    fn event(request_type: RequestType, flow_arn: &str) -> LifecycleEvent {
        LifecycleEvent {
            request_type,
            service_token: None,
            response_url: None,
            stack_id: "arn:aws:cloudformation:us-east-1:123456789012:stack/multiviewer/1".to_string(),
            request_id: "req-1".to_string(),
            logical_resource_id: "galaxySourceFlowStart".to_string(),
            resource_type: "Custom::StartMediaConnectFlow".to_string(),
            physical_resource_id: None,
            resource_properties: FlowStartProperties::new(flow_arn),
            old_resource_properties: None,
        }
    }

    fn handler(api: MockFlowApi) -> FlowStartHandler<MockFlowApi> {
        let config = ReconcileConfig {
            poll_interval: Duration::from_secs(20),
            timeout: Duration::from_secs(270),
            max_polls: 15,
        };
        FlowStartHandler::new(Reconciler::new(api, config))
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_starts_standby_flow() {
        let mut api = MockFlowApi::new();
        let mut statuses = vec![FlowStatus::Active, FlowStatus::Standby];
        api.expect_describe_flow_status()
            .times(2)
            .returning(move |_| Ok(statuses.pop().unwrap()));
        api.expect_start_flow().times(1).returning(|_| Ok(()));
        api.expect_stop_flow().never();

        let response = handler(api).handle(&event(RequestType::Create, ARN)).await;

        assert_eq!(response.status, ResponseStatus::Success);
        assert_eq!(response.physical_resource_id, format!("START{ARN}"));
        assert_eq!(response.request_id, "req-1");
        assert!(response.reason.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_update_is_treated_as_start() {
        let mut api = MockFlowApi::new();
        api.expect_describe_flow_status()
            .times(1)
            .returning(|_| Ok(FlowStatus::Active));

        let response = handler(api).handle(&event(RequestType::Update, ARN)).await;
        assert!(response.is_success());
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_stops_flow_with_same_physical_id() {
        let mut api = MockFlowApi::new();
        let mut statuses = vec![FlowStatus::Standby, FlowStatus::Active];
        api.expect_describe_flow_status()
            .times(2)
            .returning(move |_| Ok(statuses.pop().unwrap()));
        api.expect_stop_flow().times(1).returning(|_| Ok(()));
        api.expect_start_flow().never();

        let response = handler(api).handle(&event(RequestType::Delete, ARN)).await;

        assert!(response.is_success());
        assert_eq!(response.physical_resource_id, format!("START{ARN}"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_reason_names_state() {
        let mut api = MockFlowApi::new();
        api.expect_describe_flow_status()
            .times(1)
            .returning(|_| Ok(FlowStatus::Deleting));

        let response = handler(api).handle(&event(RequestType::Create, ARN)).await;

        assert_eq!(response.status, ResponseStatus::Failed);
        assert_eq!(
            response.reason.as_deref(),
            Some("Cannot start flow that is in state 'DELETING'.")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_query_error_reported_as_failed() {
        let mut api = MockFlowApi::new();
        api.expect_describe_flow_status().times(1).returning(|_| {
            Err(FlowApiError::NotFound {
                message: "flow not found".to_string(),
            })
        });

        let response = handler(api).handle(&event(RequestType::Delete, ARN)).await;

        assert!(!response.is_success());
        assert!(response.reason.unwrap().contains("flow not found"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_padded_flow_arn_kept_in_physical_id() {
        let padded = format!(" {ARN} ");
        let expected = padded.clone();

        let mut api = MockFlowApi::new();
        api.expect_describe_flow_status()
            .withf(move |arn| arn == expected)
            .times(1)
            .returning(|_| Ok(FlowStatus::Active));

        let response = handler(api).handle(&event(RequestType::Create, &padded)).await;

        assert!(response.is_success());
        assert_eq!(response.physical_resource_id, format!("START{padded}"));
    }

    #[tokio::test]
    async fn test_empty_flow_arn_rejected_without_calls() {
        let mut api = MockFlowApi::new();
        api.expect_describe_flow_status().never();

        let mut ev = event(RequestType::Delete, "");
        ev.physical_resource_id = Some(format!("START{ARN}"));
        let response = handler(api).handle(&ev).await;

        assert_eq!(response.status, ResponseStatus::Failed);
        assert_eq!(response.physical_resource_id, format!("START{ARN}"));
        assert!(response.reason.unwrap().contains("empty flowArn"));
    }

    #[test]
    fn test_read_event_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::to_string(&event(RequestType::Create, ARN)).unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let parsed = read_event(file.path()).unwrap();
        assert_eq!(parsed.request_type, RequestType::Create);
        assert_eq!(parsed.flow_arn().unwrap(), ARN);
    }

    #[test]
    fn test_read_event_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_event(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read lifecycle event"));
    }

    #[test]
    fn test_read_event_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{\"RequestType\": \"Create\"}").unwrap();

        let err = read_event(file.path()).unwrap_err();
        assert!(err.to_string().contains("Invalid lifecycle event"));
    }
}
