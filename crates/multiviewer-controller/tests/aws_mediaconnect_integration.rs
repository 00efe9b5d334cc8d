//! MediaConnect integration tests - actually call AWS APIs
//!
//! These tests are marked `#[ignore]` and only run with a real flow:
//! ```
//! AWS_PROFILE=your_profile MULTIVIEWER_TEST_FLOW_ARN=arn:... \
//!     cargo test --test aws_mediaconnect_integration -- --ignored
//! ```

use multiviewer_common::{Direction, FlowStatus};
use multiviewer_controller::aws::MediaConnectClient;
use multiviewer_controller::reconcile::Reconciler;
use multiviewer_controller::wait::ReconcileConfig;
use multiviewer_test_utils::aws::{LIVE_FLOW_ARN_VAR, get_test_region, live_flow_arn};

/// Describe the configured flow and drive it to its current resting state
#[tokio::test]
#[ignore]
async fn test_live_flow_status_and_reconcile() {
    let Some(arn) = live_flow_arn() else {
        eprintln!("{LIVE_FLOW_ARN_VAR} not set, skipping");
        return;
    };

    let client = MediaConnectClient::new(&get_test_region()).await;

    let status = client
        .describe_flow_status(&arn)
        .await
        .expect("AWS credentials and a readable flow required");
    println!("Flow {arn} is {status}");

    let direction = if status == FlowStatus::Active {
        Direction::EnsureRunning
    } else {
        Direction::EnsureStopped
    };
    let reconciler = Reconciler::new(client, ReconcileConfig::default());
    let outcome = reconciler.reconcile(&arn, direction).await;

    assert_eq!(outcome.resource_handle, format!("START{arn}"));
}
