//! AWS test utilities
//!
//! Provides region detection and unique identifiers for tests that talk to
//! MediaConnect or build lifecycle events.

use chrono::Utc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Account id used in fabricated ARNs
pub const TEST_ACCOUNT_ID: &str = "123456789012";

/// Env var naming a real flow for live tests
pub const LIVE_FLOW_ARN_VAR: &str = "MULTIVIEWER_TEST_FLOW_ARN";

/// Get the AWS region for tests.
///
/// Checks environment variables in order:
/// 1. AWS_REGION
/// 2. AWS_DEFAULT_REGION
/// 3. Falls back to us-east-1
///
/// # Example
///
/// ```
/// use multiviewer_test_utils::aws::get_test_region;
///
/// let region = get_test_region();
/// assert!(!region.is_empty());
/// ```
pub fn get_test_region() -> String {
    std::env::var("AWS_REGION")
        .or_else(|_| std::env::var("AWS_DEFAULT_REGION"))
        .unwrap_or_else(|_| "us-east-1".to_string())
}

/// Generate a unique run ID for test resources.
///
/// Format: `test-{timestamp_ms}-{counter}`.
pub fn test_run_id() -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);

    let ts = Utc::now().timestamp_millis();
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("test-{ts}-{counter}")
}

/// Fabricate a unique flow ARN named `name`.
///
/// # Example
///
/// ```
/// use multiviewer_test_utils::aws::test_flow_arn;
///
/// let arn = test_flow_arn("galaxy");
/// assert!(arn.starts_with("arn:aws:mediaconnect:"));
/// assert!(arn.ends_with(":galaxy"));
/// ```
pub fn test_flow_arn(name: &str) -> String {
    format!(
        "arn:aws:mediaconnect:{}:{}:flow:1-{}:{}",
        get_test_region(),
        TEST_ACCOUNT_ID,
        test_run_id(),
        name
    )
}

/// Fabricate a unique CloudFormation stack id.
pub fn test_stack_id() -> String {
    format!(
        "arn:aws:cloudformation:{}:{}:stack/multiviewer-{}/1",
        get_test_region(),
        TEST_ACCOUNT_ID,
        test_run_id()
    )
}

/// Flow ARN for live tests, if one is configured.
pub fn live_flow_arn() -> Option<String> {
    std::env::var(LIVE_FLOW_ARN_VAR)
        .ok()
        .filter(|arn| !arn.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_format() {
        let run_id = test_run_id();
        let parts: Vec<&str> = run_id.strip_prefix("test-").unwrap().split('-').collect();
        assert_eq!(parts.len(), 2);
        let ts = parts[0].parse::<i64>().expect("Should be valid timestamp");
        assert!((Utc::now().timestamp_millis() - ts).abs() < 60_000);
        parts[1].parse::<u32>().expect("Should be valid counter");
    }

    #[test]
    fn test_flow_arns_unique() {
        assert_ne!(test_flow_arn("galaxy"), test_flow_arn("galaxy"));
    }

    #[test]
    fn test_stack_id_shape() {
        let stack = test_stack_id();
        assert!(stack.starts_with("arn:aws:cloudformation:"));
        assert!(stack.contains(":stack/multiviewer-test-"));
    }
}
