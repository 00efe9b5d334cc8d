//! Terminal result of a reconciliation

use serde::Serialize;

/// Binary result of a reconciliation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ReconcileResult {
    Success,
    Failure,
}

/// Outcome of one reconciliation, created once when the loop terminates
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationOutcome {
    pub result: ReconcileResult,
    /// Stable identity of the reconciled resource (the physical resource id)
    pub resource_handle: String,
    /// Human-readable failure reason
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ReconciliationOutcome {
    pub fn success(resource_handle: String) -> Self {
        Self {
            result: ReconcileResult::Success,
            resource_handle,
            reason: None,
        }
    }

    pub fn failure(resource_handle: String, reason: String) -> Self {
        Self {
            result: ReconcileResult::Failure,
            resource_handle,
            reason: Some(reason),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result == ReconcileResult::Success
    }
}
