//! Poll pacing and budget for the reconcile loop.
//!
//! The loop waits a fixed interval between polls and stops at whichever
//! comes first, the poll cap or the wall-clock budget.

use multiviewer_common::defaults::{
    DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_RECONCILE_TIMEOUT_SECS,
};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Configuration for one reconciliation's polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Delay between status polls
    pub poll_interval: Duration,
    /// Maximum total time to reconcile before giving up
    pub timeout: Duration,
    /// Maximum number of status polls
    pub max_polls: u32,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            timeout: Duration::from_secs(DEFAULT_RECONCILE_TIMEOUT_SECS),
            max_polls: DEFAULT_MAX_POLLS,
        }
    }
}

/// Sleep for `delay`, returning early if `cancel` fires.
///
/// Returns `true` if the full delay elapsed, `false` if cancelled.
pub async fn sleep_or_cancelled(delay: Duration, cancel: Option<&CancellationToken>) -> bool {
    tokio::select! {
        _ = tokio::time::sleep(delay) => true,
        _ = async {
            if let Some(token) = cancel {
                token.cancelled().await
            } else {
                std::future::pending::<()>().await
            }
        } => false,
    }
}
