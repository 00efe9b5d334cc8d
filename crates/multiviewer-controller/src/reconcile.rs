//! Flow lifecycle reconciliation
//!
//! Drives a MediaConnect flow to a requested state: poll, classify the
//! observed status with the transition table, issue at most one command,
//! wait, repeat. Polls and commands for one flow are strictly sequential.
//! Separate flows reconcile independently and may run concurrently.

use crate::aws::{FlowApi, FlowApiError};
use crate::transition::{Verdict, transition};
use crate::wait::{ReconcileConfig, sleep_or_cancelled};
use futures::future::join_all;
use multiviewer_common::direction::{FlowCommand, resource_handle};
use multiviewer_common::{Direction, FlowStatus, ReconciliationOutcome};
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Why a reconciliation failed. The `Display` text becomes the outcome reason.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Status could not be retrieved
    #[error("Failed to describe flow {flow_arn}: {source}")]
    Query {
        flow_arn: String,
        #[source]
        source: FlowApiError,
    },

    /// Start or stop request was rejected
    #[error("{command} failed for flow {flow_arn}: {source}")]
    Command {
        flow_arn: String,
        command: FlowCommand,
        #[source]
        source: FlowApiError,
    },

    /// Flow is in a state the requested direction cannot recover from
    #[error("Cannot {} flow that is in state '{status}'.", .direction.verb())]
    UnexpectedState {
        direction: Direction,
        status: FlowStatus,
    },

    /// Poll cap or wall-clock budget exhausted while the flow was in transition
    #[error(
        "Timed out waiting for flow {flow_arn} to be {direction} after {polls} polls ({}s); last observed state '{last_status}'",
        .elapsed.as_secs()
    )]
    Timeout {
        flow_arn: String,
        direction: Direction,
        polls: u32,
        elapsed: Duration,
        last_status: FlowStatus,
    },

    /// Cancelled before reaching a terminal state
    #[error("Reconciliation of flow {flow_arn} was cancelled")]
    Cancelled { flow_arn: String },
}

impl ReconcileError {
    /// Failed on a throttled or unavailable API call
    pub fn is_retryable(&self) -> bool {
        match self {
            ReconcileError::Query { source, .. } | ReconcileError::Command { source, .. } => {
                source.is_retryable()
            }
            _ => false,
        }
    }
}

/// Reconciles flows through a [`FlowApi`].
pub struct Reconciler<A> {
    api: A,
    config: ReconcileConfig,
    cancel: Option<CancellationToken>,
}

impl<A: FlowApi> Reconciler<A> {
    pub fn new(api: A, config: ReconcileConfig) -> Self {
        Self {
            api,
            config,
            cancel: None,
        }
    }

    /// Abort in-progress waits when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Drive `flow_arn` toward `direction` until a terminal outcome.
    ///
    /// Never returns an error: every failure is folded into a FAILURE
    /// outcome whose reason is the error text.
    pub async fn reconcile(&self, flow_arn: &str, direction: Direction) -> ReconciliationOutcome {
        let handle = resource_handle(direction, flow_arn);
        info!(flow_arn = %flow_arn, direction = %direction, "Reconciling flow");

        match self.drive(flow_arn, direction).await {
            Ok(polls) => {
                info!(flow_arn = %flow_arn, direction = %direction, polls, "Flow reconciled");
                ReconciliationOutcome::success(handle)
            }
            Err(e) => {
                warn!(
                    flow_arn = %flow_arn,
                    direction = %direction,
                    retryable = e.is_retryable(),
                    error = %e,
                    "Flow reconciliation failed"
                );
                ReconciliationOutcome::failure(handle, e.to_string())
            }
        }
    }

    /// Reconcile several flows concurrently, one independent loop per flow.
    ///
    /// Outcomes are returned in the order of `targets`.
    pub async fn reconcile_all(&self, targets: &[(String, Direction)]) -> Vec<ReconciliationOutcome> {
        let futures: Vec<_> = targets
            .iter()
            .map(|(flow_arn, direction)| self.reconcile(flow_arn, *direction))
            .collect();

        join_all(futures).await
    }

    /// The loop proper. Returns the number of polls on success.
    async fn drive(&self, flow_arn: &str, direction: Direction) -> Result<u32, ReconcileError> {
        let started = Instant::now();
        let deadline = started + self.config.timeout;
        let mut polls = 0u32;

        loop {
            if self.is_cancelled() {
                return Err(ReconcileError::Cancelled {
                    flow_arn: flow_arn.to_string(),
                });
            }

            polls += 1;
            let status = self
                .api
                .describe_flow_status(flow_arn)
                .await
                .map_err(|source| ReconcileError::Query {
                    flow_arn: flow_arn.to_string(),
                    source,
                })?;

            let step = transition(direction, &status);
            debug!(
                flow_arn = %flow_arn,
                poll = polls,
                status = %status,
                verdict = ?step.verdict,
                command = ?step.command,
                "Observed flow status"
            );

            match step.verdict {
                Verdict::Success => return Ok(polls),
                Verdict::Failure => {
                    return Err(ReconcileError::UnexpectedState { direction, status });
                }
                Verdict::Continue => {}
            }

            if let Some(command) = step.command {
                self.issue(flow_arn, command).await?;
            }

            // Give up before a wait that could not be followed by another poll
            let out_of_polls = polls >= self.config.max_polls;
            let out_of_time = Instant::now() + self.config.poll_interval > deadline;
            if out_of_polls || out_of_time {
                return Err(ReconcileError::Timeout {
                    flow_arn: flow_arn.to_string(),
                    direction,
                    polls,
                    elapsed: started.elapsed(),
                    last_status: status,
                });
            }

            if !sleep_or_cancelled(self.config.poll_interval, self.cancel.as_ref()).await {
                return Err(ReconcileError::Cancelled {
                    flow_arn: flow_arn.to_string(),
                });
            }
        }
    }

    async fn issue(&self, flow_arn: &str, command: FlowCommand) -> Result<(), ReconcileError> {
        let result = match command {
            FlowCommand::Start => self.api.start_flow(flow_arn).await,
            FlowCommand::Stop => self.api.stop_flow(flow_arn).await,
        };

        result.map_err(|source| ReconcileError::Command {
            flow_arn: flow_arn.to_string(),
            command,
            source,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|t| t.is_cancelled())
    }
}
