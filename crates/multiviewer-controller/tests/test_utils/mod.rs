//! Shared test utilities for integration tests
//!
//! An in-memory [`FlowApi`] that replays a per-flow status script and records
//! every call. Generic helpers (ARNs, sample events) are in
//! multiviewer-test-utils.

#![allow(dead_code)]

use multiviewer_common::FlowStatus;
use multiviewer_controller::aws::{FlowApi, FlowApiError};
use multiviewer_controller::wait::ReconcileConfig;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// One recorded call against the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Describe(String),
    Start(String),
    Stop(String),
}

/// Scripted flow API.
///
/// Each flow replays its statuses in order; the last entry repeats once the
/// script runs out. Describing a flow without a script yields `NotFound`.
#[derive(Default)]
pub struct ScriptedFlowApi {
    scripts: Mutex<HashMap<String, VecDeque<Result<FlowStatus, FlowApiError>>>>,
    command_error: Mutex<Option<FlowApiError>>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedFlowApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script `flow_arn` to report `statuses` in order
    pub fn with_flow(self, flow_arn: &str, statuses: &[FlowStatus]) -> Self {
        self.with_results(flow_arn, statuses.iter().cloned().map(Ok).collect())
    }

    pub fn with_results(
        self,
        flow_arn: &str,
        results: Vec<Result<FlowStatus, FlowApiError>>,
    ) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(flow_arn.to_string(), results.into());
        self
    }

    /// Make every start/stop command fail with `error`
    pub fn failing_commands(self, error: FlowApiError) -> Self {
        *self.command_error.lock().unwrap() = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn polls(&self, flow_arn: &str) -> usize {
        self.count(|c| matches!(c, Call::Describe(arn) if arn == flow_arn))
    }

    pub fn starts(&self, flow_arn: &str) -> usize {
        self.count(|c| matches!(c, Call::Start(arn) if arn == flow_arn))
    }

    pub fn stops(&self, flow_arn: &str) -> usize {
        self.count(|c| matches!(c, Call::Stop(arn) if arn == flow_arn))
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn command_result(&self) -> Result<(), FlowApiError> {
        match self.command_error.lock().unwrap().clone() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl FlowApi for ScriptedFlowApi {
    async fn describe_flow_status(&self, flow_arn: &str) -> Result<FlowStatus, FlowApiError> {
        self.record(Call::Describe(flow_arn.to_string()));

        let mut scripts = self.scripts.lock().unwrap();
        let Some(script) = scripts.get_mut(flow_arn) else {
            return Err(FlowApiError::NotFound {
                message: format!("no flow {flow_arn}"),
            });
        };
        if script.len() > 1 {
            script.pop_front().unwrap()
        } else {
            script.front().cloned().unwrap()
        }
    }

    async fn start_flow(&self, flow_arn: &str) -> Result<(), FlowApiError> {
        self.record(Call::Start(flow_arn.to_string()));
        self.command_result()
    }

    async fn stop_flow(&self, flow_arn: &str) -> Result<(), FlowApiError> {
        self.record(Call::Stop(flow_arn.to_string()));
        self.command_result()
    }
}

/// Default pacing: 20 s interval, 270 s budget, 15 polls
pub fn default_config() -> ReconcileConfig {
    ReconcileConfig::default()
}

pub fn config(poll_interval_secs: u64, timeout_secs: u64, max_polls: u32) -> ReconcileConfig {
    ReconcileConfig {
        poll_interval: Duration::from_secs(poll_interval_secs),
        timeout: Duration::from_secs(timeout_secs),
        max_polls,
    }
}
