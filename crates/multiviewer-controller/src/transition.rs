//! Flow lifecycle transition table
//!
//! Maps an observed `(direction, status)` pair onto what the reconcile loop
//! does next: which command to issue (if any) and whether the loop ends.
//! Pairs missing from the table, including every unknown status, are
//! terminal failures.

use multiviewer_common::FlowStatus;
use multiviewer_common::direction::{Direction, FlowCommand};

use Direction::{EnsureRunning, EnsureStopped};
use FlowStatus::{Active, Deleting, Error, Standby, Starting, Stopping, Updating};

/// Whether the loop continues after an observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Not there yet; wait and poll again
    Continue,
    /// Flow reached the requested state
    Success,
    /// Flow is in a state this direction cannot recover from
    Failure,
}

/// Action taken for one observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub command: Option<FlowCommand>,
    pub verdict: Verdict,
}

const WAIT: Transition = Transition {
    command: None,
    verdict: Verdict::Continue,
};

const DONE: Transition = Transition {
    command: None,
    verdict: Verdict::Success,
};

const FAIL: Transition = Transition {
    command: None,
    verdict: Verdict::Failure,
};

const START: Transition = Transition {
    command: Some(FlowCommand::Start),
    verdict: Verdict::Continue,
};

const STOP: Transition = Transition {
    command: Some(FlowCommand::Stop),
    verdict: Verdict::Continue,
};

static TRANSITIONS: [(Direction, FlowStatus, Transition); 14] = [
    (EnsureRunning, Standby, START),
    (EnsureRunning, Active, DONE),
    (EnsureRunning, Starting, WAIT),
    (EnsureRunning, Stopping, WAIT),
    (EnsureRunning, Updating, WAIT),
    (EnsureRunning, Deleting, FAIL),
    (EnsureRunning, Error, FAIL),
    (EnsureStopped, Active, STOP),
    (EnsureStopped, Standby, DONE),
    (EnsureStopped, Starting, WAIT),
    (EnsureStopped, Stopping, WAIT),
    (EnsureStopped, Updating, WAIT),
    (EnsureStopped, Deleting, FAIL),
    (EnsureStopped, Error, FAIL),
];

/// Look up the transition for an observed status
pub fn transition(direction: Direction, status: &FlowStatus) -> Transition {
    TRANSITIONS
        .iter()
        .find(|(d, s, _)| *d == direction && s == status)
        .map_or(FAIL, |(_, _, t)| *t)
}
