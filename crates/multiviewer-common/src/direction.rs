//! Target state of a reconciliation
//!
//! A [`Direction`] is derived once per invocation from the lifecycle event
//! kind and never changes while the reconcile loop runs.

use crate::defaults::PHYSICAL_ID_PREFIX;
use crate::lifecycle::RequestType;

/// Requested target state for a flow
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    /// Bring the flow up (create or update)
    #[strum(to_string = "running", serialize = "start")]
    EnsureRunning,
    /// Tear the flow down (delete)
    #[strum(to_string = "stopped", serialize = "stop")]
    EnsureStopped,
}

/// Corrective command that may be issued against a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum FlowCommand {
    #[strum(to_string = "StartFlow")]
    Start,
    #[strum(to_string = "StopFlow")]
    Stop,
}

impl Direction {
    /// Map a CloudFormation request type onto a direction
    pub fn from_request_type(request_type: RequestType) -> Self {
        match request_type {
            RequestType::Create | RequestType::Update => Self::EnsureRunning,
            RequestType::Delete => Self::EnsureStopped,
        }
    }

    /// Verb used in failure reasons ("Cannot start flow ...")
    pub fn verb(self) -> &'static str {
        match self {
            Self::EnsureRunning => "start",
            Self::EnsureStopped => "stop",
        }
    }
}

/// Physical resource handle for a reconciliation.
///
/// Pure in `(direction, flow_arn)` and independent of the outcome, so
/// CloudFormation recognizes retried invocations as the same resource. Both
/// directions share the prefix: the id reported by a delete must equal the id
/// reported when the resource was created.
pub fn resource_handle(direction: Direction, flow_arn: &str) -> String {
    let prefix = match direction {
        Direction::EnsureRunning | Direction::EnsureStopped => PHYSICAL_ID_PREFIX,
    };
    format!("{prefix}{flow_arn}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARN: &str = "arn:aws:mediaconnect:us-east-1:123456789012:flow:1-abc:galaxy";

    #[test]
    fn test_direction_from_request_type() {
        assert_eq!(
            Direction::from_request_type(RequestType::Create),
            Direction::EnsureRunning
        );
        assert_eq!(
            Direction::from_request_type(RequestType::Update),
            Direction::EnsureRunning
        );
        assert_eq!(
            Direction::from_request_type(RequestType::Delete),
            Direction::EnsureStopped
        );
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("running".parse::<Direction>().unwrap(), Direction::EnsureRunning);
        assert_eq!("START".parse::<Direction>().unwrap(), Direction::EnsureRunning);
        assert_eq!("stopped".parse::<Direction>().unwrap(), Direction::EnsureStopped);
        assert_eq!("stop".parse::<Direction>().unwrap(), Direction::EnsureStopped);
        assert!("paused".parse::<Direction>().is_err());
    }

    #[test]
    fn test_flow_command_names() {
        assert_eq!(FlowCommand::Start.to_string(), "StartFlow");
        assert_eq!(FlowCommand::Stop.to_string(), "StopFlow");
    }

    #[test]
    fn test_resource_handle_is_deterministic() {
        let first = resource_handle(Direction::EnsureRunning, ARN);
        let second = resource_handle(Direction::EnsureRunning, ARN);
        assert_eq!(first, second);
        assert_eq!(first, format!("START{ARN}"));
    }

    #[test]
    fn test_resource_handle_stable_across_lifecycle() {
        assert_eq!(
            resource_handle(Direction::EnsureRunning, ARN),
            resource_handle(Direction::EnsureStopped, ARN)
        );
    }
}
