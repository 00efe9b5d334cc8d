//! Normalized MediaConnect flow status
//!
//! MediaConnect reports a flow's state as an upper-case string. Known values
//! map onto [`FlowStatus`] variants; anything else is kept verbatim in
//! [`FlowStatus::Unknown`] so it can be reported back to the operator.

use std::fmt;

/// Flow status as observed from MediaConnect
#[derive(Debug, Clone, PartialEq, Eq, Hash, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowStatus {
    /// Flow exists but is not running
    Standby,
    /// Flow is running
    Active,
    /// Start in progress
    Starting,
    /// Stop in progress
    Stopping,
    /// Configuration change in progress
    Updating,
    /// Flow is being deleted
    Deleting,
    /// Flow is in an error state
    Error,
    /// Status value this controller does not know about
    #[strum(default)]
    Unknown(String),
}

impl FlowStatus {
    /// Parse a raw status string. Never fails: unrecognized values become
    /// [`FlowStatus::Unknown`].
    pub fn from_raw(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|_| Self::Unknown(raw.to_string()))
    }
}

impl fmt::Display for FlowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(raw) => f.write_str(raw),
            known => f.write_str(known.as_ref()),
        }
    }
}
