//! multiviewer-common - Shared flow lifecycle types
//!
//! This crate provides the types shared by the controller and its tests,
//! without any AWS SDK dependencies to keep it lightweight.
//!
//! ## Modules
//!
//! - [`defaults`]: Default tuning values and resource names
//! - [`direction`]: Target state of a reconciliation (running or stopped)
//! - [`environment`]: Deployment environment (account and region) validation
//! - [`flow_status`]: Normalized MediaConnect flow status
//! - [`lifecycle`]: CloudFormation custom resource request/response wire types
//! - [`outcome`]: Terminal result of a reconciliation

pub mod defaults;
pub mod direction;
pub mod environment;
pub mod flow_status;
pub mod lifecycle;
pub mod outcome;

// Re-export commonly used types
pub use direction::Direction;
pub use environment::DeploymentEnvironment;
pub use flow_status::FlowStatus;
pub use lifecycle::{LifecycleEvent, LifecycleResponse, RequestType, ResponseStatus};
pub use outcome::{ReconcileResult, ReconciliationOutcome};
