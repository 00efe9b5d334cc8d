//! AWS client modules for the controller
//!
//! This module provides wrappers around AWS SDK clients for:
//! - MediaConnect: flow status queries and start/stop commands
//! - error: classification of SDK errors by error code

pub mod context;
pub mod error;
pub mod mediaconnect;
pub mod operations;

pub use context::AwsContext;
pub use error::{FlowApiError, classify_aws_error};
pub use mediaconnect::MediaConnectClient;
pub use operations::FlowApi;

#[cfg(test)]
pub use operations::MockFlowApi;
