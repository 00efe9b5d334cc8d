//! MediaConnect error classification
//!
//! Provides typed errors for MediaConnect SDK operations using the error
//! `.code()` metadata instead of string matching on the Debug format.

use aws_sdk_mediaconnect::error::{DisplayErrorContext, ProvideErrorMetadata};
use thiserror::Error;

/// MediaConnect error categories
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowApiError {
    /// Flow ARN does not name an existing flow
    #[error("Flow not found: {message}")]
    NotFound { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    Throttled { message: String },

    /// Caller lacks permission for the operation
    #[error("Access denied: {message}")]
    Forbidden { message: String },

    /// Service-side failure or temporary unavailability
    #[error("MediaConnect unavailable: {message}")]
    Unavailable { message: String },

    /// DescribeFlow succeeded but carried no flow
    #[error("DescribeFlow returned no flow for {flow_arn}")]
    MissingFlow { flow_arn: String },

    /// DescribeFlow returned a flow without a status
    #[error("DescribeFlow returned no status for flow {flow_arn}")]
    MissingStatus { flow_arn: String },

    /// Generic SDK error with code and message
    #[error("AWS error: {message}")]
    Sdk {
        code: Option<String>,
        message: String,
    },
}

impl FlowApiError {
    /// Whether repeating the call later could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            FlowApiError::Throttled { .. } | FlowApiError::Unavailable { .. }
        )
    }
}

/// Known MediaConnect error codes for "not found" conditions
const NOT_FOUND_CODES: &[&str] = &["NotFoundException"];

/// Known error codes for throttling/rate limiting
const THROTTLING_CODES: &[&str] = &[
    "TooManyRequestsException",
    "ThrottlingException",
    "Throttling",
];

/// Known error codes for authorization failures
const FORBIDDEN_CODES: &[&str] = &["ForbiddenException", "AccessDeniedException"];

/// Known error codes for service-side failures
const UNAVAILABLE_CODES: &[&str] = &[
    "ServiceUnavailableException",
    "InternalServerErrorException",
];

/// Classify an AWS error using the error code.
pub fn classify_aws_error(code: Option<&str>, message: Option<&str>) -> FlowApiError {
    let message = message.unwrap_or("Unknown error").to_string();

    match code {
        Some(c) if NOT_FOUND_CODES.contains(&c) => FlowApiError::NotFound { message },
        Some(c) if THROTTLING_CODES.contains(&c) => FlowApiError::Throttled { message },
        Some(c) if FORBIDDEN_CODES.contains(&c) => FlowApiError::Forbidden { message },
        Some(c) if UNAVAILABLE_CODES.contains(&c) => FlowApiError::Unavailable { message },
        _ => FlowApiError::Sdk {
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Classify an SDK operation error.
///
/// Errors without service metadata (dispatch failures, timeouts) keep the
/// full error chain as their message.
pub fn classify_sdk_error<E>(error: &E) -> FlowApiError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match error.code() {
        Some(code) => classify_aws_error(Some(code), error.message()),
        None => FlowApiError::Sdk {
            code: None,
            message: DisplayErrorContext(error).to_string(),
        },
    }
}
