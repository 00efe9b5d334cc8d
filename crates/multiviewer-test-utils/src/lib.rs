//! Shared test utilities for multiviewer crates
//!
//! - [`aws`]: test region detection and unique flow/stack identifiers
//! - [`events`]: sample flow-start lifecycle events

pub mod aws;
pub mod events;
