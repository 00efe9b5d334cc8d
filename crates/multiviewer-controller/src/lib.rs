//! multiviewer-controller - MediaConnect flow lifecycle reconciliation
//!
//! Drives a flow to running or stopped by polling its status, issuing at most
//! the commands the observed state calls for, and waiting a fixed interval
//! between polls. Also serves as the handler behind the flow-start custom
//! resource and renders the provider plan that declares it.

pub mod aws;
pub mod config;
pub mod handler;
pub mod provider;
pub mod reconcile;
pub mod registry;
pub mod transition;
pub mod wait;
