//! Flow-start provider plan
//!
//! Describes the deployment artifacts behind the flow-start custom resource:
//! one [`FlowStartProvider`] per deployment unit (the backing function, its
//! timeout, and its access policy) and one [`FlowStartResource`] per managed
//! flow, all pointing at their unit's shared service token.

use crate::registry::HandlerRegistry;
use multiviewer_common::defaults::{
    DEFAULT_HANDLER_TIMEOUT_SECS, HANDLER_ACTIONS, HANDLER_FUNCTION_ID, PROVIDER_ID, RESOURCE_TYPE,
};
use multiviewer_common::lifecycle::FlowStartProperties;
use multiviewer_common::DeploymentEnvironment;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// One IAM policy statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyStatement {
    pub effect: String,
    pub action: Vec<String>,
    pub resource: Vec<String>,
}

impl PolicyStatement {
    /// Describe/start/stop on any flow
    pub fn flow_control() -> Self {
        Self {
            effect: "Allow".to_string(),
            action: HANDLER_ACTIONS.iter().map(|a| a.to_string()).collect(),
            resource: vec!["*".to_string()],
        }
    }
}

/// Backing handler of the flow-start custom resource for one deployment unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowStartProvider {
    pub deployment_unit: String,
    pub function_id: String,
    pub provider_id: String,
    pub timeout_secs: u64,
    pub service_token: String,
    pub policy: Vec<PolicyStatement>,
}

impl FlowStartProvider {
    pub fn new(deployment_unit: &str, env: &DeploymentEnvironment) -> Self {
        let service_token = format!(
            "arn:aws:lambda:{}:{}:function:{}-{}",
            env.region, env.account_id, deployment_unit, PROVIDER_ID
        );

        Self {
            deployment_unit: deployment_unit.to_string(),
            function_id: HANDLER_FUNCTION_ID.to_string(),
            provider_id: PROVIDER_ID.to_string(),
            timeout_secs: DEFAULT_HANDLER_TIMEOUT_SECS,
            service_token,
            policy: vec![PolicyStatement::flow_control()],
        }
    }

    /// IAM policy document granted to the handler's execution role
    pub fn policy_document(&self) -> serde_json::Value {
        serde_json::json!({
            "Version": "2012-10-17",
            "Statement": self.policy,
        })
    }
}

/// Declaration of one managed flow-start resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlowStartResource {
    #[serde(skip)]
    pub logical_id: String,
    #[serde(rename = "Type")]
    pub resource_type: String,
    pub properties: FlowStartProperties,
}

/// Flow-start declarations for a whole program, grouped by deployment unit.
///
/// Owns the handler registry: every unit gets exactly one provider no matter
/// how many flows it manages.
pub struct DeploymentPlan {
    environment: DeploymentEnvironment,
    providers: HandlerRegistry<FlowStartProvider>,
    resources: BTreeMap<String, BTreeMap<String, FlowStartResource>>,
}

impl DeploymentPlan {
    pub fn new(environment: DeploymentEnvironment) -> Self {
        Self {
            environment,
            providers: HandlerRegistry::new(),
            resources: BTreeMap::new(),
        }
    }

    /// Provider for `deployment_unit`, created on first use
    pub fn provider(&self, deployment_unit: &str) -> Arc<FlowStartProvider> {
        self.providers.get_or_create(deployment_unit, || {
            info!(deployment_unit = %deployment_unit, "Creating flow-start provider");
            FlowStartProvider::new(deployment_unit, &self.environment)
        })
    }

    /// Declare that `flow_arn` must be running while the unit exists.
    ///
    /// Redeclaring a logical id replaces the earlier declaration.
    pub fn start_flow(
        &mut self,
        deployment_unit: &str,
        logical_id: &str,
        flow_arn: &str,
    ) -> FlowStartResource {
        let provider = self.provider(deployment_unit);

        let resource = FlowStartResource {
            logical_id: logical_id.to_string(),
            resource_type: RESOURCE_TYPE.to_string(),
            properties: FlowStartProperties {
                flow_arn: flow_arn.to_string(),
                service_token: Some(provider.service_token.clone()),
            },
        };

        debug!(
            deployment_unit = %deployment_unit,
            logical_id = %logical_id,
            flow_arn = %flow_arn,
            "Declared flow start"
        );

        self.resources
            .entry(deployment_unit.to_string())
            .or_default()
            .insert(logical_id.to_string(), resource.clone());
        resource
    }

    /// Number of declared flow-start resources across all units
    pub fn resource_count(&self) -> usize {
        self.resources.values().map(BTreeMap::len).sum()
    }

    /// Render the plan as JSON, one entry per deployment unit
    pub fn render(&self) -> serde_json::Value {
        let units: serde_json::Map<String, serde_json::Value> = self
            .providers
            .keys()
            .into_iter()
            .filter_map(|unit| {
                let provider = self.providers.get(&unit)?;
                let resources = self.resources.get(&unit).cloned().unwrap_or_default();
                let value = serde_json::json!({
                    "provider": &*provider,
                    "policyDocument": provider.policy_document(),
                    "resources": resources,
                });
                Some((unit, value))
            })
            .collect();

        serde_json::json!({
            "accountId": self.environment.account_id,
            "region": self.environment.region,
            "deploymentUnits": units,
        })
    }
}
