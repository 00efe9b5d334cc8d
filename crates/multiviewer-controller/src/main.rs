//! multiviewer-controller: MediaConnect flow lifecycle reconciliation
//!
//! Handles flow-start custom resource events, drives flows to running or
//! stopped on demand, and renders the provider plan for a deployment unit.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use multiviewer_common::defaults::{
    DEFAULT_MAX_POLLS, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_RECONCILE_TIMEOUT_SECS, DEFAULT_REGION,
};
use multiviewer_common::{DeploymentEnvironment, Direction};
use multiviewer_controller::aws::{AwsContext, MediaConnectClient};
use multiviewer_controller::config::{AwsConfig, ControllerConfig};
use multiviewer_controller::handler::{FlowStartHandler, read_event};
use multiviewer_controller::provider::DeploymentPlan;
use multiviewer_controller::reconcile::Reconciler;
use multiviewer_controller::wait::ReconcileConfig;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "multiviewer-controller")]
#[command(about = "Drive MediaConnect flows to their requested lifecycle state")]
#[command(version)]
struct Args {
    /// AWS region
    #[arg(long, global = true, env = "AWS_REGION", default_value = DEFAULT_REGION)]
    region: String,

    /// AWS profile to use (overrides AWS_PROFILE env var)
    #[arg(long, global = true)]
    aws_profile: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    /// Seconds to wait between status polls
    #[arg(long, global = true, default_value_t = DEFAULT_POLL_INTERVAL_SECS)]
    poll_interval_secs: u64,

    /// Give up reconciling after this many seconds
    #[arg(long, global = true, default_value_t = DEFAULT_RECONCILE_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Give up reconciling after this many status polls
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_POLLS)]
    max_polls: u32,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    fn controller_config(&self) -> ControllerConfig {
        ControllerConfig {
            aws: AwsConfig {
                region: self.region.clone(),
                aws_profile: self.aws_profile.clone(),
            },
            reconcile: ReconcileConfig {
                poll_interval: Duration::from_secs(self.poll_interval_secs),
                timeout: Duration::from_secs(self.timeout_secs),
                max_polls: self.max_polls,
            },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Handle a flow-start lifecycle event and print the response
    Handle {
        /// Event JSON file, or "-" for stdin
        #[arg(long, default_value = "-")]
        event: PathBuf,
    },

    /// Drive one or more flows to running or stopped
    Reconcile {
        /// Flow ARN (repeat to reconcile several flows concurrently)
        #[arg(long = "flow-arn", required = true)]
        flow_arns: Vec<String>,

        /// Target state: running or stopped
        #[arg(long)]
        direction: Direction,
    },

    /// Print the current status of a flow
    Status {
        #[arg(long)]
        flow_arn: String,
    },

    /// Render the flow-start provider plan for a deployment unit
    Plan {
        /// Deployment unit (stack) the provider belongs to
        #[arg(long)]
        stack_id: String,

        /// Managed flow as NAME=ARN (repeatable)
        #[arg(long = "flow", value_parser = parse_flow)]
        flows: Vec<(String, String)>,

        /// Deployment account
        #[arg(long, env = "ACCOUNT_ID")]
        account_id: String,

        /// Deployment region
        #[arg(long, env = "REGION")]
        deploy_region: String,
    },
}

/// Parse a `NAME=ARN` pair
fn parse_flow(s: &str) -> Result<(String, String), String> {
    let (name, arn) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=ARN, got '{s}'"))?;
    let (name, arn) = (name.trim(), arn.trim());
    if name.is_empty() || arn.is_empty() {
        return Err(format!("expected NAME=ARN, got '{s}'"));
    }
    Ok((name.to_string(), arn.to_string()))
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    } else {
        let backtrace = e.backtrace();
        if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
            let _ = writeln!(stderr, "\n\x1b[2mBacktrace:\x1b[0m\n{backtrace}");
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    // stdout carries command output, logs go to stderr
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Cancel `token` on Ctrl-C
fn cancel_on_ctrl_c(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling reconciliation");
            token.cancel();
        }
    });
}

async fn connect(config: &ControllerConfig) -> MediaConnectClient {
    if let Some(profile) = config.aws_profile() {
        info!(profile = %profile, "Using AWS profile");
    }
    let aws = AwsContext::with_profile(config.region(), config.aws_profile()).await;
    MediaConnectClient::from_context(&aws)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json_logs);

    let config = args.controller_config();
    if config.reconcile.max_polls == 0 {
        bail!("--max-polls must be at least 1");
    }

    let cancel = CancellationToken::new();

    match args.command {
        Command::Handle { event } => {
            let event = read_event(&event)?;
            cancel_on_ctrl_c(cancel.clone());

            let client = connect(&config).await;
            let reconciler =
                Reconciler::new(client, config.reconcile.clone()).with_cancellation(cancel);
            let response = FlowStartHandler::new(reconciler).handle(&event).await;
            print_json(&response)?;
        }

        Command::Reconcile {
            flow_arns,
            direction,
        } => {
            cancel_on_ctrl_c(cancel.clone());

            let client = connect(&config).await;
            let reconciler =
                Reconciler::new(client, config.reconcile.clone()).with_cancellation(cancel);
            let targets: Vec<(String, Direction)> =
                flow_arns.into_iter().map(|arn| (arn, direction)).collect();

            let outcomes = reconciler.reconcile_all(&targets).await;
            match outcomes.as_slice() {
                [single] => print_json(single)?,
                many => print_json(&many)?,
            }
        }

        Command::Status { flow_arn } => {
            let client = connect(&config).await;
            let status = client
                .describe_flow_status(&flow_arn)
                .await
                .with_context(|| format!("Failed to describe flow {flow_arn}"))?;
            print_json(&serde_json::json!({
                "flowArn": flow_arn,
                "status": status.to_string(),
            }))?;
        }

        Command::Plan {
            stack_id,
            flows,
            account_id,
            deploy_region,
        } => {
            let environment = DeploymentEnvironment::new(&account_id, &deploy_region)
                .map_err(|e| anyhow::anyhow!("Invalid deployment environment: {e}"))?;

            let mut plan = DeploymentPlan::new(environment);
            plan.provider(&stack_id);
            for (name, arn) in &flows {
                plan.start_flow(&stack_id, &format!("{name}SourceFlowStart"), arn);
            }
            info!(
                stack_id = %stack_id,
                resources = plan.resource_count(),
                "Rendered provider plan"
            );
            print_json(&plan.render())?;
        }
    }

    Ok(())
}
