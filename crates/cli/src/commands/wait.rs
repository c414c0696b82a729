//! `idlers wait`: register resolved resources and block until all are idle.
//!
//! # Examples
//!
//! ```bash
//! idlers wait -c com.example.SyncIdle                 # default 60s timeout
//! idlers wait -c "a.Net, a.Db" --timeout-ms 5000      # custom timeout
//! ```

use idlers::IdlingRegistrar;
use idlers_protocol::{IdleReport, ResourceStatus};
use tracing::info;

use super::{Emit, emit_success, request_params};
use crate::cli::RequestArgs;
use crate::error::Result;
use crate::output::CommandInputs;
use crate::runtime::RuntimeContext;

pub async fn execute(
	args: &RequestArgs,
	timeout_ms: Option<u64>,
	poll_ms: Option<u64>,
	runtime: &RuntimeContext,
	emit: Emit,
) -> Result<()> {
	let params = request_params(args)?;
	let policy = runtime.config.idle_policy(timeout_ms, poll_ms);
	let resolved = runtime.resolver.resolve_with_classes(&params.class_names)?;

	let registrar = IdlingRegistrar::new();
	let names = registrar.register(resolved.iter().map(|r| r.resource.clone()))?;
	info!(
		target: "idlers",
		resources = ?names,
		timeout_ms = policy.timeout.as_millis() as u64,
		"waiting for idling resources"
	);

	let outcome = registrar.wait_for_idle(policy).await;
	registrar.unregister(&names);
	let waited = outcome?;

	let resources: Vec<ResourceStatus> = resolved.iter().map(|r| r.status()).collect();
	let waited_ms = waited.as_millis() as u64;
	let inputs = CommandInputs {
		class_names: Some(params.class_names),
		timeout_ms: Some(policy.timeout.as_millis() as u64),
		poll_ms: Some(policy.poll_interval.as_millis() as u64),
	};
	emit_success(
		"wait",
		Some(inputs),
		IdleReport {
			resources,
			waited_ms,
		},
		Some(waited_ms),
		emit,
	);
	Ok(())
}
