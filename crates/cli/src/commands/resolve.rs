//! `idlers resolve`: resolve class names and report each resource's state.

use idlers_protocol::ResourceStatus;
use tracing::info;

use super::{Emit, emit_success, request_params};
use crate::cli::RequestArgs;
use crate::error::Result;
use crate::output::CommandInputs;
use crate::runtime::RuntimeContext;

pub fn execute(args: &RequestArgs, runtime: &RuntimeContext, emit: Emit) -> Result<()> {
	let params = request_params(args)?;
	let resolved = runtime.resolver.resolve_with_classes(&params.class_names)?;
	info!(target: "idlers", count = resolved.len(), "resolved idling resources");

	let statuses: Vec<ResourceStatus> = resolved.iter().map(|r| r.status()).collect();
	let inputs = CommandInputs {
		class_names: Some(params.class_names),
		..Default::default()
	};
	emit_success("resolve", Some(inputs), statuses, None, emit);
	Ok(())
}
