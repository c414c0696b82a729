mod classes;
mod request;
mod resolve;
mod wait;

use std::time::Instant;

use serde::Serialize;

use crate::cli::{Cli, Commands};
use crate::error::Result;
use crate::output::{CommandInputs, OutputFormat, ResultBuilder, Timings, print_result};
use crate::runtime::{RuntimeConfig, build_runtime};

pub use request::request_params;

/// How a command reports its result.
#[derive(Debug, Clone, Copy)]
pub struct Emit {
	pub format: OutputFormat,
	/// When the command started; `durationMs` is measured from here.
	pub started: Instant,
}

pub async fn dispatch(cli: Cli, emit: Emit) -> Result<()> {
	let runtime = build_runtime(&RuntimeConfig::new(cli.config.as_deref())?)?;

	match cli.command {
		Commands::Classes => classes::execute(&runtime, emit),
		Commands::Resolve(request) => resolve::execute(&request, &runtime, emit),
		Commands::Wait {
			request,
			timeout_ms,
			poll_ms,
		} => wait::execute(&request, timeout_ms, poll_ms, &runtime, emit).await,
	}
}

/// Print success result in the given format.
fn emit_success<T: Serialize>(
	command: &'static str,
	inputs: Option<CommandInputs>,
	data: T,
	wait_ms: Option<u64>,
	emit: Emit,
) {
	let mut builder = ResultBuilder::new(command)
		.data(data)
		.timings(Timings::since(emit.started).with_wait_ms(wait_ms));
	if let Some(inputs) = inputs {
		builder = builder.inputs(inputs);
	}
	print_result(&builder.build(), emit.format);
}
