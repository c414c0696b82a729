use std::time::Instant;

use clap::Parser;
use idlers_cli::{
	cli::Cli,
	commands::{self, Emit},
	error::CliError,
	logging,
	output::{self, CommandResult, OutputFormat, ResultBuilder, Timings},
};

#[tokio::main]
async fn main() {
	let started = Instant::now();
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	let emit = Emit {
		format: cli.format,
		started,
	};
	let command = cli.command.name();

	if let Err(err) = commands::dispatch(cli, emit).await {
		handle_error(command, err, emit);
		std::process::exit(1);
	}
}

fn handle_error(command: &'static str, err: CliError, emit: Emit) {
	let cmd_error = err.to_command_error();

	// Always print to stderr for humans
	output::print_error_stderr(&cmd_error);

	// Machine formats also get the envelope with ok=false on stdout
	if emit.format != OutputFormat::Text {
		let result: CommandResult<()> = ResultBuilder::new(command)
			.error(cmd_error)
			.timings(Timings::since(emit.started))
			.build();
		output::print_result(&result, emit.format);
	}
}
