use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "idlers")]
#[command(about = "Resolve idling resources by class name and wait for them to go idle")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Output format
	#[arg(short = 'f', long, global = true, value_enum, default_value = "json")]
	pub format: OutputFormat,

	/// Use this config file instead of the global and project ones
	#[arg(long, global = true, value_name = "FILE")]
	pub config: Option<PathBuf>,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// List known idling resource classes
	Classes,

	/// Resolve class names into idling resources and report their state
	Resolve(RequestArgs),

	/// Resolve, register and wait until every resource is idle
	Wait {
		#[command(flatten)]
		request: RequestArgs,

		/// Give up after this many milliseconds
		#[arg(long, value_name = "MS")]
		timeout_ms: Option<u64>,

		/// Re-check resources at this interval
		#[arg(long, value_name = "MS")]
		poll_ms: Option<u64>,
	},
}

impl Commands {
	/// Command name used in the result envelope.
	pub fn name(&self) -> &'static str {
		match self {
			Commands::Classes => "classes",
			Commands::Resolve(_) => "resolve",
			Commands::Wait { .. } => "wait",
		}
	}
}

/// Which idling resources a command operates on.
#[derive(Args, Debug, Clone, Default)]
#[group(required = true, multiple = false)]
pub struct RequestArgs {
	/// Comma-separated fully-qualified class names
	#[arg(long, short = 'c', value_name = "NAMES")]
	pub class_names: Option<String>,

	/// Request parameters as JSON, e.g. '{"classNames": "a.B, c.D"}'
	#[arg(long, value_name = "JSON")]
	pub params: Option<String>,
}
