//! Structured output envelope for all CLI commands.
//!
//! Every command prints one result envelope on stdout:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "ok": true,
//!   "command": "resolve",
//!   "data": { ... },
//!   "timings": { "durationMs": 3 }
//! }
//! ```
//!
//! On failure:
//!
//! ```json
//! {
//!   "ok": false,
//!   "command": "resolve",
//!   "error": {
//!     "code": "INVALID_CLASS_NAME",
//!     "message": "'com.example.Typo' is not a valid class name",
//!     "details": { "class": "com.example.Typo" }
//!   }
//! }
//! ```


use std::io::{self, Write};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Current schema version for command output.
///
/// Increment this when making breaking changes to the output structure.
pub const SCHEMA_VERSION: u32 = 1;

/// Output format for CLI results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
	/// Pretty-printed JSON envelope
	#[default]
	Json,
	/// Single-line JSON envelope
	Ndjson,
	/// Human-readable text
	Text,
}

impl std::fmt::Display for OutputFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			OutputFormat::Json => write!(f, "json"),
			OutputFormat::Ndjson => write!(f, "ndjson"),
			OutputFormat::Text => write!(f, "text"),
		}
	}
}

/// The result envelope returned by all commands.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult<T: Serialize> {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub schema_version: Option<u32>,

	pub ok: bool,

	/// Command name (e.g., "resolve", "wait")
	pub command: String,

	/// Inputs used for this command (for traceability)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub inputs: Option<CommandInputs>,

	/// Command-specific result data (only present on success)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub data: Option<T>,

	/// Error information (only present on failure)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<CommandError>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub timings: Option<Timings>,
}

/// Inputs that were used for the command.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CommandInputs {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub class_names: Option<String>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub timeout_ms: Option<u64>,

	#[serde(skip_serializing_if = "Option::is_none")]
	pub poll_ms: Option<u64>,
}

/// Error information for failed commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandError {
	pub code: ErrorCode,

	/// Human-readable error message
	pub message: String,

	/// Additional error details (offending class, busy resources, ...)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<serde_json::Value>,
}

/// Standardized error codes for programmatic handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// Class name is unknown, empty or malformed
	InvalidClassName,
	/// Class has no shared-instance factory
	MissingFactoryMethod,
	/// Class factory failed
	FactoryInvocationFailed,
	/// Factory result does not honor the idling-resource contract
	ContractViolation,
	/// Resource or class registered twice
	DuplicateResource,
	/// Resources stayed busy past the timeout
	IdleTimeout,
	/// Invalid command input
	InvalidInput,
	/// Configuration file could not be loaded
	ConfigError,
	/// File I/O error
	IoError,
	/// Unknown/internal error
	InternalError,
}

impl std::fmt::Display for ErrorCode {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let code = match self {
			ErrorCode::InvalidClassName => "INVALID_CLASS_NAME",
			ErrorCode::MissingFactoryMethod => "MISSING_FACTORY_METHOD",
			ErrorCode::FactoryInvocationFailed => "FACTORY_INVOCATION_FAILED",
			ErrorCode::ContractViolation => "CONTRACT_VIOLATION",
			ErrorCode::DuplicateResource => "DUPLICATE_RESOURCE",
			ErrorCode::IdleTimeout => "IDLE_TIMEOUT",
			ErrorCode::InvalidInput => "INVALID_INPUT",
			ErrorCode::ConfigError => "CONFIG_ERROR",
			ErrorCode::IoError => "IO_ERROR",
			ErrorCode::InternalError => "INTERNAL_ERROR",
		};
		f.write_str(code)
	}
}

/// Timing information for the command
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timings {
	pub duration_ms: u64,

	/// Time spent waiting for idleness (wait command only)
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wait_ms: Option<u64>,
}

impl Timings {
	/// Timings of a command started at `started`.
	pub fn since(started: Instant) -> Self {
		Self::from(started.elapsed())
	}

	pub fn with_wait_ms(mut self, wait_ms: Option<u64>) -> Self {
		self.wait_ms = wait_ms;
		self
	}
}

impl From<Duration> for Timings {
	fn from(duration: Duration) -> Self {
		Self {
			duration_ms: duration.as_millis() as u64,
			wait_ms: None,
		}
	}
}

/// Builder for [`CommandResult`], timing the command from construction.
pub struct ResultBuilder<T: Serialize> {
	command: String,
	inputs: Option<CommandInputs>,
	data: Option<T>,
	error: Option<CommandError>,
	start_time: Instant,
	timings: Option<Timings>,
}

impl<T: Serialize> ResultBuilder<T> {
	pub fn new(command: impl Into<String>) -> Self {
		Self {
			command: command.into(),
			inputs: None,
			data: None,
			error: None,
			start_time: Instant::now(),
			timings: None,
		}
	}

	pub fn inputs(mut self, inputs: CommandInputs) -> Self {
		self.inputs = Some(inputs);
		self
	}

	pub fn data(mut self, data: T) -> Self {
		self.data = Some(data);
		self
	}

	pub fn error(mut self, error: CommandError) -> Self {
		self.error = Some(error);
		self
	}

	/// Override timings (if not using automatic timing from construction)
	pub fn timings(mut self, timings: Timings) -> Self {
		self.timings = Some(timings);
		self
	}

	pub fn build(self) -> CommandResult<T> {
		let ok = self.error.is_none() && self.data.is_some();
		let timings = self
			.timings
			.unwrap_or_else(|| Timings::from(self.start_time.elapsed()));

		CommandResult {
			schema_version: Some(SCHEMA_VERSION),
			ok,
			command: self.command,
			inputs: self.inputs,
			data: self.data,
			error: self.error,
			timings: Some(timings),
		}
	}
}

/// Print a command result to stdout in the specified format
pub fn print_result<T: Serialize>(result: &CommandResult<T>, format: OutputFormat) {
	match format {
		OutputFormat::Json => {
			if let Ok(json) = serde_json::to_string_pretty(result) {
				println!("{json}");
			}
		}
		OutputFormat::Ndjson => {
			if let Ok(json) = serde_json::to_string(result) {
				println!("{json}");
			}
		}
		OutputFormat::Text => print_result_text(result),
	}
}

fn print_result_text<T: Serialize>(result: &CommandResult<T>) {
	let mut stdout = io::stdout().lock();

	if let Some(ref error) = result.error {
		let _ = writeln!(stdout, "Error [{}]: {}", error.code, error.message);
		return;
	}

	if let Some(ref data) = result.data {
		if let Ok(json) = serde_json::to_string_pretty(data) {
			let _ = writeln!(stdout, "{json}");
		}
	}
}

/// Print an error line to stderr for humans.
pub fn print_error_stderr(error: &CommandError) {
	eprintln!("Error [{}]: {}", error.code, error.message);
}
