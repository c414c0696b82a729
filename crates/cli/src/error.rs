use std::path::PathBuf;

use thiserror::Error;

use crate::output::{CommandError, ErrorCode};

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
	#[error("invalid input: {0}")]
	InvalidInput(String),

	#[error("failed to load config {path}: {message}")]
	Config { path: PathBuf, message: String },

	#[error(transparent)]
	Idling(#[from] idlers::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Json(#[from] serde_json::Error),
}

impl CliError {
	/// Convert this error to a CommandError for structured output
	pub fn to_command_error(&self) -> CommandError {
		let (code, details) = match self {
			CliError::InvalidInput(_) => (ErrorCode::InvalidInput, None),
			CliError::Config { path, .. } => (
				ErrorCode::ConfigError,
				Some(serde_json::json!({ "path": path })),
			),
			CliError::Idling(err) => idling_error_code(err),
			CliError::Io(_) => (ErrorCode::IoError, None),
			CliError::Json(_) => (ErrorCode::InvalidInput, None),
		};

		CommandError {
			code,
			message: self.to_string(),
			details,
		}
	}
}

fn idling_error_code(err: &idlers::Error) -> (ErrorCode, Option<serde_json::Value>) {
	use idlers::Error;

	let code = match err {
		Error::InvalidClassName(_) => ErrorCode::InvalidClassName,
		Error::MissingFactoryMethod(_) => ErrorCode::MissingFactoryMethod,
		Error::FactoryInvocation { .. } => ErrorCode::FactoryInvocationFailed,
		Error::ContractViolation { .. } => ErrorCode::ContractViolation,
		Error::DuplicateClass(_) | Error::DuplicateResourceName(_) => ErrorCode::DuplicateResource,
		Error::IdleTimeout { .. } => ErrorCode::IdleTimeout,
		Error::CounterUnderflow(_) => ErrorCode::InternalError,
	};

	let details = match err {
		Error::IdleTimeout { busy, timeout_ms } => {
			Some(serde_json::json!({ "busy": busy, "timeoutMs": timeout_ms }))
		}
		Error::DuplicateResourceName(name) => Some(serde_json::json!({ "resource": name })),
		_ => err.class_name().map(|class| serde_json::json!({ "class": class })),
	};

	(code, details)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn invalid_class_name_carries_class_detail() {
		let err = CliError::from(idlers::Error::InvalidClassName("a.Typo".into()));
		let cmd = err.to_command_error();
		assert_eq!(cmd.code, ErrorCode::InvalidClassName);
		assert_eq!(cmd.message, "'a.Typo' is not a valid class name");
		assert_eq!(cmd.details.unwrap()["class"], "a.Typo");
	}

	#[test]
	fn idle_timeout_lists_busy_resources() {
		let err = CliError::from(idlers::Error::IdleTimeout {
			busy: vec!["network".into()],
			timeout_ms: 250,
		});
		let cmd = err.to_command_error();
		assert_eq!(cmd.code, ErrorCode::IdleTimeout);
		let details = cmd.details.unwrap();
		assert_eq!(details["busy"][0], "network");
		assert_eq!(details["timeoutMs"], 250);
	}

	#[test]
	fn factory_invocation_failed() {
		let err = CliError::from(idlers::Error::FactoryInvocation {
			class: "a.Broken".into(),
			message: "database offline".into(),
		});
		let cmd = err.to_command_error();
		assert_eq!(cmd.code, ErrorCode::FactoryInvocationFailed);
		assert!(cmd.message.ends_with("database offline"));
		assert_eq!(cmd.details.unwrap(), serde_json::json!({ "class": "a.Broken" }));
	}

	#[test]
	fn missing_factory_method() {
		let cmd = CliError::from(idlers::Error::MissingFactoryMethod("a.Declared".into()))
			.to_command_error();
		assert_eq!(cmd.code, ErrorCode::MissingFactoryMethod);
		assert_eq!(cmd.details.unwrap()["class"], "a.Declared");
	}

	#[test]
	fn contract_violation() {
		let cmd = CliError::from(idlers::Error::ContractViolation {
			class: "a.Unnamed".into(),
			reason: "resource name must not be empty".into(),
		})
		.to_command_error();
		assert_eq!(cmd.code, ErrorCode::ContractViolation);
		assert_eq!(cmd.details.unwrap(), serde_json::json!({ "class": "a.Unnamed" }));
	}

	#[test]
	fn duplicate_class_carries_class_detail() {
		let cmd = CliError::from(idlers::Error::DuplicateClass("idlers.AlwaysIdle".into()))
			.to_command_error();
		assert_eq!(cmd.code, ErrorCode::DuplicateResource);
		assert_eq!(
			cmd.details.unwrap(),
			serde_json::json!({ "class": "idlers.AlwaysIdle" })
		);
	}

	#[test]
	fn duplicate_resource_name_carries_resource_detail() {
		let cmd = CliError::from(idlers::Error::DuplicateResourceName("network".into()))
			.to_command_error();
		assert_eq!(cmd.code, ErrorCode::DuplicateResource);
		assert_eq!(cmd.details.unwrap(), serde_json::json!({ "resource": "network" }));
	}

	#[test]
	fn counter_underflow_is_internal() {
		let cmd = CliError::from(idlers::Error::CounterUnderflow("network".into()))
			.to_command_error();
		assert_eq!(cmd.code, ErrorCode::InternalError);
		assert!(cmd.details.is_none());
		assert!(cmd.message.contains("network"));
	}

	#[test]
	fn invalid_input_and_io_have_no_details() {
		let cmd = CliError::InvalidInput("bad".into()).to_command_error();
		assert_eq!(cmd.code, ErrorCode::InvalidInput);
		assert!(cmd.details.is_none());

		let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
		let cmd = CliError::from(io).to_command_error();
		assert_eq!(cmd.code, ErrorCode::IoError);
	}

	#[test]
	fn config_error_reports_path() {
		let err = CliError::Config {
			path: PathBuf::from("/etc/idlers.json"),
			message: "expected value".into(),
		};
		let cmd = err.to_command_error();
		assert_eq!(cmd.code, ErrorCode::ConfigError);
		assert!(cmd.message.contains("/etc/idlers.json"));
	}
}
