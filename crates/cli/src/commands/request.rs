//! Turns `--class-names` / `--params` into request parameters.

use idlers_protocol::IdlingResourcesParams;

use crate::cli::RequestArgs;
use crate::error::{CliError, Result};

/// Builds request parameters from whichever source was given.
pub fn request_params(args: &RequestArgs) -> Result<IdlingResourcesParams> {
	match (&args.class_names, &args.params) {
		(Some(class_names), None) => Ok(IdlingResourcesParams::new(class_names.as_str())),
		(None, Some(json)) => serde_json::from_str(json)
			.map_err(|e| CliError::InvalidInput(format!("--params is not a valid request: {e}"))),
		(Some(_), Some(_)) => Err(CliError::InvalidInput(
			"use either --class-names or --params, not both".into(),
		)),
		(None, None) => Err(CliError::InvalidInput(
			"one of --class-names or --params is required".into(),
		)),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args(class_names: Option<&str>, params: Option<&str>) -> RequestArgs {
		RequestArgs {
			class_names: class_names.map(str::to_string),
			params: params.map(str::to_string),
		}
	}

	#[test]
	fn class_names_flag() {
		let params = request_params(&args(Some("a.B, c.D"), None)).unwrap();
		assert_eq!(params.class_names().collect::<Vec<_>>(), ["a.B", "c.D"]);
	}

	#[test]
	fn params_json() {
		let params = request_params(&args(None, Some(r#"{"classNames":"a.B"}"#))).unwrap();
		assert_eq!(params.class_names, "a.B");
	}

	#[test]
	fn malformed_params_is_invalid_input() {
		let err = request_params(&args(None, Some(r#"{"classes":"a.B"}"#))).unwrap_err();
		assert!(matches!(err, CliError::InvalidInput(ref m) if m.contains("--params")));
	}

	#[test]
	fn missing_source_is_invalid_input() {
		assert!(matches!(
			request_params(&args(None, None)),
			Err(CliError::InvalidInput(_))
		));
	}
}
