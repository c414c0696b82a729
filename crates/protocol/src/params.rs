//! Request parameters naming the idling resources a session wants.

use serde::{Deserialize, Serialize};

/// Separator between class names in [`IdlingResourcesParams::class_names`].
pub const CLASS_NAME_SEPARATOR: char = ',';

/// Parameters of a register/unregister idling-resources request.
///
/// `classNames` is a comma-separated list of fully-qualified class names,
/// e.g. `"com.example.NetworkIdle, com.example.DbIdle"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdlingResourcesParams {
	pub class_names: String,
}

impl IdlingResourcesParams {
	pub fn new(class_names: impl Into<String>) -> Self {
		Self {
			class_names: class_names.into(),
		}
	}

	/// Iterates the requested class names in order.
	///
	/// Tokens are trimmed but empty tokens are kept, so a trailing comma
	/// yields a trailing `""` that callers must reject.
	pub fn class_names(&self) -> impl Iterator<Item = &str> {
		split_class_names(&self.class_names)
	}
}

impl From<&str> for IdlingResourcesParams {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

/// Splits a raw `classNames` value on `,` and trims every token.
pub fn split_class_names(raw: &str) -> impl Iterator<Item = &str> {
	raw.split(CLASS_NAME_SEPARATOR).map(str::trim)
}
