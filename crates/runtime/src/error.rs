//! Error types for idling-resource resolution and registration.

use thiserror::Error;

/// Result type alias for idling runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while resolving, registering or waiting on idling resources.
///
/// Every variant names the offending class or resource so a failed request
/// can be fixed without further digging.
#[derive(Debug, Error)]
pub enum Error {
	/// The token does not name a class known to the catalog.
	#[error("'{0}' is not a valid class name")]
	InvalidClassName(String),

	/// The class is known but has no zero-argument shared-instance factory.
	#[error("'{0}' class must have getInstance() method")]
	MissingFactoryMethod(String),

	/// The class factory failed while producing its instance.
	#[error("Got an unexpected error while calling '{class}.getInstance()': {message}")]
	FactoryInvocation { class: String, message: String },

	/// The factory returned something that does not honor the idling-resource contract.
	#[error("'{class}.getInstance()' must return an object that implements the idling-resource interface: {reason}")]
	ContractViolation { class: String, reason: String },

	/// A class with this name is already in the catalog.
	#[error("class '{0}' is already registered in the catalog")]
	DuplicateClass(String),

	/// A resource with this name is already registered, or repeated within one batch.
	#[error("an idling resource named '{0}' is already registered")]
	DuplicateResourceName(String),

	/// A counting resource was decremented below zero.
	#[error("counter of idling resource '{0}' has been decremented below zero")]
	CounterUnderflow(String),

	/// Registered resources stayed busy past the deadline.
	#[error("resources still busy after {timeout_ms}ms: {}", busy.join(", "))]
	IdleTimeout { busy: Vec<String>, timeout_ms: u64 },
}

impl Error {
	/// Returns the class name this error is about, when it concerns a single class.
	pub fn class_name(&self) -> Option<&str> {
		match self {
			Error::InvalidClassName(class)
			| Error::MissingFactoryMethod(class)
			| Error::DuplicateClass(class) => Some(class),
			Error::FactoryInvocation { class, .. } | Error::ContractViolation { class, .. } => {
				Some(class)
			}
			_ => None,
		}
	}

	/// Returns true if this error comes from resolving a class name.
	pub fn is_resolution_error(&self) -> bool {
		matches!(
			self,
			Error::InvalidClassName(_)
				| Error::MissingFactoryMethod(_)
				| Error::FactoryInvocation { .. }
				| Error::ContractViolation { .. }
		)
	}

	/// Returns true if this is an idle timeout.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::IdleTimeout { .. })
	}
}
