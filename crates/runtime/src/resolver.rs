//! Resolves comma-separated class names into live idling resources.
//!
//! Resolution is fail-fast and all-or-nothing: the first token that does
//! not resolve aborts the whole request and no instances are returned.
//! Empty tokens (e.g. from a trailing comma) are reported as invalid class
//! names rather than skipped.


use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use idlers_protocol::{IdlingResourcesParams, ResourceStatus, split_class_names};
use tracing::{debug, error};

use crate::catalog::{ClassEntry, ResourceCatalog};
use crate::error::{Error, Result};
use crate::resource::IdlingResource;

/// A resource together with the class it was resolved from.
#[derive(Debug, Clone)]
pub struct ResolvedResource {
	pub class: String,
	pub resource: Arc<dyn IdlingResource>,
}

impl ResolvedResource {
	pub fn status(&self) -> ResourceStatus {
		ResourceStatus {
			class: self.class.clone(),
			name: self.resource.name().to_string(),
			idle: self.resource.is_idle_now(),
		}
	}
}

/// Looks up requested classes in a [`ResourceCatalog`] and invokes their factories.
///
/// The resolver holds no state besides the catalog: every call invokes the
/// factories again and returns a fresh result list.
#[derive(Debug, Clone)]
pub struct IdlingResourceResolver {
	catalog: Arc<ResourceCatalog>,
}

impl IdlingResourceResolver {
	pub fn new(catalog: Arc<ResourceCatalog>) -> Self {
		Self { catalog }
	}

	pub fn catalog(&self) -> &ResourceCatalog {
		&self.catalog
	}

	/// Resolves `spec` into idling resources, preserving input order.
	///
	/// # Errors
	///
	/// - [`Error::InvalidClassName`] for an unknown or empty token
	/// - [`Error::MissingFactoryMethod`] for a class without a factory
	/// - [`Error::FactoryInvocation`] if a factory fails or panics
	/// - [`Error::ContractViolation`] if a factory result has an empty name
	pub fn resolve(&self, spec: &str) -> Result<Vec<Arc<dyn IdlingResource>>> {
		Ok(self
			.resolve_with_classes(spec)?
			.into_iter()
			.map(|resolved| resolved.resource)
			.collect())
	}

	/// Resolves the `classNames` field of a request.
	pub fn resolve_params(
		&self,
		params: &IdlingResourcesParams,
	) -> Result<Vec<Arc<dyn IdlingResource>>> {
		self.resolve(&params.class_names)
	}

	/// Like [`resolve`](Self::resolve) but keeps the class of every resource.
	pub fn resolve_with_classes(&self, spec: &str) -> Result<Vec<ResolvedResource>> {
		split_class_names(spec)
			.map(|class| {
				self.resolve_one(class).map(|resource| ResolvedResource {
					class: class.to_string(),
					resource,
				})
			})
			.collect()
	}

	fn resolve_one(&self, class: &str) -> Result<Arc<dyn IdlingResource>> {
		let factory = match self.catalog.get(class) {
			Some(ClassEntry::Instantiable(factory)) => factory,
			Some(ClassEntry::Declared) => {
				return Err(Error::MissingFactoryMethod(class.to_string()));
			}
			None => return Err(Error::InvalidClassName(class.to_string())),
		};

		let outcome = panic::catch_unwind(AssertUnwindSafe(|| factory()));
		let resource = match outcome {
			Ok(Ok(resource)) => resource,
			Ok(Err(err)) => return Err(invocation_failure(class, format!("{err:#}"))),
			Err(payload) => return Err(invocation_failure(class, panic_message(payload.as_ref()))),
		};

		if resource.name().trim().is_empty() {
			return Err(Error::ContractViolation {
				class: class.to_string(),
				reason: "resource name must not be empty".to_string(),
			});
		}

		debug!(
			target: "idlers",
			class,
			resource = resource.name(),
			idle = resource.is_idle_now(),
			"resolved idling resource"
		);
		Ok(resource)
	}
}

fn invocation_failure(class: &str, message: String) -> Error {
	error!(target: "idlers", class, error = %message, "idling resource factory failed");
	Error::FactoryInvocation {
		class: class.to_string(),
		message,
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(msg) = payload.downcast_ref::<&str>() {
		(*msg).to_string()
	} else if let Some(msg) = payload.downcast_ref::<String>() {
		msg.clone()
	} else {
		"factory panicked".to_string()
	}
}
