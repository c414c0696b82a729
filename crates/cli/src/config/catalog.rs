//! Builds the runtime class catalog from config declarations.

use std::sync::Arc;
use std::time::Duration;

use idlers::{AlwaysIdle, DeadlineIdlingResource, FileIdlingResource, ResourceCatalog};
use tracing::debug;

use super::types::{CliConfig, ResourceDecl};
use crate::error::Result;

/// Returns the built-in catalog extended with the config's resources.
///
/// Fails if a declaration has a malformed class name or repeats a class
/// already in the catalog.
pub fn build_catalog(config: &CliConfig) -> Result<ResourceCatalog> {
	let mut catalog = ResourceCatalog::with_builtins();

	for decl in &config.resources {
		let class = decl.class().to_string();
		let name = decl.resource_name();
		debug!(target: "idlers", class = %class, resource = %name, "declaring configured resource");

		match decl {
			ResourceDecl::File { path, .. } => {
				let shared = Arc::new(FileIdlingResource::new(name, path.clone()));
				catalog.register_shared(class, shared)?;
			}
			ResourceDecl::Deadline { busy_ms, .. } => {
				let busy_for = Duration::from_millis(*busy_ms);
				catalog.register(class, move || {
					Ok(Arc::new(DeadlineIdlingResource::new(name.clone(), busy_for)))
				})?;
			}
			ResourceDecl::AlwaysIdle { .. } => {
				catalog.register_shared(class, Arc::new(AlwaysIdle::named(name)))?;
			}
		}
	}

	Ok(catalog)
}
