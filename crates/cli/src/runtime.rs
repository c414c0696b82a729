//! Runtime setup shared by all commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use idlers::IdlingResourceResolver;

use crate::config::{self, CliConfig};
use crate::error::Result;

/// Configuration for building a runtime.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
	/// Explicit config file (`--config`).
	pub config_file: Option<PathBuf>,
	/// Directory searched for the project config.
	pub project_root: PathBuf,
}

/// Loaded config plus the resolver built from it.
pub struct RuntimeContext {
	pub config: CliConfig,
	pub resolver: IdlingResourceResolver,
}

/// Loads configuration and builds the class catalog.
pub fn build_runtime(runtime: &RuntimeConfig) -> Result<RuntimeContext> {
	let config = config::load_config(runtime.config_file.as_deref(), &runtime.project_root)?;
	let catalog = config::build_catalog(&config)?;
	let resolver = IdlingResourceResolver::new(Arc::new(catalog));
	Ok(RuntimeContext { config, resolver })
}

impl RuntimeConfig {
	pub fn new(config_file: Option<&Path>) -> Result<Self> {
		Ok(Self {
			config_file: config_file.map(Path::to_path_buf),
			project_root: std::env::current_dir()?,
		})
	}
}
