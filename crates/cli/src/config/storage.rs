//! Config file locations and loading.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::CliConfig;
use crate::error::{CliError, Result};

/// Directory under the user config dir holding the global file.
pub const APP_DIR: &str = "idlers";

/// Project-local config directory.
pub const PROJECT_DIR: &str = ".idlers";

pub const CONFIG_FILE: &str = "config.json";

/// Candidate config file locations, lowest precedence first.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
	pub global: Option<PathBuf>,
	pub project: Option<PathBuf>,
}

impl ConfigPaths {
	/// Global file in the platform config dir, project file under `project_root`.
	pub fn new(project_root: &Path) -> Self {
		Self {
			global: dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE)),
			project: Some(project_root.join(PROJECT_DIR).join(CONFIG_FILE)),
		}
	}

	/// Loads every existing file and layers them.
	pub fn load(&self) -> Result<CliConfig> {
		let mut config = CliConfig::new();
		for path in [&self.global, &self.project].into_iter().flatten() {
			if path.exists() {
				config.merge(&read_config(path)?);
			} else {
				debug!(target: "idlers", path = %path.display(), "no config file");
			}
		}
		Ok(config)
	}
}

/// Loads `explicit` when given, otherwise the layered global + project config.
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> Result<CliConfig> {
	match explicit {
		Some(path) => read_config(path),
		None => ConfigPaths::new(project_root).load(),
	}
}

/// Reads and parses one config file.
pub fn read_config(path: &Path) -> Result<CliConfig> {
	let config_error = |message: String| CliError::Config {
		path: path.to_path_buf(),
		message,
	};

	let content = fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
	let config = serde_json::from_str(&content).map_err(|e| config_error(e.to_string()))?;
	debug!(target: "idlers", path = %path.display(), "loaded config");
	Ok(config)
}
