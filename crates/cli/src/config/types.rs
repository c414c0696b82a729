//! Config file types: [`CliConfig`] and its resource declarations.

use std::path::PathBuf;
use std::time::Duration;

use idlers::IdlePolicy;
use serde::{Deserialize, Serialize};

/// Schema version for config files.
pub const SCHEMA_VERSION: u32 = 1;

/// Default wait settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub timeout_ms: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub poll_ms: Option<u64>,
}

/// An idling resource class provided by the config file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ResourceDecl {
	/// Busy while `path` exists.
	File {
		class: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		name: Option<String>,
		path: PathBuf,
	},
	/// Busy for `busy_ms` after each resolution.
	Deadline {
		class: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		name: Option<String>,
		busy_ms: u64,
	},
	/// Always idle; useful as a placeholder.
	AlwaysIdle {
		class: String,
		#[serde(default, skip_serializing_if = "Option::is_none")]
		name: Option<String>,
	},
}

impl ResourceDecl {
	pub fn class(&self) -> &str {
		match self {
			ResourceDecl::File { class, .. }
			| ResourceDecl::Deadline { class, .. }
			| ResourceDecl::AlwaysIdle { class, .. } => class,
		}
	}

	/// Resource name: the explicit `name`, else the simple class name.
	pub fn resource_name(&self) -> String {
		let explicit = match self {
			ResourceDecl::File { name, .. }
			| ResourceDecl::Deadline { name, .. }
			| ResourceDecl::AlwaysIdle { name, .. } => name.as_deref(),
		};
		let class = self.class();
		explicit
			.unwrap_or_else(|| class.rsplit('.').next().unwrap_or(class))
			.to_string()
	}
}

/// Parsed config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CliConfig {
	#[serde(default)]
	pub schema: u32,
	#[serde(default)]
	pub defaults: Defaults,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub resources: Vec<ResourceDecl>,
}

impl CliConfig {
	/// Creates a config with current [`SCHEMA_VERSION`].
	pub fn new() -> Self {
		Self {
			schema: SCHEMA_VERSION,
			..Default::default()
		}
	}

	/// Layers `other` over `self`.
	///
	/// Defaults set in `other` win; a resource in `other` replaces the one
	/// with the same class in place, new classes are appended.
	pub fn merge(&mut self, other: &CliConfig) {
		self.schema = self.schema.max(other.schema);
		if other.defaults.timeout_ms.is_some() {
			self.defaults.timeout_ms = other.defaults.timeout_ms;
		}
		if other.defaults.poll_ms.is_some() {
			self.defaults.poll_ms = other.defaults.poll_ms;
		}
		for decl in &other.resources {
			match self.resources.iter_mut().find(|d| d.class() == decl.class()) {
				Some(existing) => *existing = decl.clone(),
				None => self.resources.push(decl.clone()),
			}
		}
	}

	/// Idle policy from command-line overrides, then config defaults.
	pub fn idle_policy(&self, timeout_ms: Option<u64>, poll_ms: Option<u64>) -> IdlePolicy {
		let defaults = IdlePolicy::default();
		let timeout = timeout_ms
			.or(self.defaults.timeout_ms)
			.map(Duration::from_millis)
			.unwrap_or(defaults.timeout);
		let poll_interval = poll_ms
			.or(self.defaults.poll_ms)
			.map(Duration::from_millis)
			.unwrap_or(defaults.poll_interval);
		IdlePolicy::new(timeout, poll_interval)
	}
}
