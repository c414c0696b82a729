//! Status snapshots reported back to the caller.

use serde::{Deserialize, Serialize};

/// Idle state of one resolved idling resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceStatus {
	/// Class name the resource was resolved from.
	pub class: String,
	/// Name reported by the resource itself.
	pub name: String,
	pub idle: bool,
}

/// One entry of the class catalog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
	pub class: String,
	/// Whether the class has a shared-instance factory.
	pub instantiable: bool,
}

/// Outcome of waiting for registered resources to become idle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdleReport {
	pub resources: Vec<ResourceStatus>,
	pub waited_ms: u64,
}
