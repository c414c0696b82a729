//! Registered idling resources and waiting for global idleness.
//!
//! Resources are keyed by their reported name. Waiters register for
//! wake-ups before checking state so an idle transition between the check
//! and the wait is never lost; resources that cannot report transitions
//! are re-polled at the policy's poll interval.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use indexmap::IndexMap;
use parking_lot::Mutex;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::resource::{CallbackId, IdlingResource};

/// How long and how often to check for idleness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdlePolicy {
	pub timeout: Duration,
	pub poll_interval: Duration,
}

impl IdlePolicy {
	/// Default timeout of the master idling policy.
	pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
	pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
	/// Shorter poll intervals are raised to this.
	pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

	pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
		Self {
			timeout,
			poll_interval: poll_interval.max(Self::MIN_POLL_INTERVAL),
		}
	}
}

impl Default for IdlePolicy {
	fn default() -> Self {
		Self::new(Self::DEFAULT_TIMEOUT, Self::DEFAULT_POLL_INTERVAL)
	}
}

struct Registered {
	resource: Arc<dyn IdlingResource>,
	callback: CallbackId,
}

/// Set of idling resources the driver synchronizes on.
///
/// The registrar's idle-transition callback is removed from a resource when
/// the resource is unregistered or the registrar is dropped, so shared
/// instances can be registered again and again.
pub struct IdlingRegistrar {
	resources: Mutex<IndexMap<String, Registered>>,
	idle: Arc<Notify>,
}

impl Default for IdlingRegistrar {
	fn default() -> Self {
		Self::new()
	}
}

impl IdlingRegistrar {
	pub fn new() -> Self {
		Self {
			resources: Mutex::new(IndexMap::new()),
			idle: Arc::new(Notify::new()),
		}
	}

	/// Registers a batch of resources and returns their names.
	///
	/// All-or-nothing: if any name is already registered, or appears twice
	/// in the batch, nothing is registered.
	pub fn register<I>(&self, resources: I) -> Result<Vec<String>>
	where
		I: IntoIterator<Item = Arc<dyn IdlingResource>>,
	{
		let resources: Vec<_> = resources.into_iter().collect();
		let mut table = self.resources.lock();

		let mut seen = HashSet::new();
		for resource in &resources {
			let name = resource.name();
			if table.contains_key(name) || !seen.insert(name) {
				return Err(Error::DuplicateResourceName(name.to_string()));
			}
		}

		let mut names = Vec::with_capacity(resources.len());
		for resource in resources {
			let name = resource.name().to_string();
			let idle = Arc::clone(&self.idle);
			let callback = CallbackId::next();
			resource.register_idle_transition_callback(callback, Arc::new(move || idle.notify_waiters()));
			info!(target: "idlers", resource = %name, "registered idling resource");
			table.insert(name.clone(), Registered { resource, callback });
			names.push(name);
		}
		Ok(names)
	}

	/// Unregisters resources by name, returning the names that were removed.
	///
	/// Unknown names are skipped with a warning.
	pub fn unregister<I, S>(&self, names: I) -> Vec<String>
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut table = self.resources.lock();
		let mut removed = Vec::new();
		for name in names {
			let name = name.as_ref();
			if let Some(entry) = table.shift_remove(name) {
				entry.resource.remove_idle_transition_callback(entry.callback);
				info!(target: "idlers", resource = %name, "unregistered idling resource");
				removed.push(name.to_string());
			} else {
				warn!(target: "idlers", resource = %name, "idling resource was not registered");
			}
		}
		drop(table);

		// Removing a busy resource may leave everything idle.
		if !removed.is_empty() {
			self.idle.notify_waiters();
		}
		removed
	}

	pub fn get(&self, name: &str) -> Option<Arc<dyn IdlingResource>> {
		self.resources
			.lock()
			.get(name)
			.map(|entry| Arc::clone(&entry.resource))
	}

	/// Names of registered resources, in registration order.
	pub fn names(&self) -> Vec<String> {
		self.resources.lock().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.resources.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.resources.lock().is_empty()
	}

	/// Names of the resources that are busy right now.
	pub fn busy_resources(&self) -> Vec<String> {
		// Resources may touch the filesystem, so query them outside the lock.
		let snapshot: Vec<_> = self
			.resources
			.lock()
			.values()
			.map(|entry| Arc::clone(&entry.resource))
			.collect();
		snapshot
			.iter()
			.filter(|resource| !resource.is_idle_now())
			.map(|resource| resource.name().to_string())
			.collect()
	}

	pub fn is_idle_now(&self) -> bool {
		self.busy_resources().is_empty()
	}

	/// Waits until every registered resource is idle.
	///
	/// Returns the time spent waiting.
	///
	/// # Errors
	///
	/// Returns [`Error::IdleTimeout`] naming the busy resources if
	/// `policy.timeout` elapses first.
	pub async fn wait_for_idle(&self, policy: IdlePolicy) -> Result<Duration> {
		let start = Instant::now();
		let deadline = start + policy.timeout;
		let poll_interval = policy.poll_interval.max(IdlePolicy::MIN_POLL_INTERVAL);

		loop {
			let notified = self.idle.notified();

			let busy = self.busy_resources();
			if busy.is_empty() {
				let waited = start.elapsed();
				debug!(target: "idlers", waited_ms = waited.as_millis() as u64, "all idling resources idle");
				return Ok(waited);
			}

			let remaining = deadline.saturating_duration_since(Instant::now());
			if remaining.is_zero() {
				warn!(target: "idlers", busy = ?busy, "timed out waiting for idling resources");
				return Err(Error::IdleTimeout {
					busy,
					timeout_ms: policy.timeout.as_millis() as u64,
				});
			}

			tokio::select! {
				biased;
				_ = notified => {}
				_ = tokio::time::sleep(poll_interval.min(remaining)) => {}
			}
		}
	}
}

impl Drop for IdlingRegistrar {
	fn drop(&mut self) {
		for entry in self.resources.get_mut().values() {
			entry.resource.remove_idle_transition_callback(entry.callback);
		}
	}
}
