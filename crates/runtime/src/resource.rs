//! The idling-resource capability.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

/// Callback fired when a resource transitions from busy to idle.
pub type IdleCallback = Arc<dyn Fn() + Send + Sync>;

/// Identifies one registered idle-transition callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

impl CallbackId {
	/// Returns an id that is unique for the lifetime of the process.
	pub fn next() -> Self {
		static NEXT: AtomicU64 = AtomicU64::new(1);
		Self(NEXT.fetch_add(1, Ordering::Relaxed))
	}
}

/// A resource that reports whether the application under test is idle.
///
/// Implementations must report a stable, non-empty [`name`](Self::name);
/// the registrar uses it as the resource's identity.
pub trait IdlingResource: Send + Sync {
	/// Name used for logging and for registrar identity.
	fn name(&self) -> &str;

	/// Returns `true` if the resource is currently idle.
	fn is_idle_now(&self) -> bool;

	/// Registers a callback to be fired on every busy → idle transition
	/// until it is removed under the same `id`.
	///
	/// Resources that cannot detect transitions keep the default no-op and
	/// are polled instead.
	fn register_idle_transition_callback(&self, id: CallbackId, callback: IdleCallback) {
		let _ = (id, callback);
	}

	/// Removes the callback registered under `id`, if any.
	fn remove_idle_transition_callback(&self, id: CallbackId) {
		let _ = id;
	}
}

impl fmt::Debug for dyn IdlingResource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("IdlingResource")
			.field("name", &self.name())
			.field("idle", &self.is_idle_now())
			.finish()
	}
}

/// Storage for idle-transition callbacks, shared by the built-in resources.
#[derive(Default)]
pub struct TransitionCallbacks {
	callbacks: Mutex<Vec<(CallbackId, IdleCallback)>>,
}

impl TransitionCallbacks {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push(&self, id: CallbackId, callback: IdleCallback) {
		self.callbacks.lock().push((id, callback));
	}

	/// Drops the callback stored under `id`.
	pub fn remove(&self, id: CallbackId) {
		self.callbacks.lock().retain(|(existing, _)| *existing != id);
	}

	/// Fires every registered callback.
	///
	/// The list is cloned out of the lock so callbacks may re-enter.
	pub fn notify_idle(&self) {
		let callbacks: Vec<IdleCallback> = self
			.callbacks
			.lock()
			.iter()
			.map(|(_, callback)| Arc::clone(callback))
			.collect();
		for callback in callbacks {
			callback();
		}
	}

	pub fn len(&self) -> usize {
		self.callbacks.lock().len()
	}

	pub fn is_empty(&self) -> bool {
		self.callbacks.lock().is_empty()
	}
}
