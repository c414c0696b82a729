//! Built-in idling resources.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::trace;

use crate::error::{Error, Result};
use crate::resource::{CallbackId, IdleCallback, IdlingResource, TransitionCallbacks};

/// Class name under which [`CountingIdlingResource`] is declared.
pub const COUNTING_CLASS: &str = "idlers.CountingIdlingResource";

/// Resource that is always idle.
#[derive(Debug, Clone)]
pub struct AlwaysIdle {
	name: String,
}

impl AlwaysIdle {
	pub fn new() -> Self {
		Self::named("always-idle")
	}

	pub fn named(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}
}

impl Default for AlwaysIdle {
	fn default() -> Self {
		Self::new()
	}
}

impl IdlingResource for AlwaysIdle {
	fn name(&self) -> &str {
		&self.name
	}

	fn is_idle_now(&self) -> bool {
		true
	}
}

/// Resource that is busy while its counter is above zero.
///
/// Call [`increment`](Self::increment) when work starts and
/// [`decrement`](Self::decrement) when it finishes.
pub struct CountingIdlingResource {
	name: String,
	counter: Mutex<usize>,
	callbacks: TransitionCallbacks,
}

impl CountingIdlingResource {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			counter: Mutex::new(0),
			callbacks: TransitionCallbacks::new(),
		}
	}

	pub fn increment(&self) {
		let mut counter = self.counter.lock();
		*counter += 1;
		trace!(target: "idlers", resource = %self.name, count = *counter, "increment");
	}

	/// Decrements the counter, firing idle callbacks when it reaches zero.
	///
	/// # Errors
	///
	/// Returns [`Error::CounterUnderflow`] if the counter is already zero.
	pub fn decrement(&self) -> Result<()> {
		let now_idle = {
			let mut counter = self.counter.lock();
			if *counter == 0 {
				return Err(Error::CounterUnderflow(self.name.clone()));
			}
			*counter -= 1;
			trace!(target: "idlers", resource = %self.name, count = *counter, "decrement");
			*counter == 0
		};
		if now_idle {
			self.callbacks.notify_idle();
		}
		Ok(())
	}

	pub fn count(&self) -> usize {
		*self.counter.lock()
	}

	/// Number of idle-transition callbacks currently installed.
	pub fn callback_count(&self) -> usize {
		self.callbacks.len()
	}
}

impl IdlingResource for CountingIdlingResource {
	fn name(&self) -> &str {
		&self.name
	}

	fn is_idle_now(&self) -> bool {
		self.count() == 0
	}

	fn register_idle_transition_callback(&self, id: CallbackId, callback: IdleCallback) {
		self.callbacks.push(id, callback);
	}

	fn remove_idle_transition_callback(&self, id: CallbackId) {
		self.callbacks.remove(id);
	}
}

/// Resource that is busy while a file exists, e.g. a lock or marker file.
#[derive(Debug, Clone)]
pub struct FileIdlingResource {
	name: String,
	path: PathBuf,
}

impl FileIdlingResource {
	pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
		Self {
			name: name.into(),
			path: path.into(),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl IdlingResource for FileIdlingResource {
	fn name(&self) -> &str {
		&self.name
	}

	fn is_idle_now(&self) -> bool {
		!self.path.exists()
	}
}

/// Resource that stays busy for a fixed period after creation.
#[derive(Debug, Clone)]
pub struct DeadlineIdlingResource {
	name: String,
	deadline: Instant,
}

impl DeadlineIdlingResource {
	pub fn new(name: impl Into<String>, busy_for: Duration) -> Self {
		Self {
			name: name.into(),
			deadline: Instant::now() + busy_for,
		}
	}

	pub fn remaining(&self) -> Duration {
		self.deadline.saturating_duration_since(Instant::now())
	}
}

impl IdlingResource for DeadlineIdlingResource {
	fn name(&self) -> &str {
		&self.name
	}

	fn is_idle_now(&self) -> bool {
		Instant::now() >= self.deadline
	}
}
