//! Class catalog: maps class names to idling-resource factories.
//!
//! Resources are looked up by fully-qualified class name, the same way a
//! session asks for them. Instead of loading classes at runtime, every
//! class is registered up front together with the factory that yields its
//! shared instance. The [`IdlingResource`] bound on [`ResourceCatalog::register`]
//! guarantees at registration time that factories return conforming values.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::builtin::{AlwaysIdle, COUNTING_CLASS};
use crate::error::{Error, Result};
use crate::resource::IdlingResource;

/// Factory producing the shared instance of a class.
pub type Factory = Arc<dyn Fn() -> anyhow::Result<Arc<dyn IdlingResource>> + Send + Sync>;

/// Class name of [`AlwaysIdle`] in [`ResourceCatalog::with_builtins`].
pub const ALWAYS_IDLE_CLASS: &str = "idlers.AlwaysIdle";

/// A catalog entry.
#[derive(Clone)]
pub enum ClassEntry {
	/// The class has a zero-argument shared-instance factory.
	Instantiable(Factory),
	/// The class is known but can only be built with arguments.
	Declared,
}

impl ClassEntry {
	pub fn factory(&self) -> Option<&Factory> {
		match self {
			ClassEntry::Instantiable(factory) => Some(factory),
			ClassEntry::Declared => None,
		}
	}

	pub fn is_instantiable(&self) -> bool {
		matches!(self, ClassEntry::Instantiable(_))
	}
}

impl fmt::Debug for ClassEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ClassEntry::Instantiable(_) => f.write_str("Instantiable(..)"),
			ClassEntry::Declared => f.write_str("Declared"),
		}
	}
}

/// Registry of known idling-resource classes, in registration order.
#[derive(Debug, Clone, Default)]
pub struct ResourceCatalog {
	classes: IndexMap<String, ClassEntry>,
}

impl ResourceCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Catalog preloaded with the built-in classes.
	pub fn with_builtins() -> Self {
		let always_idle: Arc<dyn IdlingResource> = Arc::new(AlwaysIdle::new());
		let factory: Factory = Arc::new(move || Ok(Arc::clone(&always_idle)));

		let mut classes = IndexMap::new();
		classes.insert(ALWAYS_IDLE_CLASS.to_string(), ClassEntry::Instantiable(factory));
		classes.insert(COUNTING_CLASS.to_string(), ClassEntry::Declared);
		Self { classes }
	}

	/// Registers a class whose factory yields its instance.
	///
	/// # Errors
	///
	/// - [`Error::InvalidClassName`] if `class` is not a dotted qualified name
	/// - [`Error::DuplicateClass`] if `class` is already in the catalog
	pub fn register<R, F>(&mut self, class: impl Into<String>, factory: F) -> Result<()>
	where
		R: IdlingResource + 'static,
		F: Fn() -> anyhow::Result<Arc<R>> + Send + Sync + 'static,
	{
		let factory: Factory =
			Arc::new(move || factory().map(|resource| resource as Arc<dyn IdlingResource>));
		self.insert(class.into(), ClassEntry::Instantiable(factory))
	}

	/// Registers a class whose factory always returns `instance`.
	pub fn register_shared<R>(&mut self, class: impl Into<String>, instance: Arc<R>) -> Result<()>
	where
		R: IdlingResource + 'static,
	{
		self.register(class, move || Ok(Arc::clone(&instance)))
	}

	/// Declares a class that exists but has no shared-instance factory.
	///
	/// Resolving a declared class fails with [`Error::MissingFactoryMethod`].
	pub fn declare(&mut self, class: impl Into<String>) -> Result<()> {
		self.insert(class.into(), ClassEntry::Declared)
	}

	fn insert(&mut self, class: String, entry: ClassEntry) -> Result<()> {
		if !is_qualified_name(&class) {
			return Err(Error::InvalidClassName(class));
		}
		if self.classes.contains_key(&class) {
			return Err(Error::DuplicateClass(class));
		}
		debug!(target: "idlers", class = %class, entry = ?entry, "registered idling class");
		self.classes.insert(class, entry);
		Ok(())
	}

	pub fn get(&self, class: &str) -> Option<&ClassEntry> {
		self.classes.get(class)
	}

	pub fn contains(&self, class: &str) -> bool {
		self.classes.contains_key(class)
	}

	/// Iterates classes in registration order.
	pub fn classes(&self) -> impl Iterator<Item = (&str, &ClassEntry)> {
		self.classes.iter().map(|(class, entry)| (class.as_str(), entry))
	}

	pub fn len(&self) -> usize {
		self.classes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.classes.is_empty()
	}
}

/// Returns `true` for dotted identifiers such as `com.example.Outer$Inner`.
pub fn is_qualified_name(name: &str) -> bool {
	!name.is_empty() && name.split('.').all(is_identifier)
}

fn is_identifier(segment: &str) -> bool {
	let mut chars = segment.chars();
	match chars.next() {
		Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {}
		_ => return false,
	}
	chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
