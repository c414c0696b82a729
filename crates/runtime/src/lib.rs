//! Idling runtime: resolves idling resources by class name and waits on them.
//!
//! A session names the idling resources it wants in a single
//! comma-separated `classNames` string. This crate turns that string into
//! live resources and tracks them:
//!
//! - **Catalog**: [`ResourceCatalog`] maps class names to factories registered up front
//! - **Resolver**: [`IdlingResourceResolver`] splits the request and invokes factories
//! - **Registrar**: [`IdlingRegistrar`] owns registered resources and waits for idleness
//! - **Built-ins**: counting, file-presence and deadline resources
//!
//! # Architecture
//!
//! ```text
//! "a.B, c.D" ──► IdlingResourceResolver ──► Vec<Arc<dyn IdlingResource>> ──► IdlingRegistrar
//!                       │                                                        │
//!                       ▼                                                        ▼
//!                ResourceCatalog                                          wait_for_idle()
//!          (class name → factory closure)                            (Notify + poll interval)
//! ```

pub mod builtin;
pub mod catalog;
pub mod error;
pub mod registrar;
pub mod resolver;
pub mod resource;

pub use builtin::{
	AlwaysIdle, COUNTING_CLASS, CountingIdlingResource, DeadlineIdlingResource, FileIdlingResource,
};
pub use catalog::{ALWAYS_IDLE_CLASS, ClassEntry, Factory, ResourceCatalog, is_qualified_name};
pub use error::{Error, Result};
pub use idlers_protocol as protocol;
pub use registrar::{IdlePolicy, IdlingRegistrar};
pub use resolver::{IdlingResourceResolver, ResolvedResource};
pub use resource::{CallbackId, IdleCallback, IdlingResource, TransitionCallbacks};
