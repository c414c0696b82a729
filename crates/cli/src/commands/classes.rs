//! `idlers classes`: list the catalog.

use idlers_protocol::ClassInfo;

use super::{Emit, emit_success};
use crate::error::Result;
use crate::runtime::RuntimeContext;

pub fn execute(runtime: &RuntimeContext, emit: Emit) -> Result<()> {
	let classes: Vec<ClassInfo> = runtime
		.resolver
		.catalog()
		.classes()
		.map(|(class, entry)| ClassInfo {
			class: class.to_string(),
			instantiable: entry.is_instantiable(),
		})
		.collect();

	emit_success("classes", None, classes, None, emit);
	Ok(())
}
