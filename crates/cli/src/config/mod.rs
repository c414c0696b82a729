//! CLI configuration: declared idling resources and wait defaults.
//!
//! A global file (`<config dir>/idlers/config.json`) is layered under a
//! project file (`./.idlers/config.json`); `--config` replaces both.

mod catalog;
mod storage;
mod types;


pub use catalog::build_catalog;
pub use storage::{ConfigPaths, load_config, read_config};
pub use types::{CliConfig, Defaults, ResourceDecl, SCHEMA_VERSION};
