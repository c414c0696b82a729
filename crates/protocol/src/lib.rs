//! Wire types for idling-resource requests.
//!
//! This crate holds the serde-serializable shapes exchanged between a
//! session front end and the idling runtime. Types here are pure data:
//! behavior beyond parsing the request string lives in `idlers-runtime`.

pub mod params;
pub mod status;

pub use params::*;
pub use status::*;
