//! Output generation.
//!
//! # Submodules
//!
//! - [`json`]: writes the dashboard views of a session to a JSON file

pub mod json;
