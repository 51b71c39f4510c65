//! Output module for persisting harvest results
//!
//! The validated collection is written once, as a single pretty-printed
//! JSON array. There is no incremental or partial persistence.

mod json;

pub use json::write_results;
