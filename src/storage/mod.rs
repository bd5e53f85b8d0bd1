//! Persistence module
//!
//! Whole-file JSON snapshots of the user directory and the lesson catalog.

pub mod json_store;

pub use json_store::{JsonStore, Loaded};
