//! Shared plumbing for the trove crates: argument validation errors and
//! configuration loading.

pub mod config;
pub mod error;
