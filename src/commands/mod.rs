//! Command implementations
//!
//! Each submodule implements one CLI command's `run` entry point.

pub mod completions;
pub mod provision;
pub mod status;
pub mod version;
