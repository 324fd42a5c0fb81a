//! Tooling & Integration Layer
//!
//! Command-line access to the store for shell pipelines and debugging.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
