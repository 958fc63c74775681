//! Command line interface module
//!
//! This module provides the entry point for parsing command-line arguments and running
//! the generate, validate, simulate and migrate workflows.

pub mod args;
pub mod runner;

pub use args::Args;
pub use runner::Runner;
