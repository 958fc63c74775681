//! Registry Migrator Library
//!
//! Migrates images and tags from a private Docker Registry to a flat quay.io
//! namespace: configuration, naming, dry runs and the migration itself.

pub mod cli;
pub mod common;
pub mod config;
pub mod error;
pub mod logging;
pub mod migration;
pub mod naming;
pub mod registry;
pub mod transfer;

pub use config::{Configuration, DestinationEndpoint, ImageEntry, RegistryEndpoint};
pub use error::{MigratorError, Result};
pub use logging::Logger;
