//! Registry module for source and destination registry interactions
//!
//! This module provides the Docker Registry HTTP API v2 client used to read the
//! source catalog and tag lists, and the quay.io API client used to configure
//! migrated repositories.

pub mod quay;
pub mod source;

pub use quay::QuayApiClient;
pub use source::SourceRegistryClient;
