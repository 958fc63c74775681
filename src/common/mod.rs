//! Common module - collaborator interfaces shared across the codebase
//!
//! The migration engine only talks to registries and the container engine
//! through these traits, so every workflow receives its collaborators
//! explicitly.

pub mod traits;

pub use traits::*;
