//! Image transfer through an external container engine
//!
//! Pulling, retagging and pushing are delegated to a docker-compatible
//! command-line engine; the engine's own progress output is streamed to the
//! terminal.

pub mod docker;
pub mod reference;

pub use docker::DockerCli;
pub use reference::ImageReference;
