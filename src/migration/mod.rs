//! Migration planning and execution
//!
//! - [`populate_images`] builds the image list from the source catalog
//! - [`Simulator`] renders what a migration would do without side effects
//! - [`Migrator`] runs the per-image, per-tag migration and records every outcome
//!
//! Images and tags are processed strictly in order, one step at a time. A
//! failure is recorded and the run moves on; nothing is retried.

pub mod migrator;
pub mod populator;
pub mod report;
pub mod simulator;

pub use migrator::{MigrationOptions, Migrator, RetagFailurePolicy};
pub use populator::populate_images;
pub use report::{ImageOutcome, ImageState, MigrationReport, StepStatus, TagOutcome};
pub use simulator::{SimulationEntry, SimulationReport, Simulator};
