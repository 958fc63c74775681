//! docker-compatible command-line transfer engine

use crate::common::TransferEngine;
use crate::error::{TransferError, TransferOperation};
use crate::logging::Logger;
use crate::transfer::ImageReference;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

pub const DEFAULT_ENGINE: &str = "docker";

/// Runs `<program> pull|tag|push` for each transfer step
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
    output: Logger,
}

impl DockerCli {
    pub fn new(output: Logger) -> Self {
        Self::with_program(DEFAULT_ENGINE, output)
    }

    /// Use another docker-compatible program, such as `podman`
    pub fn with_program(program: impl Into<String>, output: Logger) -> Self {
        Self {
            program: program.into(),
            output,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the engine for one step
    pub fn arguments(operation: TransferOperation, images: &[&ImageReference]) -> Vec<String> {
        let verb = match operation {
            TransferOperation::Pull => "pull",
            TransferOperation::Tag => "tag",
            TransferOperation::Push => "push",
        };
        std::iter::once(verb.to_string())
            .chain(images.iter().map(|image| image.to_string()))
            .collect()
    }

    async fn run(
        &self,
        operation: TransferOperation,
        images: &[&ImageReference],
    ) -> Result<(), TransferError> {
        let args = Self::arguments(operation, images);
        self.output
            .detail(&format!("Running: {} {}", self.program, args.join(" ")));

        let reference = images
            .iter()
            .map(|image| image.to_string())
            .collect::<Vec<_>>()
            .join(" -> ");

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| TransferError {
                operation,
                reference: reference.clone(),
                reason: format!("failed to run {}: {}", self.program, e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(TransferError {
                operation,
                reference,
                reason: format!("{} exited with {}", self.program, status),
            })
        }
    }
}

#[async_trait]
impl TransferEngine for DockerCli {
    async fn pull(&self, image: &ImageReference) -> Result<(), TransferError> {
        self.run(TransferOperation::Pull, &[image]).await
    }

    async fn tag(
        &self,
        source: &ImageReference,
        target: &ImageReference,
    ) -> Result<(), TransferError> {
        self.run(TransferOperation::Tag, &[source, target]).await
    }

    async fn push(&self, image: &ImageReference) -> Result<(), TransferError> {
        self.run(TransferOperation::Push, &[image]).await
    }
}
