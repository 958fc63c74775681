//! Per-image, per-tag migration with failure isolation
//!
//! For each image: fetch its tags, then for each tag pull from the source,
//! retag for the destination and push; afterwards set visibility and grant the
//! admin team. A failed tag list skips only that image. A failed pull skips the
//! rest of that tag. Nothing aborts the run.

use crate::common::{DestinationConfigurator, TagLister, TeamRole, TransferEngine};
use crate::config::{Configuration, ImageEntry};
use crate::logging::Logger;
use crate::migration::report::{ImageOutcome, ImageState, MigrationReport, StepStatus, TagOutcome};
use crate::transfer::ImageReference;

/// What to do with the push when retagging a tag failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetagFailurePolicy {
    /// Log the retag failure and push anyway
    #[default]
    AttemptPush,
    /// Skip the push for that tag
    SkipPush,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationOptions {
    pub retag_failure: RetagFailurePolicy,
}

impl MigrationOptions {
    pub fn with_retag_failure(mut self, policy: RetagFailurePolicy) -> Self {
        self.retag_failure = policy;
        self
    }
}

pub struct Migrator<'a> {
    tags: &'a dyn TagLister,
    engine: &'a dyn TransferEngine,
    destination: &'a dyn DestinationConfigurator,
    options: MigrationOptions,
    output: Logger,
}

impl<'a> Migrator<'a> {
    pub fn new(
        tags: &'a dyn TagLister,
        engine: &'a dyn TransferEngine,
        destination: &'a dyn DestinationConfigurator,
        output: Logger,
    ) -> Self {
        Self {
            tags,
            engine,
            destination,
            options: MigrationOptions::default(),
            output,
        }
    }

    pub fn with_options(mut self, options: MigrationOptions) -> Self {
        self.options = options;
        self
    }

    /// Migrate every image of a validated configuration, in order
    pub async fn migrate(&self, config: &Configuration) -> MigrationReport {
        let source_host = config.source.normalized_host();
        let total = config.images.len();
        let mut report = MigrationReport::default();

        self.output
            .section("Starting Docker Registry -> Quay.io migration");
        self.output.info(&format!("Migrating {} images", total));

        for (index, image) in config.images.iter().enumerate() {
            self.output.subsection(&format!(
                "Migrating image: {} (image {}/{})",
                image.source_name,
                index + 1,
                total
            ));

            let outcome = self.migrate_image(config, &source_host, image).await;
            if outcome.state == ImageState::Done {
                self.output
                    .success(&format!("Migration of {} image complete", image.source_name));
            } else {
                self.output.warning(&format!(
                    "Migration of {} image finished with errors",
                    image.source_name
                ));
            }
            report.images.push(outcome);
        }

        report
    }

    async fn migrate_image(
        &self,
        config: &Configuration,
        source_host: &str,
        image: &ImageEntry,
    ) -> ImageOutcome {
        let mut outcome = ImageOutcome::new(&image.source_name, &image.dest_name);

        let tags = match self.tags.list_tags(&config.source, &image.source_name).await {
            Ok(tags) => tags,
            Err(e) => {
                self.output.error(&format!(
                    "Unable to get tag list for image {}: {}",
                    image.source_name, e
                ));
                outcome.tag_list_error = Some(e.to_string());
                self.transition(&mut outcome, ImageState::Failed);
                return outcome;
            }
        };
        self.transition(&mut outcome, ImageState::TagsFetched);

        self.output.info(&format!("Migrating {} tags", tags.len()));
        self.transition(&mut outcome, ImageState::TagsMigrating);

        let source_repository = format!("{}/{}", source_host, image.source_name);
        let dest_repository = config.destination.repository_reference(&image.dest_name);

        for (index, tag) in tags.iter().enumerate() {
            self.output
                .step(&format!("Migrating tag {}/{}: {}", index + 1, tags.len(), tag));
            let source = ImageReference::new(&source_repository, tag);
            let target = ImageReference::new(&dest_repository, tag);
            outcome.tags.push(self.migrate_tag(&source, &target).await);
        }

        self.post_configure(config, image, &mut outcome).await;
        self.transition(&mut outcome, ImageState::PostConfigured);

        let terminal = if outcome.has_failures() {
            ImageState::Failed
        } else {
            ImageState::Done
        };
        self.transition(&mut outcome, terminal);
        outcome
    }

    async fn migrate_tag(&self, source: &ImageReference, target: &ImageReference) -> TagOutcome {
        let mut outcome = TagOutcome::new(&source.tag);

        self.output.detail(&format!("Pulling {}", source));
        outcome.pull = StepStatus::from_result(self.engine.pull(source).await);
        if let StepStatus::Failed(error) = &outcome.pull {
            self.output
                .error(&format!("Could not pull tag: {} Message: {}", source.tag, error));
            return outcome;
        }

        self.output
            .detail(&format!("Tagging image {} -> {}", source, target));
        outcome.retag = StepStatus::from_result(self.engine.tag(source, target).await);
        if let StepStatus::Failed(error) = &outcome.retag {
            self.output
                .error(&format!("Could not retag tag: {} Message: {}", source.tag, error));
            if self.options.retag_failure == RetagFailurePolicy::SkipPush {
                return outcome;
            }
        }

        self.output.detail(&format!("Pushing {}", target));
        outcome.push = StepStatus::from_result(self.engine.push(target).await);
        if let StepStatus::Failed(error) = &outcome.push {
            self.output
                .error(&format!("Could not push tag: {} Message: {}", target.tag, error));
        }

        outcome
    }

    async fn post_configure(
        &self,
        config: &Configuration,
        image: &ImageEntry,
        outcome: &mut ImageOutcome,
    ) {
        let namespace = &config.destination.namespace;

        if image.public {
            self.output
                .info(&format!("Making {} image public", image.dest_name));
            let status = StepStatus::from_result(
                self.destination
                    .set_visibility(namespace, &image.dest_name, true)
                    .await,
            );
            if let StepStatus::Failed(error) = &status {
                self.output.error(error);
            }
            outcome.visibility = Some(status);
        }

        if let Some(team) = image.admin_team() {
            self.output.info(&format!(
                "Assigning {} team to {} image",
                team, image.dest_name
            ));
            let status = StepStatus::from_result(
                self.destination
                    .grant_team_role(namespace, &image.dest_name, team, TeamRole::Admin)
                    .await,
            );
            if let StepStatus::Failed(error) = &status {
                self.output.error(error);
            }
            outcome.team_grant = Some(status);
        }
    }

    fn transition(&self, outcome: &mut ImageOutcome, next: ImageState) {
        self.output.verbose(&format!(
            "{}: {} -> {}",
            outcome.source_name, outcome.state, next
        ));
        outcome.state = next;
    }
}
