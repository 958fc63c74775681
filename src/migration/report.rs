//! Outcomes recorded by a migration run

use std::fmt;

/// Result of a single sub-step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Succeeded,
    Failed(String),
    /// Not attempted because an earlier step of the same tag failed
    Skipped,
}

impl StepStatus {
    pub fn from_result<E: fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => StepStatus::Succeeded,
            Err(e) => StepStatus::Failed(e.to_string()),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepStatus::Failed(_))
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, StepStatus::Succeeded)
    }
}

/// Lifecycle of one image within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageState {
    Pending,
    TagsFetched,
    TagsMigrating,
    PostConfigured,
    Done,
    /// Terminal; some or all of the image's work did not succeed
    Failed,
}

impl fmt::Display for ImageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageState::Pending => "pending",
            ImageState::TagsFetched => "tags fetched",
            ImageState::TagsMigrating => "migrating tags",
            ImageState::PostConfigured => "post-configured",
            ImageState::Done => "done",
            ImageState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOutcome {
    pub tag: String,
    pub pull: StepStatus,
    pub retag: StepStatus,
    pub push: StepStatus,
}

impl TagOutcome {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            pull: StepStatus::Skipped,
            retag: StepStatus::Skipped,
            push: StepStatus::Skipped,
        }
    }

    pub fn is_migrated(&self) -> bool {
        self.pull.is_succeeded() && self.retag.is_succeeded() && self.push.is_succeeded()
    }

    pub fn has_failures(&self) -> bool {
        self.pull.is_failed() || self.retag.is_failed() || self.push.is_failed()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOutcome {
    pub source_name: String,
    pub dest_name: String,
    pub state: ImageState,
    /// Set when the tag list could not be fetched; no tags were attempted
    pub tag_list_error: Option<String>,
    pub tags: Vec<TagOutcome>,
    /// `None` when the image is not public
    pub visibility: Option<StepStatus>,
    /// `None` when no admin team is configured
    pub team_grant: Option<StepStatus>,
}

impl ImageOutcome {
    pub fn new(source_name: impl Into<String>, dest_name: impl Into<String>) -> Self {
        Self {
            source_name: source_name.into(),
            dest_name: dest_name.into(),
            state: ImageState::Pending,
            tag_list_error: None,
            tags: Vec::new(),
            visibility: None,
            team_grant: None,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.tag_list_error.is_some()
            || self.tags.iter().any(TagOutcome::has_failures)
            || self.visibility.as_ref().is_some_and(StepStatus::is_failed)
            || self.team_grant.as_ref().is_some_and(StepStatus::is_failed)
    }

    /// Human-readable description of every failed step
    pub fn failures(&self) -> Vec<String> {
        let mut failures = Vec::new();

        if let Some(error) = &self.tag_list_error {
            failures.push(format!("{}: tag list: {}", self.source_name, error));
        }
        for tag in &self.tags {
            for (step, status) in [("pull", &tag.pull), ("tag", &tag.retag), ("push", &tag.push)] {
                if let StepStatus::Failed(error) = status {
                    failures.push(format!("{}:{}: {}: {}", self.source_name, tag.tag, step, error));
                }
            }
        }
        if let Some(StepStatus::Failed(error)) = &self.visibility {
            failures.push(format!("{}: visibility: {}", self.dest_name, error));
        }
        if let Some(StepStatus::Failed(error)) = &self.team_grant {
            failures.push(format!("{}: team: {}", self.dest_name, error));
        }

        failures
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationReport {
    pub images: Vec<ImageOutcome>,
}

impl MigrationReport {
    pub fn images_done(&self) -> usize {
        self.images
            .iter()
            .filter(|image| image.state == ImageState::Done)
            .count()
    }

    pub fn images_failed(&self) -> usize {
        self.images
            .iter()
            .filter(|image| image.state == ImageState::Failed)
            .count()
    }

    pub fn tags_migrated(&self) -> usize {
        self.images
            .iter()
            .flat_map(|image| &image.tags)
            .filter(|tag| tag.is_migrated())
            .count()
    }

    pub fn tags_failed(&self) -> usize {
        self.images
            .iter()
            .flat_map(|image| &image.tags)
            .filter(|tag| tag.has_failures())
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.images.iter().all(|image| image.state == ImageState::Done)
    }

    pub fn failures(&self) -> Vec<String> {
        self.images.iter().flat_map(ImageOutcome::failures).collect()
    }
}
