//! Dry run of a migration
//!
//! The simulator reads tag lists from the source registry but never pulls,
//! pushes or changes anything on the destination.

use crate::common::TagLister;
use crate::config::{Configuration, ImageEntry};
use crate::error::TransportError;
use crate::logging::Logger;
use futures::stream::{self, Stream, StreamExt};
use std::fmt;

const SEPARATOR: &str = "------------------------------------------";

/// What the migrator would do for one image
#[derive(Debug, Clone)]
pub struct SimulationEntry {
    pub source_name: String,
    pub source_reference: String,
    pub dest_reference: String,
    pub tag_count: Result<usize, TransportError>,
    pub public: bool,
    pub admin_team: Option<String>,
}

impl fmt::Display for SimulationEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Migrating image: {}", self.source_name)?;
        writeln!(f, "Name: {} -> {}", self.source_reference, self.dest_reference)?;
        match &self.tag_count {
            Ok(count) => writeln!(f, "Would have migrated {} tags", count)?,
            Err(e) => writeln!(f, "Could not determine the tags to migrate: {}", e)?,
        }
        writeln!(f, "Would have set the repository to public: {}", self.public)?;
        match &self.admin_team {
            Some(team) => writeln!(f, "Admin team would have been set to: {}", team),
            None => writeln!(f, "No admin team would have been set"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SimulationReport {
    pub entries: Vec<SimulationEntry>,
}

impl SimulationReport {
    pub fn tag_list_failures(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.tag_count.is_err())
            .count()
    }

    /// Tags that would be migrated across images whose tag list was readable
    pub fn total_tags(&self) -> usize {
        self.entries
            .iter()
            .filter_map(|entry| entry.tag_count.as_ref().ok())
            .sum()
    }
}

impl fmt::Display for SimulationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Migrating {} images....", self.entries.len())?;
        writeln!(f, "\n{}\n", SEPARATOR)?;
        for entry in &self.entries {
            write!(f, "{}", entry)?;
            writeln!(f, "\n{}\n", SEPARATOR)?;
        }
        write!(f, "Simulation complete")
    }
}

pub struct Simulator<'a> {
    tags: &'a dyn TagLister,
    output: Logger,
}

impl<'a> Simulator<'a> {
    pub fn new(tags: &'a dyn TagLister, output: Logger) -> Self {
        Self { tags, output }
    }

    /// Lazily produce one entry per image, in configuration order.
    ///
    /// Each call starts a fresh pass over the configuration and re-reads the
    /// tag lists.
    pub fn entries<'c>(
        &'c self,
        config: &'c Configuration,
    ) -> impl Stream<Item = SimulationEntry> + 'c {
        stream::iter(config.images.iter()).then(move |image| self.simulate_image(config, image))
    }

    pub async fn simulate(&self, config: &Configuration) -> SimulationReport {
        SimulationReport {
            entries: self.entries(config).collect().await,
        }
    }

    async fn simulate_image(&self, config: &Configuration, image: &ImageEntry) -> SimulationEntry {
        let tag_count = self
            .tags
            .list_tags(&config.source, &image.source_name)
            .await
            .map(|tags| tags.len());

        if let Err(e) = &tag_count {
            self.output.warning(&format!(
                "Unable to get tag list for image {}: {}",
                image.source_name, e
            ));
        }

        SimulationEntry {
            source_name: image.source_name.clone(),
            source_reference: format!("{}/{}", config.source.url, image.source_name),
            dest_reference: config.destination.repository_reference(&image.dest_name),
            tag_count,
            public: image.public,
            admin_team: image.admin_team().map(str::to_string),
        }
    }
}
