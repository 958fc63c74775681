//! Image list generation from the source registry catalog

use crate::common::CatalogClient;
use crate::config::{Configuration, ImageEntry};
use crate::error::PopulationError;
use crate::logging::Logger;

/// Replace the configuration's image list with one entry per catalog repository.
///
/// On failure the image list is left empty and the configuration is still
/// usable; the caller decides whether to persist it.
pub async fn populate_images(
    config: &mut Configuration,
    catalog: &dyn CatalogClient,
    output: &Logger,
) -> Result<(), PopulationError> {
    config.images.clear();

    output.step("Populating image information from the Docker Registry");
    let repositories = catalog.list_repositories(&config.source).await?;

    config.images = repositories
        .into_iter()
        .map(ImageEntry::from_source)
        .collect();

    output.success(&format!(
        "Found {} repositories in {}",
        config.images.len(),
        config.source.url
    ));
    for image in &config.images {
        output.detail(&format!("{} -> {}", image.source_name, image.dest_name));
    }

    Ok(())
}
