mod common;

use common::{FakeRegistry, Journal};
use registry_migrator::config::{
    ConfigValidator, Configuration, DestinationEndpoint, RegistryEndpoint, ValidationMode,
};
use registry_migrator::logging::Logger;
use registry_migrator::migration::populate_images;

fn generated() -> Configuration {
    Configuration::new(
        RegistryEndpoint::new("https://docker.example.io", "admin", "secret"),
        DestinationEndpoint::new("acme").with_login("robot", "pw"),
    )
}

#[tokio::test]
async fn test_generated_config_round_trips_through_file() {
    let journal = Journal::default();
    let catalog = FakeRegistry::new(&journal).with_catalog(&["blah/blah", "who/are/you", "sugar/sugar/yes-please"]);
    let mut config = generated();
    assert!(ConfigValidator::validate(&config, ValidationMode::Generate).is_ok());

    populate_images(&mut config, &catalog, &Logger::new_quiet())
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    config.save(&path).unwrap();
    let loaded = Configuration::load(&path).unwrap();

    assert_eq!(loaded, config);
    let names: Vec<_> = loaded.images.iter().map(|image| image.dest_name.as_str()).collect();
    assert_eq!(names, vec!["blah", "who-are-you", "sugar-yes-please"]);

    // The generated file still needs an OAuth token before it can be migrated.
    assert!(ConfigValidator::validate(&loaded, ValidationMode::Migrate).is_err());
}

#[tokio::test]
async fn test_population_failure_still_yields_a_savable_config() {
    let journal = Journal::default();
    let catalog = FakeRegistry::new(&journal).failing("_catalog");
    let mut config = generated();

    assert!(populate_images(&mut config, &catalog, &Logger::new_quiet()).await.is_err());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    config.save(&path).unwrap();
    let loaded = Configuration::load(&path).unwrap();
    assert!(loaded.images.is_empty());
    assert_eq!(loaded.destination.namespace, "acme");
}
