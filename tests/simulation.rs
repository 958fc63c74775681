mod common;

use common::{FakeRegistry, Journal, config, image};
use futures::StreamExt;
use registry_migrator::logging::Logger;
use registry_migrator::migration::Simulator;

#[tokio::test]
async fn test_tag_list_failure_does_not_stop_simulation() {
    let journal = Journal::default();
    let registry = FakeRegistry::new(&journal)
        .with_tags("first/app", &["v1", "v2"])
        .failing("second/app")
        .with_tags("third/app", &["latest"]);
    let config = config(vec![
        image("first/app", "first-app", true, ""),
        image("second/app", "second-app", false, "ops"),
        image("third/app", "third-app", true, ""),
    ]);

    let report = Simulator::new(&registry, Logger::new_quiet())
        .simulate(&config)
        .await;

    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.entries[0].tag_count.as_ref().ok(), Some(&2));
    assert!(report.entries[1].tag_count.is_err());
    assert_eq!(report.entries[2].tag_count.as_ref().ok(), Some(&1));
    assert_eq!(report.tag_list_failures(), 1);
    assert_eq!(report.total_tags(), 3);
}

#[tokio::test]
async fn test_simulation_only_reads_tag_lists() {
    let journal = Journal::default();
    let registry = FakeRegistry::new(&journal).with_tags("team/team", &["v1"]);
    let config = config(vec![image("team/team", "team", true, "ops")]);
    let before = config.clone();

    let report = Simulator::new(&registry, Logger::new_quiet())
        .simulate(&config)
        .await;

    assert_eq!(journal.entries(), vec!["list_tags team/team"]);
    assert_eq!(config, before);

    let entry = &report.entries[0];
    assert_eq!(entry.source_reference, "https://docker.example.io/team/team");
    assert_eq!(entry.dest_reference, "quay.io/acme/team");
    assert!(entry.public);
    assert_eq!(entry.admin_team.as_deref(), Some("ops"));

    let text = report.to_string();
    assert!(text.starts_with("Migrating 1 images...."));
    assert!(text.contains("Would have migrated 1 tags"));
    assert!(text.ends_with("Simulation complete"));
}

#[tokio::test]
async fn test_entries_stream_is_lazy_and_restartable() {
    let journal = Journal::default();
    let registry = FakeRegistry::new(&journal)
        .with_tags("a", &["v1"])
        .with_tags("b", &["v1", "v2"]);
    let config = config(vec![image("a", "a", true, ""), image("b", "b", true, "")]);
    let simulator = Simulator::new(&registry, Logger::new_quiet());

    let first: Vec<_> = simulator.entries(&config).take(1).collect().await;
    assert_eq!(first.len(), 1);
    assert_eq!(journal.entries(), vec!["list_tags a"]);

    let all: Vec<_> = simulator.entries(&config).collect().await;
    assert_eq!(all.len(), 2);
    assert_eq!(journal.entries(), vec!["list_tags a", "list_tags a", "list_tags b"]);
}
