//! Command-line argument parsing

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "registry-migrator")]
#[command(about = "A tool to migrate Docker Registry images to quay.io")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(long = "verbose", short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors
    #[arg(long = "quiet", short = 'q', global = true)]
    pub quiet: bool,

    /// Timeout in seconds for registry and API requests
    #[arg(long = "timeout", short = 't', global = true, env = "REGISTRY_MIGRATOR_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Skip TLS verification
    #[arg(long = "skip-tls", short = 'k', global = true)]
    pub skip_tls: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generates a configuration file to work from
    #[command(name = "generate-config", visible_alias = "gc")]
    GenerateConfig(GenerateArgs),

    /// Validates that a configuration file is complete
    #[command(visible_alias = "v")]
    Validate(FileArgs),

    /// Shows what a migration would do without changing anything
    #[command(visible_alias = "sim")]
    Simulate(FileArgs),

    /// Migrates the configured images and tags
    #[command(visible_alias = "m")]
    Migrate(MigrateArgs),
}

#[derive(ClapArgs, Debug)]
pub struct FileArgs {
    /// The configuration file
    #[arg(long = "filename", short = 'f', default_value = "config.json")]
    pub filename: PathBuf,
}

#[derive(ClapArgs, Debug)]
pub struct GenerateArgs {
    /// The file to write the config to
    #[arg(long = "filename", short = 'f', default_value = "config.json")]
    pub filename: PathBuf,

    /// URL of the source Docker Registry (https://docker.something.io)
    #[arg(long = "registry-url", env = "REGISTRY_MIGRATOR_SOURCE_URL")]
    pub registry_url: String,

    /// Username to access the source Docker Registry with
    #[arg(long = "registry-username", env = "REGISTRY_MIGRATOR_SOURCE_USERNAME")]
    pub registry_username: String,

    /// Password for the source Docker Registry
    #[arg(
        long = "registry-password",
        env = "REGISTRY_MIGRATOR_SOURCE_PASSWORD",
        hide_env_values = true
    )]
    pub registry_password: String,

    /// Destination namespace (what comes after quay.io/)
    #[arg(long = "namespace", env = "REGISTRY_MIGRATOR_NAMESPACE")]
    pub namespace: String,

    /// Username to access the destination registry with
    #[arg(long = "quay-username", env = "REGISTRY_MIGRATOR_QUAY_USERNAME")]
    pub quay_username: String,

    /// Password for the destination registry
    #[arg(
        long = "quay-password",
        env = "REGISTRY_MIGRATOR_QUAY_PASSWORD",
        hide_env_values = true
    )]
    pub quay_password: String,
}

#[derive(ClapArgs, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub file: FileArgs,

    /// docker-compatible engine used to pull, tag and push
    #[arg(long = "engine", default_value = "docker", env = "REGISTRY_MIGRATOR_ENGINE")]
    pub engine: String,

    /// Do not push a tag whose retag step failed
    #[arg(long = "skip-push-on-retag-failure")]
    pub skip_push_on_retag_failure: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Args::parse()
    }
}
