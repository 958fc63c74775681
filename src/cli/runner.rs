//! Workflow runner for the command-line interface

use crate::cli::args::{Args, Command, FileArgs, GenerateArgs, MigrateArgs};
use crate::config::{
    ConfigValidator, Configuration, DestinationEndpoint, HttpSettings, RegistryEndpoint,
    ValidationMode,
};
use crate::error::Result;
use crate::logging::Logger;
use crate::migration::{
    MigrationOptions, MigrationReport, Migrator, RetagFailurePolicy, Simulator, populate_images,
};
use crate::registry::{QuayApiClient, SourceRegistryClient};
use crate::transfer::DockerCli;
use std::path::Path;
use std::time::Instant;

pub struct Runner {
    args: Args,
    output: Logger,
    settings: HttpSettings,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        let output = if args.quiet {
            Logger::new_quiet()
        } else {
            Logger::new(args.verbose)
        };

        let mut settings = HttpSettings::from_env();
        if let Some(timeout) = args.timeout {
            settings = settings.with_timeout(timeout);
        }
        if args.skip_tls {
            settings = settings.with_skip_tls(true);
        }

        Self {
            args,
            output,
            settings,
        }
    }

    pub fn output(&self) -> &Logger {
        &self.output
    }

    pub async fn run(&self) -> Result<()> {
        let start_time = Instant::now();

        match &self.args.command {
            Command::GenerateConfig(args) => self.generate_config(args).await?,
            Command::Validate(args) => self.validate(args)?,
            Command::Simulate(args) => self.simulate(args).await?,
            Command::Migrate(args) => self.migrate(args).await?,
        }

        self.output.verbose(&format!(
            "Finished in {}",
            self.output.format_duration(start_time.elapsed())
        ));
        Ok(())
    }

    async fn generate_config(&self, args: &GenerateArgs) -> Result<()> {
        self.output.section("Generating configuration");

        let source = RegistryEndpoint::new(
            args.registry_url.trim(),
            args.registry_username.trim(),
            args.registry_password.trim(),
        );
        let destination = DestinationEndpoint::new(args.namespace.trim())
            .with_login(args.quay_username.trim(), args.quay_password.trim());
        let mut config = Configuration::new(source, destination);
        ConfigValidator::validate(&config, ValidationMode::Generate)?;

        let client = SourceRegistryClient::from_settings(&self.settings, self.output.clone())?;
        match populate_images(&mut config, &client, &self.output).await {
            Ok(()) => self.output.success("Complete!"),
            Err(e) => {
                self.output
                    .error(&format!("There was an error while populating information: {}", e));
                self.output.warning("Writing an incomplete config file....");
            }
        }

        config.save(&args.filename)?;
        self.output.success(&format!(
            "Your configuration file has been generated and saved to {}",
            args.filename.display()
        ));
        self.output.info(
            "Add the destination \"oauth_token\" and review image names before running simulate or migrate",
        );
        Ok(())
    }

    /// Load and validate a configuration for simulate/migrate, printing any warnings
    fn load_config(&self, path: &Path) -> Result<Configuration> {
        self.output
            .step(&format!("Validating config file {}", path.display()));

        let config = Configuration::load(path)?;
        ConfigValidator::validate(&config, ValidationMode::Migrate)?;

        for warning in ConfigValidator::warnings(&config) {
            self.output.warning(&warning.to_string());
        }
        Ok(config)
    }

    fn validate(&self, args: &FileArgs) -> Result<()> {
        self.output.section("Validating config file");
        let config = self.load_config(&args.filename)?;
        self.output.success(&format!(
            "Configuration file is valid! ({} images)",
            config.images.len()
        ));
        Ok(())
    }

    async fn simulate(&self, args: &FileArgs) -> Result<()> {
        let config = self.load_config(&args.filename)?;
        self.output
            .section("Simulating Docker Registry -> Quay.io migration");

        let client = SourceRegistryClient::from_settings(&self.settings, self.output.clone())?;
        let simulator = Simulator::new(&client, self.output.clone());
        let report = simulator.simulate(&config).await;

        self.output.block(&report.to_string());
        self.output.summary_kv(
            "Simulation summary",
            &[
                ("Images", report.entries.len().to_string()),
                ("Tags", report.total_tags().to_string()),
                ("Tag list failures", report.tag_list_failures().to_string()),
            ],
        );
        Ok(())
    }

    async fn migrate(&self, args: &MigrateArgs) -> Result<()> {
        let config = self.load_config(&args.file.filename)?;

        let tags = SourceRegistryClient::from_settings(&self.settings, self.output.clone())?;
        let destination =
            QuayApiClient::for_destination(&config.destination, &self.settings, self.output.clone())?;
        let engine = DockerCli::with_program(&args.engine, self.output.clone());

        let policy = if args.skip_push_on_retag_failure {
            RetagFailurePolicy::SkipPush
        } else {
            RetagFailurePolicy::AttemptPush
        };
        let migrator = Migrator::new(&tags, &engine, &destination, self.output.clone())
            .with_options(MigrationOptions::default().with_retag_failure(policy));

        let report = migrator.migrate(&config).await;
        self.print_report(&report);
        Ok(())
    }

    fn print_report(&self, report: &MigrationReport) {
        self.output.summary_kv(
            "Migration summary",
            &[
                ("Images", report.images.len().to_string()),
                ("Images complete", report.images_done().to_string()),
                ("Images with errors", report.images_failed().to_string()),
                ("Tags migrated", report.tags_migrated().to_string()),
                ("Tags with errors", report.tags_failed().to_string()),
                ("Elapsed", self.output.elapsed()),
            ],
        );

        if report.is_success() {
            self.output.success("Migration complete");
        } else {
            self.output.list("Failures", &report.failures());
        }
    }
}
