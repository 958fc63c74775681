//! Completeness checks that gate every workflow
//!
//! Validation never touches the network. Image entries are not validated;
//! questionable entries only produce [`ConfigWarning`]s.

use crate::config::Configuration;
use crate::error::{ConfigError, ConfigField};
use std::fmt;

/// Which workflow the configuration is about to be used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// `generate-config`: needs destination login credentials
    Generate,
    /// `simulate` and `migrate`: needs the destination OAuth token
    Migrate,
}

/// Non-fatal observations about a configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    EmptyDestinationName { source_name: String },
    NestedDestinationName { source_name: String, dest_name: String },
    PublicImages { count: usize },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigWarning::EmptyDestinationName { source_name } => {
                write!(f, "Image {} has no destination name", source_name)
            }
            ConfigWarning::NestedDestinationName {
                source_name,
                dest_name,
            } => write!(
                f,
                "Image {} has destination name {} containing '/', which the destination namespace does not allow",
                source_name, dest_name
            ),
            ConfigWarning::PublicImages { count } => write!(
                f,
                "{} image(s) will be made public; entries without a \"public\" field default to public",
                count
            ),
        }
    }
}

pub struct ConfigValidator;

impl ConfigValidator {
    /// Check that every required field is present; the first missing field is reported
    pub fn validate(config: &Configuration, mode: ValidationMode) -> Result<(), ConfigError> {
        Self::validate_source(config)?;

        require(&config.destination.namespace, ConfigField::DestinationNamespace)?;
        if config.destination.namespace.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: ConfigField::DestinationNamespace,
                reason: "namespace must be a single path segment".to_string(),
            });
        }

        match mode {
            ValidationMode::Migrate => {
                let token = config.destination.oauth_token.as_deref().unwrap_or_default();
                require(token, ConfigField::DestinationOAuthToken)
            }
            ValidationMode::Generate => {
                let login = config.destination.login.clone().unwrap_or_default();
                require(&login.username, ConfigField::DestinationUsername)?;
                require(&login.password, ConfigField::DestinationPassword)
            }
        }
    }

    fn validate_source(config: &Configuration) -> Result<(), ConfigError> {
        require(&config.source.url, ConfigField::SourceUrl)?;
        require(&config.source.username, ConfigField::SourceUsername)?;
        require(&config.source.password, ConfigField::SourcePassword)
    }

    /// Collect warnings about image entries and defaults worth a second look
    pub fn warnings(config: &Configuration) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        for image in &config.images {
            if image.dest_name.is_empty() {
                warnings.push(ConfigWarning::EmptyDestinationName {
                    source_name: image.source_name.clone(),
                });
            } else if image.dest_name.contains('/') {
                warnings.push(ConfigWarning::NestedDestinationName {
                    source_name: image.source_name.clone(),
                    dest_name: image.dest_name.clone(),
                });
            }
        }

        let public = config.images.iter().filter(|image| image.public).count();
        if public > 0 {
            warnings.push(ConfigWarning::PublicImages { count: public });
        }

        warnings
    }
}

fn require(value: &str, field: ConfigField) -> Result<(), ConfigError> {
    if value.is_empty() {
        Err(ConfigError::MissingField(field))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DestinationEndpoint, ImageEntry, RegistryEndpoint};

    fn complete() -> Configuration {
        Configuration::new(
            RegistryEndpoint::new("https://docker.example.io", "admin", "secret"),
            DestinationEndpoint::new("acme")
                .with_oauth_token("token")
                .with_login("robot", "pw"),
        )
    }

    fn missing_field(config: &Configuration, mode: ValidationMode) -> Option<ConfigField> {
        match ConfigValidator::validate(config, mode) {
            Err(ConfigError::MissingField(field)) => Some(field),
            _ => None,
        }
    }

    #[test]
    fn test_complete_config_with_no_images_is_valid() {
        let config = complete();
        assert!(config.images.is_empty());
        assert!(ConfigValidator::validate(&config, ValidationMode::Migrate).is_ok());
        assert!(ConfigValidator::validate(&config, ValidationMode::Generate).is_ok());
    }

    #[test]
    fn test_each_required_field_is_checked() {
        let mut config = complete();
        config.source.url.clear();
        assert_eq!(missing_field(&config, ValidationMode::Migrate), Some(ConfigField::SourceUrl));

        let mut config = complete();
        config.source.username.clear();
        assert_eq!(missing_field(&config, ValidationMode::Migrate), Some(ConfigField::SourceUsername));

        let mut config = complete();
        config.source.password.clear();
        assert_eq!(missing_field(&config, ValidationMode::Migrate), Some(ConfigField::SourcePassword));

        let mut config = complete();
        config.destination.namespace.clear();
        assert_eq!(
            missing_field(&config, ValidationMode::Migrate),
            Some(ConfigField::DestinationNamespace)
        );

        let mut config = complete();
        config.destination.oauth_token = None;
        assert_eq!(
            missing_field(&config, ValidationMode::Migrate),
            Some(ConfigField::DestinationOAuthToken)
        );

        let mut config = complete();
        config.destination.oauth_token = Some(String::new());
        assert_eq!(
            missing_field(&config, ValidationMode::Migrate),
            Some(ConfigField::DestinationOAuthToken)
        );
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let mut config = complete();
        config.source.password.clear();
        config.destination.oauth_token = None;
        assert_eq!(missing_field(&config, ValidationMode::Migrate), Some(ConfigField::SourcePassword));
    }

    #[test]
    fn test_generate_mode_needs_login_not_token() {
        let mut config = complete();
        config.destination.oauth_token = None;
        assert!(ConfigValidator::validate(&config, ValidationMode::Generate).is_ok());

        config.destination.login = None;
        assert_eq!(
            missing_field(&config, ValidationMode::Generate),
            Some(ConfigField::DestinationUsername)
        );

        config.destination = config.destination.with_login("robot", "");
        assert_eq!(
            missing_field(&config, ValidationMode::Generate),
            Some(ConfigField::DestinationPassword)
        );
    }

    #[test]
    fn test_namespace_with_slash_is_rejected() {
        let mut config = complete();
        config.destination.namespace = "acme/nested".to_string();
        assert!(matches!(
            ConfigValidator::validate(&config, ValidationMode::Migrate),
            Err(ConfigError::InvalidValue {
                field: ConfigField::DestinationNamespace,
                ..
            })
        ));
    }

    #[test]
    fn test_image_fields_only_warn() {
        let mut config = complete();
        config.images.push(ImageEntry {
            source_name: "a/b".to_string(),
            dest_name: String::new(),
            admin_team: String::new(),
            public: false,
        });
        config.images.push(ImageEntry {
            source_name: "c/d".to_string(),
            dest_name: "c/d".to_string(),
            admin_team: String::new(),
            public: true,
        });

        assert!(ConfigValidator::validate(&config, ValidationMode::Migrate).is_ok());

        let warnings = ConfigValidator::warnings(&config);
        assert_eq!(warnings.len(), 3);
        assert!(matches!(warnings[0], ConfigWarning::EmptyDestinationName { .. }));
        assert!(matches!(warnings[1], ConfigWarning::NestedDestinationName { .. }));
        assert_eq!(warnings[2], ConfigWarning::PublicImages { count: 1 });
    }
}
