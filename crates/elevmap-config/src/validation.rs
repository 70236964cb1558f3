//! Configuration validation
//!
//! Ensures the node identity and logging settings are usable before any
//! input source is configured.

use crate::{ConfigError, ConfigResult, ElevmapConfig, LOG_LEVELS};

/// Validation errors that can occur during config validation
#[derive(Debug, Clone)]
pub enum ConfigValidationError {
    MissingRequired { field: String },
    InvalidValue { field: String, reason: String },
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingRequired { field } => {
                write!(f, "Missing required configuration: {}", field)
            }
            Self::InvalidValue { field, reason } => {
                write!(f, "Invalid configuration value for {}: {}", field, reason)
            }
        }
    }
}

/// Validate the complete configuration
///
/// Checks for:
/// - Node name present and free of `/`
/// - Namespace absolute
/// - Known log level
///
/// # Errors
///
/// Returns `ConfigError::ValidationError` listing every problem found
pub fn validate_config(config: &ElevmapConfig) -> ConfigResult<()> {
    let mut errors = Vec::new();

    validate_node(config, &mut errors);
    validate_logging(config, &mut errors);

    if !errors.is_empty() {
        let error_messages = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        return Err(ConfigError::ValidationError(format!(
            "Configuration validation failed:\n{}",
            error_messages
        )));
    }

    Ok(())
}

fn validate_node(config: &ElevmapConfig, errors: &mut Vec<ConfigValidationError>) {
    if config.node.name.is_empty() {
        errors.push(ConfigValidationError::MissingRequired {
            field: "node.name".to_string(),
        });
    } else if config.node.name.contains('/') {
        errors.push(ConfigValidationError::InvalidValue {
            field: "node.name".to_string(),
            reason: "must not contain '/'".to_string(),
        });
    }

    if !config.node.namespace.starts_with('/') {
        errors.push(ConfigValidationError::InvalidValue {
            field: "node.namespace".to_string(),
            reason: "must be absolute (start with '/')".to_string(),
        });
    }
}

fn validate_logging(config: &ElevmapConfig, errors: &mut Vec<ConfigValidationError>) {
    let level = config.logging.level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigValidationError::InvalidValue {
            field: "logging.level".to_string(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }
}
