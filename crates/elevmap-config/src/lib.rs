// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # elevmap Configuration System
//!
//! Type-safe configuration loader and parameter storage for elevmap with support for:
//! - TOML file parsing
//! - Environment variable overrides
//! - CLI argument overrides
//! - Dotted-key parameter lookup (`input_sources.front_camera.topic`)
//!
//! ## Usage
//!
//! ```rust,no_run
//! use elevmap_config::{load_config, ParameterStore};
//!
//! let config = load_config(None, None).expect("Failed to load config");
//! let store = config.parameter_store();
//!
//! println!("Node: {}/{}", config.node.namespace, config.node.name);
//! println!("Topic: {:?}", store.get_string("input_sources.front_camera.topic"));
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod loader;
pub mod store;
pub mod types;
pub mod validation;

pub use loader::{apply_cli_overrides, apply_environment_overrides, find_config_file, load_config};
pub use store::{
    InMemoryParameterStore, ParameterStore, ParameterTypeError, ParameterValue,
    TomlParameterStore,
};
pub use types::*;
pub use validation::{validate_config, ConfigValidationError};

/// Re-export for convenience
pub use serde;

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found. Searched: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid TOML syntax: {0}")]
    ParseError(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
