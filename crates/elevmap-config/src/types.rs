// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration type definitions
//!
//! This module defines the configuration structs that map to sections in
//! `elevmap_configuration.toml`.

use crate::TomlParameterStore;
use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ElevmapConfig {
    pub node: NodeConfig,
    pub logging: LoggingConfig,
    /// Free-form parameter tree, exposed through [`ElevmapConfig::parameter_store`]
    pub parameters: toml::Table,
}

impl ElevmapConfig {
    /// Flatten the `[parameters]` section into a dotted-key store
    pub fn parameter_store(&self) -> TomlParameterStore {
        TomlParameterStore::from_table(&self.parameters)
    }
}

/// Identity of the node hosting the input sources
///
/// Used when expanding relative and private topic names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NodeConfig {
    pub name: String,
    pub namespace: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: "elevation_mapping".to_string(),
            namespace: "/".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Log levels accepted by [`LoggingConfig::level`]
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
