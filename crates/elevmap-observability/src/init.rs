// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization for elevmap

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;

/// Install a console subscriber filtered by `default_level` and the debug flags
///
/// `RUST_LOG`, when set, takes precedence over both.
///
/// # Errors
/// Fails if the filter directives are malformed or a global subscriber is
/// already installed.
pub fn init_logging(debug_flags: &CrateDebugFlags, default_level: &str) -> Result<()> {
    let directives = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| debug_flags.to_filter_string(&default_level.to_lowercase()));
    let env_filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("Invalid log filter: {}", directives))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_filter(env_filter);

    Registry::default()
        .with(console_layer)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Initialize logging at `info` with debug flags from args and environment
pub fn init_logging_default() -> Result<()> {
    init_logging(&crate::cli::parse_debug_flags(), "info")
}
