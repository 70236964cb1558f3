// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # elevmap-observability
//!
//! Logging setup shared by the elevmap crates, with per-crate debug flag
//! support (`--debug-elevmap-inputs`, `ELEVMAP_DEBUG=all`, ...).

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod init;

pub use cli::*;
pub use init::*;

/// Known elevmap crate names for debug flags
pub const KNOWN_CRATES: &[&str] = &["elevmap", "elevmap-config", "elevmap-inputs"];

/// Convert a crate name into the tracing target it logs under
///
/// `elevmap-inputs` logs as `elevmap_inputs`.
pub fn crate_target(crate_name: &str) -> String {
    crate_name.replace('-', "_")
}
