//! # elevmap - Elevation Mapping Input Sources
//!
//! Configures the data inputs of an elevation mapping node: each input source
//! is read from a parameter section, published as an immutable snapshot, and
//! paired with the sensor processor that will turn its point clouds into
//! elevation measurements.
//!
//! ## Feature Flags
//!
//! - **`observability`** (default): logging setup helpers
//!
//! ## Usage
//!
//! ```rust,no_run
//! use elevmap::prelude::*;
//! use std::sync::Arc;
//!
//! let config = load_config(None, None)?;
//! validate_config(&config)?;
//!
//! // --debug-<crate> flags and ELEVMAP_DEBUG raise individual crates above logging.level
//! let debug_flags = elevmap::observability::parse_debug_flags();
//! elevmap::observability::init_logging(&debug_flags, &config.logging.level)?;
//!
//! let store = Arc::new(config.parameter_store());
//! let context = NodeContext::new(config.node.clone(), store);
//!
//! let mut manager = InputSourceManager::new(context);
//! if !manager.configure_from_parameters("input_sources") {
//!     eprintln!("some input sources failed to configure");
//! }
//! for source in manager.sources() {
//!     println!("{} -> {:?}", source.name(), source.subscribed_topic());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use elevmap_config as config;
pub use elevmap_inputs as inputs;

#[cfg(feature = "observability")]
pub use elevmap_observability as observability;

/// Prelude with the most commonly used types
pub mod prelude {
    pub use elevmap_config::{
        load_config, validate_config, ElevmapConfig, InMemoryParameterStore, NodeConfig,
        ParameterStore, ParameterValue, TomlParameterStore,
    };
    pub use elevmap_inputs::{
        ConfigureFailure, GeneralParameters, Input, InputError, InputParameters,
        InputSourceManager, NodeContext, SensorProcessor, SensorProcessorType,
    };
}
