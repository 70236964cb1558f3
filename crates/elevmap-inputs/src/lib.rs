// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # elevmap-inputs
//!
//! Input source configuration for elevation mapping.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   InputSourceManager                │  ← one Input per listed source
//! └─────────────────────────────────────┘
//!           ↓
//! ┌─────────────────────────────────────┐
//! │   Input                             │  ← reads fields, publishes snapshot
//! │     SnapshotCell<InputParameters>   │  ← atomic replace, copy-on-read
//! │     dyn SensorProcessor             │  ← chosen by sensor_processor.type
//! └─────────────────────────────────────┘
//!           ↓
//! ┌─────────────────────────────────────┐
//! │   NodeContext                       │  ← parameters, logging, name expansion
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use elevmap_config::{InMemoryParameterStore, NodeConfig};
//! use elevmap_inputs::{GeneralParameters, Input, NodeContext, SensorProcessorType};
//! use std::sync::Arc;
//!
//! let store = InMemoryParameterStore::new()
//!     .with("input_sources.lidar.type", "pointcloud")
//!     .with("input_sources.lidar.topic", "/lidar/points")
//!     .with("input_sources.lidar.queue_size", 1i64)
//!     .with("input_sources.lidar.publish_on_update", true)
//!     .with("input_sources.lidar.sensor_processor.type", "laser");
//!
//! let input = Input::new(NodeContext::new(NodeConfig::default(), Arc::new(store)));
//! assert!(input.configure("lidar", "input_sources", &GeneralParameters::default()));
//! assert_eq!(input.sensor_processor_type(), Some(SensorProcessorType::Laser));
//! assert_eq!(input.subscribed_topic().unwrap(), "/lidar/points");
//! ```

pub mod error;
pub mod input;
pub mod manager;
pub mod naming;
pub mod parameters;
pub mod sensor_processors;
pub mod services;
pub mod snapshot;

pub use error::{ConfigureFailure, InputError, InputResult};
pub use input::Input;
pub use manager::InputSourceManager;
pub use naming::{expand_topic_name, NameError, RosNameExpander};
pub use parameters::InputParameters;
pub use sensor_processors::{
    create_sensor_processor, GeneralParameters, SensorProcessor, SensorProcessorType,
};
pub use services::{
    DiagnosticLogger, NameExpander, NodeContext, RecordingLogger, Severity, TracingLogger,
};
pub use snapshot::SnapshotCell;
