// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Sensor processors and the factory selecting one from a type tag
//!
//! The set of processors is closed: adding one means adding a
//! [`SensorProcessorType`] variant, and the compiler then points at every
//! `match` that must learn about it.

mod base;
mod laser;
mod perfect;
mod stereo;
mod structured_light;

pub use base::{BaseParameters, GeneralParameters, SensorProcessorBase};
pub use laser::{LaserParameters, LaserSensorProcessor};
pub use perfect::PerfectSensorProcessor;
pub use stereo::{StereoParameters, StereoSensorProcessor};
pub use structured_light::{StructuredLightParameters, StructuredLightSensorProcessor};

use crate::error::{InputError, InputResult};
use crate::services::NodeContext;
use std::any::Any;
use std::fmt;

/// Converts raw sensor data into elevation measurements
///
/// Construction never fails; all validation happens in
/// [`read_parameters`](SensorProcessor::read_parameters).
pub trait SensorProcessor: fmt::Debug + Send + Sync {
    fn processor_type(&self) -> SensorProcessorType;

    fn base(&self) -> &SensorProcessorBase;

    /// Resolve parameters stored under `<config_namespace>.sensor_processor`
    ///
    /// # Errors
    /// * `InputError::StrategyParameterResolutionFailed` - A parameter has the
    ///   wrong type or an out-of-range value
    fn read_parameters(&self, config_namespace: &str) -> InputResult<()>;

    fn as_any(&self) -> &dyn Any;
}

/// Sensor processor variants, keyed by their `sensor_processor.type` tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorProcessorType {
    StructuredLight,
    Stereo,
    Laser,
    Perfect,
}

impl SensorProcessorType {
    pub const ALL: [SensorProcessorType; 4] = [
        SensorProcessorType::StructuredLight,
        SensorProcessorType::Stereo,
        SensorProcessorType::Laser,
        SensorProcessorType::Perfect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorProcessorType::StructuredLight => "structured_light",
            SensorProcessorType::Stereo => "stereo",
            SensorProcessorType::Laser => "laser",
            SensorProcessorType::Perfect => "perfect",
        }
    }

    /// Construct a fresh, unconfigured processor of this type
    pub fn create(
        self,
        context: NodeContext,
        general: GeneralParameters,
    ) -> Box<dyn SensorProcessor> {
        match self {
            SensorProcessorType::StructuredLight => {
                Box::new(StructuredLightSensorProcessor::new(context, general))
            }
            SensorProcessorType::Stereo => Box::new(StereoSensorProcessor::new(context, general)),
            SensorProcessorType::Laser => Box::new(LaserSensorProcessor::new(context, general)),
            SensorProcessorType::Perfect => Box::new(PerfectSensorProcessor::new(context, general)),
        }
    }
}

impl fmt::Display for SensorProcessorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SensorProcessorType {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InputError::UnknownStrategyType(s.to_string()))
    }
}

/// Construct the sensor processor named by `type_tag`
///
/// # Errors
/// * `InputError::UnknownStrategyType` - `type_tag` names no processor
pub fn create_sensor_processor(
    type_tag: &str,
    context: NodeContext,
    general: GeneralParameters,
) -> InputResult<Box<dyn SensorProcessor>> {
    let processor_type: SensorProcessorType = type_tag.parse()?;
    Ok(processor_type.create(context, general))
}
