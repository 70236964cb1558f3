// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Laser range finder processor

use super::base::{GeneralParameters, SensorProcessorBase};
use super::{SensorProcessor, SensorProcessorType};
use crate::error::InputResult;
use crate::services::NodeContext;
use crate::snapshot::SnapshotCell;
use std::any::Any;

/// Beam noise model coefficients
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaserParameters {
    pub min_radius: f64,
    pub beam_angle: f64,
    pub beam_constant: f64,
}

#[derive(Debug)]
pub struct LaserSensorProcessor {
    base: SensorProcessorBase,
    parameters: SnapshotCell<LaserParameters>,
}

impl LaserSensorProcessor {
    pub fn new(context: NodeContext, general: GeneralParameters) -> Self {
        Self {
            base: SensorProcessorBase::new(context, general),
            parameters: SnapshotCell::default(),
        }
    }

    pub fn parameters(&self) -> LaserParameters {
        self.parameters.read()
    }
}

impl SensorProcessor for LaserSensorProcessor {
    fn processor_type(&self) -> SensorProcessorType {
        SensorProcessorType::Laser
    }

    fn base(&self) -> &SensorProcessorBase {
        &self.base
    }

    fn read_parameters(&self, config_namespace: &str) -> InputResult<()> {
        self.base.read_parameters(config_namespace, self.processor_type())?;

        let reader = self.base.reader(config_namespace, self.processor_type());
        let parameters = LaserParameters {
            min_radius: reader.double("min_radius", 0.0)?,
            beam_angle: reader.double("beam_angle", 0.0)?,
            beam_constant: reader.double("beam_constant", 0.0)?,
        };
        reader.require_non_negative("min_radius", parameters.min_radius)?;
        reader.require_finite("beam_angle", parameters.beam_angle)?;
        reader.require_finite("beam_constant", parameters.beam_constant)?;

        self.parameters.replace(parameters);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
