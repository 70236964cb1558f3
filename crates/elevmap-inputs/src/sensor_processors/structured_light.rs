// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Structured light (RGB-D) processor

use super::base::{GeneralParameters, SensorProcessorBase};
use super::{SensorProcessor, SensorProcessorType};
use crate::error::InputResult;
use crate::services::NodeContext;
use crate::snapshot::SnapshotCell;
use std::any::Any;

/// Depth noise model and cutoff band
///
/// `normal_factor` holds `normal_factor_a` through `normal_factor_e`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredLightParameters {
    pub normal_factor: [f64; 5],
    pub lateral_factor: f64,
    pub cutoff_min_depth: f64,
    pub cutoff_max_depth: f64,
}

impl Default for StructuredLightParameters {
    fn default() -> Self {
        Self {
            normal_factor: [0.0; 5],
            lateral_factor: 0.0,
            cutoff_min_depth: 0.0,
            cutoff_max_depth: f64::INFINITY,
        }
    }
}

const NORMAL_FACTOR_SUFFIXES: [char; 5] = ['a', 'b', 'c', 'd', 'e'];

#[derive(Debug)]
pub struct StructuredLightSensorProcessor {
    base: SensorProcessorBase,
    parameters: SnapshotCell<StructuredLightParameters>,
}

impl StructuredLightSensorProcessor {
    pub fn new(context: NodeContext, general: GeneralParameters) -> Self {
        Self {
            base: SensorProcessorBase::new(context, general),
            parameters: SnapshotCell::default(),
        }
    }

    pub fn parameters(&self) -> StructuredLightParameters {
        self.parameters.read()
    }
}

impl SensorProcessor for StructuredLightSensorProcessor {
    fn processor_type(&self) -> SensorProcessorType {
        SensorProcessorType::StructuredLight
    }

    fn base(&self) -> &SensorProcessorBase {
        &self.base
    }

    fn read_parameters(&self, config_namespace: &str) -> InputResult<()> {
        self.base.read_parameters(config_namespace, self.processor_type())?;

        let reader = self.base.reader(config_namespace, self.processor_type());
        let defaults = StructuredLightParameters::default();

        let mut normal_factor = defaults.normal_factor;
        for (factor, suffix) in normal_factor.iter_mut().zip(NORMAL_FACTOR_SUFFIXES) {
            let name = format!("normal_factor_{}", suffix);
            *factor = reader.double(&name, *factor)?;
            reader.require_finite(&name, *factor)?;
        }

        let parameters = StructuredLightParameters {
            normal_factor,
            lateral_factor: reader.double("lateral_factor", defaults.lateral_factor)?,
            cutoff_min_depth: reader.double("cutoff_min_depth", defaults.cutoff_min_depth)?,
            cutoff_max_depth: reader.double("cutoff_max_depth", defaults.cutoff_max_depth)?,
        };
        reader.require_non_negative("cutoff_min_depth", parameters.cutoff_min_depth)?;
        let (min, max) = (parameters.cutoff_min_depth, parameters.cutoff_max_depth);
        if min > max || max.is_nan() {
            return Err(reader.invalid(format!(
                "cutoff_min_depth ({}) must not exceed cutoff_max_depth ({})",
                parameters.cutoff_min_depth, parameters.cutoff_max_depth
            )));
        }

        self.parameters.replace(parameters);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
