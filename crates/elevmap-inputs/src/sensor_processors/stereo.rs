// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Stereo camera processor

use super::base::{GeneralParameters, SensorProcessorBase};
use super::{SensorProcessor, SensorProcessorType};
use crate::error::InputResult;
use crate::services::NodeContext;
use crate::snapshot::SnapshotCell;
use std::any::Any;

/// Disparity noise model `p_1`..`p_5` and the accepted depth band
#[derive(Debug, Clone, PartialEq)]
pub struct StereoParameters {
    pub p: [f64; 5],
    pub lateral_factor: f64,
    pub depth_upper_limit: f64,
    pub depth_lower_limit: f64,
}

impl Default for StereoParameters {
    fn default() -> Self {
        Self {
            p: [0.0; 5],
            lateral_factor: 0.0,
            depth_upper_limit: f64::INFINITY,
            depth_lower_limit: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct StereoSensorProcessor {
    base: SensorProcessorBase,
    parameters: SnapshotCell<StereoParameters>,
}

impl StereoSensorProcessor {
    pub fn new(context: NodeContext, general: GeneralParameters) -> Self {
        Self {
            base: SensorProcessorBase::new(context, general),
            parameters: SnapshotCell::default(),
        }
    }

    pub fn parameters(&self) -> StereoParameters {
        self.parameters.read()
    }
}

impl SensorProcessor for StereoSensorProcessor {
    fn processor_type(&self) -> SensorProcessorType {
        SensorProcessorType::Stereo
    }

    fn base(&self) -> &SensorProcessorBase {
        &self.base
    }

    fn read_parameters(&self, config_namespace: &str) -> InputResult<()> {
        self.base.read_parameters(config_namespace, self.processor_type())?;

        let reader = self.base.reader(config_namespace, self.processor_type());
        let defaults = StereoParameters::default();

        let mut p = defaults.p;
        for (i, coefficient) in p.iter_mut().enumerate() {
            let name = format!("p_{}", i + 1);
            *coefficient = reader.double(&name, *coefficient)?;
            reader.require_finite(&name, *coefficient)?;
        }

        let parameters = StereoParameters {
            p,
            lateral_factor: reader.double("lateral_factor", defaults.lateral_factor)?,
            depth_upper_limit: reader.double("depth_upper_limit", defaults.depth_upper_limit)?,
            depth_lower_limit: reader.double("depth_lower_limit", defaults.depth_lower_limit)?,
        };
        reader.require_non_negative("depth_lower_limit", parameters.depth_lower_limit)?;
        let (lower, upper) = (parameters.depth_lower_limit, parameters.depth_upper_limit);
        if lower >= upper || lower.is_nan() || upper.is_nan() {
            return Err(reader.invalid(format!(
                "depth_lower_limit ({}) must be less than depth_upper_limit ({})",
                parameters.depth_lower_limit, parameters.depth_upper_limit
            )));
        }

        self.parameters.replace(parameters);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::sensor_processors::test_support::context_with;
    use elevmap_config::InMemoryParameterStore;

    #[test]
    fn test_reads_coefficients() {
        let store = InMemoryParameterStore::new()
            .with("src.stereo.sensor_processor.p_1", 1.0)
            .with("src.stereo.sensor_processor.p_3", 3i64)
            .with("src.stereo.sensor_processor.p_5", 5.0)
            .with("src.stereo.sensor_processor.depth_upper_limit", 10.0)
            .with("src.stereo.sensor_processor.depth_lower_limit", 0.3);
        let processor = StereoSensorProcessor::new(context_with(store), GeneralParameters::default());

        processor.read_parameters("src.stereo").unwrap();
        let parameters = processor.parameters();
        assert_eq!(parameters.p, [1.0, 0.0, 3.0, 0.0, 5.0]);
        assert_eq!(parameters.depth_upper_limit, 10.0);
        assert_eq!(parameters.depth_lower_limit, 0.3);
    }

    #[test]
    fn test_inverted_depth_band_rejected() {
        let store = InMemoryParameterStore::new()
            .with("src.stereo.sensor_processor.depth_upper_limit", 1.0)
            .with("src.stereo.sensor_processor.depth_lower_limit", 2.0);
        let processor = StereoSensorProcessor::new(context_with(store), GeneralParameters::default());

        assert!(matches!(
            processor.read_parameters("src.stereo"),
            Err(InputError::StrategyParameterResolutionFailed { .. })
        ));
    }

    #[test]
    fn test_nan_depth_limit_rejected() {
        let store = InMemoryParameterStore::new()
            .with("src.stereo.sensor_processor.depth_upper_limit", f64::NAN);
        let processor = StereoSensorProcessor::new(context_with(store), GeneralParameters::default());

        let err = processor.read_parameters("src.stereo").unwrap_err();
        assert!(err.to_string().contains("depth_upper_limit"));
        assert_eq!(processor.parameters(), StereoParameters::default());
    }
}
