// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! State and parameters shared by every sensor processor

use crate::error::{InputError, InputResult};
use crate::sensor_processors::SensorProcessorType;
use crate::services::NodeContext;
use crate::snapshot::SnapshotCell;
use elevmap_config::{ParameterStore, ParameterTypeError};

/// Frame ids common to all sensor processors of a node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralParameters {
    pub robot_base_frame_id: String,
    pub map_frame_id: String,
}

impl Default for GeneralParameters {
    fn default() -> Self {
        Self {
            robot_base_frame_id: "base".to_string(),
            map_frame_id: "map".to_string(),
        }
    }
}

impl GeneralParameters {
    /// Read `robot_base_frame_id` and `map_frame_id`, falling back to defaults
    pub fn from_store(store: &dyn ParameterStore) -> Result<Self, ParameterTypeError> {
        let defaults = Self::default();
        Ok(Self {
            robot_base_frame_id: store
                .get_string("robot_base_frame_id")?
                .unwrap_or(defaults.robot_base_frame_id),
            map_frame_id: store.get_string("map_frame_id")?.unwrap_or(defaults.map_frame_id),
        })
    }
}

/// Point filtering parameters under `sensor_processor.*`
#[derive(Debug, Clone, PartialEq)]
pub struct BaseParameters {
    pub ignore_points_above: f64,
    pub ignore_points_below: f64,
    pub apply_voxelgrid_filter: bool,
    pub voxelgrid_filter_size: f64,
}

impl Default for BaseParameters {
    fn default() -> Self {
        Self {
            ignore_points_above: f64::INFINITY,
            ignore_points_below: f64::NEG_INFINITY,
            apply_voxelgrid_filter: false,
            voxelgrid_filter_size: 0.0,
        }
    }
}

#[derive(Debug)]
pub struct SensorProcessorBase {
    context: NodeContext,
    general: GeneralParameters,
    parameters: SnapshotCell<BaseParameters>,
}

impl SensorProcessorBase {
    pub fn new(context: NodeContext, general: GeneralParameters) -> Self {
        Self {
            context,
            general,
            parameters: SnapshotCell::default(),
        }
    }

    pub fn context(&self) -> &NodeContext {
        &self.context
    }

    pub fn general_parameters(&self) -> &GeneralParameters {
        &self.general
    }

    pub fn parameters(&self) -> BaseParameters {
        self.parameters.read()
    }

    pub(crate) fn reader<'a>(
        &'a self,
        config_namespace: &str,
        processor: SensorProcessorType,
    ) -> ParameterReader<'a> {
        ParameterReader {
            store: self.context.parameters(),
            prefix: format!("{}.sensor_processor", config_namespace),
            processor,
        }
    }

    /// Read and install the common parameters
    pub(crate) fn read_parameters(
        &self,
        config_namespace: &str,
        processor: SensorProcessorType,
    ) -> InputResult<()> {
        let reader = self.reader(config_namespace, processor);
        let defaults = BaseParameters::default();

        let parameters = BaseParameters {
            ignore_points_above: reader.double("ignore_points_above", defaults.ignore_points_above)?,
            ignore_points_below: reader.double("ignore_points_below", defaults.ignore_points_below)?,
            apply_voxelgrid_filter: reader
                .boolean("apply_voxelgrid_filter", defaults.apply_voxelgrid_filter)?,
            voxelgrid_filter_size: reader
                .double("voxelgrid_filter_size", defaults.voxelgrid_filter_size)?,
        };

        let (below, above) = (parameters.ignore_points_below, parameters.ignore_points_above);
        if below >= above || below.is_nan() || above.is_nan() {
            return Err(reader.invalid(format!(
                "ignore_points_below ({}) must be less than ignore_points_above ({})",
                parameters.ignore_points_below, parameters.ignore_points_above
            )));
        }
        reader.require_non_negative("voxelgrid_filter_size", parameters.voxelgrid_filter_size)?;
        if parameters.apply_voxelgrid_filter && parameters.voxelgrid_filter_size == 0.0 {
            return Err(reader.invalid(
                "voxelgrid_filter_size must be positive when apply_voxelgrid_filter is set",
            ));
        }

        self.parameters.replace(parameters);
        Ok(())
    }
}

/// Typed access to `<namespace>.sensor_processor.*` with defaults
pub(crate) struct ParameterReader<'a> {
    store: &'a dyn ParameterStore,
    prefix: String,
    processor: SensorProcessorType,
}

impl ParameterReader<'_> {
    fn key(&self, name: &str) -> String {
        format!("{}.{}", self.prefix, name)
    }

    pub(crate) fn invalid(&self, reason: impl Into<String>) -> InputError {
        InputError::StrategyParameterResolutionFailed {
            processor: self.processor.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn double(&self, name: &str, default: f64) -> InputResult<f64> {
        let value = self
            .store
            .get_double(&self.key(name))
            .map_err(|e| self.invalid(e.to_string()))?;
        Ok(value.unwrap_or(default))
    }

    pub(crate) fn boolean(&self, name: &str, default: bool) -> InputResult<bool> {
        let value = self
            .store
            .get_bool(&self.key(name))
            .map_err(|e| self.invalid(e.to_string()))?;
        Ok(value.unwrap_or(default))
    }

    pub(crate) fn require_non_negative(&self, name: &str, value: f64) -> InputResult<()> {
        if value >= 0.0 {
            Ok(())
        } else {
            Err(self.invalid(format!("{} must be non-negative, got {}", name, value)))
        }
    }

    pub(crate) fn require_finite(&self, name: &str, value: f64) -> InputResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(self.invalid(format!("{} must be finite, got {}", name, value)))
        }
    }
}
