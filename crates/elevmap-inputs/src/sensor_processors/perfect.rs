// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Noise-free processor for simulated or ground-truth clouds

use super::base::{GeneralParameters, SensorProcessorBase};
use super::{SensorProcessor, SensorProcessorType};
use crate::error::InputResult;
use crate::services::NodeContext;
use std::any::Any;

/// Uses only the common point filtering parameters
#[derive(Debug)]
pub struct PerfectSensorProcessor {
    base: SensorProcessorBase,
}

impl PerfectSensorProcessor {
    pub fn new(context: NodeContext, general: GeneralParameters) -> Self {
        Self {
            base: SensorProcessorBase::new(context, general),
        }
    }
}

impl SensorProcessor for PerfectSensorProcessor {
    fn processor_type(&self) -> SensorProcessorType {
        SensorProcessorType::Perfect
    }

    fn base(&self) -> &SensorProcessorBase {
        &self.base
    }

    fn read_parameters(&self, config_namespace: &str) -> InputResult<()> {
        self.base.read_parameters(config_namespace, self.processor_type())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
