// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! A single configured input source
//!
//! `Input::configure` reads the source's fields, publishes them as an
//! [`InputParameters`] snapshot and selects the sensor processor named by
//! `sensor_processor.type`. The snapshot is installed before the processor is
//! built, so a failed processor leaves a valid snapshot and no processor.

use crate::error::{ConfigureFailure, InputError, InputResult};
use crate::parameters::InputParameters;
use crate::sensor_processors::{
    create_sensor_processor, GeneralParameters, SensorProcessor, SensorProcessorType,
};
use crate::services::NodeContext;
use crate::snapshot::SnapshotCell;
use elevmap_config::{ParameterStore, ParameterTypeError};
use std::sync::Arc;

#[derive(Debug)]
pub struct Input {
    context: NodeContext,
    parameters: SnapshotCell<InputParameters>,
    sensor_processor: SnapshotCell<Option<Arc<dyn SensorProcessor>>>,
}

impl Input {
    pub fn new(context: NodeContext) -> Self {
        Self {
            context,
            parameters: SnapshotCell::default(),
            sensor_processor: SnapshotCell::new(None),
        }
    }

    /// Configure from `<source_configuration_name>.<input_source_name>.*`
    ///
    /// Returns `false` on any failure; every problem has been logged by then.
    /// Use [`try_configure`](Self::try_configure) to inspect the errors.
    pub fn configure(
        &self,
        input_source_name: &str,
        source_configuration_name: &str,
        general_parameters: &GeneralParameters,
    ) -> bool {
        self.try_configure(input_source_name, source_configuration_name, general_parameters)
            .is_ok()
    }

    /// Configure and report every error encountered
    pub fn try_configure(
        &self,
        input_source_name: &str,
        source_configuration_name: &str,
        general_parameters: &GeneralParameters,
    ) -> Result<(), ConfigureFailure> {
        let config_namespace = format!("{}.{}", source_configuration_name, input_source_name);
        let mut fields = FieldReader {
            context: &self.context,
            input: input_source_name,
            namespace: &config_namespace,
            errors: Vec::new(),
        };

        let input_type = fields.read("type", |s, k| s.get_string(k));
        let topic = fields.read("topic", |s, k| s.get_string(k));
        let queue_size = fields
            .read("queue_size", |s, k| s.get_integer(k))
            .and_then(|size| fields.queue_size(size));
        let publish_on_update = fields.read("publish_on_update", |s, k| s.get_bool(k));
        let processor_tag = fields.read("sensor_processor.type", |s, k| s.get_string(k));

        if let Some(topic) = &topic {
            fields.check_topic(topic);
        }

        let defaults = InputParameters::default();
        let parameters = InputParameters {
            name: input_source_name.to_string(),
            input_type: input_type.unwrap_or(defaults.input_type),
            topic: topic.unwrap_or(defaults.topic),
            queue_size: queue_size.unwrap_or(defaults.queue_size),
            publish_on_update: publish_on_update.unwrap_or(defaults.publish_on_update),
        };
        self.parameters.replace(parameters.clone());

        let mut errors = fields.errors;

        match processor_tag {
            Some(tag) => {
                match self.configure_sensor_processor(&config_namespace, &tag, general_parameters) {
                    Ok(processor) => self.sensor_processor.replace(Some(processor)),
                    Err(e) => {
                        self.sensor_processor.replace(None);
                        errors.push(e);
                    }
                }
            }
            None => self.sensor_processor.replace(None),
        }

        if !errors.is_empty() {
            return Err(ConfigureFailure {
                input: input_source_name.to_string(),
                errors,
            });
        }

        let resolved_topic = self.context.expand_name(&parameters.topic).unwrap_or_default();
        self.context.logger().debug(&format!(
            "Configured {}:{} @ {} (publishing_on_update: {}), using {} to process data.",
            parameters.input_type,
            parameters.name,
            resolved_topic,
            parameters.publish_on_update,
            self.sensor_processor_type()
                .map(|t| t.as_str())
                .unwrap_or_default(),
        ));
        Ok(())
    }

    fn configure_sensor_processor(
        &self,
        config_namespace: &str,
        type_tag: &str,
        general_parameters: &GeneralParameters,
    ) -> InputResult<Arc<dyn SensorProcessor>> {
        let processor =
            create_sensor_processor(type_tag, self.context.clone(), general_parameters.clone())
                .map_err(|e| {
                    self.context.logger().error(&format!("{}.", e));
                    e
                })?;

        processor.read_parameters(config_namespace).map_err(|e| {
            self.context.logger().error(&format!(
                "Could not configure sensor processor of input source {}: {}",
                config_namespace, e
            ));
            e
        })?;

        Ok(Arc::from(processor))
    }

    /// Fully-qualified topic of the current snapshot
    ///
    /// # Errors
    /// * `InputError::InvalidTopic` - The raw topic cannot be expanded
    pub fn subscribed_topic(&self) -> InputResult<String> {
        let topic = self.parameters.load().topic.clone();
        self.context
            .expand_name(&topic)
            .map_err(|e| InputError::InvalidTopic {
                topic,
                reason: e.to_string(),
            })
    }

    /// Copy of the current snapshot
    pub fn parameters(&self) -> InputParameters {
        self.parameters.read()
    }

    pub fn name(&self) -> String {
        self.parameters.load().name.clone()
    }

    pub fn input_type(&self) -> String {
        self.parameters.load().input_type.clone()
    }

    pub fn queue_size(&self) -> u32 {
        self.parameters.load().queue_size
    }

    pub fn publish_on_update(&self) -> bool {
        self.parameters.load().publish_on_update
    }

    /// Type of the live sensor processor, if configuration got that far
    pub fn sensor_processor_type(&self) -> Option<SensorProcessorType> {
        self.sensor_processor.read().map(|p| p.processor_type())
    }

    /// Run `f` against the live sensor processor
    pub fn with_sensor_processor<R>(&self, f: impl FnOnce(&dyn SensorProcessor) -> R) -> Option<R> {
        let processor = self.sensor_processor.read()?;
        Some(f(processor.as_ref()))
    }
}

/// Collects per-field errors while reading an input's fields
struct FieldReader<'a> {
    context: &'a NodeContext,
    input: &'a str,
    namespace: &'a str,
    errors: Vec<InputError>,
}

impl FieldReader<'_> {
    fn read<T>(
        &mut self,
        field: &str,
        get: impl FnOnce(&dyn ParameterStore, &str) -> Result<Option<T>, ParameterTypeError>,
    ) -> Option<T> {
        let key = format!("{}.{}", self.namespace, field);
        match get(self.context.parameters(), &key) {
            Ok(Some(value)) => Some(value),
            Ok(None) => {
                self.missing(field, None);
                None
            }
            Err(e) => {
                self.missing(field, Some(e));
                None
            }
        }
    }

    fn missing(&mut self, field: &str, cause: Option<ParameterTypeError>) {
        let error = InputError::missing_field(self.input, field);
        match cause {
            Some(cause) => self.context.logger().error(&format!("{} ({})", error, cause)),
            None => self.context.logger().error(&format!("{}.", error)),
        }
        self.errors.push(error);
    }

    fn queue_size(&mut self, size: i64) -> Option<u32> {
        match u32::try_from(size) {
            Ok(size) if size > 0 => Some(size),
            _ => {
                let error = InputError::invalid_field(
                    "queue_size",
                    format!("must be a positive integer, got {}", size),
                );
                self.context
                    .logger()
                    .error(&format!("Input source {}: {}", self.input, error));
                self.errors.push(error);
                None
            }
        }
    }

    fn check_topic(&mut self, topic: &str) {
        if let Err(e) = self.context.expand_name(topic) {
            let error = InputError::InvalidTopic {
                topic: topic.to_string(),
                reason: e.to_string(),
            };
            self.context
                .logger()
                .error(&format!("Input source {}: {}", self.input, error));
            self.errors.push(error);
        }
    }
}
