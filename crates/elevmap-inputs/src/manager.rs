// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configures every input source listed under a parameter section

use crate::error::InputError;
use crate::input::Input;
use crate::sensor_processors::GeneralParameters;
use crate::services::NodeContext;
use std::collections::HashSet;
use std::sync::Arc;

/// Owns the input sources of one node
///
/// Input sources are listed by name in `<section>.inputs`; each is configured
/// independently, so one broken source does not prevent the others from
/// being used.
#[derive(Debug)]
pub struct InputSourceManager {
    context: NodeContext,
    sources: Vec<Arc<Input>>,
}

impl InputSourceManager {
    pub fn new(context: NodeContext) -> Self {
        Self {
            context,
            sources: Vec::new(),
        }
    }

    /// Replace the current sources with those listed in `<section>.inputs`
    ///
    /// Returns `true` only if every listed source was configured and kept.
    pub fn configure_from_parameters(&mut self, section: &str) -> bool {
        let logger = self.context.logger();
        let list_key = format!("{}.inputs", section);

        let names = match self.context.parameters().get_string_array(&list_key) {
            Ok(Some(names)) => names,
            Ok(None) => {
                logger.error(&format!(
                    "{}.",
                    InputError::missing_field(section, "inputs")
                ));
                return false;
            }
            Err(e) => {
                logger.error(&format!("The input sources configuration must be a list: {}", e));
                return false;
            }
        };

        let general = match GeneralParameters::from_store(self.context.parameters()) {
            Ok(general) => general,
            Err(e) => {
                logger.error(&format!("Could not read general sensor processor parameters: {}", e));
                return false;
            }
        };

        self.sources.clear();
        if names.is_empty() {
            logger.warn(&format!("No input sources listed under {}.", list_key));
            return true;
        }

        let mut all_configured = true;
        let mut subscribed_topics = HashSet::new();

        for name in &names {
            let source = Input::new(self.context.clone());
            if !source.configure(name, section, &general) {
                all_configured = false;
                continue;
            }

            // configure succeeded, so the topic is known to expand
            let topic = source.subscribed_topic().unwrap_or_default();
            if !subscribed_topics.insert(topic.clone()) {
                logger.warn(&format!(
                    "The input sources configuration tried to subscribe to {} multiple times. Only subscribing once.",
                    topic
                ));
                all_configured = false;
                continue;
            }

            self.sources.push(Arc::new(source));
        }

        logger.info(&format!(
            "Configured {} of {} input sources.",
            self.sources.len(),
            names.len()
        ));
        all_configured
    }

    pub fn number_of_sources(&self) -> usize {
        self.sources.len()
    }

    pub fn sources(&self) -> &[Arc<Input>] {
        &self.sources
    }

    pub fn source(&self, name: &str) -> Option<&Arc<Input>> {
        self.sources.iter().find(|s| s.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensor_processors::SensorProcessorType;
    use crate::services::{RecordingLogger, Severity};
    use elevmap_config::{InMemoryParameterStore, NodeConfig};

    fn add_source(store: &InMemoryParameterStore, name: &str, topic: &str, processor: &str) {
        let prefix = format!("input_sources.{}", name);
        store.set(format!("{}.type", prefix), "pointcloud");
        store.set(format!("{}.topic", prefix), topic);
        store.set(format!("{}.queue_size", prefix), 1i64);
        store.set(format!("{}.publish_on_update", prefix), false);
        store.set(format!("{}.sensor_processor.type", prefix), processor);
    }

    fn manager_with(store: InMemoryParameterStore) -> (InputSourceManager, Arc<RecordingLogger>) {
        let logger = Arc::new(RecordingLogger::new());
        let context =
            NodeContext::new(NodeConfig::default(), Arc::new(store)).with_logger(logger.clone());
        (InputSourceManager::new(context), logger)
    }

    #[test]
    fn test_configures_all_sources() {
        let store = InMemoryParameterStore::new().with(
            "input_sources.inputs",
            vec!["lidar".to_string(), "front_camera".to_string()],
        );
        add_source(&store, "lidar", "/lidar/points", "laser");
        add_source(&store, "front_camera", "/cam/points", "structured_light");
        let (mut manager, _) = manager_with(store);

        assert!(manager.configure_from_parameters("input_sources"));
        assert_eq!(manager.number_of_sources(), 2);
        assert_eq!(
            manager.source("lidar").and_then(|s| s.sensor_processor_type()),
            Some(SensorProcessorType::Laser)
        );
    }

    #[test]
    fn test_broken_source_does_not_affect_others() {
        let store = InMemoryParameterStore::new().with(
            "input_sources.inputs",
            vec!["radar".to_string(), "lidar".to_string()],
        );
        add_source(&store, "radar", "/radar/points", "radar");
        add_source(&store, "lidar", "/lidar/points", "laser");
        let (mut manager, _) = manager_with(store);

        assert!(!manager.configure_from_parameters("input_sources"));
        assert_eq!(manager.number_of_sources(), 1);
        assert!(manager.source("lidar").is_some());
        assert!(manager.source("radar").is_none());
    }

    #[test]
    fn test_duplicate_topic_subscribed_once() {
        let store = InMemoryParameterStore::new().with(
            "input_sources.inputs",
            vec!["a".to_string(), "b".to_string()],
        );
        add_source(&store, "a", "/points", "perfect");
        add_source(&store, "b", "/points", "laser");
        let (mut manager, logger) = manager_with(store);

        assert!(!manager.configure_from_parameters("input_sources"));
        assert_eq!(manager.number_of_sources(), 1);
        assert_eq!(manager.sources()[0].name(), "a");
        assert!(logger.messages(Severity::Warn)[0].contains("/points multiple times"));
    }

    #[test]
    fn test_missing_and_empty_lists() {
        let (mut manager, _) = manager_with(InMemoryParameterStore::new());
        assert!(!manager.configure_from_parameters("input_sources"));

        let store = InMemoryParameterStore::new().with("input_sources.inputs", Vec::<String>::new());
        let (mut manager, logger) = manager_with(store);
        assert!(manager.configure_from_parameters("input_sources"));
        assert_eq!(manager.number_of_sources(), 0);
        assert_eq!(logger.messages(Severity::Warn).len(), 1);
    }

    #[test]
    fn test_general_parameters_reach_processors() {
        let store = InMemoryParameterStore::new()
            .with("input_sources.inputs", vec!["lidar".to_string()])
            .with("map_frame_id", "odom");
        add_source(&store, "lidar", "/lidar/points", "laser");
        let (mut manager, _) = manager_with(store);

        assert!(manager.configure_from_parameters("input_sources"));
        let frame = manager.sources()[0]
            .with_sensor_processor(|p| p.base().general_parameters().map_frame_id.clone());
        assert_eq!(frame.as_deref(), Some("odom"));
    }
}
