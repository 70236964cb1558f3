// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Host services consumed by input configuration.

Three narrow seams: parameter reads (`elevmap_config::ParameterStore`),
diagnostics (`DiagnosticLogger`) and name expansion (`NameExpander`). They
are bundled with the node identity into a cheap-to-clone `NodeContext`.
*/

use crate::naming::{NameError, RosNameExpander};
use elevmap_config::{NodeConfig, ParameterStore};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Debug => write!(f, "debug"),
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Sink for severity-levelled diagnostic messages
pub trait DiagnosticLogger: Send + Sync {
    fn log(&self, severity: Severity, message: &str);

    fn debug(&self, message: &str) {
        self.log(Severity::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(Severity::Info, message);
    }

    fn warn(&self, message: &str) {
        self.log(Severity::Warn, message);
    }

    fn error(&self, message: &str) {
        self.log(Severity::Error, message);
    }
}

/// Forwards diagnostics to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl DiagnosticLogger for TracingLogger {
    fn log(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Debug => tracing::debug!(target: "elevmap_inputs", "{}", message),
            Severity::Info => tracing::info!(target: "elevmap_inputs", "{}", message),
            Severity::Warn => tracing::warn!(target: "elevmap_inputs", "{}", message),
            Severity::Error => tracing::error!(target: "elevmap_inputs", "{}", message),
        }
    }
}

/// Keeps diagnostics in memory, for inspection by tests and tooling
#[derive(Debug, Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(Severity, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Severity, String)> {
        self.records.lock().clone()
    }

    /// Messages logged at exactly `severity`
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.records
            .lock()
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl DiagnosticLogger for RecordingLogger {
    fn log(&self, severity: Severity, message: &str) {
        self.records.lock().push((severity, message.to_string()));
    }
}

/// Expands a raw topic into a fully-qualified name
pub trait NameExpander: Send + Sync {
    fn expand(&self, name: &str, node_name: &str, namespace: &str) -> Result<String, NameError>;
}

/// Everything an input source or sensor processor needs from its host node
#[derive(Clone)]
pub struct NodeContext {
    node: NodeConfig,
    parameters: Arc<dyn ParameterStore>,
    logger: Arc<dyn DiagnosticLogger>,
    expander: Arc<dyn NameExpander>,
}

impl NodeContext {
    /// Context with tracing output and ROS-style name expansion
    pub fn new(node: NodeConfig, parameters: Arc<dyn ParameterStore>) -> Self {
        Self {
            node,
            parameters,
            logger: Arc::new(TracingLogger),
            expander: Arc::new(RosNameExpander),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn DiagnosticLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_expander(mut self, expander: Arc<dyn NameExpander>) -> Self {
        self.expander = expander;
        self
    }

    pub fn node_name(&self) -> &str {
        &self.node.name
    }

    pub fn namespace(&self) -> &str {
        &self.node.namespace
    }

    pub fn parameters(&self) -> &dyn ParameterStore {
        self.parameters.as_ref()
    }

    pub fn logger(&self) -> &dyn DiagnosticLogger {
        self.logger.as_ref()
    }

    /// Expand `name` relative to this node
    pub fn expand_name(&self, name: &str) -> Result<String, NameError> {
        self.expander.expand(name, &self.node.name, &self.node.namespace)
    }
}

impl fmt::Debug for NodeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeContext")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}
