// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Parameter storage
//!
//! Parameters are addressed by dotted keys (`input_sources.lidar.sensor_processor.type`).
//! The [`ParameterStore`] trait is the read-field boundary used by the input
//! configuration code; implementations here back it with an in-memory map or
//! with a flattened TOML table.

use crate::ConfigResult;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

/// A single typed parameter value
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    StringArray(Vec<String>),
    DoubleArray(Vec<f64>),
}

impl ParameterValue {
    /// Name of the value's type, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            ParameterValue::Bool(_) => "bool",
            ParameterValue::Integer(_) => "integer",
            ParameterValue::Double(_) => "double",
            ParameterValue::String(_) => "string",
            ParameterValue::StringArray(_) => "string array",
            ParameterValue::DoubleArray(_) => "double array",
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::Bool(v) => write!(f, "{}", v),
            ParameterValue::Integer(v) => write!(f, "{}", v),
            ParameterValue::Double(v) => write!(f, "{}", v),
            ParameterValue::String(v) => write!(f, "{}", v),
            ParameterValue::StringArray(v) => write!(f, "[{}]", v.join(", ")),
            ParameterValue::DoubleArray(v) => {
                let items: Vec<String> = v.iter().map(f64::to_string).collect();
                write!(f, "[{}]", items.join(", "))
            }
        }
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Bool(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<f64> for ParameterValue {
    fn from(value: f64) -> Self {
        ParameterValue::Double(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<Vec<String>> for ParameterValue {
    fn from(value: Vec<String>) -> Self {
        ParameterValue::StringArray(value)
    }
}

impl From<Vec<f64>> for ParameterValue {
    fn from(value: Vec<f64>) -> Self {
        ParameterValue::DoubleArray(value)
    }
}

/// A parameter exists but holds a value of the wrong type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Parameter '{key}' has type {found}, expected {expected}")]
pub struct ParameterTypeError {
    pub key: String,
    pub expected: &'static str,
    pub found: &'static str,
}

impl ParameterTypeError {
    fn new(key: &str, expected: &'static str, found: &ParameterValue) -> Self {
        Self {
            key: key.to_string(),
            expected,
            found: found.type_name(),
        }
    }
}

/// Read access to hierarchical parameters
///
/// Only [`get`](ParameterStore::get) must be implemented. The typed getters
/// return `Ok(None)` for an absent key and `Err` for a key holding another type.
pub trait ParameterStore: Send + Sync {
    /// Look up the raw value stored under a dotted key
    fn get(&self, key: &str) -> Option<ParameterValue>;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    fn get_string(&self, key: &str) -> Result<Option<String>, ParameterTypeError> {
        match self.get(key) {
            None => Ok(None),
            Some(ParameterValue::String(v)) => Ok(Some(v)),
            Some(other) => Err(ParameterTypeError::new(key, "string", &other)),
        }
    }

    fn get_integer(&self, key: &str) -> Result<Option<i64>, ParameterTypeError> {
        match self.get(key) {
            None => Ok(None),
            Some(ParameterValue::Integer(v)) => Ok(Some(v)),
            Some(other) => Err(ParameterTypeError::new(key, "integer", &other)),
        }
    }

    /// Integers are promoted, so `cutoff = 2` reads as `2.0`
    fn get_double(&self, key: &str) -> Result<Option<f64>, ParameterTypeError> {
        match self.get(key) {
            None => Ok(None),
            Some(ParameterValue::Double(v)) => Ok(Some(v)),
            Some(ParameterValue::Integer(v)) => Ok(Some(v as f64)),
            Some(other) => Err(ParameterTypeError::new(key, "double", &other)),
        }
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, ParameterTypeError> {
        match self.get(key) {
            None => Ok(None),
            Some(ParameterValue::Bool(v)) => Ok(Some(v)),
            Some(other) => Err(ParameterTypeError::new(key, "bool", &other)),
        }
    }

    fn get_string_array(&self, key: &str) -> Result<Option<Vec<String>>, ParameterTypeError> {
        match self.get(key) {
            None => Ok(None),
            Some(ParameterValue::StringArray(v)) => Ok(Some(v)),
            Some(other) => Err(ParameterTypeError::new(key, "string array", &other)),
        }
    }

    fn get_double_array(&self, key: &str) -> Result<Option<Vec<f64>>, ParameterTypeError> {
        match self.get(key) {
            None => Ok(None),
            Some(ParameterValue::DoubleArray(v)) => Ok(Some(v)),
            Some(other) => Err(ParameterTypeError::new(key, "double array", &other)),
        }
    }
}

/// Mutable in-memory parameter map
///
/// Reads take a shared lock for the duration of a single lookup.
#[derive(Debug, Default)]
pub struct InMemoryParameterStore {
    values: RwLock<HashMap<String, ParameterValue>>,
}

impl InMemoryParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<ParameterValue>) {
        self.values.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<ParameterValue> {
        self.values.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }

    /// Builder-style insert, handy when assembling fixtures
    pub fn with(self, key: impl Into<String>, value: impl Into<ParameterValue>) -> Self {
        self.set(key, value);
        self
    }
}

impl ParameterStore for InMemoryParameterStore {
    fn get(&self, key: &str) -> Option<ParameterValue> {
        self.values.read().get(key).cloned()
    }
}

/// Read-only parameters flattened from a TOML table
///
/// Nested tables become dotted keys:
///
/// ```toml
/// [input_sources.front_camera]
/// type = "rgbd"
/// sensor_processor = { type = "structured_light" }
/// ```
///
/// yields `input_sources.front_camera.type` and
/// `input_sources.front_camera.sensor_processor.type`.
///
/// Arrays of strings and arrays of numbers are kept; any other array is left
/// out and listed by [`unsupported_keys`](Self::unsupported_keys), so reading
/// it behaves like a missing parameter.
#[derive(Debug, Clone, Default)]
pub struct TomlParameterStore {
    values: HashMap<String, ParameterValue>,
    unsupported: Vec<String>,
}

impl TomlParameterStore {
    pub fn from_table(table: &toml::Table) -> Self {
        let mut store = Self::default();
        store.flatten("", table);
        store.unsupported.sort();
        store
    }

    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let table: toml::Table = toml::from_str(content)?;
        Ok(Self::from_table(&table))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Keys whose arrays could not be represented
    pub fn unsupported_keys(&self) -> &[String] {
        &self.unsupported
    }

    fn flatten(&mut self, prefix: &str, table: &toml::Table) {
        for (name, value) in table {
            let key = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };

            let value = match value {
                toml::Value::Table(nested) => {
                    self.flatten(&key, nested);
                    continue;
                }
                toml::Value::String(v) => ParameterValue::String(v.clone()),
                toml::Value::Integer(v) => ParameterValue::Integer(*v),
                toml::Value::Float(v) => ParameterValue::Double(*v),
                toml::Value::Boolean(v) => ParameterValue::Bool(*v),
                toml::Value::Datetime(v) => ParameterValue::String(v.to_string()),
                toml::Value::Array(items) => match array_value(items) {
                    Some(value) => value,
                    None => {
                        self.unsupported.push(key);
                        continue;
                    }
                },
            };
            self.values.insert(key, value);
        }
    }
}

impl ParameterStore for TomlParameterStore {
    fn get(&self, key: &str) -> Option<ParameterValue> {
        self.values.get(key).cloned()
    }
}

/// Empty arrays are string arrays; integers in a numeric array are promoted
fn array_value(items: &[toml::Value]) -> Option<ParameterValue> {
    if let Some(strings) = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
    {
        return Some(ParameterValue::StringArray(strings));
    }

    items
        .iter()
        .map(|item| match item {
            toml::Value::Float(v) => Some(*v),
            toml::Value::Integer(v) => Some(*v as f64),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()
        .map(ParameterValue::DoubleArray)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let store = InMemoryParameterStore::new()
            .with("a.name", "lidar")
            .with("a.queue_size", 3i64)
            .with("a.ratio", 0.5)
            .with("a.enabled", true);

        assert_eq!(store.get_string("a.name").unwrap(), Some("lidar".to_string()));
        assert_eq!(store.get_integer("a.queue_size").unwrap(), Some(3));
        assert_eq!(store.get_double("a.ratio").unwrap(), Some(0.5));
        assert_eq!(store.get_bool("a.enabled").unwrap(), Some(true));
        assert_eq!(store.get_string("a.missing").unwrap(), None);
    }

    #[test]
    fn test_integer_promotes_to_double() {
        let store = InMemoryParameterStore::new().with("depth", 2i64);
        assert_eq!(store.get_double("depth").unwrap(), Some(2.0));
    }

    #[test]
    fn test_type_mismatch_is_reported() {
        let store = InMemoryParameterStore::new().with("a.queue_size", "five");
        let err = store.get_integer("a.queue_size").unwrap_err();
        assert_eq!(err.key, "a.queue_size");
        assert_eq!(err.expected, "integer");
        assert_eq!(err.found, "string");
    }

    #[test]
    fn test_toml_flattening() {
        let store = TomlParameterStore::from_toml_str(
            r#"
            inputs = ["front_camera", "lidar"]

            [front_camera]
            type = "rgbd"
            queue_size = 5
            publish_on_update = true
            sensor_processor = { type = "structured_light", cutoff_max_depth = 3.5 }
            "#,
        )
        .unwrap();

        assert_eq!(
            store.get_string_array("inputs").unwrap(),
            Some(vec!["front_camera".to_string(), "lidar".to_string()])
        );
        assert_eq!(store.get_string("front_camera.type").unwrap(), Some("rgbd".to_string()));
        assert_eq!(store.get_integer("front_camera.queue_size").unwrap(), Some(5));
        assert_eq!(
            store.get_string("front_camera.sensor_processor.type").unwrap(),
            Some("structured_light".to_string())
        );
        assert_eq!(
            store.get_double("front_camera.sensor_processor.cutoff_max_depth").unwrap(),
            Some(3.5)
        );
        assert!(!store.contains("front_camera"));
    }

    #[test]
    fn test_toml_numeric_and_unsupported_arrays() {
        let store = TomlParameterStore::from_toml_str(
            r#"
            length_in_x = [1.0, 2.0]
            position = [0, 0.5]
            flags = [true, false]
            mixed = ["a", 1]

            [input_sources]
            inputs = ["lidar"]
            "#,
        )
        .unwrap();

        assert_eq!(store.get_double_array("length_in_x").unwrap(), Some(vec![1.0, 2.0]));
        assert_eq!(store.get_double_array("position").unwrap(), Some(vec![0.0, 0.5]));
        assert_eq!(
            store.get_string_array("input_sources.inputs").unwrap(),
            Some(vec!["lidar".to_string()])
        );
        assert_eq!(store.unsupported_keys(), ["flags".to_string(), "mixed".to_string()]);
        assert_eq!(store.get("flags"), None);
        assert!(store.get_string_array("length_in_x").is_err());
    }

    #[test]
    fn test_toml_empty_array_is_string_array() {
        let store = TomlParameterStore::from_toml_str("inputs = []").unwrap();
        assert_eq!(store.get_string_array("inputs").unwrap(), Some(Vec::new()));
        assert!(store.unsupported_keys().is_empty());
    }
}
