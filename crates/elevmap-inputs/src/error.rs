// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*!
Input source error types.

Every failure is scoped to one input source: it is logged, reported through
`Input::configure`, and never affects other input sources.
*/

use std::fmt;
use thiserror::Error;

/// Input configuration errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// A required field is absent or holds a value of the wrong type
    #[error("Could not configure input source {input} because no {field} was given")]
    MissingField { input: String, field: String },

    /// A field is present but its value is out of range
    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// `sensor_processor.type` names no known sensor processor
    #[error("The sensor type {0} is not available")]
    UnknownStrategyType(String),

    /// The sensor processor rejected its nested parameters
    #[error("Sensor processor {processor} failed to read its parameters: {reason}")]
    StrategyParameterResolutionFailed { processor: String, reason: String },

    /// The raw topic cannot be expanded into a fully-qualified name
    #[error("Invalid topic '{topic}': {reason}")]
    InvalidTopic { topic: String, reason: String },
}

impl InputError {
    pub fn missing_field(input: &str, field: &str) -> Self {
        InputError::MissingField {
            input: input.to_string(),
            field: field.to_string(),
        }
    }

    pub fn invalid_field(field: &str, reason: impl Into<String>) -> Self {
        InputError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for input operations
pub type InputResult<T> = Result<T, InputError>;

/// All errors collected while configuring one input source
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigureFailure {
    pub input: String,
    pub errors: Vec<InputError>,
}

impl ConfigureFailure {
    /// Fields reported as missing, in the order they were read
    pub fn missing_fields(&self) -> Vec<&str> {
        self.errors
            .iter()
            .filter_map(|e| match e {
                InputError::MissingField { field, .. } => Some(field.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, predicate: impl Fn(&InputError) -> bool) -> bool {
        self.errors.iter().any(predicate)
    }
}

impl fmt::Display for ConfigureFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to configure input source {}", self.input)?;
        for error in &self.errors {
            write!(f, "\n  - {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigureFailure {}
