// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/// Resolved configuration of one input source
///
/// Fields that could not be read keep their defaults: empty strings,
/// a queue size of `1` and `publish_on_update = false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputParameters {
    pub name: String,
    /// Declared category such as `pointcloud` or `rgbd`; informational only
    pub input_type: String,
    /// Raw topic before namespace expansion
    pub topic: String,
    pub queue_size: u32,
    pub publish_on_update: bool,
}

impl Default for InputParameters {
    fn default() -> Self {
        Self {
            name: String::new(),
            input_type: String::new(),
            topic: String::new(),
            queue_size: 1,
            publish_on_update: false,
        }
    }
}
