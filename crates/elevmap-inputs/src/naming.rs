// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Topic name expansion
//!
//! Follows ROS 2 conventions:
//! - `/points` is absolute and kept as is
//! - `points` is relative to the namespace: `/robot/points`
//! - `~/points` is private to the node: `/robot/mapper/points`
//! - `{node}` and `{ns}` (or `{namespace}`) are substituted before expansion

use crate::services::NameExpander;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("namespace '{0}' is not absolute")]
    RelativeNamespace(String),

    #[error("unknown substitution '{{{0}}}'")]
    UnknownSubstitution(String),

    #[error("unterminated substitution in '{0}'")]
    UnterminatedSubstitution(String),

    #[error("'~' is only allowed as the first character and must be followed by '/'")]
    MisplacedTilde,

    #[error("invalid character '{0}'")]
    InvalidCharacter(char),

    #[error("'{0}' contains an empty token")]
    EmptyToken(String),

    #[error("token '{0}' starts with a digit")]
    TokenStartsWithDigit(String),
}

/// ROS 2 style topic name expansion
#[derive(Debug, Clone, Copy, Default)]
pub struct RosNameExpander;

impl NameExpander for RosNameExpander {
    fn expand(&self, name: &str, node_name: &str, namespace: &str) -> Result<String, NameError> {
        expand_topic_name(name, node_name, namespace)
    }
}

/// Expand `name` into a fully-qualified topic name
pub fn expand_topic_name(name: &str, node_name: &str, namespace: &str) -> Result<String, NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if !namespace.starts_with('/') {
        return Err(NameError::RelativeNamespace(namespace.to_string()));
    }

    let substituted = substitute(name, node_name, namespace)?;
    let namespace = namespace.trim_end_matches('/');

    let expanded = if let Some(rest) = substituted.strip_prefix('~') {
        match rest {
            "" => format!("{}/{}", namespace, node_name),
            _ if rest.starts_with('/') => format!("{}/{}{}", namespace, node_name, rest),
            _ => return Err(NameError::MisplacedTilde),
        }
    } else if substituted.starts_with('/') {
        substituted
    } else {
        format!("{}/{}", namespace, substituted)
    };

    validate_fully_qualified(&expanded)?;
    Ok(expanded)
}

fn substitute(name: &str, node_name: &str, namespace: &str) -> Result<String, NameError> {
    let mut out = String::with_capacity(name.len());
    let mut rest = name;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let end = after
            .find('}')
            .ok_or_else(|| NameError::UnterminatedSubstitution(name.to_string()))?;
        match &after[..end] {
            "node" => out.push_str(node_name),
            // absolute, so a name starting with `{ns}` is not placed under the namespace again
            "ns" | "namespace" => out.push_str(namespace.trim_end_matches('/')),
            other => return Err(NameError::UnknownSubstitution(other.to_string())),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    if out.contains('}') {
        return Err(NameError::InvalidCharacter('}'));
    }
    Ok(out)
}

fn validate_fully_qualified(name: &str) -> Result<(), NameError> {
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '_' || *c == '/'))
    {
        return Err(match c {
            '~' => NameError::MisplacedTilde,
            other => NameError::InvalidCharacter(other),
        });
    }

    for token in name[1..].split('/') {
        if token.is_empty() {
            return Err(NameError::EmptyToken(name.to_string()));
        }
        if token.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(NameError::TokenStartsWithDigit(token.to_string()));
        }
    }
    Ok(())
}
