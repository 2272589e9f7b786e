//! Centralized error handling.
//!
//! Every failure during settings assembly is fatal: the process must not
//! start with an incomplete or inconsistent configuration. The output
//! variants only arise in the `show` command.

use std::path::PathBuf;

use thiserror::Error;

/// Kind of node in the logging topology, used to name dangling references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Filter,
    Formatter,
    Handler,
    Logger,
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Filter => "filter",
            NodeKind::Formatter => "formatter",
            NodeKind::Handler => "handler",
            NodeKind::Logger => "logger",
        };
        f.write_str(name)
    }
}

/// Settings assembly error types
#[derive(Error, Debug)]
pub enum ConfigError {
    // Environment
    #[error("Missing required configuration value: {key}")]
    MissingConfiguration { key: String },

    #[error("Invalid value for {key}: {value:?} (expected {expected})")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },

    #[error("Malformed override file {}: {reason}", path.display())]
    MalformedOverrideFile { path: PathBuf, reason: String },

    // Logging topology
    #[error("{referenced_by} references undeclared {kind} '{name}'")]
    DanglingReference {
        kind: NodeKind,
        name: String,
        referenced_by: String,
    },

    #[error("Duplicate {kind} '{name}' in logging configuration")]
    DuplicateLoggingNode { kind: NodeKind, name: String },

    // Output
    #[error("Unknown settings section: {0}")]
    UnknownSection(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ConfigError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::MissingConfiguration { .. } => "MISSING_CONFIGURATION",
            ConfigError::InvalidValue { .. } => "INVALID_VALUE",
            ConfigError::MalformedOverrideFile { .. } => "MALFORMED_OVERRIDE_FILE",
            ConfigError::DanglingReference { .. } => "DANGLING_REFERENCE",
            ConfigError::DuplicateLoggingNode { .. } => "DUPLICATE_LOGGING_NODE",
            ConfigError::UnknownSection(_) => "UNKNOWN_SECTION",
            ConfigError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }
}

/// Convenience constructors
impl ConfigError {
    pub fn missing(key: impl Into<String>) -> Self {
        ConfigError::MissingConfiguration { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, value: impl Into<String>, expected: &'static str) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
            expected,
        }
    }

    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ConfigError::MalformedOverrideFile {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn dangling(
        kind: NodeKind,
        name: impl Into<String>,
        referenced_by: impl Into<String>,
    ) -> Self {
        ConfigError::DanglingReference {
            kind,
            name: name.into(),
            referenced_by: referenced_by.into(),
        }
    }
}

/// Result type alias
pub type ConfigResult<T> = Result<T, ConfigError>;
