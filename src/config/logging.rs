//! Logging topology - loggers, handlers, filters and formatters wired by name.
//!
//! The topology is handed to the framework runtime as data. It is validated
//! once at assembly: every name a handler or logger refers to must be declared.

use std::collections::BTreeMap;

use serde::Serialize;

use super::constants::LOGGING_VERSION;
use crate::errors::{ConfigError, ConfigResult, NodeKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

/// Built-in filters understood by the runtime, serialized as their factory path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterKind {
    #[serde(rename = "django.utils.log.RequireDebugFalse")]
    RequireDebugFalse,
    #[serde(rename = "django.utils.log.RequireDebugTrue")]
    RequireDebugTrue,
}

impl FilterKind {
    /// Whether a record passes this filter for the given debug flag.
    pub fn passes(self, debug: bool) -> bool {
        match self {
            FilterKind::RequireDebugFalse => !debug,
            FilterKind::RequireDebugTrue => debug,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSpec {
    #[serde(skip_serializing)]
    pub name: String,
    #[serde(rename = "()")]
    pub kind: FilterKind,
}

impl FilterSpec {
    pub fn new(name: impl Into<String>, kind: FilterKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatterSpec {
    #[serde(skip_serializing)]
    pub name: String,
    /// Formatter class the runtime instantiates; plain formatter when unset
    #[serde(rename = "()", skip_serializing_if = "Option::is_none")]
    pub factory: Option<String>,
    pub format: String,
}

impl FormatterSpec {
    pub fn new(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            factory: None,
            format: format.into(),
        }
    }

    pub fn factory(mut self, class: impl Into<String>) -> Self {
        self.factory = Some(class.into());
        self
    }
}

/// Where a handler writes records, tagged with the runtime's handler class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "class")]
pub enum HandlerClass {
    #[serde(rename = "logging.StreamHandler")]
    Stream,
    #[serde(rename = "logging.FileHandler")]
    File { filename: String },
    #[serde(rename = "django.utils.log.AdminEmailHandler")]
    AdminEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandlerSpec {
    #[serde(skip_serializing)]
    pub name: String,
    #[serde(flatten)]
    pub class: HandlerClass,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<LogLevel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatter: Option<String>,
}

impl HandlerSpec {
    pub fn new(name: impl Into<String>, class: HandlerClass) -> Self {
        Self {
            name: name.into(),
            class,
            level: None,
            filters: Vec::new(),
            formatter: None,
        }
    }

    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = Some(level);
        self
    }

    pub fn filter(mut self, name: impl Into<String>) -> Self {
        self.filters.push(name.into());
        self
    }

    pub fn formatter(mut self, name: impl Into<String>) -> Self {
        self.formatter = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggerSpec {
    #[serde(skip_serializing)]
    pub name: String,
    pub level: LogLevel,
    /// Handler order is preserved
    pub handlers: Vec<String>,
    pub propagate: bool,
}

impl LoggerSpec {
    pub fn new(name: impl Into<String>, level: LogLevel) -> Self {
        Self {
            name: name.into(),
            level,
            handlers: Vec::new(),
            propagate: true,
        }
    }

    pub fn handler(mut self, name: impl Into<String>) -> Self {
        self.handlers.push(name.into());
        self
    }

    pub fn propagate(mut self, propagate: bool) -> Self {
        self.propagate = propagate;
        self
    }
}

/// Validated logging configuration tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingTopology {
    pub version: u32,
    pub disable_existing_loggers: bool,
    pub filters: BTreeMap<String, FilterSpec>,
    pub formatters: BTreeMap<String, FormatterSpec>,
    pub handlers: BTreeMap<String, HandlerSpec>,
    pub loggers: BTreeMap<String, LoggerSpec>,
}

impl LoggingTopology {
    pub fn logger(&self, name: &str) -> Option<&LoggerSpec> {
        self.loggers.get(name)
    }

    pub fn handler(&self, name: &str) -> Option<&HandlerSpec> {
        self.handlers.get(name)
    }

    /// Handlers of `logger` whose filters all pass for the given debug flag,
    /// in the logger's declared order.
    pub fn active_handlers(&self, logger: &str, debug: bool) -> Vec<&str> {
        let Some(logger) = self.loggers.get(logger) else {
            return Vec::new();
        };

        logger
            .handlers
            .iter()
            .filter_map(|name| self.handlers.get(name))
            .filter(|handler| {
                handler
                    .filters
                    .iter()
                    .filter_map(|f| self.filters.get(f))
                    .all(|f| f.kind.passes(debug))
            })
            .map(|handler| handler.name.as_str())
            .collect()
    }
}

fn index_by_name<T>(
    kind: NodeKind,
    items: Vec<T>,
    name_of: impl Fn(&T) -> &str,
) -> ConfigResult<BTreeMap<String, T>> {
    let mut map = BTreeMap::new();
    for item in items {
        let name = name_of(&item).to_string();
        if map.contains_key(&name) {
            return Err(ConfigError::DuplicateLoggingNode { kind, name });
        }
        map.insert(name, item);
    }
    Ok(map)
}

/// Build and validate a logging topology.
///
/// # Errors
/// - `DuplicateLoggingNode` if a name is declared twice within a category
/// - `DanglingReference` naming the first undeclared filter, formatter or
///   handler, checked in declaration order
pub fn build_logging_topology(
    handlers: Vec<HandlerSpec>,
    filters: Vec<FilterSpec>,
    formatters: Vec<FormatterSpec>,
    loggers: Vec<LoggerSpec>,
) -> ConfigResult<LoggingTopology> {
    for handler in &handlers {
        let referenced_by = format!("handler '{}'", handler.name);
        if let Some(missing) = handler
            .filters
            .iter()
            .find(|f| !filters.iter().any(|d| &d.name == *f))
        {
            return Err(ConfigError::dangling(NodeKind::Filter, missing, referenced_by));
        }
        if let Some(formatter) = &handler.formatter {
            if !formatters.iter().any(|d| &d.name == formatter) {
                return Err(ConfigError::dangling(
                    NodeKind::Formatter,
                    formatter,
                    referenced_by,
                ));
            }
        }
    }

    for logger in &loggers {
        if let Some(missing) = logger
            .handlers
            .iter()
            .find(|h| !handlers.iter().any(|d| &d.name == *h))
        {
            return Err(ConfigError::dangling(
                NodeKind::Handler,
                missing,
                format!("logger '{}'", logger.name),
            ));
        }
    }

    let topology = LoggingTopology {
        version: LOGGING_VERSION,
        disable_existing_loggers: false,
        filters: index_by_name(NodeKind::Filter, filters, |f| f.name.as_str())?,
        formatters: index_by_name(NodeKind::Formatter, formatters, |f| f.name.as_str())?,
        handlers: index_by_name(NodeKind::Handler, handlers, |h| h.name.as_str())?,
        loggers: index_by_name(NodeKind::Logger, loggers, |l| l.name.as_str())?,
    };

    tracing::debug!(
        handlers = topology.handlers.len(),
        loggers = topology.loggers.len(),
        "Logging topology validated"
    );
    Ok(topology)
}
