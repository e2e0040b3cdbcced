//! Run report entries: failed tables and plugins that were turned off.

use std::fmt;

use serde::Serialize;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Whatever sits at the location produced no output.
    Error,
    /// The run went on without it.
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// One entry of a run report.
///
/// `location` is `tables.<table>[.<kind>]` for table failures,
/// `plugins.<name>` for disabled plugins, or the configuration key a plugin
/// rejected during validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Plugin or host stage that reported it.
    pub source: String,
    pub location: String,
    pub message: String,
}

impl Diagnostic {
    pub fn error(
        source: impl Into<String>,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            source: source.into(),
            location: location.into(),
            message: message.into(),
        }
    }

    /// A table that produced no output, located at the failing artifact
    /// when the error carries one. The message spells out the source chain.
    pub fn table_failed(source: impl Into<String>, table: &str, err: &Error) -> Self {
        let location = match err {
            Error::Table { kind, .. } => format!("tables.{}.{}", table, kind),
            _ if table.trim().is_empty() => "tables".to_string(),
            _ => format!("tables.{}", table),
        };

        let mut message = err.to_string();
        let mut cause = std::error::Error::source(err);
        while let Some(inner) = cause {
            message.push_str(": ");
            message.push_str(&inner.to_string());
            cause = inner.source();
        }

        Self::error(source, location, message)
    }

    /// A plugin skipped for the whole run because it failed validation.
    pub fn plugin_disabled(source: impl Into<String>, plugin: &str) -> Self {
        Self {
            severity: Severity::Warning,
            source: source.into(),
            location: format!("plugins.{}", plugin),
            message: format!("plugin '{}' disabled: validation failed", plugin),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}] {}: {}",
            self.severity.as_str(),
            self.source,
            self.location,
            self.message
        )
    }
}
