use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for configuration loading (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the raw TOML and its file name so every error can point back
/// into the configuration that produced it.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Find the span of a quoted string value in the source.
    pub fn find_value_span(&self, value: &str) -> Option<SourceSpan> {
        let needle = format!("\"{}\"", value);
        self.src
            .find(&needle)
            // skip the opening quote
            .map(|pos| SourceSpan::from((pos + 1, value.len())))
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error, pointing at `value` when it can be found.
    pub fn validation_error(&self, message: impl Into<String>, value: Option<&str>) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span: value.and_then(|v| self.find_value_span(v)),
            message: message.into(),
        })
    }

    /// Create an invalid segment error.
    pub fn invalid_segment_error(
        &self,
        field: impl Into<String>,
        value: &str,
        reason: impl Into<String>,
    ) -> Box<Error> {
        Box::new(Error::InvalidSegment {
            src: self.named_source(),
            span: self.find_value_span(value),
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        })
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(code(entigen::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plugin configuration")]
    #[diagnostic(code(entigen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(entigen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("invalid {field} '{value}'")]
    #[diagnostic(
        code(entigen::invalid_segment),
        help("{reason}. Use letters, digits, '_' and '$', starting with a letter, '_' or '$'.")
    )]
    InvalidSegment {
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid segment")]
        span: Option<SourceSpan>,
        field: String,
        value: String,
        reason: String,
    },
}
