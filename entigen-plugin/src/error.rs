use entigen_ir::{ArtifactKind, IdentityError};
use miette::Diagnostic;
use thiserror::Error;

/// Result type for hook handlers.
pub type Result<T> = std::result::Result<T, Error>;

/// A fatal failure while customizing one table.
///
/// Generation is deterministic, so none of these are retried: the host
/// drops every artifact of the failing table and moves on.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("cannot relocate '{identity}'")]
    #[diagnostic(
        code(entigen::invalid_identity),
        help("the package path must be non-empty and made of valid segments")
    )]
    InvalidIdentity {
        identity: String,
        #[source]
        source: IdentityError,
    },

    #[error("table '{table}' is missing {what}")]
    #[diagnostic(code(entigen::missing_metadata))]
    MissingMetadata { table: String, what: String },

    #[error("failed to generate {kind} for table '{table}'")]
    #[diagnostic(code(entigen::table))]
    Table {
        table: String,
        kind: ArtifactKind,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn invalid_identity(identity: impl ToString, source: IdentityError) -> Self {
        Error::InvalidIdentity {
            identity: identity.to_string(),
            source,
        }
    }

    pub fn missing_metadata(table: impl Into<String>, what: impl Into<String>) -> Self {
        Error::MissingMetadata {
            table: table.into(),
            what: what.into(),
        }
    }

    /// Attach the failing table and artifact kind.
    pub fn in_table(self, table: impl Into<String>, kind: ArtifactKind) -> Self {
        Error::Table {
            table: table.into(),
            kind,
            source: Box::new(self),
        }
    }

    /// The innermost error, below any table wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Table { source, .. } => source.root(),
            other => other,
        }
    }
}
