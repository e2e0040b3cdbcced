//! Artifact classification.

use std::fmt;

use serde::Serialize;

/// Which generated artifact a class model represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// The base record class holding every column.
    BaseEntity,
    /// The primary-key value object.
    PrimaryKey,
    /// The query-example object.
    QueryExample,
}

impl ArtifactKind {
    /// All kinds in the order the host generates them.
    pub const ALL: [ArtifactKind; 3] = [
        ArtifactKind::BaseEntity,
        ArtifactKind::PrimaryKey,
        ArtifactKind::QueryExample,
    ];

    /// Get the snake_case string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactKind::BaseEntity => "base_entity",
            ArtifactKind::PrimaryKey => "primary_key",
            ArtifactKind::QueryExample => "query_example",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
