//! Generation context shared by the hooks of one run.

use entigen_ir::{ArtifactKind, TypeIdentity};
use indexmap::IndexMap;
use serde::Serialize;

use crate::Diagnostic;

/// Relocated auxiliary types registered for one table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuxiliaryTypes {
    pub primary_key: Option<TypeIdentity>,
    pub example: Option<TypeIdentity>,
}

impl AuxiliaryTypes {
    pub fn get(&self, kind: ArtifactKind) -> Option<&TypeIdentity> {
        match kind {
            ArtifactKind::PrimaryKey => self.primary_key.as_ref(),
            ArtifactKind::QueryExample => self.example.as_ref(),
            ArtifactKind::BaseEntity => None,
        }
    }

    /// Fully-qualified primary-key type, as downstream references spell it.
    pub fn primary_key_type(&self) -> Option<String> {
        self.primary_key.as_ref().map(ToString::to_string)
    }

    /// Fully-qualified example type, as downstream references spell it.
    pub fn example_type(&self) -> Option<String> {
        self.example.as_ref().map(ToString::to_string)
    }
}

/// State carried across the hook calls of one generation run.
///
/// Registrations are partitioned by table name: each table only ever reads
/// or writes its own entry.
#[derive(Debug, Default)]
pub struct GenerationContext {
    registrations: IndexMap<String, AuxiliaryTypes>,
    /// Diagnostics collected during the run.
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `identity` as the table's auxiliary type for `kind`.
    ///
    /// Returns the previously registered identity, if any. Registering a
    /// base entity is a no-op.
    pub fn register(
        &mut self,
        table: &str,
        kind: ArtifactKind,
        identity: TypeIdentity,
    ) -> Option<TypeIdentity> {
        let entry = self.registrations.entry(table.to_string()).or_default();
        match kind {
            ArtifactKind::PrimaryKey => entry.primary_key.replace(identity),
            ArtifactKind::QueryExample => entry.example.replace(identity),
            ArtifactKind::BaseEntity => None,
        }
    }

    pub fn registered(&self, table: &str, kind: ArtifactKind) -> Option<&TypeIdentity> {
        self.registrations.get(table).and_then(|r| r.get(kind))
    }

    pub fn auxiliary_types(&self, table: &str) -> Option<&AuxiliaryTypes> {
        self.registrations.get(table)
    }

    /// Drop everything registered for a table (used when the table fails).
    pub fn unregister(&mut self, table: &str) -> Option<AuxiliaryTypes> {
        self.registrations.shift_remove(table)
    }

    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}
