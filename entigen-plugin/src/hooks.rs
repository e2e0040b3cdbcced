//! The host's callback contract.

use std::fmt;

use entigen_ir::{ArtifactKind, ClassModel, ColumnMetadata, FieldModel, MethodModel, TableMetadata};

use crate::{Diagnostic, GenerationContext, Result};

/// The fixed set of generator callback points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    BaseClass,
    Field,
    Getter,
    Setter,
    PrimaryKeyClass,
    ExampleClass,
}

impl Hook {
    /// The class-level hook fired for an artifact kind.
    pub fn class_hook(kind: ArtifactKind) -> Self {
        match kind {
            ArtifactKind::BaseEntity => Hook::BaseClass,
            ArtifactKind::PrimaryKey => Hook::PrimaryKeyClass,
            ArtifactKind::QueryExample => Hook::ExampleClass,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Hook::BaseClass => "base_class_generated",
            Hook::Field => "field_generated",
            Hook::Getter => "getter_generated",
            Hook::Setter => "setter_generated",
            Hook::PrimaryKeyClass => "primary_key_class_generated",
            Hook::ExampleClass => "example_class_generated",
        }
    }
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callbacks the host invokes while building class models.
///
/// Every callback returns whether the host should carry on with its default
/// processing of the element: `Ok(false)` drops the class, field or method
/// being generated. An `Err` aborts generation of the whole table.
///
/// Calls are synchronous and sequential. Implementations must not keep any
/// of the references they are handed.
#[allow(unused_variables)]
pub trait GeneratorHooks: Send + Sync {
    /// The name of this plugin (for diagnostics and logging).
    fn name(&self) -> &'static str;

    /// Called once before any table is processed.
    ///
    /// Returning false disables the plugin for the run; explain why in
    /// `diagnostics`.
    fn validate(&self, diagnostics: &mut Vec<Diagnostic>) -> bool {
        true
    }

    fn on_base_class_generated(
        &self,
        model: &mut ClassModel,
        table: &TableMetadata,
        ctx: &mut GenerationContext,
    ) -> Result<bool> {
        Ok(true)
    }

    /// Called for each field of a base entity or primary-key class.
    ///
    /// `model` is the owning class with its fields temporarily taken out.
    fn on_field_generated(
        &self,
        field: &mut FieldModel,
        model: &mut ClassModel,
        column: &ColumnMetadata,
        table: &TableMetadata,
        kind: ArtifactKind,
    ) -> Result<bool> {
        Ok(true)
    }

    fn on_getter_generated(
        &self,
        method: &MethodModel,
        model: &ClassModel,
        column: &ColumnMetadata,
        table: &TableMetadata,
        kind: ArtifactKind,
    ) -> Result<bool> {
        Ok(true)
    }

    fn on_setter_generated(
        &self,
        method: &MethodModel,
        model: &ClassModel,
        column: &ColumnMetadata,
        table: &TableMetadata,
        kind: ArtifactKind,
    ) -> Result<bool> {
        Ok(true)
    }

    fn on_primary_key_class_generated(
        &self,
        model: &mut ClassModel,
        table: &TableMetadata,
        ctx: &mut GenerationContext,
    ) -> Result<bool> {
        Ok(true)
    }

    fn on_example_class_generated(
        &self,
        model: &mut ClassModel,
        table: &TableMetadata,
        ctx: &mut GenerationContext,
    ) -> Result<bool> {
        Ok(true)
    }

    /// Dispatch the class-level hook for `kind`.
    fn on_class_generated(
        &self,
        kind: ArtifactKind,
        model: &mut ClassModel,
        table: &TableMetadata,
        ctx: &mut GenerationContext,
    ) -> Result<bool> {
        match kind {
            ArtifactKind::BaseEntity => self.on_base_class_generated(model, table, ctx),
            ArtifactKind::PrimaryKey => self.on_primary_key_class_generated(model, table, ctx),
            ArtifactKind::QueryExample => self.on_example_class_generated(model, table, ctx),
        }
    }
}
