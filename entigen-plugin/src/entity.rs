//! The entity customization plugin.

use entigen_config::{ConfigProblem, PluginConfig};
use entigen_ir::{
    Annotation, ArtifactKind, ClassModel, ColumnMetadata, FieldModel, MethodModel, TableMetadata,
};
use tracing::debug;

use crate::{
    Diagnostic, Error, GenerationContext, GeneratorHooks, Hook, Result,
    annotator::{DocAnnotation, class_documentation},
    rewriter::relocate,
};

/// Documents entities and their fields, attaches the capability bundle and
/// moves primary-key and example types into their own subpackages.
///
/// Accessor generation is always suppressed: the capability bundle provides
/// accessors instead.
#[derive(Debug, Clone)]
pub struct EntityPlugin {
    primary_key_package: String,
    example_package: String,
    doc_suffix: String,
    capabilities: Vec<Annotation>,
    documentation: DocAnnotation,
    /// Configuration problems, reported by `validate`.
    problems: Vec<ConfigProblem>,
}

impl EntityPlugin {
    pub const NAME: &'static str = "entity";

    /// Build the plugin from a parsed configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentity`] if an annotation import is not a
    /// fully-qualified type name. Configurations loaded through
    /// `entigen_config` have already been checked for this. Every other
    /// configuration problem is reported by [`GeneratorHooks::validate`].
    pub fn new(config: &PluginConfig) -> Result<Self> {
        let capabilities = config
            .capability_annotations()
            .map_err(|source| Error::invalid_identity("capability import", source))?;

        let doc_spec = config.documentation.spec();
        let doc = doc_spec.to_annotation().map_err(|source| {
            Error::invalid_identity(doc_spec.import.as_deref().unwrap_or_default(), source)
        })?;

        Ok(Self {
            primary_key_package: config.packages.primary_key.clone(),
            example_package: config.packages.example.clone(),
            doc_suffix: config.entity.doc_suffix.clone(),
            capabilities,
            documentation: DocAnnotation::new(doc.name(), doc.import_type().cloned()),
            problems: config.problems(),
        })
    }

    /// The annotations attached to base entity and primary-key classes.
    pub fn capabilities(&self) -> &[Annotation] {
        &self.capabilities
    }

    /// The subpackage segment an artifact kind is relocated into.
    pub fn subpackage(&self, kind: ArtifactKind) -> Option<&str> {
        match kind {
            ArtifactKind::BaseEntity => None,
            ArtifactKind::PrimaryKey => Some(self.primary_key_package.as_str()),
            ArtifactKind::QueryExample => Some(self.example_package.as_str()),
        }
    }

    fn add_capabilities(&self, model: &mut ClassModel) {
        for annotation in &self.capabilities {
            model.add_annotation(annotation.clone());
        }
    }

    fn relocate(
        &self,
        model: &mut ClassModel,
        table: &TableMetadata,
        kind: ArtifactKind,
        ctx: &mut GenerationContext,
    ) -> Result<()> {
        if let Some(segment) = self.subpackage(kind) {
            relocate(model, table, kind, segment, ctx)?;
        }
        Ok(())
    }
}

impl GeneratorHooks for EntityPlugin {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn validate(&self, diagnostics: &mut Vec<Diagnostic>) -> bool {
        for problem in &self.problems {
            diagnostics.push(Diagnostic::error(
                Self::NAME,
                problem.key(),
                problem.to_string(),
            ));
        }
        self.problems.is_empty()
    }

    fn on_base_class_generated(
        &self,
        model: &mut ClassModel,
        table: &TableMetadata,
        _ctx: &mut GenerationContext,
    ) -> Result<bool> {
        debug!(table = %table.name, class = %model.identity(), "{}", Hook::BaseClass);

        let documentation = class_documentation(model, table, &self.doc_suffix);
        model.set_documentation(documentation);
        self.add_capabilities(model);
        Ok(true)
    }

    fn on_field_generated(
        &self,
        field: &mut FieldModel,
        model: &mut ClassModel,
        column: &ColumnMetadata,
        table: &TableMetadata,
        kind: ArtifactKind,
    ) -> Result<bool> {
        debug!(table = %table.name, %kind, field = %field.name, "{}", Hook::Field);

        self.documentation.apply(field, model, column);
        Ok(true)
    }

    fn on_getter_generated(
        &self,
        method: &MethodModel,
        _model: &ClassModel,
        _column: &ColumnMetadata,
        table: &TableMetadata,
        kind: ArtifactKind,
    ) -> Result<bool> {
        debug!(table = %table.name, %kind, method = %method.name, "{} suppressed", Hook::Getter);
        Ok(false)
    }

    fn on_setter_generated(
        &self,
        method: &MethodModel,
        _model: &ClassModel,
        _column: &ColumnMetadata,
        table: &TableMetadata,
        kind: ArtifactKind,
    ) -> Result<bool> {
        debug!(table = %table.name, %kind, method = %method.name, "{} suppressed", Hook::Setter);
        Ok(false)
    }

    fn on_primary_key_class_generated(
        &self,
        model: &mut ClassModel,
        table: &TableMetadata,
        ctx: &mut GenerationContext,
    ) -> Result<bool> {
        debug!(table = %table.name, class = %model.identity(), "{}", Hook::PrimaryKeyClass);

        self.add_capabilities(model);
        self.relocate(model, table, ArtifactKind::PrimaryKey, ctx)?;
        Ok(true)
    }

    fn on_example_class_generated(
        &self,
        model: &mut ClassModel,
        table: &TableMetadata,
        ctx: &mut GenerationContext,
    ) -> Result<bool> {
        debug!(table = %table.name, class = %model.identity(), "{}", Hook::ExampleClass);

        self.relocate(model, table, ArtifactKind::QueryExample, ctx)?;
        Ok(true)
    }
}
