//! Column documentation → field documentation.

use entigen_ir::{Annotation, ClassModel, ColumnMetadata, FieldModel, TableMetadata, TypeIdentity};

/// Documentation for a class: the table remarks, or `<SimpleName><suffix>`.
pub fn class_documentation(model: &ClassModel, table: &TableMetadata, suffix: &str) -> String {
    match table.documentation() {
        Some(remarks) => remarks.to_string(),
        None => format!("{}{}", model.simple_name(), suffix),
    }
}

/// Documentation for a field: the column remarks verbatim, or the field name.
pub fn field_documentation(field: &FieldModel, column: &ColumnMetadata) -> String {
    column
        .documentation()
        .map_or_else(|| field.name.clone(), ToString::to_string)
}

/// The annotation that mirrors a field's documentation, e.g.
/// `@ApiModelProperty("user name")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocAnnotation {
    name: String,
    import: Option<TypeIdentity>,
}

impl DocAnnotation {
    pub fn new(name: impl Into<String>, import: Option<TypeIdentity>) -> Self {
        Self {
            name: name.into(),
            import,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the annotation carrying `text`.
    pub fn carrying(&self, text: &str) -> Annotation {
        let annotation = Annotation::new(&self.name).argument(text);
        match &self.import {
            Some(import) => annotation.import(import.clone()),
            None => annotation,
        }
    }

    /// Replace the field's documentation and documentation annotation.
    ///
    /// Any annotation of the same name left by an earlier call is removed
    /// first, so repeating the call leaves exactly one.
    pub fn apply(&self, field: &mut FieldModel, model: &mut ClassModel, column: &ColumnMetadata) {
        let text = field_documentation(field, column);

        field.clear_documentation();
        field.add_documentation(text.as_str());

        let annotation = self.carrying(&text);
        if let Some(import) = annotation.import_type() {
            model.add_import(import.clone());
        }
        field.remove_annotation(&self.name);
        field.add_annotation(annotation);
    }
}
