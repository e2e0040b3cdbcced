//! In-memory models of generated classes.
//!
//! The host owns these models for the duration of one generation pass.
//! Annotation and import appends are append-if-absent, so replaying a hook
//! on the same model leaves it unchanged.

use std::fmt;

use serde::Serialize;

use crate::TypeIdentity;

/// An annotation attached to a class or field.
#[derive(Debug, Clone, Eq, Serialize)]
pub struct Annotation {
    name: String,
    arguments: Vec<String>,
    import: Option<TypeIdentity>,
}

impl Annotation {
    /// Create an annotation with no arguments and no import.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: Vec::new(),
            import: None,
        }
    }

    /// Add a string literal argument.
    pub fn argument(mut self, value: impl Into<String>) -> Self {
        self.arguments.push(value.into());
        self
    }

    /// Set the type that must be imported for this annotation to resolve.
    pub fn import(mut self, import: TypeIdentity) -> Self {
        self.import = Some(import);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn import_type(&self) -> Option<&TypeIdentity> {
        self.import.as_ref()
    }
}

// The import is derived from the name, so it does not take part in equality.
impl PartialEq for Annotation {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.arguments == other.arguments
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.name)?;
        if self.arguments.is_empty() {
            return Ok(());
        }
        let args: Vec<String> = self
            .arguments
            .iter()
            .map(|a| format!("\"{}\"", escape_literal(a)))
            .collect();
        write!(f, "({})", args.join(", "))
    }
}

fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn push_if_absent<T: PartialEq>(items: &mut Vec<T>, item: T) -> bool {
    if items.contains(&item) {
        false
    } else {
        items.push(item);
        true
    }
}

/// Kind of accessor method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
    Getter,
    Setter,
    Other,
}

/// A method the host plans to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodModel {
    pub kind: MethodKind,
    pub name: String,
    /// Name of the field this method reads or writes.
    pub field: String,
}

impl MethodModel {
    pub fn new(kind: MethodKind, name: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            field: field.into(),
        }
    }

    /// Conventional getter for `field` (`getName`).
    pub fn getter(field: &str) -> Self {
        Self::new(MethodKind::Getter, format!("get{}", capitalize(field)), field)
    }

    /// Conventional setter for `field` (`setName`).
    pub fn setter(field: &str) -> Self {
        Self::new(MethodKind::Setter, format!("set{}", capitalize(field)), field)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

/// A field of a generated class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldModel {
    pub name: String,
    pub ty: String,
    /// Source column, when it is named differently from the field.
    pub column: Option<String>,
    documentation: Vec<String>,
    annotations: Vec<Annotation>,
}

impl FieldModel {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            column: None,
            documentation: Vec::new(),
            annotations: Vec::new(),
        }
    }

    /// Set the source column name.
    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// The column this field was generated from.
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    pub fn documentation(&self) -> &[String] {
        &self.documentation
    }

    /// The documentation lines joined with newlines.
    pub fn documentation_text(&self) -> String {
        self.documentation.join("\n")
    }

    pub fn clear_documentation(&mut self) {
        self.documentation.clear();
    }

    /// Append a documentation line unless it is already present.
    pub fn add_documentation(&mut self, line: impl Into<String>) -> bool {
        push_if_absent(&mut self.documentation, line.into())
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Append an annotation unless an equal one is already attached.
    pub fn add_annotation(&mut self, annotation: Annotation) -> bool {
        push_if_absent(&mut self.annotations, annotation)
    }

    /// Remove every annotation with the given name.
    pub fn remove_annotation(&mut self, name: &str) {
        self.annotations.retain(|a| a.name != name);
    }
}

/// One generated source artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassModel {
    identity: TypeIdentity,
    fields: Vec<FieldModel>,
    methods: Vec<MethodModel>,
    annotations: Vec<Annotation>,
    imports: Vec<TypeIdentity>,
    documentation: Vec<String>,
    /// Subpackage segment the model was moved into.
    #[serde(skip_serializing_if = "Option::is_none")]
    relocation: Option<String>,
}

impl ClassModel {
    pub fn new(identity: TypeIdentity) -> Self {
        Self {
            identity,
            fields: Vec::new(),
            methods: Vec::new(),
            annotations: Vec::new(),
            imports: Vec::new(),
            documentation: Vec::new(),
            relocation: None,
        }
    }

    pub fn field(mut self, field: FieldModel) -> Self {
        self.fields.push(field);
        self
    }

    pub fn method(mut self, method: MethodModel) -> Self {
        self.methods.push(method);
        self
    }

    /// Add a field together with its conventional getter and setter.
    pub fn property(self, field: FieldModel) -> Self {
        let getter = MethodModel::getter(&field.name);
        let setter = MethodModel::setter(&field.name);
        self.field(field).method(getter).method(setter)
    }

    pub fn identity(&self) -> &TypeIdentity {
        &self.identity
    }

    pub fn simple_name(&self) -> &str {
        self.identity.simple_name()
    }

    /// The subpackage segment this model was relocated into, if any.
    pub fn relocation(&self) -> Option<&str> {
        self.relocation.as_deref()
    }

    /// Move the model to `identity`, recording `segment` as its relocation.
    ///
    /// The record travels with the model, so a model handed back to the
    /// host keeps it.
    pub fn relocate_to(&mut self, identity: TypeIdentity, segment: impl Into<String>) {
        self.identity = identity;
        self.relocation = Some(segment.into());
    }

    pub fn fields(&self) -> &[FieldModel] {
        &self.fields
    }

    /// Move the fields out, leaving the model without any.
    ///
    /// Field hooks need the field and its owning model mutably at once; the
    /// host takes the fields, runs the hooks, then hands them back with
    /// [`ClassModel::set_fields`].
    pub fn take_fields(&mut self) -> Vec<FieldModel> {
        std::mem::take(&mut self.fields)
    }

    pub fn set_fields(&mut self, fields: Vec<FieldModel>) {
        self.fields = fields;
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldModel> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn methods(&self) -> &[MethodModel] {
        &self.methods
    }

    /// Keep only the methods for which `keep` returns true.
    pub fn retain_methods(&mut self, keep: impl FnMut(&MethodModel) -> bool) {
        self.methods.retain(keep);
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Append an annotation unless an equal one is already attached.
    ///
    /// The annotation's import, if any, is added as well.
    pub fn add_annotation(&mut self, annotation: Annotation) -> bool {
        if let Some(import) = annotation.import_type() {
            self.add_import(import.clone());
        }
        push_if_absent(&mut self.annotations, annotation)
    }

    pub fn imports(&self) -> &[TypeIdentity] {
        &self.imports
    }

    /// Append an import unless it is already present.
    pub fn add_import(&mut self, import: TypeIdentity) -> bool {
        push_if_absent(&mut self.imports, import)
    }

    pub fn documentation(&self) -> &[String] {
        &self.documentation
    }

    /// The documentation lines joined with newlines.
    pub fn documentation_text(&self) -> String {
        self.documentation.join("\n")
    }

    /// Replace the documentation with a single entry.
    pub fn set_documentation(&mut self, text: impl Into<String>) {
        self.documentation = vec![text.into()];
    }
}
