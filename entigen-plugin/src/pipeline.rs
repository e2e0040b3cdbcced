//! Reference host pass.
//!
//! [`Pipeline`] drives a set of [`GeneratorHooks`] over prepared class
//! models the way the host generator does: fields first, then accessors,
//! then the class-level hook. It performs no rendering or file output.
//!
//! # Example
//!
//! ```ignore
//! let report = Pipeline::new()
//!     .plugin(EntityPlugin::new(&config)?)
//!     .run(tables);
//!
//! for diag in &report.diagnostics {
//!     eprintln!("{}", diag);
//! }
//! let outputs = report.into_outputs()?;
//! ```

use entigen_ir::{ArtifactKind, ClassModel, MethodKind, TableMetadata};
use eyre::{WrapErr, bail};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    AuxiliaryTypes, Diagnostic, Error, GenerationContext, GeneratorHooks, Hook, Result,
};

const SOURCE: &str = "pipeline";

/// A table and the class models the host built for it.
#[derive(Debug, Clone)]
pub struct TableInput {
    pub table: TableMetadata,
    pub models: Vec<(ArtifactKind, ClassModel)>,
}

impl TableInput {
    pub fn new(table: TableMetadata) -> Self {
        Self {
            table,
            models: Vec::new(),
        }
    }

    pub fn model(mut self, kind: ArtifactKind, model: ClassModel) -> Self {
        self.models.push((kind, model));
        self
    }
}

/// A class model that survived the hooks.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedClass {
    pub kind: ArtifactKind,
    pub model: ClassModel,
}

/// Everything produced for one table.
#[derive(Debug, Clone, Serialize)]
pub struct TableOutput {
    pub table: String,
    pub classes: Vec<GeneratedClass>,
    pub auxiliary: AuxiliaryTypes,
}

impl TableOutput {
    pub fn class(&self, kind: ArtifactKind) -> Option<&ClassModel> {
        self.classes
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| &c.model)
    }
}

/// Result of a pipeline run.
#[derive(Debug, Serialize)]
pub struct GenerationReport {
    /// Tables that were generated, in input order.
    pub tables: Vec<TableOutput>,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_error())
            .count()
    }

    pub fn table(&self, name: &str) -> Option<&TableOutput> {
        self.tables.iter().find(|t| t.table == name)
    }

    /// Serialize the report as pretty-printed JSON.
    pub fn to_json(&self) -> eyre::Result<String> {
        serde_json::to_string_pretty(self).wrap_err("failed to serialize generation report")
    }

    /// Take the generated tables, failing if any table errored.
    pub fn into_outputs(self) -> eyre::Result<Vec<TableOutput>> {
        let failed = self.error_count();
        if failed > 0 {
            bail!("generation failed with {} error(s)", failed);
        }
        Ok(self.tables)
    }
}

/// Runs plugins over tables, one table and one artifact at a time.
pub struct Pipeline {
    plugins: Vec<Box<dyn GeneratorHooks>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
        }
    }

    /// Add a plugin. Plugins are called in the order they were added; the
    /// first one to return false stops the rest for that element.
    pub fn plugin(mut self, plugin: impl GeneratorHooks + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run every table through the plugins.
    ///
    /// Plugins failing validation are disabled with a warning. A failing
    /// table contributes an error diagnostic and no output; the remaining
    /// tables still run.
    pub fn run(&self, tables: impl IntoIterator<Item = TableInput>) -> GenerationReport {
        let mut ctx = GenerationContext::new();

        let mut active: Vec<&dyn GeneratorHooks> = Vec::new();
        for plugin in &self.plugins {
            if plugin.validate(&mut ctx.diagnostics) {
                active.push(plugin.as_ref());
            } else {
                warn!(plugin = plugin.name(), "plugin disabled");
                ctx.add_diagnostic(Diagnostic::plugin_disabled(SOURCE, plugin.name()));
            }
        }

        let mut outputs = Vec::new();
        for input in tables {
            let name = input.table.name.clone();
            match run_table(&active, input, &mut ctx) {
                Ok(output) => outputs.push(output),
                Err(err) => {
                    ctx.unregister(&name);
                    let diagnostic = Diagnostic::table_failed(SOURCE, &name, &err);
                    warn!(table = %name, error = %diagnostic.message, "table failed");
                    ctx.add_diagnostic(diagnostic);
                }
            }
        }

        GenerationReport {
            tables: outputs,
            diagnostics: ctx.diagnostics,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Ask every hook in turn, stopping at the first that declines.
fn allow_all(
    hooks: &[&dyn GeneratorHooks],
    mut call: impl FnMut(&dyn GeneratorHooks) -> Result<bool>,
) -> Result<bool> {
    for hook in hooks {
        if !call(*hook)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn run_table(
    hooks: &[&dyn GeneratorHooks],
    input: TableInput,
    ctx: &mut GenerationContext,
) -> Result<TableOutput> {
    let TableInput { table, models } = input;
    if table.name.trim().is_empty() {
        return Err(Error::missing_metadata(&table.name, "a table name"));
    }

    let mut classes = Vec::with_capacity(models.len());
    for (kind, mut model) in models {
        let keep = generate(hooks, kind, &mut model, &table, ctx)
            .map_err(|err| err.in_table(&table.name, kind))?;
        if keep {
            classes.push(GeneratedClass { kind, model });
        } else {
            debug!(table = %table.name, %kind, "class dropped by plugin");
        }
    }

    let auxiliary = ctx
        .auxiliary_types(&table.name)
        .cloned()
        .unwrap_or_default();

    Ok(TableOutput {
        table: table.name,
        classes,
        auxiliary,
    })
}

/// Run the hooks for one artifact. Returns false if the class is dropped.
fn generate(
    hooks: &[&dyn GeneratorHooks],
    kind: ArtifactKind,
    model: &mut ClassModel,
    table: &TableMetadata,
    ctx: &mut GenerationContext,
) -> Result<bool> {
    // Example classes carry query criteria, not column fields.
    if kind != ArtifactKind::QueryExample {
        generate_fields(hooks, kind, model, table)?;
        generate_accessors(hooks, kind, model, table)?;
    }

    let keep = allow_all(hooks, |hook| hook.on_class_generated(kind, model, table, ctx))?;
    debug!(table = %table.name, %kind, hook = %Hook::class_hook(kind), keep, "class hook");
    Ok(keep)
}

fn generate_fields(
    hooks: &[&dyn GeneratorHooks],
    kind: ArtifactKind,
    model: &mut ClassModel,
    table: &TableMetadata,
) -> Result<()> {
    let fields = model.take_fields();
    let mut kept = Vec::with_capacity(fields.len());
    let mut dropped = Vec::new();

    for mut field in fields {
        let Some(column) = table.find_column(field.column_name()) else {
            return Err(Error::missing_metadata(
                &table.name,
                format!("column '{}' for field '{}'", field.column_name(), field.name),
            ));
        };

        if allow_all(hooks, |hook| {
            hook.on_field_generated(&mut field, model, column, table, kind)
        })? {
            kept.push(field);
        } else {
            debug!(table = %table.name, %kind, field = %field.name, "field dropped by plugin");
            dropped.push(field.name);
        }
    }

    model.set_fields(kept);
    // Accessors of dropped fields go with them.
    model.retain_methods(|m| m.kind == MethodKind::Other || !dropped.contains(&m.field));
    Ok(())
}

fn generate_accessors(
    hooks: &[&dyn GeneratorHooks],
    kind: ArtifactKind,
    model: &mut ClassModel,
    table: &TableMetadata,
) -> Result<()> {
    let view: &ClassModel = model;
    let mut keep = Vec::with_capacity(view.methods().len());

    for method in view.methods() {
        let hook_kind = match method.kind {
            MethodKind::Getter => Hook::Getter,
            MethodKind::Setter => Hook::Setter,
            MethodKind::Other => {
                keep.push(true);
                continue;
            }
        };

        let field = view.find_field(&method.field).ok_or_else(|| {
            Error::missing_metadata(
                &table.name,
                format!("field '{}' for method '{}'", method.field, method.name),
            )
        })?;
        let column = table.find_column(field.column_name()).ok_or_else(|| {
            Error::missing_metadata(
                &table.name,
                format!("column '{}' for method '{}'", field.column_name(), method.name),
            )
        })?;

        let allowed = allow_all(hooks, |hook| match hook_kind {
            Hook::Setter => hook.on_setter_generated(method, view, column, table, kind),
            _ => hook.on_getter_generated(method, view, column, table, kind),
        })?;
        debug!(
            table = %table.name,
            %kind,
            method = %method.name,
            hook = %hook_kind,
            allowed,
            "accessor hook"
        );
        keep.push(allowed);
    }

    let mut flags = keep.into_iter();
    model.retain_methods(|_| flags.next().unwrap_or(true));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use entigen_ir::{ColumnMetadata, FieldModel, MethodModel, TypeIdentity};

    use super::*;

    struct CountingPlugin {
        fields: Arc<AtomicUsize>,
        classes: Arc<AtomicUsize>,
    }

    impl GeneratorHooks for CountingPlugin {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn on_field_generated(
            &self,
            _field: &mut FieldModel,
            _model: &mut ClassModel,
            _column: &ColumnMetadata,
            _table: &TableMetadata,
            _kind: ArtifactKind,
        ) -> Result<bool> {
            self.fields.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }

        fn on_class_generated(
            &self,
            _kind: ArtifactKind,
            _model: &mut ClassModel,
            _table: &TableMetadata,
            _ctx: &mut GenerationContext,
        ) -> Result<bool> {
            self.classes.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        }
    }

    struct DropSecret;

    impl GeneratorHooks for DropSecret {
        fn name(&self) -> &'static str {
            "drop-secret"
        }

        fn on_field_generated(
            &self,
            field: &mut FieldModel,
            _model: &mut ClassModel,
            _column: &ColumnMetadata,
            _table: &TableMetadata,
            _kind: ArtifactKind,
        ) -> Result<bool> {
            Ok(field.name != "secret")
        }
    }

    struct Invalid;

    impl GeneratorHooks for Invalid {
        fn name(&self) -> &'static str {
            "invalid"
        }

        fn validate(&self, _diagnostics: &mut Vec<Diagnostic>) -> bool {
            false
        }

        fn on_class_generated(
            &self,
            _kind: ArtifactKind,
            _model: &mut ClassModel,
            _table: &TableMetadata,
            _ctx: &mut GenerationContext,
        ) -> Result<bool> {
            Ok(false)
        }
    }

    fn user_input() -> TableInput {
        let table = TableMetadata::new("user")
            .column(ColumnMetadata::new("id", "BIGINT"))
            .column(ColumnMetadata::new("secret", "VARCHAR"));
        let base = ClassModel::new(TypeIdentity::new(["com", "x"], "User"))
            .property(FieldModel::new("id", "Long"))
            .property(FieldModel::new("secret", "String"))
            .method(MethodModel::new(MethodKind::Other, "toString", "id"));
        let example = ClassModel::new(TypeIdentity::new(["com", "x"], "UserExample"));

        TableInput::new(table)
            .model(ArtifactKind::BaseEntity, base)
            .model(ArtifactKind::QueryExample, example)
    }

    #[test]
    fn test_hooks_called_per_field_and_class() {
        let fields = Arc::new(AtomicUsize::new(0));
        let classes = Arc::new(AtomicUsize::new(0));
        let pipeline = Pipeline::new().plugin(CountingPlugin {
            fields: fields.clone(),
            classes: classes.clone(),
        });

        let report = pipeline.run([user_input()]);

        assert!(!report.has_errors());
        // Example classes have no field pass.
        assert_eq!(fields.load(Ordering::SeqCst), 2);
        assert_eq!(classes.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dropped_field_takes_accessors() {
        let report = Pipeline::new().plugin(DropSecret).run([user_input()]);
        let base = report
            .table("user")
            .and_then(|t| t.class(ArtifactKind::BaseEntity))
            .expect("base entity generated");

        let fields: Vec<&str> = base.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, ["id"]);
        let methods: Vec<&str> = base.methods().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(methods, ["getId", "setId", "toString"]);
    }

    #[test]
    fn test_invalid_plugin_disabled() {
        let report = Pipeline::new().plugin(Invalid).run([user_input()]);

        assert!(!report.has_errors());
        assert_eq!(
            report.diagnostics,
            [Diagnostic::plugin_disabled("pipeline", "invalid")]
        );
        assert_eq!(report.tables[0].classes.len(), 2);
    }

    #[test]
    fn test_missing_column_fails_table() {
        let mut input = user_input();
        input.table.columns.pop();

        let report = Pipeline::new().plugin(DropSecret).run([input]);

        assert!(report.tables.is_empty());
        let diag = &report.diagnostics[0];
        assert!(diag.severity.is_error());
        assert_eq!(diag.location, "tables.user.base_entity");
        assert!(diag.message.contains("column 'secret'"));
    }

    #[test]
    fn test_missing_table_name() {
        let mut input = user_input();
        input.table.name = String::new();

        let report = Pipeline::new().run([input]);
        assert_eq!(report.error_count(), 1);
        assert_eq!(report.diagnostics[0].location, "tables");
        assert!(report.into_outputs().is_err());
    }
}
