//! End-to-end runs of the entity plugin through the reference host pass.

use entigen_config::PluginConfig;
use entigen_ir::{
    ArtifactKind, ClassModel, ColumnMetadata, FieldModel, MethodKind, TableMetadata, TypeIdentity,
};
use entigen_plugin::{EntityPlugin, Pipeline, TableInput};

fn plugin() -> EntityPlugin {
    EntityPlugin::new(&PluginConfig::default()).expect("default config should convert")
}

fn model(name: &str) -> ClassModel {
    ClassModel::new(TypeIdentity::new(["com", "x", "model"], name))
}

/// The three models the host builds for a `user` table.
fn user_input(table_remarks: &str) -> TableInput {
    let table = TableMetadata::new("user")
        .remarks(table_remarks)
        .column(ColumnMetadata::new("id", "BIGINT").remarks("primary key"))
        .column(ColumnMetadata::new("user_name", "VARCHAR").remarks("login name"))
        .column(ColumnMetadata::new("nick", "VARCHAR").remarks("   "));

    let base = model("User")
        .property(FieldModel::new("userName", "String").column("user_name"))
        .property(FieldModel::new("nick", "String"));
    let key = model("UserKey").property(FieldModel::new("id", "Long"));
    let example = model("UserExample");

    TableInput::new(table)
        .model(ArtifactKind::BaseEntity, base)
        .model(ArtifactKind::PrimaryKey, key)
        .model(ArtifactKind::QueryExample, example)
}

fn role_input() -> TableInput {
    let table = TableMetadata::new("role").column(ColumnMetadata::new("id", "BIGINT"));
    TableInput::new(table)
        .model(ArtifactKind::BaseEntity, model("Role"))
        .model(ArtifactKind::PrimaryKey, model("RoleKey").property(FieldModel::new("id", "Long")))
        .model(ArtifactKind::QueryExample, model("RoleExample"))
}

#[test]
fn test_user_table() {
    let report = Pipeline::new().plugin(plugin()).run([user_input("system user")]);
    assert!(!report.has_errors(), "{:?}", report.diagnostics);

    let user = report.table("user").expect("user generated");
    let base = user.class(ArtifactKind::BaseEntity).expect("base entity");

    assert_eq!(base.documentation(), ["system user"]);
    let docs: Vec<String> = base.fields().iter().map(|f| f.documentation_text()).collect();
    assert_eq!(docs, ["login name", "nick"]);
    assert!(
        base.methods()
            .iter()
            .all(|m| !matches!(m.kind, MethodKind::Getter | MethodKind::Setter))
    );
}

#[test]
fn test_auxiliary_types_relocated() {
    let report = Pipeline::new().plugin(plugin()).run([user_input("")]);
    let user = report.table("user").expect("user generated");

    let key = user.class(ArtifactKind::PrimaryKey).expect("primary key");
    let example = user.class(ArtifactKind::QueryExample).expect("example");

    insta::assert_snapshot!(key.identity(), @"com.x.model.key.UserKey");
    insta::assert_snapshot!(example.identity(), @"com.x.model.example.UserExample");
    assert_eq!(
        user.auxiliary.primary_key_type().as_deref(),
        Some("com.x.model.key.UserKey")
    );
    assert_eq!(
        user.auxiliary.example_type().as_deref(),
        Some("com.x.model.example.UserExample")
    );

    let base = user.class(ArtifactKind::BaseEntity).expect("base entity");
    assert_eq!(base.documentation(), ["User Entity"]);
    assert_eq!(base.identity().to_string(), "com.x.model.User");
    assert_eq!(base.annotations(), key.annotations());
}

#[test]
fn test_failed_table_does_not_block_others() {
    let mut broken = user_input("");
    broken.models[1].1 = ClassModel::new(TypeIdentity::new(Vec::<String>::new(), "UserKey"));

    let report = Pipeline::new().plugin(plugin()).run([broken, role_input()]);

    assert!(report.table("user").is_none());
    assert!(report.table("role").is_some());

    let errors: Vec<_> = report
        .diagnostics
        .iter()
        .filter(|d| d.severity.is_error())
        .collect();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].location, "tables.user.primary_key");
    assert!(errors[0].message.contains("cannot relocate 'UserKey'"));

    assert!(report.into_outputs().is_err());
}

#[test]
fn test_tables_keep_separate_registrations() {
    let report = Pipeline::new()
        .plugin(plugin())
        .run([user_input(""), role_input()]);
    let outputs = report.into_outputs().expect("no table should fail");

    let keys: Vec<Option<String>> = outputs
        .iter()
        .map(|t| t.auxiliary.primary_key_type())
        .collect();
    assert_eq!(
        keys,
        [
            Some("com.x.model.key.UserKey".to_string()),
            Some("com.x.model.key.RoleKey".to_string())
        ]
    );
}

#[test]
fn test_hooks_replayed_on_generated_models() {
    let pipeline = Pipeline::new().plugin(plugin());
    let first = pipeline.run([user_input("")]).into_outputs().expect("first run");

    // Feed the customized models back in, as a host re-entering would.
    let mut replay = user_input("");
    replay.models = first[0]
        .classes
        .iter()
        .map(|c| (c.kind, c.model.clone()))
        .collect();

    let second = pipeline.run([replay]).into_outputs().expect("second run");
    let user = &second[0];

    let key = user.class(ArtifactKind::PrimaryKey).expect("primary key");
    let example = user.class(ArtifactKind::QueryExample).expect("example");
    assert_eq!(key.identity().to_string(), "com.x.model.key.UserKey");
    assert_eq!(example.identity().to_string(), "com.x.model.example.UserExample");
    assert_eq!(key.annotations().len(), 3);
    assert_eq!(user.auxiliary, first[0].auxiliary);

    let base = user.class(ArtifactKind::BaseEntity).expect("base entity");

    for field in base.fields() {
        assert_eq!(field.annotations().len(), 1);
        assert_eq!(field.documentation().len(), 1);
    }
    assert_eq!(base.annotations().len(), 3);
    assert_eq!(base.imports().len(), 4);
}

#[test]
fn test_report_json() {
    let report = Pipeline::new().plugin(plugin()).run([role_input()]);
    let json: serde_json::Value =
        serde_json::from_str(&report.to_json().expect("report serializes")).expect("valid json");

    assert_eq!(json["tables"][0]["table"], "role");
    assert_eq!(json["tables"][0]["classes"][1]["kind"], "primary_key");
    assert_eq!(
        json["tables"][0]["auxiliary"]["primary_key"]["simple_name"],
        "RoleKey"
    );
    assert!(json["diagnostics"].as_array().is_some_and(|d| d.is_empty()));
}
