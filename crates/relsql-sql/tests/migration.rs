use pretty_assertions::assert_eq;
use relsql_core::{
    schema::{Field, FieldKind, FieldMigration, Model, ModelMigration},
    stmt::Value,
};
use relsql_sql::{define, model_add, model_change, model_remove, Serializer, Statement};

fn serialize_all(statements: &[Statement]) -> Vec<String> {
    statements
        .iter()
        .map(|stmt| Serializer::postgresql().serialize_ddl(stmt))
        .collect()
}

fn change(definition: &Model, migration: &ModelMigration) -> Vec<String> {
    serialize_all(&model_change(definition, migration).unwrap())
}

fn simple() -> Model {
    Model::new("simple")
        .with_field(Field::new("id", FieldKind::Int).auto())
        .with_field(Field::new("name", FieldKind::Str).nullable(false))
        .with_id("id")
        .with_unique("name", &["name"])
        .with_index("id", &["id"])
}

fn renamed(store: &str) -> ModelMigration {
    ModelMigration {
        store: Some(store.to_string()),
        ..Default::default()
    }
}

fn field_change(name: &str, change: FieldMigration) -> ModelMigration {
    let mut migration = ModelMigration::default();
    migration.fields.change.insert(name.to_string(), change);
    migration
}

#[test]
fn add_and_remove_model() {
    assert_eq!(serialize_all(&model_add(&simple())), serialize_all(&define(&simple())));
    assert_eq!(
        serialize_all(&model_remove(&simple())),
        vec![r#"DROP TABLE IF EXISTS "simple""#.to_string()]
    );
    assert_eq!(
        serialize_all(&model_remove(&simple().with_schema("people"))),
        vec![r#"DROP TABLE IF EXISTS "people"."simple""#.to_string()]
    );
}

#[test]
fn table_rename_renames_indexes() {
    assert_eq!(
        change(&simple(), &renamed("simples")),
        vec![
            r#"ALTER TABLE "simple" RENAME TO "simples""#.to_string(),
            r#"ALTER INDEX "simple_id" RENAME TO "simples_id""#.to_string(),
            r#"ALTER INDEX "simple_name" RENAME TO "simples_name""#.to_string(),
        ]
    );
}

#[test]
fn schema_change_before_rename() {
    let migration = ModelMigration {
        schema: Some("people".to_string()),
        ..renamed("simples")
    };

    assert_eq!(
        change(&simple(), &migration),
        vec![
            r#"ALTER TABLE "simple" SET SCHEMA "people""#.to_string(),
            r#"ALTER TABLE "people"."simple" RENAME TO "simples""#.to_string(),
            r#"ALTER INDEX "people"."simple_id" RENAME TO "simples_id""#.to_string(),
            r#"ALTER INDEX "people"."simple_name" RENAME TO "simples_name""#.to_string(),
        ]
    );
}

#[test]
fn unchanged_schema_and_table_emit_nothing() {
    let model = simple().with_schema("people");
    let migration = ModelMigration {
        schema: Some("people".to_string()),
        ..renamed("simple")
    };

    assert!(change(&model, &migration).is_empty());
}

#[test]
fn full_migration_order() {
    let definition = simple()
        .with_field(Field::new("flag", FieldKind::Bool).default(false))
        .with_field(
            Field::new("meta", FieldKind::Map)
                .extract("a", FieldKind::Int)
                .extract("b", FieldKind::Str),
        );

    let mut migration = renamed("simples");
    migration
        .fields
        .add
        .push(Field::new("count", FieldKind::Int).default(0));
    migration.fields.remove.push("flag".to_string());

    let mut meta = FieldMigration::default();
    meta.extract.remove.push("b".to_string());
    meta.extract.change.insert("a".to_string(), FieldKind::Float);
    meta.extract.add.insert("c".to_string(), FieldKind::Str);
    migration.fields.change.insert("meta".to_string(), meta);

    migration.fields.change.insert(
        "name".to_string(),
        FieldMigration {
            store: Some("label".to_string()),
            nullable: Some(true),
            default: Some(Some(Value::from("anon"))),
            ..Default::default()
        },
    );

    migration.unique.remove.push("name".to_string());
    migration
        .unique
        .add
        .insert("label".to_string(), vec!["label".to_string()]);
    migration
        .index
        .rename
        .insert("id".to_string(), "key".to_string());

    assert_eq!(
        change(&definition, &migration),
        vec![
            r#"ALTER TABLE "simple" RENAME TO "simples""#.to_string(),
            r#"ALTER INDEX "simple_id" RENAME TO "simples_id""#.to_string(),
            r#"ALTER INDEX "simple_name" RENAME TO "simples_name""#.to_string(),
            r#"DROP INDEX "simples_name""#.to_string(),
            r#"ALTER TABLE "simples" ADD COLUMN "count" INT NOT NULL DEFAULT 0"#.to_string(),
            r#"ALTER TABLE "simples" DROP COLUMN "flag""#.to_string(),
            r#"ALTER TABLE "simples" DROP COLUMN "meta__a""#.to_string(),
            r#"ALTER TABLE "simples" DROP COLUMN "meta__b""#.to_string(),
            r##"ALTER TABLE "simples" ADD COLUMN "meta__a" FLOAT GENERATED ALWAYS AS (("meta"#>>'{a}')::FLOAT) STORED"##.to_string(),
            r##"ALTER TABLE "simples" ADD COLUMN "meta__c" VARCHAR(255) GENERATED ALWAYS AS (("meta"#>>'{c}')::VARCHAR(255)) STORED"##.to_string(),
            r#"ALTER TABLE "simples" ALTER COLUMN "name" SET DEFAULT 'anon', ALTER COLUMN "name" DROP NOT NULL"#.to_string(),
            r#"ALTER TABLE "simples" RENAME COLUMN "name" TO "label""#.to_string(),
            r#"CREATE UNIQUE INDEX "simples_label" ON "simples" ("label")"#.to_string(),
            r#"ALTER INDEX "simples_id" RENAME TO "simples_key""#.to_string(),
        ]
    );
}

#[test]
fn removed_field_drops_generated_columns_first() {
    let definition = simple().with_field(
        Field::new("meta", FieldKind::Map)
            .extract("b", FieldKind::Int)
            .extract("a", FieldKind::Int),
    );

    let mut migration = ModelMigration::default();
    migration.fields.remove.push("meta".to_string());

    assert_eq!(
        change(&definition, &migration),
        vec![
            r#"ALTER TABLE "simple" DROP COLUMN "meta__a""#.to_string(),
            r#"ALTER TABLE "simple" DROP COLUMN "meta__b""#.to_string(),
            r#"ALTER TABLE "simple" DROP COLUMN "meta""#.to_string(),
        ]
    );
}

#[test]
fn added_field_adds_generated_columns() {
    let mut migration = ModelMigration::default();
    migration
        .fields
        .add
        .push(Field::new("meta", FieldKind::Map).extract("a", FieldKind::Bool));

    assert_eq!(
        change(&simple(), &migration),
        vec![
            r#"ALTER TABLE "simple" ADD COLUMN "meta" JSONB NOT NULL DEFAULT '{}'"#.to_string(),
            r##"ALTER TABLE "simple" ADD COLUMN "meta__a" BOOLEAN GENERATED ALWAYS AS (("meta"#>>'{a}')::BOOLEAN) STORED"##.to_string(),
        ]
    );
}

#[test]
fn base_rename_renames_generated_columns() {
    let definition = simple().with_field(
        Field::new("meta", FieldKind::Map)
            .extract("a", FieldKind::Int)
            .extract("b", FieldKind::Int),
    );

    let mut meta = FieldMigration {
        store: Some("data".to_string()),
        ..Default::default()
    };
    meta.extract.remove.push("b".to_string());

    assert_eq!(
        change(&definition, &field_change("meta", meta)),
        vec![
            r#"ALTER TABLE "simple" DROP COLUMN "meta__b""#.to_string(),
            r#"ALTER TABLE "simple" RENAME COLUMN "meta" TO "data""#.to_string(),
            r#"ALTER TABLE "simple" RENAME COLUMN "meta__a" TO "data__a""#.to_string(),
        ]
    );
}

#[test]
fn retype_casts_existing_values() {
    assert_eq!(
        change(
            &simple(),
            &field_change(
                "name",
                FieldMigration {
                    kind: Some(FieldKind::Int),
                    ..Default::default()
                }
            )
        ),
        vec![r#"ALTER TABLE "simple" ALTER COLUMN "name" TYPE INT USING "name"::INT"#.to_string()]
    );

    assert_eq!(
        change(
            &simple(),
            &field_change(
                "name",
                FieldMigration {
                    length: Some(64),
                    ..Default::default()
                }
            )
        ),
        vec![
            r#"ALTER TABLE "simple" ALTER COLUMN "name" TYPE VARCHAR(64) USING "name"::VARCHAR(64)"#
                .to_string()
        ]
    );
}

#[test]
fn retype_to_container_supplies_empty_default() {
    assert_eq!(
        change(
            &simple(),
            &field_change(
                "name",
                FieldMigration {
                    kind: Some(FieldKind::List),
                    ..Default::default()
                }
            )
        ),
        vec![
            r#"ALTER TABLE "simple" ALTER COLUMN "name" TYPE JSONB USING "name"::JSONB, ALTER COLUMN "name" SET DEFAULT '[]'"#
                .to_string()
        ]
    );
}

#[test]
fn container_to_container_swaps_empty_default() {
    let model = Model::new("things").with_field(Field::new("stuff", FieldKind::List));

    assert_eq!(
        change(
            &model,
            &field_change(
                "stuff",
                FieldMigration {
                    kind: Some(FieldKind::Map),
                    ..Default::default()
                }
            )
        ),
        vec![r#"ALTER TABLE "things" ALTER COLUMN "stuff" SET DEFAULT '{}'"#.to_string()]
    );
}

#[test]
fn default_changes() {
    assert_eq!(
        change(
            &simple(),
            &field_change(
                "name",
                FieldMigration {
                    default: Some(Some(Value::from("ya"))),
                    ..Default::default()
                }
            )
        ),
        vec![r#"ALTER TABLE "simple" ALTER COLUMN "name" SET DEFAULT 'ya'"#.to_string()]
    );

    assert_eq!(
        change(
            &simple(),
            &field_change(
                "name",
                FieldMigration {
                    default: Some(None),
                    nullable: Some(true),
                    ..Default::default()
                }
            )
        ),
        vec![
            r#"ALTER TABLE "simple" ALTER COLUMN "name" DROP DEFAULT, ALTER COLUMN "name" DROP NOT NULL"#
                .to_string()
        ]
    );
}

#[test]
fn nothing_to_change() {
    assert!(change(&simple(), &field_change("name", FieldMigration::default())).is_empty());
}

#[test]
fn unknown_field_is_rejected() {
    let err = model_change(&simple(), &field_change("nope", FieldMigration::default()))
        .unwrap_err();
    assert!(err.is_invalid_definition());
}

#[test]
fn inverse_change_round_trips() {
    let definition = simple().with_field(Field::new("meta", FieldKind::Map));

    let mut forward = renamed("simples");
    let mut meta = FieldMigration {
        store: Some("data".to_string()),
        ..Default::default()
    };
    meta.extract.add.insert("a".to_string(), FieldKind::Int);
    forward.fields.change.insert("meta".to_string(), meta);
    forward.fields.change.insert(
        "name".to_string(),
        FieldMigration {
            kind: Some(FieldKind::Int),
            nullable: Some(true),
            ..Default::default()
        },
    );

    let mut backward = renamed("simple");
    let mut meta = FieldMigration {
        store: Some("meta".to_string()),
        ..Default::default()
    };
    meta.extract.remove.push("a".to_string());
    backward.fields.change.insert("meta".to_string(), meta);
    backward.fields.change.insert(
        "name".to_string(),
        FieldMigration {
            kind: Some(FieldKind::Str),
            nullable: Some(false),
            ..Default::default()
        },
    );

    let migrated = definition.apply(&forward).unwrap();
    assert!(!model_change(&definition, &forward).unwrap().is_empty());
    assert!(!model_change(&migrated, &backward).unwrap().is_empty());

    let restored = migrated.apply(&backward).unwrap();
    assert_eq!(
        serialize_all(&define(&restored)),
        serialize_all(&define(&definition))
    );
    assert_eq!(
        change(&migrated, &backward)[..3].to_vec(),
        vec![
            r#"ALTER TABLE "simples" RENAME TO "simple""#.to_string(),
            r#"ALTER INDEX "simples_id" RENAME TO "simple_id""#.to_string(),
            r#"ALTER INDEX "simples_name" RENAME TO "simple_name""#.to_string(),
        ]
    );
}
