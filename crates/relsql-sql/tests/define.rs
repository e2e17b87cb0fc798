use pretty_assertions::assert_eq;
use relsql_core::{
    schema::{Field, FieldKind, Model},
    stmt::Value,
};
use relsql_sql::{column_define, define, extract_define, field_define, stmt, Serializer};

fn column(field: &Field) -> String {
    serialize_column(column_define(field))
}

fn serialize_column(column: stmt::ColumnDef) -> String {
    // Columns serialize inside ADD COLUMN; strip the statement prefix
    let sql = Serializer::postgresql().serialize_ddl(&stmt::Statement::add_column(
        stmt::Name::from("t"),
        column,
    ));
    sql.trim_start_matches("ALTER TABLE \"t\" ADD COLUMN ")
        .to_string()
}

fn serialize_all(statements: &[stmt::Statement]) -> Vec<String> {
    statements
        .iter()
        .map(|stmt| Serializer::postgresql().serialize_ddl(stmt))
        .collect()
}

fn simple() -> Model {
    Model::new("simple")
        .with_field(Field::new("id", FieldKind::Int).auto())
        .with_field(Field::new("name", FieldKind::Str).nullable(false))
        .with_id("id")
        .with_unique("name", &["name"])
        .with_index("id", &["id"])
}

#[test]
fn bool_column() {
    let flag = Field::new("flag", FieldKind::Bool)
        .with_store("_flag")
        .nullable(false);
    assert_eq!(column(&flag), r#""_flag" BOOLEAN NOT NULL"#);

    let flag = flag.default(false);
    assert_eq!(column(&flag), r#""_flag" BOOLEAN NOT NULL DEFAULT False"#);
}

#[test]
fn serial_primary_key() {
    let id = Field::new("id", FieldKind::Int)
        .with_store("_id")
        .primary_key()
        .auto()
        .nullable(false);

    assert_eq!(column(&id), r#""_id" SERIAL NOT NULL PRIMARY KEY"#);
}

#[test]
fn scalar_defaults() {
    assert_eq!(
        column(&Field::new("name", FieldKind::Str).length(32).default("ya")),
        r#""name" VARCHAR(32) NOT NULL DEFAULT 'ya'"#
    );
    assert_eq!(
        column(&Field::new("quote", FieldKind::Str).default("it's")),
        r#""quote" VARCHAR(255) NOT NULL DEFAULT 'it''s'"#
    );
    assert_eq!(
        column(&Field::new("ratio", FieldKind::Float).default(1.5)),
        r#""ratio" FLOAT NOT NULL DEFAULT 1.5"#
    );
    assert_eq!(
        column(&Field::new("count", FieldKind::Int).default(0).nullable(true)),
        r#""count" INT DEFAULT 0"#
    );
}

#[test]
fn container_columns_default_empty() {
    assert_eq!(
        column(&Field::new("stuff", FieldKind::List)),
        r#""stuff" JSONB NOT NULL DEFAULT '[]'"#
    );
    assert_eq!(
        column(&Field::new("tags", FieldKind::Set)),
        r#""tags" JSONB NOT NULL DEFAULT '[]'"#
    );
    assert_eq!(
        column(&Field::new("things", FieldKind::Map)),
        r#""things" JSONB NOT NULL DEFAULT '{}'"#
    );
    assert_eq!(
        column(&Field::new("things", FieldKind::Map).default(Value::Json(serde_json::json!({"a": 1})))),
        r#""things" JSONB NOT NULL DEFAULT '{"a":1}'"#
    );
    assert_eq!(column(&Field::new("ip", FieldKind::Other)), r#""ip" JSONB"#);
}

#[test]
fn parsed_fields_render_like_built_ones() {
    let parsed = |json: &str| column(&serde_json::from_str::<Field>(json).unwrap());

    assert_eq!(
        parsed(r#"{"name": "stuff", "kind": "list"}"#),
        r#""stuff" JSONB NOT NULL DEFAULT '[]'"#
    );
    assert_eq!(
        parsed(r#"{"name": "flag", "kind": "bool", "default": false}"#),
        column(&Field::new("flag", FieldKind::Bool).default(false))
    );
    assert_eq!(
        parsed(r#"{"name": "flag", "kind": "bool", "default": false, "none": true}"#),
        r#""flag" BOOLEAN DEFAULT False"#
    );
}

#[test]
fn generated_defaults_are_not_rendered() {
    let stamp = Field::new("stamp", FieldKind::Int).default_with(|| Value::I64(1));
    assert_eq!(column(&stamp), r#""stamp" INT NOT NULL"#);

    let stuff = Field::new("stuff", FieldKind::List).default_with(|| Value::from(vec![1]));
    assert_eq!(column(&stuff), r#""stuff" JSONB NOT NULL DEFAULT '[]'"#);
}

#[test]
fn raw_column_definition() {
    let field = Field::new("id", FieldKind::Int).definition(r#""id" BIGSERIAL PRIMARY KEY"#);
    assert_eq!(column(&field), r#""id" BIGSERIAL PRIMARY KEY"#);
}

#[test]
fn extract_column() {
    assert_eq!(
        serialize_column(extract_define("grab", "c__d__1___1", FieldKind::Str)),
        r##""grab__c__d__1___1" VARCHAR(255) GENERATED ALWAYS AS (("grab"#>>'{c,d,1,"1"}')::VARCHAR(255)) STORED"##
    );
}

#[test]
fn field_with_extracts_sorted_by_path() {
    let meta = Field::new("meta", FieldKind::Map)
        .extract("b", FieldKind::Int)
        .extract("a", FieldKind::List);

    let columns: Vec<_> = field_define(&meta).into_iter().map(serialize_column).collect();

    assert_eq!(
        columns,
        vec![
            r#""meta" JSONB NOT NULL DEFAULT '{}'"#.to_string(),
            r##""meta__a" JSONB GENERATED ALWAYS AS ("meta"#>'{a}') STORED"##.to_string(),
            r##""meta__b" INT GENERATED ALWAYS AS (("meta"#>>'{b}')::INT) STORED"##.to_string(),
        ]
    );
}

#[test]
fn injected_field_has_no_column() {
    let color = Field::new("color", FieldKind::Str).inject("meta__color");
    assert!(field_define(&color).is_empty());
}

#[test]
fn define_table_and_indexes() {
    assert_eq!(
        serialize_all(&define(&simple())),
        vec![
            "CREATE TABLE IF NOT EXISTS \"simple\" (\n  \"id\" SERIAL PRIMARY KEY,\n  \"name\" VARCHAR(255) NOT NULL\n)".to_string(),
            r#"CREATE UNIQUE INDEX "simple_name" ON "simple" ("name")"#.to_string(),
            r#"CREATE INDEX "simple_id" ON "simple" ("id")"#.to_string(),
        ]
    );
}

#[test]
fn define_skips_injected_fields() {
    let model = Model::new("unit")
        .with_field(Field::new("meta", FieldKind::Map))
        .with_field(Field::new("color", FieldKind::Str).inject("meta__color"))
        .with_unique("kind-name", &["meta", "name"]);

    assert_eq!(
        serialize_all(&define(&model)),
        vec![
            "CREATE TABLE IF NOT EXISTS \"unit\" (\n  \"meta\" JSONB NOT NULL DEFAULT '{}'\n)".to_string(),
            r#"CREATE UNIQUE INDEX "unit_kind_name" ON "unit" ("meta", "name")"#.to_string(),
        ]
    );
}

#[test]
fn define_in_schema() {
    let statements = serialize_all(&define(&simple().with_schema("people")));

    assert_eq!(
        statements[0],
        "CREATE TABLE IF NOT EXISTS \"people\".\"simple\" (\n  \"id\" SERIAL PRIMARY KEY,\n  \"name\" VARCHAR(255) NOT NULL\n)"
    );
    assert_eq!(
        statements[1],
        r#"CREATE UNIQUE INDEX "simple_name" ON "people"."simple" ("name")"#
    );
}

#[test]
fn raw_model_definition() {
    let mut model = simple();
    model.definition = Some(vec!["CREATE TABLE \"simple\" (\"id\" INT)".to_string()]);

    assert_eq!(
        serialize_all(&define(&model)),
        vec!["CREATE TABLE \"simple\" (\"id\" INT)".to_string()]
    );
}
