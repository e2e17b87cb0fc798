mod support;

use support::{row, ExecLog};

use pretty_assertions::assert_eq;
use relsql::{stmt::Value, Action, Collection, Config};
use serde_json::json;

fn unit_row(id: i64, name: &str) -> relsql::stmt::Row {
    row([("id", Value::from(id)), ("name", Value::from(name))])
}

#[tokio::test]
async fn retrieve_filters_sorts_and_flags_overflow() {
    let log = ExecLog::new();
    let mut db = support::source(&log);

    log.respond_rows(vec![unit_row(1, "a"), unit_row(2, "b")]);

    let mut units = Collection::query("unit")
        .filter("name__in", vec!["a", "b"])
        .limit(2);

    db.retrieve(&mut units).await.unwrap();

    assert_eq!(
        log.pop_sql(),
        (
            r#"SELECT * FROM "unit" WHERE "name" IN ($1, $2) ORDER BY "name" LIMIT $3"#.to_string(),
            vec![Value::from("a"), Value::from("b"), Value::from(2)]
        )
    );

    assert_eq!(units.action(), Action::Update);
    assert!(units.overflow());
    assert_eq!(units.len(), 2);
    assert_eq!(units.records()[1].get("name"), Some(&Value::from("b")));
    assert!(units
        .records()
        .iter()
        .all(|record| record.action() == Action::Update && !record.has_changes()));
}

#[tokio::test]
async fn sort_override_applies_once() {
    let log = ExecLog::new();
    let mut db = support::source(&log);

    let mut units = Collection::query("unit").sort(&["-id"]).limit(10).offset(20);
    db.retrieve(&mut units).await.unwrap();

    assert_eq!(
        log.pop_sql(),
        (
            r#"SELECT * FROM "unit" ORDER BY "id" DESC LIMIT $1 OFFSET $2"#.to_string(),
            vec![Value::from(10), Value::from(20)]
        )
    );
    assert!(!units.overflow());
    assert!(units.is_empty());

    db.retrieve(&mut units).await.unwrap();

    let (sql, _) = log.pop_sql();
    assert_eq!(
        sql,
        r#"SELECT * FROM "unit" ORDER BY "name" LIMIT $1 OFFSET $2"#
    );
}

#[tokio::test]
async fn zero_offset_is_omitted() {
    let log = ExecLog::new();
    let mut db = support::source(&log);

    let mut units = Collection::query("unit").offset(0).limit(5);
    db.retrieve(&mut units).await.unwrap();

    let (sql, params) = log.pop_sql();
    assert_eq!(sql, r#"SELECT * FROM "unit" ORDER BY "name" LIMIT $1"#);
    assert_eq!(params, vec![Value::from(5)]);
}

#[tokio::test]
async fn retrieve_one_requires_exactly_one_row() {
    let log = ExecLog::new();
    let mut db = support::source(&log);

    let mut none = Collection::query("unit").filter("id", 9);
    let err = db.retrieve_one(&mut none).await.unwrap_err();
    assert!(err.is_none_retrieved());

    log.respond_rows(vec![unit_row(1, "a"), unit_row(2, "b")]);
    let mut many = Collection::query("unit");
    let err = db.retrieve_one(&mut many).await.unwrap_err();
    assert!(err.is_more_than_one_retrieved());

    log.respond_rows(vec![unit_row(1, "a")]);
    let mut one = Collection::query("unit").filter("id", 1);
    let record = db.retrieve_one(&mut one).await.unwrap();
    assert_eq!(record.get("name"), Some(&Value::from("a")));
    assert_eq!(one.action(), Action::Update);
}

#[tokio::test]
async fn try_retrieve_one_without_rows_is_none() {
    let log = ExecLog::new();
    let mut db = support::source(&log);

    let mut units = Collection::query("unit").filter("name", "missing");
    let found = db.try_retrieve_one(&mut units).await.unwrap();

    assert!(found.is_none());
    assert_eq!(units.action(), Action::Retrieve);

    let (sql, params) = log.pop_sql();
    assert_eq!(sql, r#"SELECT * FROM "unit" WHERE "name" = $1 ORDER BY "name""#);
    assert_eq!(params, vec![Value::from("missing")]);
}

#[tokio::test]
async fn like_matches_through_parent_labels() {
    let log = ExecLog::new();
    let mut db = support::source(&log).with_config(Config::new().chunk(2));

    log.respond_rows(vec![unit_row(4, "ab"), unit_row(5, "abc")]);

    let mut tests = Collection::query("test").like("ab");
    db.retrieve(&mut tests).await.unwrap();

    assert_eq!(
        log.pop_sql(),
        (
            r#"SELECT * FROM "unit" WHERE ("name"::VARCHAR(255) ILIKE $1) ORDER BY "name" LIMIT $2"#
                .to_string(),
            vec![Value::from("%ab%"), Value::from(2)]
        )
    );
    assert_eq!(
        log.pop_sql(),
        (
            r#"SELECT * FROM "test" WHERE ("unit_id" IN ($1, $2) OR "name"::VARCHAR(255) ILIKE $3)"#
                .to_string(),
            vec![Value::from(4), Value::from(5), Value::from("%ab%")]
        )
    );
    assert!(log.is_empty());

    // the parent lookup hit the chunk bound
    assert!(tests.overflow());
}

#[tokio::test]
async fn like_without_parent_matches_never_matches_the_key() {
    let log = ExecLog::new();
    let mut db = support::source(&log);

    let mut tests = Collection::query("test").like("zz");
    db.retrieve(&mut tests).await.unwrap();

    log.pop_sql();
    let (sql, params) = log.pop_sql();
    assert_eq!(
        sql,
        r#"SELECT * FROM "test" WHERE (FALSE OR "name"::VARCHAR(255) ILIKE $1)"#
    );
    assert_eq!(params, vec![Value::from("%zz%")]);
    assert!(!tests.overflow());
}

#[tokio::test]
async fn retrieve_reads_injected_fields_from_documents() {
    let log = ExecLog::new();
    let mut db = support::source(&log);

    log.respond_rows(vec![row([
        ("id", Value::from(1)),
        ("name", Value::from("m")),
        ("flag", Value::from(true)),
        ("stuff", Value::Json(json!([1, 2]))),
        ("things", Value::Json(json!({"color": "blue", "size": 3}))),
        ("created", Value::from("then")),
    ])]);

    let mut metas = Collection::query("meta").filter("color", "blue");
    db.retrieve(&mut metas).await.unwrap();

    let (sql, params) = log.pop_sql();
    assert_eq!(sql, r##"SELECT * FROM "meta" WHERE "things"#>>$1 = $2"##);
    assert_eq!(params, vec![Value::from("{color}"), Value::from("blue")]);

    let meta = metas.first().unwrap();
    assert_eq!(meta.get("color"), Some(&Value::from("blue")));
    assert_eq!(meta.get("flag"), Some(&Value::from(true)));
    assert_eq!(
        meta.values().map(|(name, _)| name).collect::<Vec<_>>(),
        ["id", "name", "flag", "stuff", "things", "color", "created"]
    );
}

#[tokio::test]
async fn count_ignores_pagination() {
    let log = ExecLog::new();
    let mut db = support::source(&log);

    log.respond_rows(vec![row([("count", Value::from(3))])]);

    let units = Collection::query("unit").filter("name", "a").limit(1).offset(4);
    let count = db.count(&units).await.unwrap();

    assert_eq!(count, 3);
    assert_eq!(
        log.pop_sql(),
        (
            r#"SELECT COUNT(*) FROM "unit" WHERE "name" = $1"#.to_string(),
            vec![Value::from("a")]
        )
    );
}
