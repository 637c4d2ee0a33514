use postbox_db::{create_pool, ensure_schema, DbSettings, SchemaError};

fn settings_at(path: &std::path::Path) -> DbSettings {
    DbSettings {
        name: path.to_str().expect("utf-8 path").to_string(),
        connection_timeout_ms: 250,
        ..DbSettings::default()
    }
}

#[test]
fn ensure_schema_creates_messages_table() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = create_pool(&settings_at(&dir.path().join("app.db"))).expect("failed to create pool");

    let applied = ensure_schema(&pool).expect("schema should initialise");
    assert!(applied > 0);

    let conn = pool.get().expect("failed to get connection");
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name")
        .expect("failed to prepare table query");
    let tables: Vec<String> = stmt
        .query_map([], |row| row.get(0))
        .expect("failed to execute table query")
        .map(|r| r.expect("failed to read table name"))
        .collect();

    assert_eq!(tables, vec!["_postbox_migrations", "messages"]);
}

#[test]
fn ensure_schema_is_idempotent_across_restarts() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("app.db");

    let first = create_pool(&settings_at(&path)).expect("failed to create pool");
    ensure_schema(&first).expect("first start should succeed");
    drop(first);

    let second = create_pool(&settings_at(&path)).expect("failed to create pool");
    let applied = ensure_schema(&second).expect("second start should succeed");
    assert_eq!(applied, 0);
}

#[test]
fn ensure_schema_reports_unreachable_database() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = create_pool(&settings_at(&dir.path().join("no-such-dir").join("app.db")))
        .expect("lazy pool creation should succeed");

    let err = ensure_schema(&pool).expect_err("schema should fail without a database");
    assert!(matches!(err, SchemaError::Connection(_)));
}
