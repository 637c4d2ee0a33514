use postbox_db::{create_pool, DbSettings};
use postbox_server::initialize_database;

fn settings_at(path: &std::path::Path) -> DbSettings {
    DbSettings {
        name: path.to_str().expect("utf-8 path").to_string(),
        connection_timeout_ms: 250,
        ..DbSettings::default()
    }
}

#[test]
fn schema_initialisation_succeeds_and_repeats() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = create_pool(&settings_at(&dir.path().join("app.db"))).expect("failed to create pool");

    assert!(initialize_database(&pool));
    assert!(initialize_database(&pool), "second start should also succeed");
}

#[test]
fn schema_failure_does_not_abort_startup() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = create_pool(&settings_at(&dir.path().join("absent").join("app.db")))
        .expect("lazy pool creation should succeed");

    assert!(!initialize_database(&pool));
}
