use chrono::{Duration, Utc};
use postbox_db::{create_pool, ensure_schema, DbSettings};
use postbox_messages::{MessageError, MessageStore};
use tempfile::TempDir;

fn settings_at(path: &std::path::Path) -> DbSettings {
    DbSettings {
        name: path.to_str().expect("utf-8 path").to_string(),
        pool_max_size: 4,
        connection_timeout_ms: 250,
        ..DbSettings::default()
    }
}

fn setup_store() -> (MessageStore, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = create_pool(&settings_at(&dir.path().join("store.db"))).expect("failed to create pool");
    ensure_schema(&pool).expect("failed to initialise schema");
    (MessageStore::new(pool), dir)
}

fn unreachable_store() -> (MessageStore, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("does-not-exist").join("store.db");
    let pool = create_pool(&settings_at(&path)).expect("lazy pool creation should succeed");
    (MessageStore::new(pool), dir)
}

#[test]
fn insert_adds_exactly_one_entry() {
    let (store, _dir) = setup_store();
    let before_len = store.list_all().len();
    // The column keeps milliseconds, so allow for truncation.
    let called_at = Utc::now() - Duration::milliseconds(1);

    assert!(store.insert("hello"));

    let messages = store.list_all();
    assert_eq!(messages.len(), before_len + 1);
    assert_eq!(messages[0].text, "hello");
    assert!(
        messages[0].created_at >= called_at,
        "created_at {} should not precede the call at {}",
        messages[0].created_at,
        called_at
    );
}

#[test]
fn newest_message_is_listed_first() {
    let (store, _dir) = setup_store();

    assert!(store.insert("hello"));
    assert!(store.insert("world"));

    let texts: Vec<String> = store.list_all().into_iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["world", "hello"]);
}

#[test]
fn list_is_sorted_by_created_at_descending() {
    let (store, _dir) = setup_store();
    for i in 0..20 {
        assert!(store.insert(&format!("message {i}")));
    }

    let messages = store.list_all();
    assert_eq!(messages.len(), 20);
    for pair in messages.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
}

#[test]
fn count_matches_list_length() {
    let (store, _dir) = setup_store();
    assert_eq!(store.count(), 0);
    assert!(store.list_all().is_empty());

    for text in ["a", "b", "c"] {
        assert!(store.insert(text));
        assert_eq!(store.count(), store.list_all().len() as i64);
    }

    let first_id = store.list_all()[0].id;
    assert!(store.delete_by_id(first_id));
    assert_eq!(store.count(), 2);
    assert_eq!(store.count(), store.list_all().len() as i64);
}

#[test]
fn delete_of_unknown_id_changes_nothing() {
    let (store, _dir) = setup_store();
    assert!(store.insert("stays"));
    let before = store.count();

    assert!(!store.delete_by_id(9_999));
    assert_eq!(store.count(), before);
}

#[test]
fn delete_removes_only_the_target() {
    let (store, _dir) = setup_store();
    assert!(store.insert("one"));
    assert!(store.insert("two"));
    let target = store
        .list_all()
        .into_iter()
        .find(|m| m.text == "one")
        .expect("inserted message should be listed");

    assert!(store.delete_by_id(target.id));
    assert!(!store.delete_by_id(target.id), "second delete should find nothing");

    let texts: Vec<String> = store.list_all().into_iter().map(|m| m.text).collect();
    assert_eq!(texts, vec!["two"]);
}

#[test]
fn unreachable_database_degrades_quietly() {
    let (store, _dir) = unreachable_store();

    assert!(!store.insert("hello"));
    assert!(store.list_all().is_empty());
    assert_eq!(store.count(), 0);
    assert!(!store.delete_by_id(1));
}

#[test]
fn unreachable_database_surfaces_connection_error_in_try_api() {
    let (store, _dir) = unreachable_store();

    let err = store.try_insert("hello").expect_err("insert should fail");
    assert!(matches!(err, MessageError::Connection(_)));
}

#[test]
fn missing_schema_is_a_query_error() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let pool = create_pool(&settings_at(&dir.path().join("bare.db"))).expect("failed to create pool");
    let store = MessageStore::new(pool);

    assert!(matches!(store.try_list_all(), Err(MessageError::Query(_))));
    assert!(!store.insert("hello"));
    assert!(store.list_all().is_empty());
}

#[test]
fn concurrent_inserts_all_land() {
    let (store, _dir) = setup_store();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = store.clone();
            std::thread::spawn(move || store.insert(&format!("from thread {i}")))
        })
        .collect();
    for handle in handles {
        assert!(handle.join().expect("thread panicked"));
    }

    assert_eq!(store.count(), 8);
    let mut ids: Vec<i64> = store.list_all().into_iter().map(|m| m.id).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 8, "ids should be unique");
}
