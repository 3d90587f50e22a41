use diesel::prelude::*;
use kashop_catalog::db::{MigrationError, establish_connection_pool, run_migrations};

mod common;

#[test]
fn test_creates_and_migrates_db_file() {
    let test_db = common::TestDb::new("test_creates_and_migrates_db_file.db");
    let conn = test_db.pool().get();
    assert!(conn.is_ok());
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations_are_idempotent.db");
    assert!(run_migrations(test_db.pool()).is_ok());
}

#[test]
fn test_conflicting_schema_is_a_migration_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test_conflicting_schema.db");
    let pool = establish_connection_pool(path.to_str().unwrap()).unwrap();
    diesel::sql_query("CREATE TABLE categories (id INTEGER PRIMARY KEY)")
        .execute(&mut pool.get().unwrap())
        .unwrap();

    let result = run_migrations(&pool);

    assert!(matches!(result, Err(MigrationError::Apply(_))));
}

#[test]
fn test_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_connections_enforce_foreign_keys.db");
    let mut conn = test_db.pool().get().unwrap();

    let result = diesel::sql_query(
        "INSERT INTO products (name, description, price, stock, category_id, is_featured, is_active, created_at) \
         VALUES ('Orphan', '', 100, 1, 999, 0, 1, CURRENT_TIMESTAMP)",
    )
    .execute(&mut conn);

    assert!(result.is_err());
}
