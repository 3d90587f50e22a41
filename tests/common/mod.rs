#![allow(dead_code)]

use kashop_catalog::db::{DbPool, establish_connection_pool, run_migrations};
use kashop_catalog::models::config::ServerConfig;
use kashop_catalog::repository::DieselRepository;
use tempfile::TempDir;

/// SQLite database in a temporary directory, migrated and removed on drop.
pub struct TestDb {
    _dir: TempDir,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name);
        let pool = establish_connection_pool(path.to_str().expect("utf-8 path"))
            .expect("open test database");
        run_migrations(&pool).expect("apply migrations");
        Self { _dir: dir, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool.clone())
    }
}

pub fn server_config() -> ServerConfig {
    ServerConfig {
        address: "127.0.0.1".into(),
        port: 0,
        database_url: ":memory:".into(),
        templates_dir: "./templates/**/*".into(),
        web_root: "./wwwroot".into(),
        secret: "0123456789abcdef".repeat(4),
        session_ttl_hours: 1,
        cookie_secure: false,
        seed_data: false,
        admin_email: None,
        admin_password: None,
    }
}
