//! Persistence for items. One backend per URL scheme; callers only see `ItemStore`.

mod postgres;
mod sqlite;

pub use postgres::{ensure_database_exists, PgItemStore};
pub use sqlite::SqliteItemStore;

use crate::config::Settings;
use crate::error::{AppError, ConfigError};
use crate::model::{Item, ItemChanges, NewItem};
use async_trait::async_trait;
use std::sync::Arc;

/// Gateway over the relational store. Every mutating call commits before returning.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Create the items table and its indexes if missing.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    /// Cheap round-trip used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;

    /// Insert with `user_id = 1` and the store's current time; returns the stored row.
    async fn insert(&self, item: &NewItem) -> Result<Item, AppError>;

    /// Rows in insertion order. Bounds are checked by the caller.
    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Item>, AppError>;

    async fn get(&self, id: i64) -> Result<Option<Item>, AppError>;

    /// Apply supplied fields only. `None` when no row has `id`.
    async fn update(&self, id: i64, changes: &ItemChanges) -> Result<Option<Item>, AppError>;

    /// `false` when no row has `id`.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Remove every row; returns how many were removed.
    async fn delete_all(&self) -> Result<u64, AppError>;
}

/// Which backend a connection string selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Sqlite,
    Postgres,
}

impl Backend {
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        let scheme = url.split(':').next().unwrap_or("").to_lowercase();
        match scheme.as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "postgres" | "postgresql" => Ok(Backend::Postgres),
            _ => Err(ConfigError::UnsupportedDatabase(scheme)),
        }
    }
}

/// Open a pool for `settings.database_url` and return the matching store.
pub async fn connect(settings: &Settings) -> Result<Arc<dyn ItemStore>, AppError> {
    let url = settings.database_url.as_str();
    match Backend::from_url(url)? {
        Backend::Sqlite => {
            let store = SqliteItemStore::connect(url, settings.max_connections).await?;
            tracing::info!(backend = "sqlite", "item store connected");
            Ok(Arc::new(store))
        }
        Backend::Postgres => {
            ensure_database_exists(url).await?;
            let store = PgItemStore::connect(url, settings.max_connections).await?;
            tracing::info!(backend = "postgres", "item store connected");
            Ok(Arc::new(store))
        }
    }
}
