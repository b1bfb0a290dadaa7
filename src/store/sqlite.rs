//! SQLite backend. Default store: a local file created on first connect.

use super::ItemStore;
use crate::error::AppError;
use crate::model::{Item, ItemChanges, NewItem, DEFAULT_USER_ID};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255) NOT NULL,
        description VARCHAR(1000),
        date TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        user_id INTEGER NOT NULL DEFAULT 1
    )
"#;

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS ix_items_name ON items (name)",
    "CREATE INDEX IF NOT EXISTS ix_items_date ON items (date)",
    "CREATE INDEX IF NOT EXISTS ix_items_user_id ON items (user_id)",
];

#[derive(Clone)]
pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    /// In-memory databases live as long as their connection, so they are pinned
    /// to one connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let in_memory = is_in_memory(url);
        let mut opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        if !in_memory {
            opts = opts.journal_mode(SqliteJournalMode::Wal);
        }
        let pool_opts = if in_memory {
            SqlitePoolOptions::new()
                .min_connections(1)
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };
        let pool = pool_opts.connect_with(opts).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        for ddl in CREATE_INDEXES {
            sqlx::query(ddl).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, item: &NewItem) -> Result<Item, AppError> {
        let sql = "INSERT INTO items (name, description, user_id) VALUES (?, ?, ?) \
                   RETURNING id, name, description, date, user_id";
        tracing::debug!(sql = %sql, name = %item.name, "query");
        let row = sqlx::query_as::<_, Item>(sql)
            .bind(&item.name)
            .bind(&item.description)
            .bind(DEFAULT_USER_ID)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, skip: i64, limit: i64) -> Result<Vec<Item>, AppError> {
        let sql = "SELECT id, name, description, date, user_id FROM items ORDER BY id LIMIT ? OFFSET ?";
        tracing::debug!(sql = %sql, skip, limit, "query");
        let rows = sqlx::query_as::<_, Item>(sql)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<Item>, AppError> {
        let sql = "SELECT id, name, description, date, user_id FROM items WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Item>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &ItemChanges) -> Result<Option<Item>, AppError> {
        let sql = "UPDATE items SET name = COALESCE(?, name), description = COALESCE(?, description) \
                   WHERE id = ? RETURNING id, name, description, date, user_id";
        tracing::debug!(sql = %sql, id, changes = ?changes, "query");
        let row = sqlx::query_as::<_, Item>(sql)
            .bind(&changes.name)
            .bind(&changes.description)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM items WHERE id = ?";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64, AppError> {
        let sql = "DELETE FROM items";
        tracing::debug!(sql = %sql, "query (tx)");
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(sql).execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::is_in_memory;

    #[test]
    fn detects_in_memory_urls() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:items?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://scrollearn.db"));
    }
}
