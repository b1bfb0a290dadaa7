//! PostgreSQL backend.

use super::ItemStore;
use crate::error::{AppError, ConfigError};
use crate::model::{Item, ItemChanges, NewItem, DEFAULT_USER_ID};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::ConnectOptions;
use std::str::FromStr;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description VARCHAR(1000),
        date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        user_id BIGINT NOT NULL DEFAULT 1
    )
"#;

const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS ix_items_name ON items (name)",
    "CREATE INDEX IF NOT EXISTS ix_items_date ON items (date)",
    "CREATE INDEX IF NOT EXISTS ix_items_user_id ON items (user_id)",
];

#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
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
        let sql = "INSERT INTO items (name, description, user_id) VALUES ($1, $2, $3) \
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
        let sql = "SELECT id, name, description, date, user_id FROM items ORDER BY id LIMIT $1 OFFSET $2";
        tracing::debug!(sql = %sql, skip, limit, "query");
        let rows = sqlx::query_as::<_, Item>(sql)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Option<Item>, AppError> {
        let sql = "SELECT id, name, description, date, user_id FROM items WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Item>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, changes: &ItemChanges) -> Result<Option<Item>, AppError> {
        let sql = "UPDATE items SET name = COALESCE($2, name), description = COALESCE($3, description) \
                   WHERE id = $1 RETURNING id, name, description, date, user_id";
        tracing::debug!(sql = %sql, id, changes = ?changes, "query");
        let row = sqlx::query_as::<_, Item>(sql)
            .bind(id)
            .bind(&changes.name)
            .bind(&changes.description)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let sql = "DELETE FROM items WHERE id = $1";
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

/// Connect to the server's `postgres` database and create the target database if missing.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url).map_err(|e| ConfigError::Invalid {
        key: "DATABASE_URL",
        message: e.to_string(),
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let (scheme, rest) = url.split_once("://").ok_or_else(|| ConfigError::Invalid {
        key: "DATABASE_URL",
        message: "missing scheme".into(),
    })?;
    let (location, query) = match rest.split_once('?') {
        Some((loc, q)) => (loc, Some(q)),
        None => (rest, None),
    };
    let Some(slash) = location.rfind('/') else {
        return Ok((url.to_string(), String::new()));
    };
    let (authority, db_name) = location.split_at(slash + 1);
    let mut admin_url = format!("{}://{}postgres", scheme, authority);
    if let Some(q) = query {
        admin_url.push('?');
        admin_url.push_str(q);
    }
    Ok((admin_url, db_name.trim().to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_url_targets_postgres_database() {
        let (admin, db) = parse_db_name_from_url("postgres://u:p@localhost:5432/scrollearn").unwrap();
        assert_eq!(admin, "postgres://u:p@localhost:5432/postgres");
        assert_eq!(db, "scrollearn");
    }

    #[test]
    fn admin_url_keeps_query_options() {
        let (admin, db) = parse_db_name_from_url("postgresql://localhost/items?sslmode=disable").unwrap();
        assert_eq!(admin, "postgresql://localhost/postgres?sslmode=disable");
        assert_eq!(db, "items");
    }

    #[test]
    fn query_options_with_paths_do_not_move_the_database_name() {
        let (admin, db) = parse_db_name_from_url(
            "postgres://u:p@db.example.com:5432/scrollearn?sslmode=verify-full&sslrootcert=/etc/ssl/ca.pem",
        )
        .unwrap();
        assert_eq!(
            admin,
            "postgres://u:p@db.example.com:5432/postgres?sslmode=verify-full&sslrootcert=/etc/ssl/ca.pem"
        );
        assert_eq!(db, "scrollearn");
    }

    #[test]
    fn url_without_database_is_left_alone() {
        let (admin, db) = parse_db_name_from_url("postgres://localhost:5432").unwrap();
        assert_eq!(admin, "postgres://localhost:5432");
        assert!(db.is_empty());
    }

    #[test]
    fn quotes_embedded_double_quotes() {
        assert_eq!(quote_ident(r#"we"ird"#), r#""we""ird""#);
    }
}
