//! Storage layer: SQLite pool, migrations and the category rule table.

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

pub mod models;

use models::{NewRule, Placement, RuleRow};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("rule not found: {0}")]
    RuleNotFound(i64),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let mut url = database_url.to_string();
    if !database_url.starts_with("sqlite:") {
        let path = std::path::PathBuf::from(database_url);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("create database directory {}", parent.display())
            })?;
        }
        let norm = path.to_string_lossy().replace('\\', "/");
        if path.is_absolute() {
            url = format!("sqlite:///{}", norm.trim_start_matches('/'));
        } else {
            url = format!("sqlite://{}", norm);
        }
    }
    let options = SqliteConnectOptions::from_str(&url)?.create_if_missing(true);
    let mut opts = SqlitePoolOptions::new();
    if url.contains("memory") {
        // every in-memory connection is a separate database
        opts = opts.max_connections(1).idle_timeout(None).max_lifetime(None);
    } else {
        opts = opts.max_connections(5);
    }
    let pool = opts.connect_with(options).await?;
    debug!(url = %url, "connected to rule store");
    Ok(pool)
}

pub async fn migrate(pool: &SqlitePool) -> anyhow::Result<()> {
    // Applies SQLx migrations located in crates/storage/migrations.
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// All rules in list order.
pub async fn load_rules(pool: &SqlitePool) -> Result<Vec<RuleRow>, StorageError> {
    let rows = sqlx::query_as::<_, RuleRow>(
        "SELECT id, position, pattern, field, category_name, confidence, created_at
         FROM category_rules ORDER BY position ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn insert_rule(
    pool: &SqlitePool,
    rule: &NewRule,
    placement: Placement,
) -> Result<RuleRow, StorageError> {
    let mut tx = pool.begin().await?;
    let position_sql = match placement {
        Placement::Front => "SELECT COALESCE(MIN(position), 0) - 1 FROM category_rules",
        Placement::Back => "SELECT COALESCE(MAX(position), 0) + 1 FROM category_rules",
    };
    let position: i64 = sqlx::query_scalar(position_sql).fetch_one(&mut *tx).await?;

    let row = sqlx::query_as::<_, RuleRow>(
        "INSERT INTO category_rules (position, pattern, field, category_name, confidence)
         VALUES (?1, ?2, ?3, ?4, ?5)
         RETURNING id, position, pattern, field, category_name, confidence, created_at",
    )
    .bind(position)
    .bind(&rule.pattern)
    .bind(&rule.field)
    .bind(&rule.category_name)
    .bind(&rule.confidence)
    .fetch_one(&mut *tx)
    .await?;
    tx.commit().await?;
    debug!(id = row.id, position = row.position, "inserted rule");
    Ok(row)
}

pub async fn delete_rule(pool: &SqlitePool, id: i64) -> Result<(), StorageError> {
    let result = sqlx::query("DELETE FROM category_rules WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StorageError::RuleNotFound(id));
    }
    Ok(())
}
