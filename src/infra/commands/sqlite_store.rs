// SQLite-backed store for per-guild command settings.
//
// Tables:
// - disabled_commands: one row per (guild, command) disable; no uniqueness
// - guild_prefixes: custom prefix per guild

use crate::core::commands::{
    DisabledCommandRecord, DisabledCommandStore, GuildPrefixRecord, PrefixStore, StoreError,
};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

pub struct SqliteCommandStore {
    pool: Pool<Sqlite>,
}

impl SqliteCommandStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database file and run migrations.
    pub async fn connect(database_path: &str) -> anyhow::Result<Self> {
        let path_str = database_path.trim_start_matches("sqlite://");
        if !database_path.contains(":memory:") && !Path::new(path_str).exists() {
            if let Some(parent) = Path::new(path_str).parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::File::create(path_str)?;
        }

        let conn_str = if database_path.starts_with("sqlite:") {
            database_path.to_string()
        } else {
            format!("sqlite://{}", database_path)
        };

        let pool = SqlitePoolOptions::new().connect(&conn_str).await?;
        let store = Self::new(pool);
        store.migrate().await?;
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS disabled_commands (
                guild_id INTEGER NOT NULL,
                command TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS guild_prefixes (
                guild_id INTEGER PRIMARY KEY,
                prefix TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(())
    }
}

fn storage_error(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

#[async_trait]
impl DisabledCommandStore for SqliteCommandStore {
    async fn find_all(&self) -> Result<Vec<DisabledCommandRecord>, StoreError> {
        let rows = sqlx::query(
            "SELECT guild_id, command FROM disabled_commands ORDER BY guild_id, command",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| DisabledCommandRecord {
                guild_id: row.get::<i64, _>("guild_id") as u64,
                command: row.get("command"),
            })
            .collect())
    }

    async fn insert(&self, record: &DisabledCommandRecord) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO disabled_commands (guild_id, command) VALUES (?, ?)")
            .bind(record.guild_id as i64)
            .bind(&record.command)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }

    async fn delete(&self, record: &DisabledCommandRecord) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM disabled_commands WHERE guild_id = ? AND command = ?")
            .bind(record.guild_id as i64)
            .bind(&record.command)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;
        Ok(())
    }
}

#[async_trait]
impl PrefixStore for SqliteCommandStore {
    async fn find_all(&self) -> Result<Vec<GuildPrefixRecord>, StoreError> {
        let rows = sqlx::query("SELECT guild_id, prefix FROM guild_prefixes")
            .fetch_all(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(rows
            .into_iter()
            .map(|row| GuildPrefixRecord {
                guild_id: row.get::<i64, _>("guild_id") as u64,
                prefix: row.get("prefix"),
            })
            .collect())
    }

    async fn save_prefix(&self, record: &GuildPrefixRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO guild_prefixes (guild_id, prefix)
            VALUES (?, ?)
            ON CONFLICT(guild_id) DO UPDATE SET
                prefix = excluded.prefix
            "#,
        )
        .bind(record.guild_id as i64)
        .bind(&record.prefix)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;
        Ok(())
    }
}
