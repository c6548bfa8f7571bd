// src/common/migrations.rs
//! Database migration and schema management for the local spot store

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Only drop tables if RESET_DB environment variable is set to "true"
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("⚠️  RESET_DB=true - Dropping all tables and recreating schema...");
        sqlx::query("DROP TABLE IF EXISTS spots")
            .execute(pool)
            .await?;
        info!("✅ Dropped old tables");
    }

    create_spot_tables(pool).await?;

    info!("✅ Database migration completed successfully!");

    Ok(())
}

async fn create_spot_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS spots (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            name TEXT NOT NULL,
            neighborhood TEXT,
            style TEXT NOT NULL,
            note TEXT,
            address TEXT,
            photo TEXT,
            lat REAL,
            lng REAL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_spots_user_created ON spots(user_id, created_at DESC)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
