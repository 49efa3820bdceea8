//! Database initialization
//!
//! Opens (creating if needed) the mirror database and ensures the `cheeses`
//! table exists. Safe to call on every startup.

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Open the mirror database at `db_path`, creating file and table if needed
///
/// The pool holds a single connection: the application is the only writer and
/// performs one operation at a time.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    create_cheeses_table(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory mirror database
///
/// The single connection is never recycled, since closing it would discard
/// the database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await?;

    create_cheeses_table(&pool).await?;

    Ok(pool)
}

/// Create the cheeses table
///
/// `id` is the internal row key used only to keep rows in insertion order.
pub async fn create_cheeses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cheeses (
            id INTEGER PRIMARY KEY,
            cheese_id INTEGER,
            cheese_name TEXT,
            manufacturer_name TEXT,
            manufacturer_prov_code TEXT,
            manufacturing_type TEXT,
            website TEXT,
            fat_content_percent REAL,
            moisture_percent REAL,
            particularities TEXT,
            flavour TEXT,
            characteristics TEXT,
            ripening TEXT,
            organic INTEGER,
            category_type TEXT,
            milk_type TEXT,
            milk_treatment_type TEXT,
            rind_type TEXT,
            last_update_date TEXT
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
