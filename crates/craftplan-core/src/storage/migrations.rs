//! Database migrations
//!
//! Manages the SQLite schema for craftplan. Migrations are versioned and
//! applied automatically on database connection.

use crate::error::Result;
use sqlx::SqlitePool;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;

/// SQL for creating the migrations tracking table
const CREATE_MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        version INTEGER PRIMARY KEY NOT NULL,
        applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
"#;

/// Migration 1: Initial schema
///
/// Hour and cost columns hold fixed-point values as canonical 2-scale
/// text; a NUMERIC affinity would collapse `12.50` to the real `12.5`.
const MIGRATION_V1: &str = r#"
    -- Projects table
    CREATE TABLE IF NOT EXISTS project (
        project_id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_name TEXT NOT NULL,
        estimated_hours TEXT,
        actual_hours TEXT,
        difficulty INTEGER,
        notes TEXT
    );

    CREATE INDEX IF NOT EXISTS idx_project_name ON project(project_name);

    -- Materials belong to exactly one project
    CREATE TABLE IF NOT EXISTS material (
        material_id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL REFERENCES project(project_id) ON DELETE CASCADE,
        material_name TEXT NOT NULL,
        cost TEXT,
        num_required INTEGER
    );

    CREATE INDEX IF NOT EXISTS idx_material_project_id ON material(project_id);

    -- Ordered steps belong to exactly one project
    CREATE TABLE IF NOT EXISTS step (
        step_id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_id INTEGER NOT NULL REFERENCES project(project_id) ON DELETE CASCADE,
        step_text TEXT NOT NULL,
        step_order INTEGER NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_step_project_id ON step(project_id);

    -- Categories are shared across projects
    CREATE TABLE IF NOT EXISTS category (
        category_id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_name TEXT NOT NULL UNIQUE
    );

    -- Join table: records the relation only
    CREATE TABLE IF NOT EXISTS project_category (
        project_id INTEGER NOT NULL REFERENCES project(project_id) ON DELETE CASCADE,
        category_id INTEGER NOT NULL REFERENCES category(category_id) ON DELETE CASCADE,
        PRIMARY KEY (project_id, category_id)
    );
"#;

/// Get the current schema version from the database
async fn get_current_version(pool: &SqlitePool) -> Result<i32> {
    sqlx::raw_sql(CREATE_MIGRATIONS_TABLE).execute(pool).await?;

    let row: Option<(i32,)> = sqlx::query_as("SELECT MAX(version) FROM _migrations")
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|(v,)| v).unwrap_or(0))
}

/// Record that a migration has been applied
async fn record_migration(pool: &SqlitePool, version: i32) -> Result<()> {
    sqlx::query("INSERT INTO _migrations (version) VALUES (?)")
        .bind(version)
        .execute(pool)
        .await?;
    Ok(())
}

/// Run all pending migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    let current_version = get_current_version(pool).await?;

    tracing::debug!(
        current_version = current_version,
        target_version = CURRENT_VERSION,
        "Checking database migrations"
    );

    if current_version >= CURRENT_VERSION {
        tracing::debug!("Database is up to date");
        return Ok(());
    }

    if current_version < 1 {
        tracing::info!("Applying migration v1: Initial schema");
        sqlx::raw_sql(MIGRATION_V1).execute(pool).await?;
        record_migration(pool, 1).await?;
    }

    tracing::info!("Database migrations completed");
    Ok(())
}

/// Check if the database needs migrations
pub async fn needs_migration(pool: &SqlitePool) -> Result<bool> {
    let current_version = get_current_version(pool).await?;
    Ok(current_version < CURRENT_VERSION)
}

/// Get migration status information
pub async fn migration_status(pool: &SqlitePool) -> Result<MigrationStatus> {
    let current_version = get_current_version(pool).await?;
    Ok(MigrationStatus {
        current_version,
        target_version: CURRENT_VERSION,
        needs_migration: current_version < CURRENT_VERSION,
    })
}

/// Migration status information
#[derive(Debug, Clone)]
pub struct MigrationStatus {
    /// Current schema version in the database
    pub current_version: i32,
    /// Target schema version (latest)
    pub target_version: i32,
    /// Whether migrations need to be run
    pub needs_migration: bool,
}
