//! # Database Migrations
//!
//! Embedded SQL migrations, applied on startup.
//!
//! ## Migration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Migration Process                                    │
//! │                                                                         │
//! │  Server starts                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  run_migrations(&pool) ← THIS MODULE                                   │
//! │       │                                                                 │
//! │       ├── Check _sqlx_migrations table                                 │
//! │       ├── Apply pending migrations in order                            │
//! │       └── Record each applied migration                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Server continues startup                                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence number
//! 2. Name format: `NNN_description.sql` (e.g., `002_add_population.sql`)
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

/// Embedded migrations from the workspace `migrations/sqlite` directory.
///
/// The `sqlx::migrate!()` macro embeds the SQL files into the binary at
/// compile time. No runtime file access needed.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// ## Safety
/// - Idempotent: safe to run multiple times
/// - Transactional: each migration runs in a transaction
/// - Ordered: migrations run in filename order (001, 002, ...)
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("Checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns `(total_migrations, applied_migrations)`.
///
/// Used by the health endpoint. A database that was never migrated has no
/// `_sqlx_migrations` table and reports zero applied; any other failure is
/// returned.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let total = MIGRATOR.migrations.len();

    let tracked: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type = 'table' AND name = '_sqlx_migrations'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !tracked {
        debug!("Migration table not created yet");
        return Ok((total, 0));
    }

    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((total, applied as usize))
}
