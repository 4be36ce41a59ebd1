//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CoreError (port boundary) ← What the rule engines see                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in apps/api) ← Status code + error body                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use civitas_core::CoreError;
use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and for the mapping into [`CoreError`].
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `UPDATE ... WHERE id = ?` touched no rows
    /// - `fetch_one` returned no rows
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    ///
    /// ## When This Occurs
    /// - Two cities whose names differ only by case
    /// - Two states with the same (name, city_id), ignoring case
    /// - A concurrent insert won the race past the rule engine's check
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Deleting a city that states still reference
    /// - Inserting a state whose city_id doesn't exist
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a UniqueViolation error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::UniqueViolation {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound              → DbError::NotFound
/// sqlx::Error::Database (unique)        → DbError::UniqueViolation
/// sqlx::Error::Database (foreign key)   → DbError::ForeignKeyViolation
/// sqlx::Error::PoolTimedOut             → DbError::PoolExhausted
/// Other                                 → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite messages:
                // UNIQUE constraint: "UNIQUE constraint failed: <table>.<column>"
                // FK constraint: "FOREIGN KEY constraint failed"
                match db_err.kind() {
                    ErrorKind::UniqueViolation => {
                        let field = msg
                            .split("UNIQUE constraint failed: ")
                            .nth(1)
                            .unwrap_or("unknown")
                            .to_string();
                        DbError::UniqueViolation {
                            field,
                            value: "unknown".to_string(),
                        }
                    }
                    ErrorKind::ForeignKeyViolation => DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    },
                    _ if msg.contains("FOREIGN KEY constraint failed") => {
                        DbError::ForeignKeyViolation {
                            message: msg.to_string(),
                        }
                    }
                    _ => DbError::QueryFailed(msg.to_string()),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Port boundary: how storage failures look to the rule engines.
///
/// ## Mapping
/// ```text
/// UniqueViolation      → CoreError::AlreadyExists
/// ForeignKeyViolation  → CoreError::ReferentialConflict
/// NotFound             → CoreError::NotFound
/// everything else      → CoreError::Storage
/// ```
impl From<DbError> for CoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::UniqueViolation { field, value } => {
                CoreError::AlreadyExists(format!("{}: {}", field, value))
            }
            DbError::ForeignKeyViolation { message } => CoreError::ReferentialConflict(message),
            DbError::NotFound { entity, id } => CoreError::NotFound(format!("{} {}", entity, id)),
            other => CoreError::Storage(other.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================
