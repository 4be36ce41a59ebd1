//! # civitas-db: Database Layer for Civitas
//!
//! This crate provides the SQLite persistence gateway for the City/State
//! registry. It implements the `CityStore` and `StateStore` ports from
//! civitas-core with sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Civitas Data Flow                                │
//! │                                                                         │
//! │  HTTP handler (POST /states)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StateService (civitas-core)                                           │
//! │       │  Arc<dyn StateStore>                                           │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   civitas-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ CityRepo      │    │ 001_initial_ │  │   │
//! │  │   │ WAL + FKs     │    │ StateRepo     │    │  schema.sql  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (civitas.db)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and the mapping into `CoreError`
//! - [`repository`] - City and state repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use civitas_core::CityService;
//! use civitas_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("civitas.db")).await?;
//! let cities = CityService::new(Arc::new(db.cities()));
//! let springfield = cities.create("Springfield").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::city::CityRepository;
pub use repository::state::StateRepository;
