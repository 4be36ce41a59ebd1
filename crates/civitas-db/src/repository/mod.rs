//! # Repository Module
//!
//! SQLite implementations of the civitas-core persistence ports.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CityService / StateService                                            │
//! │       │                                                                 │
//! │       │  Arc<dyn CityStore>, Arc<dyn StateStore>                       │
//! │       ▼                                                                 │
//! │  CityRepository / StateRepository                                      │
//! │  ├── find_all / find_by_id                                             │
//! │  ├── insert / update                                                   │
//! │  ├── delete_by_id                                                      │
//! │  └── exists_by_name_ignore_case[_and_city]                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository exposes inherent methods returning [`DbResult`] and
//! implements the matching port by converting [`DbError`] into
//! `CoreError` (see `error.rs` for the mapping).
//!
//! Case-insensitive comparisons go through the `name_key` column, filled
//! from `civitas_core::name_key` (Unicode lowercase). The unique indexes in
//! the schema are on the same column.
//!
//! [`DbResult`]: crate::error::DbResult
//! [`DbError`]: crate::error::DbError

pub mod city;
pub mod state;
