//! # civitas-core: Pure Business Logic for Civitas
//!
//! This crate holds the rules of the City/State registry as code with zero
//! I/O dependencies. Storage is reached through the port traits in
//! [`ports`]; the concrete SQLite gateway lives in `civitas-db`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Civitas Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    REST API (axum)                              │   │
//! │  │    GET/POST/PUT/DELETE  /cities  /states                        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ civitas-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌─────────────┐  ┌─────────┐  │   │
//! │  │   │   types   │  │ validation │  │   service   │  │  ports  │  │   │
//! │  │   │   City    │  │  name      │  │ CityService │  │CityStore│  │   │
//! │  │   │   State   │  │  cityId    │  │StateService │  │StateStore│ │   │
//! │  │   └───────────┘  └────────────┘  └─────────────┘  └─────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ port traits                            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    civitas-db (SQLite)                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules Enforced Here
//! - City names are unique, case-insensitively, across all cities.
//! - State names are unique, case-insensitively, within their owning city.
//! - A state's city must exist whenever the state is created or moved.
//! - Names must be non-blank.
//!
//! ## Usage
//! ```rust,ignore
//! use std::sync::Arc;
//! use civitas_core::service::{CityService, StateService};
//!
//! let cities = CityService::new(city_store.clone());
//! let states = StateService::new(state_store, city_store);
//!
//! let springfield = cities.create("Springfield").await?;
//! let il = states.create("IL", springfield.id).await?;
//! assert_eq!(il.city_name, "Springfield");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dto;
pub mod error;
pub mod ports;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod memory;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dto::{CityRequest, CityResponse, ErrorResponse, StateRequest, StateResponse};
pub use error::{CoreError, CoreResult, ValidationError, ValidationResult};
pub use ports::{CityStore, StateStore};
pub use service::{CityService, StateService};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a city or state name, in characters.
///
/// Matches the width of the `name` columns in the SQLite schema.
pub const MAX_NAME_LENGTH: usize = 255;
