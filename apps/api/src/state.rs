//! # Application State
//!
//! Everything a handler needs, built once at startup and shared behind an
//! `Arc`.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │  AppState                                                        │
//! │  ├── db      Database (pool; health checks)                      │
//! │  ├── cities  CityService  ──► Arc<CityRepository>  ◄──┐          │
//! │  └── states  StateService ──► Arc<StateRepository>    │ shared   │
//! │                            └─► Arc<CityRepository> ───┘          │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use civitas_core::{CityService, CityStore, StateService, StateStore};
use civitas_db::Database;

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub cities: CityService,
    pub states: StateService,
}

impl AppState {
    /// Wires the rule engines to the SQLite repositories.
    pub fn new(db: Database) -> Self {
        let city_store: Arc<dyn CityStore> = Arc::new(db.cities());
        let state_store: Arc<dyn StateStore> = Arc::new(db.states());

        AppState {
            cities: CityService::new(city_store.clone()),
            states: StateService::new(state_store, city_store),
            db,
        }
    }
}
