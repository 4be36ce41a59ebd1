//! # Persistence Ports
//!
//! The storage contract the rule engines depend on.
//!
//! ```text
//! ┌────────────────┐   Arc<dyn CityStore>    ┌──────────────────────────┐
//! │  CityService   │────────────────────────►│ civitas_db::CityRepository│
//! │  StateService  │────────────────────────►│ civitas_db::StateRepository│
//! └────────────────┘   Arc<dyn StateStore>   └──────────────────────────┘
//! ```
//!
//! ## Contract
//! - Listing returns records in ascending id order.
//! - `insert` assigns the id; `update` persists an existing record.
//!   Together they form the gateway's `save` operation.
//! - Name checks compare case-insensitively.
//! - A gateway that enforces uniqueness or foreign keys itself must report
//!   those failures as [`CoreError::AlreadyExists`] and
//!   [`CoreError::ReferentialConflict`]; anything else is
//!   [`CoreError::Storage`].
//!
//! [`CoreError::AlreadyExists`]: crate::CoreError::AlreadyExists
//! [`CoreError::ReferentialConflict`]: crate::CoreError::ReferentialConflict
//! [`CoreError::Storage`]: crate::CoreError::Storage

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{City, CityId, State, StateId};

/// Storage for [`City`] records.
#[async_trait]
pub trait CityStore: Send + Sync {
    /// All cities, ascending by id.
    async fn find_all(&self) -> CoreResult<Vec<City>>;

    async fn find_by_id(&self, id: CityId) -> CoreResult<Option<City>>;

    /// Persists a new city and returns it with its assigned id.
    async fn insert(&self, name: &str) -> CoreResult<City>;

    /// Persists the name of an existing city.
    async fn update(&self, city: &City) -> CoreResult<City>;

    /// Fails with `ReferentialConflict` while any state references the city.
    async fn delete_by_id(&self, id: CityId) -> CoreResult<()>;

    async fn exists_by_name_ignore_case(&self, name: &str) -> CoreResult<bool>;
}

/// Storage for [`State`] records.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// All states, ascending by id.
    async fn find_all(&self) -> CoreResult<Vec<State>>;

    async fn find_by_id(&self, id: StateId) -> CoreResult<Option<State>>;

    /// Persists a new state bound to `city_id`.
    async fn insert(&self, name: &str, city_id: CityId) -> CoreResult<State>;

    /// Persists the name and city of an existing state.
    async fn update(&self, state: &State) -> CoreResult<State>;

    async fn delete_by_id(&self, id: StateId) -> CoreResult<()>;

    async fn exists_by_name_ignore_case_and_city(
        &self,
        name: &str,
        city_id: CityId,
    ) -> CoreResult<bool>;
}
