//! # State Rule Engine
//!
//! Per-city, case-insensitive name uniqueness plus resolution of the owning
//! city on every write.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create("IL", city_id = 1)                                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_name("IL")                ── blank? ──► Validation            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  exists("IL", 1) ignoring case      ── yes?  ──► AlreadyExists          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  cities.find_by_id(1)               ── none? ──► NotFound("cityId: 1")  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  states.insert("IL", 1) ──► StateDetail { cityName: "Springfield" }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::ports::{CityStore, StateStore};
use crate::types::{City, CityId, StateDetail, StateId};
use crate::validation::validate_name;

/// Create/update/delete rules for states.
///
/// Holds both ports: states for the writes, cities to resolve the owner.
#[derive(Clone)]
pub struct StateService {
    states: Arc<dyn StateStore>,
    cities: Arc<dyn CityStore>,
}

impl StateService {
    pub fn new(states: Arc<dyn StateStore>, cities: Arc<dyn CityStore>) -> Self {
        StateService { states, cities }
    }

    /// All states in storage order, each with its city's current name.
    ///
    /// States and cities are read separately. A state whose city disappears
    /// in between is left out.
    pub async fn list_all(&self) -> CoreResult<Vec<StateDetail>> {
        info!("Listing all states");

        let states = self.states.find_all().await?;
        if states.is_empty() {
            return Ok(Vec::new());
        }

        // One pass over cities instead of a lookup per state
        let names: HashMap<CityId, City> = self
            .cities
            .find_all()
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        // A state whose city is missing was deleted along with its city
        // between the two reads; the foreign key rules out anything else.
        let details: Vec<StateDetail> = states
            .into_iter()
            .filter_map(|state| match names.get(&state.city_id) {
                Some(city) => Some(StateDetail::new(state, city)),
                None => {
                    warn!(
                        state_id = state.id,
                        city_id = state.city_id,
                        "City gone while listing, skipping state"
                    );
                    None
                }
            })
            .collect();

        debug!(count = details.len(), "States loaded");
        Ok(details)
    }

    /// Creates a state bound to `city_id`.
    ///
    /// ## Errors
    /// * `Validation` - blank or overlong name
    /// * `AlreadyExists` - the city already has a state with this name, ignoring case
    /// * `NotFound` - `city_id` does not resolve
    pub async fn create(&self, name: &str, city_id: CityId) -> CoreResult<StateDetail> {
        validate_name(name)?;
        info!(name = %name, city_id = city_id, "Creating state");

        if self
            .states
            .exists_by_name_ignore_case_and_city(name, city_id)
            .await?
        {
            return Err(CoreError::duplicate_state(name, city_id));
        }

        let city = self.resolve_city(city_id).await?;
        let state = self
            .states
            .insert(name, city.id)
            .await
            .map_err(|err| city_vanished(err, city_id))?;

        Ok(StateDetail::new(state, &city))
    }

    /// Renames a state and/or moves it to another city.
    ///
    /// As with cities, the duplicate check runs first and does not exclude
    /// the state being updated.
    ///
    /// ## Errors
    /// * `Validation` - blank or overlong name
    /// * `AlreadyExists` - (name, city_id) is taken, ignoring case
    /// * `NotFound` - no state with `id`, or `city_id` does not resolve
    pub async fn update(&self, id: StateId, name: &str, city_id: CityId) -> CoreResult<StateDetail> {
        validate_name(name)?;
        info!(id = id, name = %name, city_id = city_id, "Updating state");

        if self
            .states
            .exists_by_name_ignore_case_and_city(name, city_id)
            .await?
        {
            return Err(CoreError::duplicate_state(name, city_id));
        }

        let mut state = self
            .states
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::state_not_found(id))?;

        let city = self.resolve_city(city_id).await?;

        state.name = name.to_string();
        state.city_id = city.id;
        let state = self
            .states
            .update(&state)
            .await
            .map_err(|err| city_vanished(err, city_id))?;

        Ok(StateDetail::new(state, &city))
    }

    /// Deletes a state and returns it as it was, with its city's name.
    ///
    /// ## Errors
    /// * `NotFound` - no state with `id`
    pub async fn delete_by_id(&self, id: StateId) -> CoreResult<StateDetail> {
        info!(id = id, "Deleting state");

        let state = self
            .states
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::state_not_found(id))?;

        let city = self.resolve_city(state.city_id).await?;
        self.states.delete_by_id(state.id).await?;

        Ok(StateDetail::new(state, &city))
    }

    async fn resolve_city(&self, city_id: CityId) -> CoreResult<City> {
        self.cities
            .find_by_id(city_id)
            .await?
            .ok_or_else(|| CoreError::city_not_found(city_id))
    }
}

/// The city existed when resolved but the foreign key rejected the write:
/// it was deleted in between. Report it the same way as an unresolved id.
fn city_vanished(err: CoreError, city_id: CityId) -> CoreError {
    match err {
        CoreError::ReferentialConflict(_) => CoreError::city_not_found(city_id),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::service::CityService;

    struct Fixture {
        cities: CityService,
        states: StateService,
        store: Arc<MemoryStore>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(MemoryStore::new());
        Fixture {
            cities: CityService::new(store.clone()),
            states: StateService::new(store.clone(), store.clone()),
            store,
        }
    }

    #[tokio::test]
    async fn test_create_resolves_city_name() {
        let f = fixture();
        let city = f.cities.create("Springfield").await.unwrap();

        let state = f.states.create("IL", city.id).await.unwrap();
        assert_eq!(state.id, 1);
        assert_eq!(state.name, "IL");
        assert_eq!(state.city_id, city.id);
        assert_eq!(state.city_name, "Springfield");
    }

    #[tokio::test]
    async fn test_create_with_missing_city() {
        let f = fixture();

        let err = f.states.create("IL", 5).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(ref d) if d == "cityId: 5"));
        assert_eq!(f.store.state_count(), 0);
    }

    #[tokio::test]
    async fn test_uniqueness_is_scoped_to_city() {
        let f = fixture();
        let springfield = f.cities.create("Springfield").await.unwrap();
        let shelbyville = f.cities.create("Shelbyville").await.unwrap();

        f.states.create("North", springfield.id).await.unwrap();
        f.states.create("north", shelbyville.id).await.unwrap();

        let err = f.states.create("NORTH", springfield.id).await.unwrap_err();
        assert!(
            matches!(err, CoreError::AlreadyExists(ref d) if d == "name: NORTH cityId: 1")
        );
        assert_eq!(f.store.state_count(), 2);
    }

    #[tokio::test]
    async fn test_list_all_reflects_city_rename() {
        let f = fixture();
        let city = f.cities.create("Springfield").await.unwrap();
        f.states.create("IL", city.id).await.unwrap();

        f.cities.update(city.id, "Capital City").await.unwrap();

        let states = f.states.list_all().await.unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].city_name, "Capital City");
    }

    #[tokio::test]
    async fn test_list_all_skips_state_whose_city_vanished() {
        let f = fixture();
        let springfield = f.cities.create("Springfield").await.unwrap();
        let shelbyville = f.cities.create("Shelbyville").await.unwrap();
        f.states.create("IL", springfield.id).await.unwrap();
        f.states.create("OR", shelbyville.id).await.unwrap();

        // What the state read sees when the city delete lands after it
        f.store.drop_city_unchecked(springfield.id);

        let states = f.states.list_all().await.unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].name, "OR");
        assert_eq!(states[0].city_name, "Shelbyville");
    }

    #[tokio::test]
    async fn test_update_moves_state_to_other_city() {
        let f = fixture();
        let springfield = f.cities.create("Springfield").await.unwrap();
        let shelbyville = f.cities.create("Shelbyville").await.unwrap();
        let state = f.states.create("IL", springfield.id).await.unwrap();

        let updated = f
            .states
            .update(state.id, "Illinois", shelbyville.id)
            .await
            .unwrap();
        assert_eq!(updated.id, state.id);
        assert_eq!(updated.city_name, "Shelbyville");

        let states = f.states.list_all().await.unwrap();
        assert_eq!(states[0].name, "Illinois");
        assert_eq!(states[0].city_name, "Shelbyville");
    }

    #[tokio::test]
    async fn test_update_missing_state() {
        let f = fixture();
        let city = f.cities.create("Springfield").await.unwrap();

        let err = f.states.update(3, "IL", city.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(ref d) if d == "stateId: 3"));
    }

    #[tokio::test]
    async fn test_update_missing_city() {
        let f = fixture();
        let city = f.cities.create("Springfield").await.unwrap();
        let state = f.states.create("IL", city.id).await.unwrap();

        let err = f.states.update(state.id, "IL", 77).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(ref d) if d == "cityId: 77"));

        let states = f.states.list_all().await.unwrap();
        assert_eq!(states[0].city_id, city.id);
    }

    #[tokio::test]
    async fn test_update_duplicate_checked_before_lookup() {
        let f = fixture();
        let city = f.cities.create("Springfield").await.unwrap();
        f.states.create("IL", city.id).await.unwrap();

        // Both the duplicate and the missing id apply: duplicate wins
        let err = f.states.update(99, "il", city.id).await.unwrap_err();
        assert!(matches!(err, CoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_update_same_pair_is_duplicate() {
        let f = fixture();
        let city = f.cities.create("Springfield").await.unwrap();
        let state = f.states.create("IL", city.id).await.unwrap();

        let err = f.states.update(state.id, "IL", city.id).await.unwrap_err();
        assert!(matches!(err, CoreError::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_delete_returns_detail() {
        let f = fixture();
        let city = f.cities.create("Springfield").await.unwrap();
        let state = f.states.create("IL", city.id).await.unwrap();

        let deleted = f.states.delete_by_id(state.id).await.unwrap();
        assert_eq!(deleted, state);
        assert_eq!(f.store.state_count(), 0);

        let err = f.states.delete_by_id(state.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(ref d) if d == "stateId: 1"));
    }

    #[tokio::test]
    async fn test_springfield_scenario() {
        let f = fixture();

        let city = f.cities.create("Springfield").await.unwrap();
        assert_eq!((city.id, city.name.as_str()), (1, "Springfield"));

        assert!(matches!(
            f.cities.create("springfield").await,
            Err(CoreError::AlreadyExists(_))
        ));

        let state = f.states.create("IL", 1).await.unwrap();
        assert_eq!(state.id, 1);
        assert_eq!(state.name, "IL");
        assert_eq!(state.city_name, "Springfield");

        assert!(matches!(
            f.cities.delete_by_id(1).await,
            Err(CoreError::ReferentialConflict(_))
        ));

        f.states.delete_by_id(1).await.unwrap();
        f.cities.delete_by_id(1).await.unwrap();

        assert!(f.cities.list_all().await.unwrap().is_empty());
        assert!(f.states.list_all().await.unwrap().is_empty());
    }
}
