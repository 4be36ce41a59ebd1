//! In-memory implementation of both ports, for rule engine tests.
//!
//! It enforces the same storage constraints as the SQLite schema (unique
//! names compared by [`name_key`], restricting foreign key) so the services
//! can be exercised against gateway-level failures too.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{CoreError, CoreResult};
use crate::ports::{CityStore, StateStore};
use crate::types::{name_key, City, CityId, State, StateId};

#[derive(Default)]
struct Tables {
    cities: BTreeMap<CityId, City>,
    states: BTreeMap<StateId, State>,
    next_city_id: CityId,
    next_state_id: StateId,
}

impl Tables {
    fn city_name_taken(&self, name: &str, except: Option<CityId>) -> bool {
        let key = name_key(name);
        self.cities
            .values()
            .any(|c| Some(c.id) != except && name_key(&c.name) == key)
    }

    fn state_name_taken(&self, name: &str, city_id: CityId, except: Option<StateId>) -> bool {
        let key = name_key(name);
        self.states.values().any(|s| {
            Some(s.id) != except && s.city_id == city_id && name_key(&s.name) == key
        })
    }
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn city_count(&self) -> usize {
        self.tables.lock().unwrap().cities.len()
    }

    pub(crate) fn state_count(&self) -> usize {
        self.tables.lock().unwrap().states.len()
    }

    /// Removes a city without the foreign key check, leaving its states
    /// pointing at nothing.
    pub(crate) fn drop_city_unchecked(&self, id: CityId) {
        self.tables.lock().unwrap().cities.remove(&id);
    }
}

#[async_trait]
impl CityStore for MemoryStore {
    async fn find_all(&self) -> CoreResult<Vec<City>> {
        Ok(self.tables.lock().unwrap().cities.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CityId) -> CoreResult<Option<City>> {
        Ok(self.tables.lock().unwrap().cities.get(&id).cloned())
    }

    async fn insert(&self, name: &str) -> CoreResult<City> {
        let mut tables = self.tables.lock().unwrap();
        if tables.city_name_taken(name, None) {
            return Err(CoreError::AlreadyExists("cities.name".to_string()));
        }
        tables.next_city_id += 1;
        let now = Utc::now();
        let city = City {
            id: tables.next_city_id,
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.cities.insert(city.id, city.clone());
        Ok(city)
    }

    async fn update(&self, city: &City) -> CoreResult<City> {
        let mut tables = self.tables.lock().unwrap();
        if tables.city_name_taken(&city.name, Some(city.id)) {
            return Err(CoreError::AlreadyExists("cities.name".to_string()));
        }
        let stored = tables
            .cities
            .get_mut(&city.id)
            .ok_or_else(|| CoreError::city_not_found(city.id))?;
        stored.name = city.name.clone();
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: CityId) -> CoreResult<()> {
        let mut tables = self.tables.lock().unwrap();
        if tables.states.values().any(|s| s.city_id == id) {
            return Err(CoreError::ReferentialConflict(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        tables.cities.remove(&id);
        Ok(())
    }

    async fn exists_by_name_ignore_case(&self, name: &str) -> CoreResult<bool> {
        Ok(self.tables.lock().unwrap().city_name_taken(name, None))
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn find_all(&self) -> CoreResult<Vec<State>> {
        Ok(self.tables.lock().unwrap().states.values().cloned().collect())
    }

    async fn find_by_id(&self, id: StateId) -> CoreResult<Option<State>> {
        Ok(self.tables.lock().unwrap().states.get(&id).cloned())
    }

    async fn insert(&self, name: &str, city_id: CityId) -> CoreResult<State> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.cities.contains_key(&city_id) {
            return Err(CoreError::ReferentialConflict(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        if tables.state_name_taken(name, city_id, None) {
            return Err(CoreError::AlreadyExists("states.name, states.city_id".to_string()));
        }
        tables.next_state_id += 1;
        let now = Utc::now();
        let state = State {
            id: tables.next_state_id,
            name: name.to_string(),
            city_id,
            created_at: now,
            updated_at: now,
        };
        tables.states.insert(state.id, state.clone());
        Ok(state)
    }

    async fn update(&self, state: &State) -> CoreResult<State> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.cities.contains_key(&state.city_id) {
            return Err(CoreError::ReferentialConflict(
                "FOREIGN KEY constraint failed".to_string(),
            ));
        }
        if tables.state_name_taken(&state.name, state.city_id, Some(state.id)) {
            return Err(CoreError::AlreadyExists("states.name, states.city_id".to_string()));
        }
        let stored = tables
            .states
            .get_mut(&state.id)
            .ok_or_else(|| CoreError::state_not_found(state.id))?;
        stored.name = state.name.clone();
        stored.city_id = state.city_id;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_by_id(&self, id: StateId) -> CoreResult<()> {
        self.tables.lock().unwrap().states.remove(&id);
        Ok(())
    }

    async fn exists_by_name_ignore_case_and_city(
        &self,
        name: &str,
        city_id: CityId,
    ) -> CoreResult<bool> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .state_name_taken(name, city_id, None))
    }
}
