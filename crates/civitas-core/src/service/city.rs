//! # City Rule Engine
//!
//! Global, case-insensitive name uniqueness plus existence checks.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};
use crate::ports::CityStore;
use crate::types::{City, CityId};
use crate::validation::validate_name;

/// Create/update/delete rules for cities.
///
/// ## Usage
/// ```rust,ignore
/// let service = CityService::new(Arc::new(db.cities()));
///
/// let city = service.create("Springfield").await?;
/// service.update(city.id, "Shelbyville").await?;
/// service.delete_by_id(city.id).await?;
/// ```
#[derive(Clone)]
pub struct CityService {
    cities: Arc<dyn CityStore>,
}

impl CityService {
    pub fn new(cities: Arc<dyn CityStore>) -> Self {
        CityService { cities }
    }

    /// All cities in storage order. Empty when none exist.
    pub async fn list_all(&self) -> CoreResult<Vec<City>> {
        info!("Listing all cities");
        let cities = self.cities.find_all().await?;
        debug!(count = cities.len(), "Cities loaded");
        Ok(cities)
    }

    /// Creates a city.
    ///
    /// ## Errors
    /// * `Validation` - blank or overlong name
    /// * `AlreadyExists` - a city with this name exists, ignoring case
    pub async fn create(&self, name: &str) -> CoreResult<City> {
        validate_name(name)?;
        info!(name = %name, "Creating city");

        if self.cities.exists_by_name_ignore_case(name).await? {
            return Err(CoreError::duplicate_city(name));
        }

        self.cities.insert(name).await
    }

    /// Renames a city.
    ///
    /// The duplicate check runs first and covers every city, including the
    /// one being renamed. A case-only rename of a city therefore fails with
    /// `AlreadyExists`, and so does any rename of a missing id to a taken
    /// name.
    ///
    /// ## Errors
    /// * `Validation` - blank or overlong name
    /// * `AlreadyExists` - the name is taken, ignoring case
    /// * `NotFound` - no city with `id`
    pub async fn update(&self, id: CityId, name: &str) -> CoreResult<City> {
        validate_name(name)?;
        info!(id = id, name = %name, "Updating city");

        if self.cities.exists_by_name_ignore_case(name).await? {
            return Err(CoreError::duplicate_city(name));
        }

        let mut city = self
            .cities
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::city_not_found(id))?;

        city.name = name.to_string();
        self.cities.update(&city).await
    }

    /// Deletes a city and returns it as it was.
    ///
    /// ## Errors
    /// * `NotFound` - no city with `id`
    /// * `ReferentialConflict` - states still belong to the city
    pub async fn delete_by_id(&self, id: CityId) -> CoreResult<City> {
        info!(id = id, "Deleting city");

        let city = self
            .cities
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::city_not_found(id))?;

        self.cities
            .delete_by_id(city.id)
            .await
            .map_err(|err| match err {
                CoreError::ReferentialConflict(_) => {
                    CoreError::ReferentialConflict(format!("cityId: {}", id))
                }
                other => other,
            })?;

        Ok(city)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
