//! # City Repository
//!
//! Database operations for cities.
//!
//! ## Uniqueness
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  idx_cities_name_key  ON cities (name_key)                             │
//! │                                                                         │
//! │  "Springfield"  name_key "springfield"  ✓ inserted                     │
//! │  "springfield"  name_key "springfield"  ✗ UNIQUE → AlreadyExists       │
//! │  "Zürich"       name_key "zürich"       ✓ inserted                     │
//! │  "ZÜRICH"       name_key "zürich"       ✗ UNIQUE → AlreadyExists       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `name_key` is written on every insert and rename from
//! [`civitas_core::name_key`]; it never leaves this module.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use civitas_core::{name_key, City, CityId, CityStore, CoreError, CoreResult};

/// Repository for city database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = CityRepository::new(pool);
///
/// let city = repo.create("Springfield").await?;
/// let found = repo.get_by_id(city.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CityRepository {
    pool: SqlitePool,
}

impl CityRepository {
    /// Creates a new CityRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CityRepository { pool }
    }

    /// Lists every city, ascending by id.
    pub async fn list_all(&self) -> DbResult<Vec<City>> {
        let cities = sqlx::query_as::<_, City>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM cities
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = cities.len(), "Listed cities");
        Ok(cities)
    }

    /// Gets a city by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(City))` - City found
    /// * `Ok(None)` - City not found
    pub async fn get_by_id(&self, id: CityId) -> DbResult<Option<City>> {
        let city = sqlx::query_as::<_, City>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM cities
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(city)
    }

    /// Inserts a new city and returns it with its generated id.
    ///
    /// ## Returns
    /// * `Ok(City)` - Inserted city
    /// * `Err(DbError::UniqueViolation)` - Name already used, ignoring case
    pub async fn create(&self, name: &str) -> DbResult<City> {
        debug!(name = %name, "Inserting city");

        let now = Utc::now();

        let city = sqlx::query_as::<_, City>(
            r#"
            INSERT INTO cities (name, name_key, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?3)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(name_key(name))
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(city)
    }

    /// Persists a new name for an existing city.
    ///
    /// ## Returns
    /// * `Ok(City)` - Updated city
    /// * `Err(DbError::NotFound)` - City doesn't exist
    /// * `Err(DbError::UniqueViolation)` - Name already used, ignoring case
    pub async fn rename(&self, id: CityId, name: &str) -> DbResult<City> {
        debug!(id = id, name = %name, "Updating city");

        let now = Utc::now();

        let city = sqlx::query_as::<_, City>(
            r#"
            UPDATE cities SET
                name = ?2,
                name_key = ?3,
                updated_at = ?4
            WHERE id = ?1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(name_key(name))
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        city.ok_or_else(|| DbError::not_found("City", id))
    }

    /// Deletes a city.
    ///
    /// ## Returns
    /// * `Ok(())` - Deleted
    /// * `Err(DbError::NotFound)` - City doesn't exist
    /// * `Err(DbError::ForeignKeyViolation)` - States still reference the city
    pub async fn remove(&self, id: CityId) -> DbResult<()> {
        debug!(id = id, "Deleting city");

        let result = sqlx::query("DELETE FROM cities WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("City", id));
        }

        Ok(())
    }

    /// Whether any city has `name`, ignoring case.
    pub async fn name_exists(&self, name: &str) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM cities WHERE name_key = ?1)")
                .bind(name_key(name))
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Counts cities (for diagnostics and seeding).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cities")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl CityStore for CityRepository {
    async fn find_all(&self) -> CoreResult<Vec<City>> {
        Ok(self.list_all().await?)
    }

    async fn find_by_id(&self, id: CityId) -> CoreResult<Option<City>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn insert(&self, name: &str) -> CoreResult<City> {
        self.create(name).await.map_err(|err| match err {
            DbError::UniqueViolation { .. } => CoreError::duplicate_city(name),
            other => other.into(),
        })
    }

    async fn update(&self, city: &City) -> CoreResult<City> {
        self.rename(city.id, &city.name)
            .await
            .map_err(|err| match err {
                DbError::UniqueViolation { .. } => CoreError::duplicate_city(&city.name),
                DbError::NotFound { .. } => CoreError::city_not_found(city.id),
                other => other.into(),
            })
    }

    async fn delete_by_id(&self, id: CityId) -> CoreResult<()> {
        self.remove(id).await.map_err(|err| match err {
            DbError::NotFound { .. } => CoreError::city_not_found(id),
            other => other.into(),
        })
    }

    async fn exists_by_name_ignore_case(&self, name: &str) -> CoreResult<bool> {
        Ok(self.name_exists(name).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
