//! # State Repository
//!
//! Database operations for states.
//!
//! A state belongs to exactly one city through `states.city_id`. The
//! foreign key is `ON DELETE RESTRICT`, so the city side of the
//! relationship is protected here as well as in `CityService`.
//!
//! State names are unique per city, ignoring case. The unique index is on
//! `(name_key, city_id)`, where `name_key` is [`civitas_core::name_key`]:
//! ```text
//!   ("IL", Springfield)       ✓
//!   ("il", Springfield)       ✗ UNIQUE constraint failed
//!   ("IL", Shelbyville)       ✓ different city
//!   ("Île", Springfield)      ✓
//!   ("ÎLE", Springfield)      ✗ UNIQUE constraint failed
//! ```

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use civitas_core::{name_key, CityId, CoreError, CoreResult, State, StateId, StateStore};

/// Repository for state database operations.
#[derive(Debug, Clone)]
pub struct StateRepository {
    pool: SqlitePool,
}

impl StateRepository {
    /// Creates a new StateRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StateRepository { pool }
    }

    /// Lists every state, ascending by id.
    pub async fn list_all(&self) -> DbResult<Vec<State>> {
        let states = sqlx::query_as::<_, State>(
            r#"
            SELECT id, name, city_id, created_at, updated_at
            FROM states
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = states.len(), "Listed states");
        Ok(states)
    }

    /// Gets a state by its ID.
    pub async fn get_by_id(&self, id: StateId) -> DbResult<Option<State>> {
        let state = sqlx::query_as::<_, State>(
            r#"
            SELECT id, name, city_id, created_at, updated_at
            FROM states
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(state)
    }

    /// Inserts a new state bound to `city_id`.
    ///
    /// ## Returns
    /// * `Ok(State)` - Inserted state
    /// * `Err(DbError::UniqueViolation)` - Name already used within the city
    /// * `Err(DbError::ForeignKeyViolation)` - City doesn't exist
    pub async fn create(&self, name: &str, city_id: CityId) -> DbResult<State> {
        debug!(name = %name, city_id = city_id, "Inserting state");

        let now = Utc::now();

        let state = sqlx::query_as::<_, State>(
            r#"
            INSERT INTO states (name, name_key, city_id, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?4)
            RETURNING id, name, city_id, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(name_key(name))
        .bind(city_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(state)
    }

    /// Persists the name and city of an existing state.
    ///
    /// ## Returns
    /// * `Ok(State)` - Updated state
    /// * `Err(DbError::NotFound)` - State doesn't exist
    /// * `Err(DbError::UniqueViolation)` - Name already used within the city
    /// * `Err(DbError::ForeignKeyViolation)` - City doesn't exist
    pub async fn modify(&self, id: StateId, name: &str, city_id: CityId) -> DbResult<State> {
        debug!(id = id, name = %name, city_id = city_id, "Updating state");

        let now = Utc::now();

        let state = sqlx::query_as::<_, State>(
            r#"
            UPDATE states SET
                name = ?2,
                name_key = ?3,
                city_id = ?4,
                updated_at = ?5
            WHERE id = ?1
            RETURNING id, name, city_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(name_key(name))
        .bind(city_id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        state.ok_or_else(|| DbError::not_found("State", id))
    }

    /// Deletes a state.
    pub async fn remove(&self, id: StateId) -> DbResult<()> {
        debug!(id = id, "Deleting state");

        let result = sqlx::query("DELETE FROM states WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("State", id));
        }

        Ok(())
    }

    /// Whether `city_id` already has a state called `name`, ignoring case.
    pub async fn name_exists_in_city(&self, name: &str, city_id: CityId) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM states
                WHERE name_key = ?1 AND city_id = ?2
            )
            "#,
        )
        .bind(name_key(name))
        .bind(city_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Counts states.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM states")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl StateStore for StateRepository {
    async fn find_all(&self) -> CoreResult<Vec<State>> {
        Ok(self.list_all().await?)
    }

    async fn find_by_id(&self, id: StateId) -> CoreResult<Option<State>> {
        Ok(self.get_by_id(id).await?)
    }

    async fn insert(&self, name: &str, city_id: CityId) -> CoreResult<State> {
        self.create(name, city_id).await.map_err(|err| match err {
            DbError::UniqueViolation { .. } => CoreError::duplicate_state(name, city_id),
            other => other.into(),
        })
    }

    async fn update(&self, state: &State) -> CoreResult<State> {
        self.modify(state.id, &state.name, state.city_id)
            .await
            .map_err(|err| match err {
                DbError::UniqueViolation { .. } => {
                    CoreError::duplicate_state(&state.name, state.city_id)
                }
                DbError::NotFound { .. } => CoreError::state_not_found(state.id),
                other => other.into(),
            })
    }

    async fn delete_by_id(&self, id: StateId) -> CoreResult<()> {
        self.remove(id).await.map_err(|err| match err {
            DbError::NotFound { .. } => CoreError::state_not_found(id),
            other => other.into(),
        })
    }

    async fn exists_by_name_ignore_case_and_city(
        &self,
        name: &str,
        city_id: CityId,
    ) -> CoreResult<bool> {
        Ok(self.name_exists_in_city(name, city_id).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
