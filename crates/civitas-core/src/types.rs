//! # Domain Types
//!
//! Persisted records for the registry.
//!
//! ## Relationship
//! ```text
//! ┌──────────────────┐         ┌──────────────────────┐
//! │ City             │ 1     * │ State                │
//! │  id              │◄────────│  city_id  (by id)    │
//! │  name (unique,   │         │  name (unique per    │
//! │   case-insens.)  │         │   city, case-insens.)│
//! └──────────────────┘         └──────────────────────┘
//! ```
//!
//! A [`State`] keeps only the id of its city. The city's name is looked up
//! whenever a [`StateDetail`] is produced, so a renamed city is reflected
//! immediately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a [`City`], assigned by storage on insert.
pub type CityId = i64;

/// Identifier of a [`State`], assigned by storage on insert.
pub type StateId = i64;

/// Case-folded form of a name, used for every "ignoring case" comparison.
///
/// Folds the full Unicode range, so `Zürich` and `ZÜRICH` share a key.
/// Storage keeps this next to the name and indexes it for uniqueness.
///
/// ```rust
/// use civitas_core::name_key;
///
/// assert_eq!(name_key("ÎLE"), name_key("île"));
/// ```
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
}

// =============================================================================
// City
// =============================================================================

/// A top-level named location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct City {
    /// Storage-assigned identifier. Immutable after insert.
    pub id: CityId,

    /// Display name, unique across cities ignoring case.
    pub name: String,

    /// When the city was created.
    pub created_at: DateTime<Utc>,

    /// When the city was last renamed.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// State
// =============================================================================

/// A named entity that belongs to exactly one [`City`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct State {
    /// Storage-assigned identifier.
    pub id: StateId,

    /// Display name, unique within its city ignoring case.
    pub name: String,

    /// Owning city. Must resolve whenever it is set.
    pub city_id: CityId,

    /// When the state was created.
    pub created_at: DateTime<Utc>,

    /// When the state was last updated.
    pub updated_at: DateTime<Utc>,
}

/// A [`State`] together with the name of its city, resolved at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateDetail {
    pub id: StateId,
    pub name: String,
    pub city_id: CityId,
    pub city_name: String,
}

impl StateDetail {
    /// Joins a state with its resolved city.
    pub fn new(state: State, city: &City) -> Self {
        StateDetail {
            id: state.id,
            name: state.name,
            city_id: state.city_id,
            city_name: city.name.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_detail_takes_city_name() {
        let now = Utc::now();
        let city = City {
            id: 1,
            name: "Springfield".to_string(),
            created_at: now,
            updated_at: now,
        };
        let state = State {
            id: 9,
            name: "IL".to_string(),
            city_id: 1,
            created_at: now,
            updated_at: now,
        };

        let detail = StateDetail::new(state, &city);
        assert_eq!(detail.id, 9);
        assert_eq!(detail.city_id, 1);
        assert_eq!(detail.city_name, "Springfield");
    }

    #[test]
    fn test_name_key_folds_non_ascii() {
        assert_eq!(name_key("Zürich"), name_key("ZÜRICH"));
        assert_eq!(name_key("Île"), "île");
        assert_eq!(name_key("ΑΘΗΝΑ"), name_key("αθηνα"));
        assert_ne!(name_key("Springfield"), name_key("Shelbyville"));
    }
}
