//! Data access traits for restaurants and user history.
//!
//! The web application owns every record; the engine reads a consistent
//! snapshot through [`RestaurantStore`] and, when one is provisioned, an
//! [`ActivityLog`]. Both traits are read-only.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::{ActivityRecord, Bookmark, Restaurant, RestaurantId, Review, UserId};

#[cfg(feature = "store-sqlite")]
mod sqlite;

#[cfg(feature = "store-sqlite")]
pub use sqlite::{SqliteRestaurantStore, SqliteStoreError};

/// Error raised when a data collaborator cannot answer a query.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend failed while executing `operation`.
    #[error("store operation `{operation}` failed: {source}")]
    Query {
        /// Name of the failing store operation.
        operation: &'static str,
        /// Backend failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A connection guard was poisoned by a panicking reader.
    #[error("store connection poisoned during `{operation}`")]
    Poisoned {
        /// Name of the store operation that observed the poison.
        operation: &'static str,
    },
}

impl StoreError {
    /// Wrap a backend failure for `operation`.
    pub fn query(
        operation: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Query {
            operation,
            source: source.into(),
        }
    }
}

/// Read-only access to restaurants, reviews and bookmarks.
///
/// Restaurants carry their review aggregates (`rating_avg`, `rating_cnt`)
/// as computed by the collaborator.
///
/// # Examples
///
/// ```rust
/// use std::collections::{BTreeMap, BTreeSet};
/// use rasa_core::{Bookmark, Restaurant, RestaurantId, RestaurantStore, Review, StoreError, UserId};
///
/// struct SingleRestaurant(Restaurant);
///
/// impl RestaurantStore for SingleRestaurant {
///     fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
///         Ok(vec![self.0.clone()])
///     }
///
///     fn restaurants_by_ids(
///         &self,
///         ids: &BTreeSet<RestaurantId>,
///     ) -> Result<BTreeMap<RestaurantId, Restaurant>, StoreError> {
///         Ok(ids
///             .iter()
///             .filter(|id| **id == self.0.id)
///             .map(|id| (*id, self.0.clone()))
///             .collect())
///     }
///
///     fn reviews_by_user(&self, _user: UserId) -> Result<Vec<Review>, StoreError> {
///         Ok(Vec::new())
///     }
///
///     fn bookmarks_by_user(&self, _user: UserId) -> Result<Vec<Bookmark>, StoreError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let store = SingleRestaurant(Restaurant::new(4, "Rawon Setan"));
/// let names = store.restaurant_names(&BTreeSet::from([4, 5])).unwrap();
/// assert_eq!(names, BTreeMap::from([(4, String::from("Rawon Setan"))]));
/// ```
pub trait RestaurantStore: Send + Sync {
    /// Return every restaurant, ordered by id.
    fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError>;

    /// Return the restaurants among `ids` that exist. Unknown ids are absent
    /// from the map.
    fn restaurants_by_ids(
        &self,
        ids: &BTreeSet<RestaurantId>,
    ) -> Result<BTreeMap<RestaurantId, Restaurant>, StoreError>;

    /// Return display names for the restaurants among `ids` that exist.
    ///
    /// Implementations backed by a database should override this with a
    /// narrower query.
    fn restaurant_names(
        &self,
        ids: &BTreeSet<RestaurantId>,
    ) -> Result<BTreeMap<RestaurantId, String>, StoreError> {
        Ok(self
            .restaurants_by_ids(ids)?
            .into_iter()
            .map(|(id, restaurant)| (id, restaurant.name))
            .collect())
    }

    /// Return every review written by `user`.
    fn reviews_by_user(&self, user: UserId) -> Result<Vec<Review>, StoreError>;

    /// Return every bookmark held by `user`.
    fn bookmarks_by_user(&self, user: UserId) -> Result<Vec<Bookmark>, StoreError>;
}

/// Read-only access to the passive activity log.
///
/// The log is optional infrastructure: callers hold an
/// `Option<&dyn ActivityLog>` and treat its absence as an empty history.
pub trait ActivityLog: Send + Sync {
    /// Return every record for `user`, most recent first.
    fn activity_for_user(&self, user: UserId) -> Result<Vec<ActivityRecord>, StoreError>;
}
