//! Test-only, in-memory store implementations used by unit and behaviour
//! tests.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use crate::{
    ActivityLog, ActivityRecord, Bookmark, Restaurant, RestaurantId, RestaurantStore, Review,
    StoreError, UserId,
};

/// How the in-memory activity log behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum LogState {
    #[default]
    Available,
    Missing,
    Failing,
}

/// In-memory `RestaurantStore` and `ActivityLog` used in tests.
///
/// Aggregates are reported exactly as supplied on each [`Restaurant`]; the
/// store does not recompute them from its reviews. Lookups scan linearly and
/// suit small datasets only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    restaurants: BTreeMap<RestaurantId, Restaurant>,
    reviews: Vec<Review>,
    bookmarks: Vec<Bookmark>,
    activity: Vec<ActivityRecord>,
    log_state: LogState,
}

impl MemoryStore {
    /// Create a store from a collection of restaurants.
    pub fn with_restaurants<I>(restaurants: I) -> Self
    where
        I: IntoIterator<Item = Restaurant>,
    {
        restaurants
            .into_iter()
            .fold(Self::default(), Self::with_restaurant)
    }

    /// Add or replace a restaurant.
    #[must_use]
    pub fn with_restaurant(mut self, restaurant: Restaurant) -> Self {
        self.restaurants.insert(restaurant.id, restaurant);
        self
    }

    /// Add a review.
    #[must_use]
    pub fn with_review(mut self, review: Review) -> Self {
        self.reviews.push(review);
        self
    }

    /// Add a bookmark.
    #[must_use]
    pub fn with_bookmark(mut self, bookmark: Bookmark) -> Self {
        self.bookmarks.push(bookmark);
        self
    }

    /// Append an activity record.
    #[must_use]
    pub fn with_activity(mut self, record: ActivityRecord) -> Self {
        self.activity.push(record);
        self
    }

    /// Behave as if the activity log was never provisioned.
    #[must_use]
    pub fn without_activity_log(mut self) -> Self {
        self.log_state = LogState::Missing;
        self
    }

    /// Make every activity query fail.
    #[must_use]
    pub fn with_failing_activity_log(mut self) -> Self {
        self.log_state = LogState::Failing;
        self
    }

    /// Return the activity log unless it was marked missing.
    pub fn activity_log(&self) -> Option<&dyn ActivityLog> {
        (self.log_state != LogState::Missing).then_some(self as &dyn ActivityLog)
    }

    /// Every restaurant in id order.
    pub fn all_restaurants(&self) -> impl Iterator<Item = &Restaurant> {
        self.restaurants.values()
    }

    /// Every review in insertion order.
    pub fn all_reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// Every bookmark in insertion order.
    pub fn all_bookmarks(&self) -> &[Bookmark] {
        &self.bookmarks
    }

    /// Every activity record in insertion order.
    pub fn all_activity(&self) -> &[ActivityRecord] {
        &self.activity
    }
}

impl RestaurantStore for MemoryStore {
    fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self.restaurants.values().cloned().collect())
    }

    fn restaurants_by_ids(
        &self,
        ids: &BTreeSet<RestaurantId>,
    ) -> Result<BTreeMap<RestaurantId, Restaurant>, StoreError> {
        Ok(ids
            .iter()
            .filter_map(|id| self.restaurants.get(id).map(|r| (*id, r.clone())))
            .collect())
    }

    fn reviews_by_user(&self, user: UserId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .reviews
            .iter()
            .filter(|review| review.user_id == user)
            .cloned()
            .collect())
    }

    fn bookmarks_by_user(&self, user: UserId) -> Result<Vec<Bookmark>, StoreError> {
        Ok(self
            .bookmarks
            .iter()
            .filter(|bookmark| bookmark.user_id == user)
            .copied()
            .collect())
    }
}

impl ActivityLog for MemoryStore {
    fn activity_for_user(&self, user: UserId) -> Result<Vec<ActivityRecord>, StoreError> {
        match self.log_state {
            LogState::Missing => Ok(Vec::new()),
            LogState::Failing => Err(StoreError::query(
                "activity_for_user",
                "activity log offline",
            )),
            LogState::Available => {
                // Later insertions win ties, mirroring a log ordered by rowid.
                let mut records: Vec<_> = self
                    .activity
                    .iter()
                    .rev()
                    .filter(|record| record.user_id == user)
                    .cloned()
                    .collect();
                records.sort_by_key(|record| Reverse(record.recorded_at));
                Ok(records)
            }
        }
    }
}

/// `RestaurantStore` whose every query fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

impl RestaurantStore for FailingStore {
    fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        Err(StoreError::query("restaurants", "store offline"))
    }

    fn restaurants_by_ids(
        &self,
        _ids: &BTreeSet<RestaurantId>,
    ) -> Result<BTreeMap<RestaurantId, Restaurant>, StoreError> {
        Err(StoreError::query("restaurants_by_ids", "store offline"))
    }

    fn reviews_by_user(&self, _user: UserId) -> Result<Vec<Review>, StoreError> {
        Err(StoreError::query("reviews_by_user", "store offline"))
    }

    fn bookmarks_by_user(&self, _user: UserId) -> Result<Vec<Bookmark>, StoreError> {
        Err(StoreError::query("bookmarks_by_user", "store offline"))
    }
}

/// Persist the contents of `store` as a SQLite snapshot at `path`.
///
/// Review aggregates are not written; the SQLite store derives them from the
/// `review` table. The `user_activity` table is only created when
/// `with_activity` is set.
#[cfg(feature = "store-sqlite")]
pub fn write_sqlite_database(
    path: &std::path::Path,
    store: &MemoryStore,
    with_activity: bool,
) -> Result<(), rusqlite::Error> {
    use rusqlite::{Connection, params};

    let mut connection = Connection::open(path)?;
    connection.execute_batch(
        "CREATE TABLE restaurant (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            address TEXT,
            description TEXT
        );
        CREATE TABLE review (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL,
            restaurant_id INTEGER NOT NULL REFERENCES restaurant(id),
            rating INTEGER,
            comment TEXT
        );
        CREATE TABLE bookmark (
            user_id INTEGER NOT NULL,
            restaurant_id INTEGER NOT NULL REFERENCES restaurant(id),
            PRIMARY KEY (user_id, restaurant_id)
        );",
    )?;
    if with_activity {
        connection.execute_batch(
            "CREATE TABLE user_activity (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                restaurant_id INTEGER,
                activity_type TEXT NOT NULL,
                search_query TEXT,
                timestamp
            );",
        )?;
    }

    let tx = connection.transaction()?;
    {
        let mut insert = tx.prepare(
            "INSERT INTO restaurant (id, name, address, description) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for restaurant in store.all_restaurants() {
            insert.execute(params![
                restaurant.id,
                restaurant.name,
                restaurant.address,
                restaurant.description
            ])?;
        }

        let mut insert = tx.prepare(
            "INSERT INTO review (user_id, restaurant_id, rating, comment) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for review in store.all_reviews() {
            insert.execute(params![
                review.user_id,
                review.restaurant_id,
                review.rating,
                review.comment
            ])?;
        }

        let mut insert =
            tx.prepare("INSERT OR IGNORE INTO bookmark (user_id, restaurant_id) VALUES (?1, ?2)")?;
        for bookmark in store.all_bookmarks() {
            insert.execute(params![bookmark.user_id, bookmark.restaurant_id])?;
        }

        if with_activity {
            let mut insert = tx.prepare(
                "INSERT INTO user_activity \
                 (user_id, restaurant_id, activity_type, search_query, timestamp) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for record in store.all_activity() {
                insert.execute(params![
                    record.user_id,
                    record.restaurant_id,
                    record.kind.as_str(),
                    record.search_query,
                    record.recorded_at
                ])?;
            }
        }
    }
    tx.commit()
}
