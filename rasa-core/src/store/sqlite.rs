//! SQLite-backed store reading a snapshot of the web application's tables.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
    sync::Mutex,
};

use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, params_from_iter};
use thiserror::Error;

use crate::{ActivityKind, ActivityRecord, Bookmark, Restaurant, RestaurantId, Review, UserId};

use super::{ActivityLog, RestaurantStore, StoreError};

/// SQLite limits bound parameters per statement to 999 by default. The store
/// chunks `IN` queries to remain below that ceiling.
const SQLITE_MAX_VARIABLE_NUMBER: usize = 999;

const ACTIVITY_TABLE: &str = "user_activity";

const RESTAURANT_COLUMNS: &str = "r.id, r.name, r.address, r.description, \
     COALESCE(AVG(CASE WHEN v.rating BETWEEN 1 AND 5 THEN v.rating END), 0.0), COUNT(v.id)";

const RESTAURANT_SOURCE: &str = "restaurant r LEFT JOIN review v ON v.restaurant_id = r.id";

/// Error raised while opening a snapshot database.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}: {source}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Inspecting the schema for optional tables failed.
    #[error("failed to probe table `{table}`: {source}")]
    ProbeSchema {
        /// Table being looked up.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
}

/// Read-only store over a SQLite snapshot.
///
/// The snapshot provides `restaurant`, `review` and `bookmark` tables and,
/// optionally, `user_activity`. Whether the activity table exists is decided
/// once when the store is opened.
pub struct SqliteRestaurantStore {
    connection: Mutex<Connection>,
    has_activity_table: bool,
}

impl fmt::Debug for SqliteRestaurantStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRestaurantStore")
            .field("has_activity_table", &self.has_activity_table)
            .finish_non_exhaustive()
    }
}

impl SqliteRestaurantStore {
    /// Open the snapshot at `database_path` read-only.
    pub fn open(database_path: impl AsRef<Path>) -> Result<Self, SqliteStoreError> {
        let database_path = database_path.as_ref();
        let connection =
            Connection::open_with_flags(database_path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(
                |source| SqliteStoreError::OpenDatabase {
                    path: database_path.to_path_buf(),
                    source,
                },
            )?;
        Self::from_connection(connection)
    }

    /// Wrap an existing connection, probing for the optional activity table.
    pub fn from_connection(connection: Connection) -> Result<Self, SqliteStoreError> {
        let has_activity_table = connection
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
                [ACTIVITY_TABLE],
                |_| Ok(true),
            )
            .optional()
            .map_err(|source| SqliteStoreError::ProbeSchema {
                table: ACTIVITY_TABLE,
                source,
            })?
            .unwrap_or(false);

        if !has_activity_table {
            log::info!("snapshot has no `{ACTIVITY_TABLE}` table; activity signals disabled");
        }

        Ok(Self {
            connection: Mutex::new(connection),
            has_activity_table,
        })
    }

    /// Return the activity log when the snapshot provisions one.
    pub fn activity_log(&self) -> Option<&dyn ActivityLog> {
        self.has_activity_table.then_some(self as &dyn ActivityLog)
    }

    fn with_connection<T>(
        &self,
        operation: &'static str,
        query: impl FnOnce(&Connection) -> rusqlite::Result<T>,
    ) -> Result<T, StoreError> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| StoreError::Poisoned { operation })?;
        query(&connection).map_err(|source| StoreError::query(operation, source))
    }
}

impl RestaurantStore for SqliteRestaurantStore {
    fn restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        self.with_connection("restaurants", |connection| {
            let query = format!(
                "SELECT {RESTAURANT_COLUMNS} FROM {RESTAURANT_SOURCE} GROUP BY r.id ORDER BY r.id"
            );
            let mut statement = connection.prepare(&query)?;
            let rows = statement.query_map([], restaurant_from_row)?;
            rows.collect()
        })
    }

    fn restaurants_by_ids(
        &self,
        ids: &BTreeSet<RestaurantId>,
    ) -> Result<BTreeMap<RestaurantId, Restaurant>, StoreError> {
        let ids: Vec<_> = ids.iter().copied().collect();
        self.with_connection("restaurants_by_ids", |connection| {
            let mut found = BTreeMap::new();
            for chunk in ids.chunks(SQLITE_MAX_VARIABLE_NUMBER) {
                let query = format!(
                    "SELECT {RESTAURANT_COLUMNS} FROM {RESTAURANT_SOURCE} \
                     WHERE r.id IN ({}) GROUP BY r.id",
                    placeholders(chunk.len())
                );
                let mut statement = connection.prepare(&query)?;
                let rows = statement.query_map(params_from_iter(chunk.iter()), restaurant_from_row)?;
                for row in rows {
                    let restaurant = row?;
                    found.insert(restaurant.id, restaurant);
                }
            }
            Ok(found)
        })
    }

    fn restaurant_names(
        &self,
        ids: &BTreeSet<RestaurantId>,
    ) -> Result<BTreeMap<RestaurantId, String>, StoreError> {
        let ids: Vec<_> = ids.iter().copied().collect();
        self.with_connection("restaurant_names", |connection| {
            let mut names = BTreeMap::new();
            for chunk in ids.chunks(SQLITE_MAX_VARIABLE_NUMBER) {
                let query = format!(
                    "SELECT id, name FROM restaurant WHERE id IN ({})",
                    placeholders(chunk.len())
                );
                let mut statement = connection.prepare(&query)?;
                let rows = statement.query_map(params_from_iter(chunk.iter()), |row| {
                    Ok((row.get::<_, RestaurantId>(0)?, row.get::<_, String>(1)?))
                })?;
                for row in rows {
                    let (id, name) = row?;
                    names.insert(id, name);
                }
            }
            Ok(names)
        })
    }

    fn reviews_by_user(&self, user: UserId) -> Result<Vec<Review>, StoreError> {
        self.with_connection("reviews_by_user", |connection| {
            let mut statement = connection.prepare(
                "SELECT restaurant_id, rating, comment FROM review WHERE user_id = ?1 ORDER BY id",
            )?;
            let rows = statement.query_map([user], |row| {
                Ok(Review {
                    user_id: user,
                    restaurant_id: row.get(0)?,
                    rating: rating_from_column(row.get(1)?),
                    comment: row.get(2)?,
                })
            })?;
            rows.collect()
        })
    }

    fn bookmarks_by_user(&self, user: UserId) -> Result<Vec<Bookmark>, StoreError> {
        self.with_connection("bookmarks_by_user", |connection| {
            let mut statement = connection.prepare(
                "SELECT restaurant_id FROM bookmark WHERE user_id = ?1 ORDER BY restaurant_id",
            )?;
            let rows = statement.query_map([user], |row| Ok(Bookmark::new(user, row.get(0)?)))?;
            rows.collect()
        })
    }
}

impl ActivityLog for SqliteRestaurantStore {
    fn activity_for_user(&self, user: UserId) -> Result<Vec<ActivityRecord>, StoreError> {
        if !self.has_activity_table {
            return Ok(Vec::new());
        }
        self.with_connection("activity_for_user", |connection| {
            // Timestamps may be stored as Unix seconds or as ISO-8601 text.
            let query = format!(
                "SELECT activity_type, restaurant_id, search_query, \
                     CASE WHEN typeof(timestamp) = 'integer' THEN timestamp \
                          ELSE CAST(strftime('%s', timestamp) AS INTEGER) END AS recorded_at \
                 FROM {ACTIVITY_TABLE} WHERE user_id = ?1 \
                 ORDER BY recorded_at DESC, rowid DESC"
            );
            let mut statement = connection.prepare(&query)?;
            let rows = statement.query_map([user], |row| {
                let kind: String = row.get(0)?;
                let Ok(kind) = ActivityKind::from_str(&kind) else {
                    log::debug!("skipping activity record of unknown type '{kind}'");
                    return Ok(None);
                };
                Ok(Some(ActivityRecord {
                    user_id: user,
                    kind,
                    restaurant_id: row.get(1)?,
                    search_query: row.get(2)?,
                    recorded_at: row.get::<_, Option<i64>>(3)?.unwrap_or_default(),
                }))
            })?;
            let mut records = Vec::new();
            for row in rows {
                records.extend(row?);
            }
            Ok(records)
        })
    }
}

fn restaurant_from_row(row: &Row<'_>) -> rusqlite::Result<Restaurant> {
    let rating_avg: f64 = row.get(4)?;
    let rating_cnt: i64 = row.get(5)?;
    let restaurant = Restaurant {
        id: row.get(0)?,
        name: row.get(1)?,
        address: row.get(2)?,
        description: row.get(3)?,
        rating_avg: 0.0,
        rating_cnt: 0,
    };
    Ok(restaurant.with_rating(
        rating_avg as f32,
        u32::try_from(rating_cnt).unwrap_or(u32::MAX),
    ))
}

fn rating_from_column(rating: Option<i64>) -> Option<u8> {
    let rating = rating?;
    let converted = u8::try_from(rating)
        .ok()
        .filter(|stars| (1..=5).contains(stars));
    if converted.is_none() {
        log::debug!("ignoring out-of-range review rating {rating}");
    }
    converted
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
