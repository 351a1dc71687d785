//! Passive activity log entries.
//!
//! The web layer appends one record per page view, search, bookmark and
//! review. The engine only ever reads them in aggregate.
//!
//! # Examples
//! ```
//! use rasa_core::{ActivityKind, ActivityRecord};
//!
//! let record = ActivityRecord::search(3, "Sate Padang", 1_700_000_000);
//! assert_eq!(record.kind, ActivityKind::Search);
//! assert_eq!(ActivityKind::View.to_string(), "view");
//! ```

use crate::{RestaurantId, UserId};

/// Kind of user activity captured by the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ActivityKind {
    /// A restaurant detail page was opened.
    View,
    /// A free-text search was submitted.
    Search,
    /// A restaurant was bookmarked.
    Bookmark,
    /// A review was written.
    Review,
}

impl ActivityKind {
    /// Return the kind as stored in the log.
    ///
    /// # Examples
    /// ```
    /// use rasa_core::ActivityKind;
    ///
    /// assert_eq!(ActivityKind::Review.as_str(), "review");
    /// ```
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Search => "search",
            Self::Bookmark => "bookmark",
            Self::Review => "review",
        }
    }
}

impl std::fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ActivityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "search" => Ok(Self::Search),
            "bookmark" => Ok(Self::Bookmark),
            "review" => Ok(Self::Review),
            _ => Err(format!("unknown activity type '{s}'")),
        }
    }
}

/// A single entry of the activity log.
///
/// `recorded_at` is a Unix timestamp in seconds; only its ordering matters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityRecord {
    pub user_id: UserId,
    pub kind: ActivityKind,
    /// Restaurant the activity refers to, set for views.
    pub restaurant_id: Option<RestaurantId>,
    /// Query text, set for searches.
    pub search_query: Option<String>,
    pub recorded_at: i64,
}

impl ActivityRecord {
    /// Construct a record without restaurant or query.
    pub const fn new(user_id: UserId, kind: ActivityKind, recorded_at: i64) -> Self {
        Self {
            user_id,
            kind,
            restaurant_id: None,
            search_query: None,
            recorded_at,
        }
    }

    /// Construct a `view` record for a restaurant.
    pub fn view(user_id: UserId, restaurant_id: RestaurantId, recorded_at: i64) -> Self {
        Self {
            restaurant_id: Some(restaurant_id),
            ..Self::new(user_id, ActivityKind::View, recorded_at)
        }
    }

    /// Construct a `search` record for a query.
    pub fn search(user_id: UserId, query: impl Into<String>, recorded_at: i64) -> Self {
        Self {
            search_query: Some(query.into()),
            ..Self::new(user_id, ActivityKind::Search, recorded_at)
        }
    }

    /// Attach the restaurant the activity refers to.
    #[must_use]
    pub const fn with_restaurant(mut self, restaurant_id: RestaurantId) -> Self {
        self.restaurant_id = Some(restaurant_id);
        self
    }

    /// Restaurant referenced by a `view` record, if any.
    pub const fn viewed_restaurant(&self) -> Option<RestaurantId> {
        match self.kind {
            ActivityKind::View => self.restaurant_id,
            _ => None,
        }
    }

    /// Non-empty query of a `search` record, if any.
    pub fn query(&self) -> Option<&str> {
        match self.kind {
            ActivityKind::Search => self.search_query.as_deref().filter(|q| !q.is_empty()),
            _ => None,
        }
    }
}
