//! Core domain types for the Rasa explore engine.
//!
//! The web application owns restaurants, reviews, bookmarks and the activity
//! log. This crate models read-only snapshots of those records, the signals
//! derived from them, and the traits the recommendation engine uses to reach
//! its data collaborator.
//!
//! # Examples
//!
//! ```
//! use rasa_core::{Restaurant, Viewer};
//!
//! let restaurant = Restaurant::new(1, "Warung Sate").with_rating(4.5, 12);
//! assert_eq!(restaurant.rating_cnt, 12);
//! assert!(Viewer::Anonymous.user_id().is_none());
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod activity;
pub mod popularity;
pub mod restaurant;
pub mod review;
pub mod scorer;
pub mod signals;
pub mod store;
#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
mod viewer;

pub use activity::{ActivityKind, ActivityRecord};
pub use popularity::popularity_order;
pub use restaurant::{Restaurant, RestaurantId};
pub use review::{Bookmark, Review, UserId};
pub use scorer::Scorer;
pub use signals::{ActivityPreferences, ScoringSignals, TastePreferences};
pub use store::{ActivityLog, RestaurantStore, StoreError};
#[cfg(feature = "store-sqlite")]
pub use store::{SqliteRestaurantStore, SqliteStoreError};
pub use viewer::Viewer;
