//! Facade crate for the Rasa restaurant recommendation engine.
//!
//! This crate re-exports the core domain types and the recommender, and
//! exposes the SQLite snapshot store behind a feature flag.

#![forbid(unsafe_code)]

pub use rasa_core::{
    ActivityKind, ActivityLog, ActivityPreferences, ActivityRecord, Bookmark, Restaurant,
    RestaurantId, RestaurantStore, Review, Scorer, ScoringSignals, StoreError, TastePreferences,
    UserId, Viewer,
};
pub use rasa_scorer::{
    HeuristicScorer, RankedRestaurant, RecommendError, RecommendationSource, Recommendations,
    Recommender, RecommenderConfig, ScoreWeights, SentimentVocabulary, ViewerHistory,
};

#[cfg(feature = "store-sqlite")]
pub use rasa_core::{SqliteRestaurantStore, SqliteStoreError};
