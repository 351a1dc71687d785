//! Restaurant recommendation engine for the Rasa explore feed.
//!
//! The crate turns a read-only snapshot of restaurants, reviews, bookmarks
//! and the optional activity log into a ranked list of restaurants:
//!
//! - **Preference extraction** derives taste signals from a user's reviews
//!   and bookmarks ([`taste_preferences`]) and passive signals from the
//!   activity log ([`activity_preferences`]).
//! - **Candidate selection** removes every restaurant the user already
//!   reviewed or bookmarked ([`select_candidates`]).
//! - **Scoring** sums weighted signals per candidate ([`HeuristicScorer`]).
//! - **Ranking** sorts by score and falls back to the global popularity
//!   ranking when personalisation finds nothing ([`Recommender`]).
//!
//! # Examples
//!
//! ```
//! use rasa_core::{Bookmark, Restaurant, Review, Viewer, test_support::MemoryStore};
//! use rasa_scorer::{RecommendationSource, Recommender, RecommenderConfig};
//!
//! let store = MemoryStore::with_restaurants([
//!     Restaurant::new(1, "Bakso Pak Kumis").with_rating(4.1, 3),
//!     Restaurant::new(2, "Bakso Malang").with_description("Kuah enak"),
//!     Restaurant::new(3, "Es Cendol"),
//! ])
//! .with_review(Review::new(7, 1).with_rating(5).with_comment("enak banget"));
//!
//! let recommender = Recommender::new(&store, RecommenderConfig::default())?;
//! let recommendations = recommender.recommend(Viewer::User(7))?;
//! assert_eq!(recommendations.source, RecommendationSource::Personalised);
//! assert_eq!(recommendations.ids(), [2]);
//! # Ok::<(), rasa_scorer::RecommendError>(())
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod activity;
mod candidates;
mod error;
mod heuristic;
mod popularity;
mod preferences;
mod recommender;
mod vocabulary;
mod weights;

pub use activity::{activity_preferences, read_activity, recently_viewed_ids, search_history};
pub use candidates::{Exclusions, select_candidates};
pub use error::RecommendError;
pub use heuristic::{HeuristicScorer, ScoreBreakdown};
pub use popularity::{rank_by_popularity, top_rated};
pub use preferences::{HIGH_RATING_THRESHOLD, reviewed_ids, taste_preferences};
pub use recommender::{
    DEFAULT_RECENTLY_VIEWED_LIMIT, DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_SEARCH_HISTORY_LIMIT,
    DEFAULT_TOP_RATED_LIMIT, RankedRestaurant, RecommendationSource, Recommendations, Recommender,
    RecommenderConfig, ViewerHistory,
};
pub use vocabulary::{DEFAULT_SENTIMENT_WORDS, SentimentVocabulary, VocabularyError};
pub use weights::ScoreWeights;
