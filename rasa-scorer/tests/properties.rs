#![expect(
    clippy::expect_used,
    reason = "property tests should fail fast when recommendation breaks"
)]

//! Property-based tests for the recommender.
//!
//! # Invariants tested
//!
//! - **Determinism:** the same snapshot always yields the same ranking.
//! - **Bound:** no more than the configured limit is returned.
//! - **Exclusion:** personalised lists never hold reviewed or bookmarked
//!   restaurants.
//! - **Score validity:** personalised scores are positive, finite and sorted.
//! - **Fallback:** an unpersonalised user sees the anonymous ranking.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rasa_core::{
    ActivityRecord, Bookmark, Restaurant, RestaurantId, Review, Viewer, test_support::MemoryStore,
};
use rasa_scorer::{RecommendationSource, Recommender, RecommenderConfig};

const USER: u64 = 1;
const NAME_PARTS: [&str; 6] = ["sate", "bakso", "ayam", "soto", "mie", "nasi"];
const COMMENT_WORDS: [&str; 5] = ["enak", "pedas", "mahal", "biasa", "ramai"];

fn restaurant_strategy() -> impl Strategy<Value = (String, Option<String>, f32, u32)> {
    (
        prop::sample::subsequence(NAME_PARTS.to_vec(), 1..=2),
        prop::option::of(prop::sample::subsequence(COMMENT_WORDS.to_vec(), 0..=3)),
        0.0_f32..=5.0_f32,
        0_u32..30,
    )
        .prop_map(|(name, description, rating_avg, rating_cnt)| {
            (
                name.join(" "),
                description.map(|words| words.join(" ")),
                rating_avg,
                rating_cnt,
            )
        })
}

/// Build a snapshot of up to twelve restaurants plus one user's history.
fn dataset_strategy() -> impl Strategy<Value = MemoryStore> {
    (
        prop::collection::vec(restaurant_strategy(), 1..=12),
        prop::collection::vec((0_u64..14, prop::option::of(1_u8..=5), 0_usize..5), 0..6),
        prop::collection::vec(0_u64..14, 0..4),
        prop::collection::vec(
            (0_u64..14, prop::sample::select(NAME_PARTS.to_vec()), any::<bool>(), 0_i64..1_000),
            0..8,
        ),
    )
        .prop_map(|(restaurants, reviews, bookmarks, activity)| {
            let mut store = MemoryStore::default();
            for (id, (name, description, rating_avg, rating_cnt)) in
                (1_u64..).zip(restaurants)
            {
                let mut restaurant = Restaurant::new(id, name).with_rating(rating_avg, rating_cnt);
                restaurant.description = description;
                store = store.with_restaurant(restaurant);
            }
            for (id, rating, word) in reviews {
                let mut review = Review::new(USER, id);
                review.rating = rating;
                review.comment = COMMENT_WORDS.get(word).map(|w| (*w).to_owned());
                store = store.with_review(review);
            }
            for id in bookmarks {
                store = store.with_bookmark(Bookmark::new(USER, id));
            }
            for (id, query, is_view, at) in activity {
                let record = if is_view {
                    ActivityRecord::view(USER, id, at)
                } else {
                    ActivityRecord::search(USER, query, at)
                };
                store = store.with_activity(record);
            }
            store
        })
}

fn tried_ids(store: &MemoryStore) -> BTreeSet<RestaurantId> {
    store
        .all_reviews()
        .iter()
        .map(|review| review.restaurant_id)
        .chain(store.all_bookmarks().iter().map(|b| b.restaurant_id))
        .collect()
}

fn recommender(store: &MemoryStore, limit: usize) -> Recommender<'_> {
    let config = RecommenderConfig {
        limit,
        ..RecommenderConfig::default()
    };
    Recommender::new(store, config)
        .expect("config is valid")
        .with_activity_log(store.activity_log())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: recommending twice over the same snapshot is identical.
    #[test]
    fn recommendations_are_deterministic(store in dataset_strategy()) {
        let engine = recommender(&store, 10);
        let first = engine.recommend(Viewer::User(USER)).expect("recommend");
        let second = engine.recommend(Viewer::User(USER)).expect("recommend");
        prop_assert_eq!(first, second);
    }

    /// Property: the configured limit bounds every response.
    #[test]
    fn limit_bounds_results(store in dataset_strategy(), limit in 1_usize..8) {
        let engine = recommender(&store, limit);
        for viewer in [Viewer::Anonymous, Viewer::User(USER)] {
            let recommendations = engine.recommend(viewer).expect("recommend");
            prop_assert!(recommendations.len() <= limit);
        }
    }

    /// Property: personalised lists never repeat what the user already tried.
    #[test]
    fn personalised_lists_exclude_tried_restaurants(store in dataset_strategy()) {
        let tried = tried_ids(&store);
        let recommendations = recommender(&store, 10)
            .recommend(Viewer::User(USER))
            .expect("recommend");
        if recommendations.source == RecommendationSource::Personalised {
            for id in recommendations.ids() {
                prop_assert!(!tried.contains(&id), "restaurant {} was already tried", id);
            }
        }
    }

    /// Property: personalised scores are positive, finite and descending.
    #[test]
    fn personalised_scores_are_valid(store in dataset_strategy()) {
        let recommendations = recommender(&store, 10)
            .recommend(Viewer::User(USER))
            .expect("recommend");
        let scores: Vec<f32> = recommendations
            .restaurants
            .iter()
            .filter_map(|ranked| ranked.score)
            .collect();
        prop_assert_eq!(
            scores.len(),
            match recommendations.source {
                RecommendationSource::Personalised => recommendations.len(),
                RecommendationSource::Popular => 0,
            }
        );
        for score in &scores {
            prop_assert!(score.is_finite() && *score > 0.0, "invalid score {}", score);
        }
        for pair in scores.windows(2) {
            if let [higher, lower] = pair {
                prop_assert!(higher >= lower, "scores out of order: {:?}", scores);
            }
        }
    }

    /// Property: falling back serves exactly the anonymous ranking.
    #[test]
    fn fallback_matches_anonymous_ranking(store in dataset_strategy()) {
        let engine = recommender(&store, 10);
        let personal = engine.recommend(Viewer::User(USER)).expect("recommend");
        if personal.source == RecommendationSource::Popular {
            let anonymous = engine.recommend(Viewer::Anonymous).expect("recommend");
            prop_assert_eq!(personal, anonymous);
        }
    }
}
