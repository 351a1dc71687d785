//! Ranking and fallback orchestration.
//!
//! [`Recommender`] ties the extractors, the candidate selector and a
//! [`Scorer`] together. Anonymous viewers receive the global popularity
//! ranking. Signed-in viewers receive their personalised ranking, or the
//! global popularity ranking when no candidate scores above zero.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use rasa_core::{
    ActivityLog, Restaurant, RestaurantId, RestaurantStore, Scorer, ScoringSignals, UserId,
    Viewer, popularity_order,
};

use crate::{
    Exclusions, HeuristicScorer, RecommendError, ScoreWeights, SentimentVocabulary,
    activity_preferences, popularity, read_activity, recently_viewed_ids, reviewed_ids,
    search_history, select_candidates, taste_preferences,
};

/// Number of restaurants returned by [`Recommender::recommend`] by default.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;
/// Number of restaurants returned by [`Recommender::top_rated`] by default.
pub const DEFAULT_TOP_RATED_LIMIT: usize = 20;
/// Number of recently viewed restaurants reported by default.
pub const DEFAULT_RECENTLY_VIEWED_LIMIT: usize = 5;
/// Number of recent searches reported by default.
pub const DEFAULT_SEARCH_HISTORY_LIMIT: usize = 10;

/// Engine tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderConfig {
    /// Maximum number of recommendations returned.
    pub limit: usize,
    /// Weights for the default heuristic scorer.
    pub weights: ScoreWeights,
    /// Words counted in review comments.
    pub vocabulary: SentimentVocabulary,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RECOMMENDATION_LIMIT,
            weights: ScoreWeights::default(),
            vocabulary: SentimentVocabulary::default(),
        }
    }
}

impl RecommenderConfig {
    /// Validate the configuration and return it.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidLimit`] for a zero limit and
    /// [`RecommendError::InvalidWeight`] for unusable weights.
    pub fn validate(self) -> Result<Self, RecommendError> {
        check_limit("limit", self.limit)?;
        self.weights.validate()?;
        Ok(self)
    }
}

/// Which ranking produced a set of recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RecommendationSource {
    /// Scored against the viewer's own history.
    Personalised,
    /// Global popularity ranking.
    Popular,
}

impl RecommendationSource {
    /// Return the source as a lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Personalised => "personalised",
            Self::Popular => "popular",
        }
    }
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommended restaurant with the score that placed it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedRestaurant {
    /// The recommended restaurant.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub restaurant: Restaurant,
    /// Affinity score; absent for popularity rankings.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub score: Option<f32>,
}

/// Ordered recommendations for one viewer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendations {
    /// Ranking that produced the list.
    pub source: RecommendationSource,
    /// Restaurants, best first.
    pub restaurants: Vec<RankedRestaurant>,
}

impl Recommendations {
    fn popular(restaurants: Vec<Restaurant>, limit: usize) -> Self {
        Self {
            source: RecommendationSource::Popular,
            restaurants: popularity::rank_by_popularity(restaurants, limit)
                .into_iter()
                .map(|restaurant| RankedRestaurant {
                    restaurant,
                    score: None,
                })
                .collect(),
        }
    }

    /// Identifiers in ranked order.
    #[must_use]
    pub fn ids(&self) -> Vec<RestaurantId> {
        self.restaurants.iter().map(|r| r.restaurant.id).collect()
    }

    /// Number of recommended restaurants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// Whether nothing was recommended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

/// What a viewer recently looked at and searched for.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewerHistory {
    /// Distinct viewed restaurants, most recent first.
    pub recently_viewed: Vec<Restaurant>,
    /// Search queries, most recent first.
    pub searches: Vec<String>,
}

/// Restaurant recommendation engine over a read-only snapshot.
///
/// Every call recomputes from the store; nothing is cached between calls.
///
/// # Examples
/// ```
/// use rasa_core::{Restaurant, Viewer, test_support::MemoryStore};
/// use rasa_scorer::{RecommendationSource, Recommender, RecommenderConfig};
///
/// let store = MemoryStore::with_restaurants([
///     Restaurant::new(1, "Ayam Taliwang").with_rating(4.5, 20),
///     Restaurant::new(2, "Plecing Kangkung").with_rating(4.5, 5),
///     Restaurant::new(3, "Sate Rembiga"),
/// ]);
/// let recommender = Recommender::new(&store, RecommenderConfig::default())?;
/// let recommendations = recommender.recommend(Viewer::Anonymous)?;
/// assert_eq!(recommendations.source, RecommendationSource::Popular);
/// assert_eq!(recommendations.ids(), [1, 2, 3]);
/// # Ok::<(), rasa_scorer::RecommendError>(())
/// ```
pub struct Recommender<'a, S = HeuristicScorer> {
    store: &'a dyn RestaurantStore,
    activity_log: Option<&'a dyn ActivityLog>,
    scorer: S,
    config: RecommenderConfig,
}

impl<S: fmt::Debug> fmt::Debug for Recommender<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Recommender")
            .field("has_activity_log", &self.activity_log.is_some())
            .field("scorer", &self.scorer)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> Recommender<'a> {
    /// Build a recommender using the heuristic scorer.
    ///
    /// No activity log is attached; see [`Recommender::with_activity_log`].
    ///
    /// # Errors
    /// Returns [`RecommendError`] when `config` fails validation.
    pub fn new(
        store: &'a dyn RestaurantStore,
        config: RecommenderConfig,
    ) -> Result<Self, RecommendError> {
        let validated = config.validate()?;
        Ok(Self {
            store,
            activity_log: None,
            scorer: HeuristicScorer::new(validated.weights)?,
            config: validated,
        })
    }
}

impl<'a, S: Scorer> Recommender<'a, S> {
    /// Attach the optional activity log.
    #[must_use]
    pub fn with_activity_log(mut self, activity_log: Option<&'a dyn ActivityLog>) -> Self {
        self.activity_log = activity_log;
        self
    }

    /// Replace the scorer.
    #[must_use]
    pub fn with_scorer<T: Scorer>(self, scorer: T) -> Recommender<'a, T> {
        Recommender {
            store: self.store,
            activity_log: self.activity_log,
            scorer,
            config: self.config,
        }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommend restaurants for `viewer`.
    ///
    /// The result never holds more than the configured limit. On the
    /// personalised path it never holds a restaurant the user reviewed or
    /// bookmarked. Equal scores keep the global popularity order.
    ///
    /// # Errors
    /// Returns [`RecommendError::Store`] when the store fails. Activity log
    /// failures are logged and ignored.
    pub fn recommend(&self, viewer: Viewer) -> Result<Recommendations, RecommendError> {
        let limit = self.config.limit;
        let mut restaurants = self.store.restaurants()?;
        let Some(user) = viewer.user_id() else {
            log::debug!("anonymous viewer; serving {limit} popular restaurants");
            return Ok(Recommendations::popular(restaurants, limit));
        };

        let (signals, exclusions) = self.gather(user)?;
        restaurants.sort_by(popularity_order);
        let candidates = select_candidates(&restaurants, &exclusions);
        let candidate_count = candidates.len();
        let mut scored: Vec<(&Restaurant, f32)> = candidates
            .into_iter()
            .map(|restaurant| (restaurant, S::sanitise(self.scorer.score(restaurant, &signals))))
            .filter(|(_, score)| *score > 0.0_f32)
            .collect();
        log::debug!(
            "user {user}: {candidate_count} candidates after excluding {}, {} scored above zero",
            exclusions.len(),
            scored.len()
        );

        if scored.is_empty() {
            log::debug!("user {user}: no personalised match; falling back to popular restaurants");
            return Ok(Recommendations::popular(restaurants, limit));
        }

        // Stable sort keeps the popularity order among equal scores.
        scored.sort_by(|left, right| right.1.total_cmp(&left.1));
        scored.truncate(limit);
        Ok(Recommendations {
            source: RecommendationSource::Personalised,
            restaurants: scored
                .into_iter()
                .map(|(restaurant, score)| RankedRestaurant {
                    restaurant: restaurant.clone(),
                    score: Some(score),
                })
                .collect(),
        })
    }

    /// Derive the scoring signals for `user`.
    ///
    /// # Errors
    /// Returns [`RecommendError::Store`] when the store fails.
    pub fn signals(&self, user: UserId) -> Result<ScoringSignals, RecommendError> {
        self.gather(user).map(|(signals, _)| signals)
    }

    /// Restaurants with at least one rated review, best average first.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidLimit`] for a zero limit and
    /// [`RecommendError::Store`] when the store fails.
    pub fn top_rated(&self, limit: usize) -> Result<Vec<Restaurant>, RecommendError> {
        check_limit("limit", limit)?;
        Ok(popularity::top_rated(self.store.restaurants()?, limit))
    }

    /// Recently viewed restaurants and recent searches for `viewer`.
    ///
    /// Anonymous viewers and users without an activity log get an empty
    /// history. Viewed restaurants that no longer exist are skipped.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidLimit`] for a zero limit and
    /// [`RecommendError::Store`] when the store fails.
    pub fn history(
        &self,
        viewer: Viewer,
        viewed_limit: usize,
        search_limit: usize,
    ) -> Result<ViewerHistory, RecommendError> {
        check_limit("viewed_limit", viewed_limit)?;
        check_limit("search_limit", search_limit)?;
        let Some(user) = viewer.user_id() else {
            return Ok(ViewerHistory::default());
        };

        let records = read_activity(self.activity_log, user);
        let viewed = recently_viewed_ids(&records);
        let lookup: BTreeSet<RestaurantId> = viewed.iter().copied().collect();
        let mut known = if lookup.is_empty() {
            BTreeMap::new()
        } else {
            self.store.restaurants_by_ids(&lookup)?
        };

        Ok(ViewerHistory {
            recently_viewed: viewed
                .iter()
                .filter_map(|id| known.remove(id))
                .take(viewed_limit)
                .collect(),
            searches: search_history(&records, search_limit),
        })
    }

    fn gather(&self, user: UserId) -> Result<(ScoringSignals, Exclusions), RecommendError> {
        let reviews = self.store.reviews_by_user(user)?;
        let bookmarks = self.store.bookmarks_by_user(user)?;
        let preferences = taste_preferences(&reviews, &bookmarks, &self.config.vocabulary);
        let activity = activity_preferences(&read_activity(self.activity_log, user));

        let high_rated_names = self.names_for(&preferences.high_rated)?;
        let viewed_ids: BTreeSet<RestaurantId> =
            activity.viewed_restaurants.keys().copied().collect();
        let viewed_names = self.names_for(&viewed_ids)?;

        let exclusions = Exclusions::new(reviewed_ids(&reviews), preferences.bookmarked.clone());
        let signals = ScoringSignals::new(preferences, activity)
            .with_high_rated_names(high_rated_names)
            .with_viewed_names(viewed_names);
        Ok((signals, exclusions))
    }

    fn names_for(
        &self,
        ids: &BTreeSet<RestaurantId>,
    ) -> Result<BTreeMap<RestaurantId, String>, RecommendError> {
        if ids.is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(self.store.restaurant_names(ids)?)
    }
}

const fn check_limit(field: &'static str, limit: usize) -> Result<(), RecommendError> {
    if limit == 0 {
        return Err(RecommendError::InvalidLimit { field });
    }
    Ok(())
}
