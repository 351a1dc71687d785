//! Weighted-sum heuristic scoring a candidate against a user's signals.
//!
//! Six independent signals contribute to the score:
//!
//! 1. the candidate's name overlaps the name of a restaurant the user rated
//!    highly;
//! 2. review keywords appear in the candidate's name, address or
//!    description;
//! 3. the candidate's average rating is high;
//! 4. the candidate has many reviews;
//! 5. the candidate's name overlaps the name of a restaurant the user viewed;
//! 6. search tokens appear in the candidate's name or description.
//!
//! Name overlap is a case-folded substring test in either direction.

use rasa_core::{Restaurant, Scorer, ScoringSignals};

use crate::{RecommendError, ScoreWeights};

/// Per-signal contributions to a candidate's score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreBreakdown {
    /// Overlap with names of high-rated restaurants.
    pub similar_name: f32,
    /// Review keywords found in the candidate's text.
    pub review_keywords: f32,
    /// Average rating bonus.
    pub rating: f32,
    /// Review volume bonus.
    pub review_volume: f32,
    /// Overlap with names of viewed restaurants.
    pub viewed_name: f32,
    /// Search tokens found in the candidate's text.
    pub search_keywords: f32,
}

impl ScoreBreakdown {
    /// Sum of every contribution.
    #[must_use]
    #[expect(
        clippy::float_arithmetic,
        reason = "the score is a weighted sum of signals"
    )]
    pub fn total(&self) -> f32 {
        self.similar_name
            + self.review_keywords
            + self.rating
            + self.review_volume
            + self.viewed_name
            + self.search_keywords
    }
}

/// Scorer implementing the multi-signal restaurant heuristic.
///
/// # Examples
/// ```
/// use rasa_core::{Restaurant, Scorer, ScoringSignals};
/// use rasa_scorer::HeuristicScorer;
///
/// let scorer = HeuristicScorer::default();
/// let popular = Restaurant::new(1, "Warung Tegal").with_rating(4.2, 15);
/// assert_eq!(scorer.score(&popular, &ScoringSignals::default()), 3.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HeuristicScorer {
    weights: ScoreWeights,
}

impl HeuristicScorer {
    /// Build a scorer from validated weights.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidWeight`] when a weight is negative or
    /// not finite.
    pub fn new(weights: ScoreWeights) -> Result<Self, RecommendError> {
        Ok(Self {
            weights: weights.validate()?,
        })
    }

    /// Weights in use.
    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Compute each signal's contribution for `restaurant`.
    #[must_use]
    pub fn breakdown(&self, restaurant: &Restaurant, signals: &ScoringSignals) -> ScoreBreakdown {
        let name = restaurant.folded_name();
        let profile_text = restaurant.folded_profile_text();
        let menu_text = restaurant.folded_menu_text();

        let similar_names = signals
            .high_rated_names()
            .filter(|(id, other)| *id != restaurant.id && names_overlap(other, &name))
            .fold(0_u64, |sum, _| sum.saturating_add(1));

        let review_keyword_hits = matching_counts(&signals.preferences.keywords, &profile_text);

        let viewed_hits = signals
            .viewed_names()
            .filter(|(id, other, _)| *id != restaurant.id && names_overlap(other, &name))
            .fold(0_u64, |sum, (_, _, count)| sum.saturating_add(u64::from(count)));

        let search_hits = matching_counts(&signals.activity.search_keywords, &menu_text);

        ScoreBreakdown {
            similar_name: scaled(similar_names, self.weights.similar_name),
            review_keywords: scaled(review_keyword_hits, self.weights.review_keyword),
            rating: self.rating_bonus(restaurant.rating_avg),
            review_volume: self.volume_bonus(restaurant.rating_cnt),
            viewed_name: scaled(viewed_hits, self.weights.viewed_name),
            search_keywords: scaled(search_hits, self.weights.search_keyword),
        }
    }

    fn rating_bonus(&self, rating_avg: f32) -> f32 {
        if rating_avg >= self.weights.high_rating_threshold {
            self.weights.high_rating_bonus
        } else if rating_avg >= self.weights.good_rating_threshold {
            self.weights.good_rating_bonus
        } else {
            0.0_f32
        }
    }

    fn volume_bonus(&self, rating_cnt: u32) -> f32 {
        if rating_cnt >= self.weights.review_volume_threshold {
            self.weights.review_volume_bonus
        } else {
            0.0_f32
        }
    }
}

impl Scorer for HeuristicScorer {
    fn score(&self, restaurant: &Restaurant, signals: &ScoringSignals) -> f32 {
        Self::sanitise(self.breakdown(restaurant, signals).total())
    }
}

/// Whether either name contains the other. A blank reference never matches.
fn names_overlap(reference: &str, candidate: &str) -> bool {
    !reference.is_empty() && (reference.contains(candidate) || candidate.contains(reference))
}

/// Sum the counts of every non-empty keyword found in `text`.
fn matching_counts<'a>(
    keywords: impl IntoIterator<Item = (&'a String, &'a u32)>,
    text: &str,
) -> u64 {
    keywords
        .into_iter()
        .filter(|(keyword, _)| !keyword.is_empty() && text.contains(keyword.as_str()))
        .fold(0_u64, |sum, (_, count)| sum.saturating_add(u64::from(*count)))
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "signal counts are scaled by floating-point weights"
)]
fn scaled(count: u64, weight: f32) -> f32 {
    count as f32 * weight
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};

    use rasa_core::{ActivityPreferences, TastePreferences};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn scorer() -> HeuristicScorer {
        HeuristicScorer::default()
    }

    fn high_rated(names: &[(u64, &str)]) -> ScoringSignals {
        let preferences = TastePreferences {
            high_rated: names.iter().map(|(id, _)| *id).collect(),
            ..TastePreferences::default()
        };
        ScoringSignals::new(preferences, ActivityPreferences::default()).with_high_rated_names(
            names
                .iter()
                .map(|(id, name)| (*id, (*name).to_owned()))
                .collect(),
        )
    }

    fn viewed(views: &[(u64, &str, u32)]) -> ScoringSignals {
        let activity = ActivityPreferences {
            viewed_restaurants: views.iter().map(|(id, _, count)| (*id, *count)).collect(),
            ..ActivityPreferences::default()
        };
        ScoringSignals::new(TastePreferences::default(), activity).with_viewed_names(
            views
                .iter()
                .map(|(id, name, _)| (*id, (*name).to_owned()))
                .collect(),
        )
    }

    #[rstest]
    #[case(4.0, 2.0)]
    #[case(3.99, 1.0)]
    #[case(3.5, 1.0)]
    #[case(3.49, 0.0)]
    #[case(0.0, 0.0)]
    fn rating_bonus_follows_thresholds(
        scorer: HeuristicScorer,
        #[case] rating: f32,
        #[case] expected: f32,
    ) {
        let restaurant = Restaurant::new(1, "Depot").with_rating(rating, 1);
        let breakdown = scorer.breakdown(&restaurant, &ScoringSignals::default());
        assert_eq!(breakdown.rating, expected);
    }

    #[rstest]
    #[case(9, 0.0)]
    #[case(10, 1.0)]
    fn volume_bonus_follows_threshold(
        scorer: HeuristicScorer,
        #[case] count: u32,
        #[case] expected: f32,
    ) {
        let restaurant = Restaurant::new(1, "Depot").with_rating(0.0, count);
        let breakdown = scorer.breakdown(&restaurant, &ScoringSignals::default());
        assert_eq!(breakdown.review_volume, expected);
    }

    #[rstest]
    #[case("Sate Padang Ajo", 2.0)]
    #[case("Padang", 2.0)]
    #[case("SATE PADANG", 2.0)]
    #[case("Sate Madura", 0.0)]
    fn similar_names_overlap_in_either_direction(
        scorer: HeuristicScorer,
        #[case] name: &str,
        #[case] expected: f32,
    ) {
        let signals = high_rated(&[(9, "Sate Padang")]);
        let breakdown = scorer.breakdown(&Restaurant::new(1, name), &signals);
        assert_eq!(breakdown.similar_name, expected);
    }

    #[rstest]
    fn similar_name_counts_each_match(scorer: HeuristicScorer) {
        let signals = high_rated(&[(8, "Bakso"), (9, "Bakso Malang"), (10, "Soto")]);
        let breakdown = scorer.breakdown(&Restaurant::new(1, "Bakso Malang Cak Man"), &signals);
        assert_eq!(breakdown.similar_name, 4.0);
    }

    #[rstest]
    fn candidate_never_matches_itself(scorer: HeuristicScorer) {
        let signals = high_rated(&[(1, "Bakso")]);
        let breakdown = scorer.breakdown(&Restaurant::new(1, "Bakso"), &signals);
        assert_eq!(breakdown.similar_name, 0.0);
    }

    #[rstest]
    fn blank_reference_names_are_ignored(scorer: HeuristicScorer) {
        let signals = high_rated(&[(2, "")]);
        let breakdown = scorer.breakdown(&Restaurant::new(1, "Bakso"), &signals);
        assert_eq!(breakdown.similar_name, 0.0);
    }

    #[rstest]
    fn blank_candidate_name_overlaps_every_reference(scorer: HeuristicScorer) {
        let signals = high_rated(&[(2, "Bakso")]);
        let breakdown = scorer.breakdown(&Restaurant::new(1, ""), &signals);
        assert_eq!(breakdown.similar_name, 2.0);
    }

    #[rstest]
    fn review_keywords_search_name_address_and_description(scorer: HeuristicScorer) {
        let preferences = TastePreferences {
            keywords: BTreeMap::from([
                (String::from("enak"), 2),
                (String::from("murah"), 1),
                (String::from("ramai"), 4),
            ]),
            ..TastePreferences::default()
        };
        let signals = ScoringSignals::new(preferences, ActivityPreferences::default());
        let restaurant = Restaurant::new(1, "Warung Enak")
            .with_address("Pasar Murah Blok B")
            .with_description("Sepi");
        let breakdown = scorer.breakdown(&restaurant, &signals);
        assert_eq!(breakdown.review_keywords, 4.5);
    }

    #[rstest]
    fn viewed_names_scale_by_view_count(scorer: HeuristicScorer) {
        let signals = viewed(&[
            (6, "Nasi Uduk", 3),
            (7, "Pecel Lele", 2),
            (1, "Nasi Uduk Kebon Kacang", 5),
        ]);
        let restaurant = Restaurant::new(1, "Nasi Uduk Kebon Kacang");
        let breakdown = scorer.breakdown(&restaurant, &signals);
        assert_eq!(breakdown.viewed_name, 1.5);
    }

    #[rstest]
    fn search_keywords_ignore_the_address(scorer: HeuristicScorer) {
        let activity = ActivityPreferences {
            search_keywords: BTreeMap::from([
                (String::from("kemang"), 3),
                (String::from("kopi"), 1),
            ]),
            ..ActivityPreferences::default()
        };
        let signals = ScoringSignals::new(TastePreferences::default(), activity);
        let restaurant = Restaurant::new(1, "Kopi Kenangan").with_address("Kemang Raya");
        let breakdown = scorer.breakdown(&restaurant, &signals);
        assert_eq!(breakdown.search_keywords, 0.3);
    }

    #[rstest]
    fn unknown_names_contribute_nothing(scorer: HeuristicScorer) {
        let preferences = TastePreferences {
            high_rated: BTreeSet::from([4]),
            ..TastePreferences::default()
        };
        let signals = ScoringSignals::new(preferences, ActivityPreferences::default());
        let breakdown = scorer.breakdown(&Restaurant::new(1, "Bakso"), &signals);
        assert_eq!(breakdown, ScoreBreakdown::default());
        assert_eq!(scorer.score(&Restaurant::new(1, "Bakso"), &signals), 0.0);
    }

    #[rstest]
    fn score_sums_the_breakdown(scorer: HeuristicScorer) {
        let signals = high_rated(&[(2, "Bakso")]);
        let restaurant = Restaurant::new(1, "Bakso Solo").with_rating(4.5, 12);
        assert_eq!(scorer.score(&restaurant, &signals), 5.0);
    }

    #[rstest]
    fn rejects_invalid_weights() {
        let weights = ScoreWeights {
            viewed_name: -0.5,
            ..ScoreWeights::default()
        };
        assert!(matches!(
            HeuristicScorer::new(weights),
            Err(RecommendError::InvalidWeight { field: "viewed_name", .. })
        ));
    }
}
