//! Tunable weights and thresholds for the heuristic scorer.

use crate::RecommendError;

/// Weights and thresholds applied by [`HeuristicScorer`](crate::HeuristicScorer).
///
/// Each field drives exactly one signal. The defaults reproduce the
/// production heuristic.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScoreWeights {
    /// Added per high-rated restaurant whose name overlaps the candidate's.
    pub similar_name: f32,
    /// Multiplier for each matching review keyword's count.
    pub review_keyword: f32,
    /// Added when `rating_avg` reaches `high_rating_threshold`.
    pub high_rating_bonus: f32,
    /// Average rating that earns `high_rating_bonus`.
    pub high_rating_threshold: f32,
    /// Added when `rating_avg` reaches only `good_rating_threshold`.
    pub good_rating_bonus: f32,
    /// Average rating that earns `good_rating_bonus`.
    pub good_rating_threshold: f32,
    /// Added when the restaurant has at least `review_volume_threshold` reviews.
    pub review_volume_bonus: f32,
    /// Review count that earns `review_volume_bonus`.
    pub review_volume_threshold: u32,
    /// Multiplier for view counts of restaurants whose name overlaps the candidate's.
    pub viewed_name: f32,
    /// Multiplier for each matching search token's count.
    pub search_keyword: f32,
}

impl ScoreWeights {
    /// Validate the weights and return a copy.
    ///
    /// # Errors
    /// Returns [`RecommendError::InvalidWeight`] naming the first field that
    /// is negative or not finite.
    pub fn validate(self) -> Result<Self, RecommendError> {
        self.fields()
            .into_iter()
            .find(|(_, value)| !is_usable(*value))
            .map_or(Ok(self), |(field, value)| {
                Err(RecommendError::InvalidWeight { field, value })
            })
    }

    const fn fields(self) -> [(&'static str, f32); 9] {
        [
            ("similar_name", self.similar_name),
            ("review_keyword", self.review_keyword),
            ("high_rating_bonus", self.high_rating_bonus),
            ("high_rating_threshold", self.high_rating_threshold),
            ("good_rating_bonus", self.good_rating_bonus),
            ("good_rating_threshold", self.good_rating_threshold),
            ("review_volume_bonus", self.review_volume_bonus),
            ("viewed_name", self.viewed_name),
            ("search_keyword", self.search_keyword),
        ]
    }
}

const fn is_usable(value: f32) -> bool {
    value.is_finite() && value >= 0.0_f32
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            similar_name: 2.0_f32,
            review_keyword: 1.5_f32,
            high_rating_bonus: 2.0_f32,
            high_rating_threshold: 4.0_f32,
            good_rating_bonus: 1.0_f32,
            good_rating_threshold: 3.5_f32,
            review_volume_bonus: 1.0_f32,
            review_volume_threshold: 10,
            viewed_name: 0.5_f32,
            search_keyword: 0.3_f32,
        }
    }
}
