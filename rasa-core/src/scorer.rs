//! Score restaurants for a user's signals.
//!
//! The `Scorer` trait assigns an affinity score to a
//! [`Restaurant`](crate::Restaurant) given the [`ScoringSignals`] derived for
//! the viewer.

use crate::{Restaurant, ScoringSignals};

/// Calculate an affinity score for a candidate restaurant.
///
/// Higher scores indicate a better match between the restaurant and the
/// viewer's history. Implementations must be thread-safe (`Send` + `Sync`)
/// so a single scorer can serve concurrent requests.
/// The method is infallible; implementers must return `0.0` when no signal
/// applies. A score of exactly `0.0` removes the candidate from personalised
/// results.
///
/// Implementations must produce finite, non-negative scores. Scores are not
/// bounded above. Use [`Scorer::sanitise`] to apply these guards.
///
/// # Examples
///
/// ```rust
/// use rasa_core::{Restaurant, Scorer, ScoringSignals};
///
/// struct RatingScorer;
///
/// impl Scorer for RatingScorer {
///     fn score(&self, restaurant: &Restaurant, _signals: &ScoringSignals) -> f32 {
///         Self::sanitise(restaurant.rating_avg)
///     }
/// }
///
/// let restaurant = Restaurant::new(1, "Warung").with_rating(4.0, 2);
/// assert_eq!(RatingScorer.score(&restaurant, &ScoringSignals::default()), 4.0);
/// ```
pub trait Scorer: Send + Sync {
    /// Return a score for `restaurant` according to `signals`.
    fn score(&self, restaurant: &Restaurant, signals: &ScoringSignals) -> f32;

    /// Validate a raw score.
    ///
    /// Returns `0.0` for non-finite values and clamps negatives to `0.0`.
    fn sanitise(score: f32) -> f32
    where
        Self: Sized,
    {
        if !score.is_finite() {
            return 0.0;
        }
        score.max(0.0)
    }
}
