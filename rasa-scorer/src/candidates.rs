//! Candidate pool selection for personalised ranking.

use std::collections::BTreeSet;

use rasa_core::{Restaurant, RestaurantId};

/// Restaurants a user already knows and must not be recommended again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    reviewed: BTreeSet<RestaurantId>,
    bookmarked: BTreeSet<RestaurantId>,
}

impl Exclusions {
    /// Exclude every reviewed and bookmarked restaurant.
    #[must_use]
    pub const fn new(reviewed: BTreeSet<RestaurantId>, bookmarked: BTreeSet<RestaurantId>) -> Self {
        Self {
            reviewed,
            bookmarked,
        }
    }

    /// Whether `id` must be left out of the pool.
    #[must_use]
    pub fn contains(&self, id: RestaurantId) -> bool {
        self.reviewed.contains(&id) || self.bookmarked.contains(&id)
    }

    /// Number of distinct excluded restaurants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reviewed.union(&self.bookmarked).count()
    }

    /// Whether nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reviewed.is_empty() && self.bookmarked.is_empty()
    }
}

/// Return the restaurants eligible for scoring, preserving input order.
///
/// # Examples
/// ```
/// use std::collections::BTreeSet;
/// use rasa_core::Restaurant;
/// use rasa_scorer::{Exclusions, select_candidates};
///
/// let restaurants = [Restaurant::new(1, "A"), Restaurant::new(2, "B"), Restaurant::new(3, "C")];
/// let exclusions = Exclusions::new(BTreeSet::from([1]), BTreeSet::from([3]));
/// let pool = select_candidates(&restaurants, &exclusions);
/// assert_eq!(pool.iter().map(|r| r.id).collect::<Vec<_>>(), [2]);
/// ```
#[must_use]
pub fn select_candidates<'a>(
    restaurants: &'a [Restaurant],
    exclusions: &Exclusions,
) -> Vec<&'a Restaurant> {
    restaurants
        .iter()
        .filter(|restaurant| !exclusions.contains(restaurant.id))
        .collect()
}
