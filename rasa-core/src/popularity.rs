//! Global popularity ordering shared by every ranked listing.

use std::cmp::Ordering;

use crate::Restaurant;

/// Compare restaurants by global popularity.
///
/// Higher `rating_avg` first, then higher `rating_cnt`, then name in
/// ascending byte order. Identical keys fall back to ascending id so the
/// ordering is total.
///
/// # Examples
/// ```
/// use rasa_core::{Restaurant, popularity_order};
///
/// let mut restaurants = vec![
///     Restaurant::new(3, "Warung C"),
///     Restaurant::new(2, "Warung B").with_rating(4.5, 5),
///     Restaurant::new(1, "Warung A").with_rating(4.5, 20),
/// ];
/// restaurants.sort_by(popularity_order);
/// let ids: Vec<_> = restaurants.iter().map(|r| r.id).collect();
/// assert_eq!(ids, [1, 2, 3]);
/// ```
pub fn popularity_order(a: &Restaurant, b: &Restaurant) -> Ordering {
    b.rating_avg
        .total_cmp(&a.rating_avg)
        .then_with(|| b.rating_cnt.cmp(&a.rating_cnt))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}
