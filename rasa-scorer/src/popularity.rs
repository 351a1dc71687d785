//! Global popularity rankings used for anonymous viewers and fallbacks.

use rasa_core::{Restaurant, popularity_order};

/// Order restaurants by global popularity and keep the first `limit`.
///
/// # Examples
/// ```
/// use rasa_core::Restaurant;
/// use rasa_scorer::rank_by_popularity;
///
/// let ranked = rank_by_popularity(
///     vec![
///         Restaurant::new(3, "Es Campur"),
///         Restaurant::new(1, "Ayam Betutu").with_rating(4.5, 20),
///         Restaurant::new(2, "Babi Guling").with_rating(4.5, 5),
///     ],
///     2,
/// );
/// assert_eq!(ranked.iter().map(|r| r.id).collect::<Vec<_>>(), [1, 2]);
/// ```
#[must_use]
pub fn rank_by_popularity(mut restaurants: Vec<Restaurant>, limit: usize) -> Vec<Restaurant> {
    restaurants.sort_by(popularity_order);
    restaurants.truncate(limit);
    restaurants
}

/// Restaurants with at least one rated review, best average first.
///
/// Restaurants whose `rating_avg` is `0.0` are left out. Ties follow the
/// global popularity ordering.
#[must_use]
pub fn top_rated(restaurants: Vec<Restaurant>, limit: usize) -> Vec<Restaurant> {
    let rated = restaurants
        .into_iter()
        .filter(|restaurant| restaurant.rating_avg > 0.0_f32)
        .collect();
    rank_by_popularity(rated, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn restaurants() -> Vec<Restaurant> {
        vec![
            Restaurant::new(1, "Kerak Telor"),
            Restaurant::new(2, "Gado Gado").with_rating(3.0, 40),
            Restaurant::new(3, "Asinan").with_rating(4.0, 2),
            Restaurant::new(4, "Bir Pletok").with_rating(4.0, 2),
            Restaurant::new(5, "Soto Betawi").with_rating(0.0, 3),
        ]
    }

    #[rstest]
    fn ranks_every_restaurant(restaurants: Vec<Restaurant>) {
        let ranked = rank_by_popularity(restaurants, 10);
        assert_eq!(
            ranked.iter().map(|r| r.id).collect::<Vec<_>>(),
            [3, 4, 2, 5, 1]
        );
    }

    #[rstest]
    fn top_rated_skips_unrated(restaurants: Vec<Restaurant>) {
        let ranked = top_rated(restaurants, 10);
        assert_eq!(ranked.iter().map(|r| r.id).collect::<Vec<_>>(), [3, 4, 2]);
    }

    #[rstest]
    fn limits_are_applied(restaurants: Vec<Restaurant>) {
        assert_eq!(top_rated(restaurants.clone(), 1).len(), 1);
        assert!(rank_by_popularity(restaurants, 0).is_empty());
    }
}
