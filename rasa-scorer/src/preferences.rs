//! Taste preferences derived from a user's reviews and bookmarks.

use std::collections::{BTreeMap, BTreeSet};

use rasa_core::{Bookmark, RestaurantId, Review, TastePreferences};

use crate::SentimentVocabulary;

/// Lowest star rating that marks a restaurant as high-rated by the user.
pub const HIGH_RATING_THRESHOLD: u8 = 4;

/// Derive explicit taste signals for one user.
///
/// Reviews without a rating never count as high-rated and reviews without a
/// comment contribute no keywords. Each review counts a vocabulary word at
/// most once, however often it repeats the word.
///
/// # Examples
/// ```
/// use rasa_core::{Bookmark, Review};
/// use rasa_scorer::{SentimentVocabulary, taste_preferences};
///
/// let reviews = [Review::new(1, 10).with_rating(5).with_comment("Enak banget, enak!")];
/// let bookmarks = [Bookmark::new(1, 20)];
/// let preferences = taste_preferences(&reviews, &bookmarks, &SentimentVocabulary::default());
///
/// assert!(preferences.high_rated.contains(&10));
/// assert_eq!(preferences.keywords.get("enak"), Some(&1));
/// assert!(preferences.bookmarked.contains(&20));
/// ```
#[must_use]
pub fn taste_preferences(
    reviews: &[Review],
    bookmarks: &[Bookmark],
    vocabulary: &SentimentVocabulary,
) -> TastePreferences {
    let high_rated = reviews
        .iter()
        .filter(|review| review.rated_at_least(HIGH_RATING_THRESHOLD))
        .map(|review| review.restaurant_id)
        .collect();

    let mut keywords: BTreeMap<String, u32> = BTreeMap::new();
    for review in reviews {
        let tokens: BTreeSet<String> = review.comment_tokens().collect();
        for token in tokens.into_iter().filter(|t| vocabulary.contains(t)) {
            let count = keywords.entry(token).or_default();
            *count = count.saturating_add(1);
        }
    }

    TastePreferences {
        high_rated,
        keywords,
        bookmarked: bookmarks.iter().map(|b| b.restaurant_id).collect(),
    }
}

/// Every restaurant the user reviewed, whatever the rating.
#[must_use]
pub fn reviewed_ids(reviews: &[Review]) -> BTreeSet<RestaurantId> {
    reviews.iter().map(|review| review.restaurant_id).collect()
}
