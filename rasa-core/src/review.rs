//! Explicit user feedback: reviews and bookmarks.

use crate::RestaurantId;

/// Identifier assigned to a user account by the data collaborator.
pub type UserId = u64;

/// A user's review of a restaurant.
///
/// The collaborator guarantees at most one review per user and restaurant.
/// Both the rating and the comment may be missing.
///
/// # Examples
/// ```
/// use rasa_core::Review;
///
/// let review = Review::new(1, 10).with_rating(5).with_comment("Enak banget");
/// assert_eq!(review.rating, Some(5));
/// assert_eq!(review.comment_tokens().collect::<Vec<_>>(), ["enak", "banget"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Review {
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
    /// Star rating in `1..=5`, when given.
    pub rating: Option<u8>,
    pub comment: Option<String>,
}

impl Review {
    /// Construct a review with neither rating nor comment.
    pub const fn new(user_id: UserId, restaurant_id: RestaurantId) -> Self {
        Self {
            user_id,
            restaurant_id,
            rating: None,
            comment: None,
        }
    }

    /// Attach a star rating.
    #[must_use]
    pub const fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Attach a free-text comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Whether the rating meets `threshold`. Unrated reviews never do.
    pub fn rated_at_least(&self, threshold: u8) -> bool {
        self.rating.is_some_and(|rating| rating >= threshold)
    }

    /// Lower-cased, whitespace-separated comment tokens.
    pub fn comment_tokens(&self) -> impl Iterator<Item = String> + '_ {
        self.comment
            .as_deref()
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_lowercase)
    }
}

/// A user's bookmark of a restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bookmark {
    pub user_id: UserId,
    pub restaurant_id: RestaurantId,
}

impl Bookmark {
    /// Construct a bookmark.
    pub const fn new(user_id: UserId, restaurant_id: RestaurantId) -> Self {
        Self {
            user_id,
            restaurant_id,
        }
    }
}
