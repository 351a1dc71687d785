//! Signals derived from a user's history and consumed by scorers.
//!
//! Extractors in the engine build these values from a snapshot; scorers only
//! read them. Keyword maps are ordered so that iteration, and therefore any
//! floating-point summation over them, is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use crate::RestaurantId;

/// Explicit taste signals taken from reviews and bookmarks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TastePreferences {
    /// Restaurants the user rated at least four stars.
    pub high_rated: BTreeSet<RestaurantId>,
    /// Vocabulary word to number of reviews whose comment contains it.
    pub keywords: BTreeMap<String, u32>,
    /// Restaurants the user bookmarked.
    pub bookmarked: BTreeSet<RestaurantId>,
}

impl TastePreferences {
    /// Whether no explicit signal was found.
    pub fn is_empty(&self) -> bool {
        self.high_rated.is_empty() && self.keywords.is_empty() && self.bookmarked.is_empty()
    }
}

/// Passive signals taken from the activity log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityPreferences {
    /// Restaurant to number of `view` records referencing it.
    pub viewed_restaurants: BTreeMap<RestaurantId, u32>,
    /// Lower-cased search token to number of occurrences.
    pub search_keywords: BTreeMap<String, u32>,
}

impl ActivityPreferences {
    /// Whether the log contributed nothing.
    pub fn is_empty(&self) -> bool {
        self.viewed_restaurants.is_empty() && self.search_keywords.is_empty()
    }
}

/// Everything a [`Scorer`](crate::Scorer) needs to rate a candidate.
///
/// Names of high-rated and viewed restaurants are resolved once per request
/// and stored lower-cased, so scoring a candidate never touches the store.
/// Ids whose names could not be resolved are simply absent and contribute
/// nothing.
///
/// # Examples
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use rasa_core::{ActivityPreferences, ScoringSignals, TastePreferences};
///
/// let preferences = TastePreferences {
///     high_rated: BTreeSet::from([3]),
///     ..TastePreferences::default()
/// };
/// let signals = ScoringSignals::new(preferences, ActivityPreferences::default())
///     .with_high_rated_names(BTreeMap::from([(3, String::from("Sate PADANG"))]));
/// assert_eq!(signals.high_rated_names().collect::<Vec<_>>(), [(3, "sate padang")]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoringSignals {
    pub preferences: TastePreferences,
    pub activity: ActivityPreferences,
    high_rated_names: BTreeMap<RestaurantId, String>,
    viewed_names: BTreeMap<RestaurantId, String>,
}

impl ScoringSignals {
    /// Combine both signal families without any resolved names.
    pub const fn new(preferences: TastePreferences, activity: ActivityPreferences) -> Self {
        Self {
            preferences,
            activity,
            high_rated_names: BTreeMap::new(),
            viewed_names: BTreeMap::new(),
        }
    }

    /// Attach display names for high-rated restaurants.
    #[must_use]
    pub fn with_high_rated_names(mut self, names: BTreeMap<RestaurantId, String>) -> Self {
        self.high_rated_names = fold_names(names);
        self
    }

    /// Attach display names for viewed restaurants.
    #[must_use]
    pub fn with_viewed_names(mut self, names: BTreeMap<RestaurantId, String>) -> Self {
        self.viewed_names = fold_names(names);
        self
    }

    /// Lower-cased names of high-rated restaurants that could be resolved.
    pub fn high_rated_names(&self) -> impl Iterator<Item = (RestaurantId, &str)> + '_ {
        self.high_rated_names
            .iter()
            .filter(|(id, _)| self.preferences.high_rated.contains(id))
            .map(|(id, name)| (*id, name.as_str()))
    }

    /// Lower-cased names of viewed restaurants paired with their view count.
    pub fn viewed_names(&self) -> impl Iterator<Item = (RestaurantId, &str, u32)> + '_ {
        self.activity
            .viewed_restaurants
            .iter()
            .filter_map(|(id, count)| {
                self.viewed_names
                    .get(id)
                    .map(|name| (*id, name.as_str(), *count))
            })
    }
}

fn fold_names(names: BTreeMap<RestaurantId, String>) -> BTreeMap<RestaurantId, String> {
    names
        .into_iter()
        .map(|(id, name)| (id, name.to_lowercase()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_signals_are_empty() {
        let signals = ScoringSignals::default();
        assert!(signals.preferences.is_empty());
        assert!(signals.activity.is_empty());
        assert_eq!(signals.high_rated_names().count(), 0);
        assert_eq!(signals.viewed_names().count(), 0);
    }

    #[rstest]
    fn high_rated_names_ignore_ids_outside_preferences() {
        let preferences = TastePreferences {
            high_rated: BTreeSet::from([1]),
            ..TastePreferences::default()
        };
        let signals = ScoringSignals::new(preferences, ActivityPreferences::default())
            .with_high_rated_names(BTreeMap::from([
                (1, String::from("Bakso")),
                (2, String::from("Soto")),
            ]));
        assert_eq!(signals.high_rated_names().collect::<Vec<_>>(), [(1, "bakso")]);
    }

    #[rstest]
    fn viewed_names_pair_with_counts() {
        let activity = ActivityPreferences {
            viewed_restaurants: BTreeMap::from([(6, 3), (9, 1)]),
            ..ActivityPreferences::default()
        };
        let signals = ScoringSignals::new(TastePreferences::default(), activity)
            .with_viewed_names(BTreeMap::from([(6, String::from("Nasi Goreng"))]));
        assert_eq!(
            signals.viewed_names().collect::<Vec<_>>(),
            [(6, "nasi goreng", 3)]
        );
    }
}
