//! Passive signals and history helpers built on the optional activity log.

use std::collections::{BTreeMap, BTreeSet};

use rasa_core::{ActivityLog, ActivityPreferences, ActivityRecord, RestaurantId, UserId};

/// Read a user's activity, degrading to an empty history.
///
/// A missing log yields no records. A failing log is reported at `warn`
/// level and also yields no records, so absent history never blocks a
/// recommendation.
#[must_use]
pub fn read_activity(source: Option<&dyn ActivityLog>, user: UserId) -> Vec<ActivityRecord> {
    let Some(activity_log) = source else {
        return Vec::new();
    };
    activity_log.activity_for_user(user).unwrap_or_else(|err| {
        log::warn!("activity log unavailable for user {user}; ignoring activity signals: {err}");
        Vec::new()
    })
}

/// Aggregate view counts and search tokens from activity records.
///
/// Views without a restaurant and searches without a query are skipped.
///
/// # Examples
/// ```
/// use rasa_core::ActivityRecord;
/// use rasa_scorer::activity_preferences;
///
/// let records = [
///     ActivityRecord::view(1, 6, 30),
///     ActivityRecord::view(1, 6, 20),
///     ActivityRecord::search(1, "Sate Ayam", 10),
/// ];
/// let activity = activity_preferences(&records);
/// assert_eq!(activity.viewed_restaurants.get(&6), Some(&2));
/// assert_eq!(activity.search_keywords.get("sate"), Some(&1));
/// ```
#[must_use]
pub fn activity_preferences(records: &[ActivityRecord]) -> ActivityPreferences {
    let mut viewed_restaurants: BTreeMap<RestaurantId, u32> = BTreeMap::new();
    let mut search_keywords: BTreeMap<String, u32> = BTreeMap::new();

    for record in records {
        if let Some(restaurant) = record.viewed_restaurant() {
            increment(viewed_restaurants.entry(restaurant).or_default());
        }
        for token in record.query().into_iter().flat_map(str::split_whitespace) {
            increment(search_keywords.entry(token.to_lowercase()).or_default());
        }
    }

    ActivityPreferences {
        viewed_restaurants,
        search_keywords,
    }
}

/// Distinct viewed restaurants, most recent first.
///
/// Records must be ordered newest first, as [`ActivityLog`] returns them.
#[must_use]
pub fn recently_viewed_ids(records: &[ActivityRecord]) -> Vec<RestaurantId> {
    let mut seen = BTreeSet::new();
    records
        .iter()
        .filter_map(ActivityRecord::viewed_restaurant)
        .filter(|id| seen.insert(*id))
        .collect()
}

/// Non-empty search queries, most recent first, up to `limit`.
#[must_use]
pub fn search_history(records: &[ActivityRecord], limit: usize) -> Vec<String> {
    records
        .iter()
        .filter_map(ActivityRecord::query)
        .take(limit)
        .map(str::to_owned)
        .collect()
}

const fn increment(count: &mut u32) {
    *count = count.saturating_add(1);
}
