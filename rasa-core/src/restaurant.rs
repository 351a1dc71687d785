//! Restaurants as seen by the recommendation engine.

/// Identifier assigned to a restaurant by the data collaborator.
pub type RestaurantId = u64;

/// Highest average rating a restaurant can carry.
pub const MAX_RATING: f32 = 5.0;

/// A restaurant together with its review aggregates.
///
/// `rating_avg` is the mean of the non-null review ratings and `rating_cnt`
/// the number of reviews. Both are computed by the data collaborator; a
/// restaurant without reviews carries `0.0` and `0`.
///
/// # Examples
/// ```
/// use rasa_core::Restaurant;
///
/// let restaurant = Restaurant::new(7, "Bakmi Jaya")
///     .with_address("Jl. Sudirman 12")
///     .with_description("Mie ayam pedas")
///     .with_rating(3.8, 4);
///
/// assert_eq!(restaurant.id, 7);
/// assert_eq!(restaurant.description.as_deref(), Some("Mie ayam pedas"));
/// assert_eq!(restaurant.rating_avg, 3.8);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
    /// Mean review rating in `0.0..=5.0`.
    pub rating_avg: f32,
    /// Number of reviews written for this restaurant.
    pub rating_cnt: u32,
}

impl Restaurant {
    /// Construct a restaurant without address, description or reviews.
    pub fn new(id: RestaurantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
            description: None,
            rating_avg: 0.0,
            rating_cnt: 0,
        }
    }

    /// Attach a free-text address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Attach a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach review aggregates.
    ///
    /// Non-finite averages become `0.0`; finite ones are clamped into
    /// `0.0..=5.0`.
    ///
    /// # Examples
    /// ```
    /// use rasa_core::Restaurant;
    ///
    /// let restaurant = Restaurant::new(1, "Soto Betawi").with_rating(f32::NAN, 3);
    /// assert_eq!(restaurant.rating_avg, 0.0);
    /// assert_eq!(Restaurant::new(2, "Gado").with_rating(9.0, 1).rating_avg, 5.0);
    /// ```
    pub fn with_rating(mut self, rating_avg: f32, rating_cnt: u32) -> Self {
        self.rating_avg = if rating_avg.is_finite() {
            rating_avg.clamp(0.0, MAX_RATING)
        } else {
            0.0
        };
        self.rating_cnt = rating_cnt;
        self
    }

    /// Lower-cased display name.
    pub fn folded_name(&self) -> String {
        self.name.to_lowercase()
    }

    /// Lower-cased name, address and description joined by single spaces.
    ///
    /// Missing fields contribute an empty segment so the separators stay in
    /// place.
    pub fn folded_profile_text(&self) -> String {
        join_folded(&[
            Some(self.name.as_str()),
            self.address.as_deref(),
            self.description.as_deref(),
        ])
    }

    /// Lower-cased name and description joined by a single space.
    pub fn folded_menu_text(&self) -> String {
        join_folded(&[Some(self.name.as_str()), self.description.as_deref()])
    }
}

fn join_folded(parts: &[Option<&str>]) -> String {
    parts
        .iter()
        .map(|part| part.unwrap_or_default().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}
