use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// A single customer review of a storage spot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user: String,
    /// Free text, stored as given. Escaping is up to whoever renders it.
    pub comment: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Point on the map
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Great-circle distance in kilometers (haversine)
    pub fn distance_km(&self, other: &Coordinates) -> f64 {
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();
        let a = (d_lat / 2.0).sin().powi(2)
            + self.latitude.to_radians().cos()
                * other.latitude.to_radians().cos()
                * (d_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }
}

/// A rentable storage spot.
///
/// `rating` is derived from `reviews` and cannot be set by callers. Every way of
/// building or extending a `Location` goes through [`derive_rating`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub price_per_hour: f64,
    pub latitude: f64,
    pub longitude: f64,
    rating: f64,
    reviews: Vec<Review>,
}

impl Location {
    /// Create a location with no reviews (rating 0)
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        price_per_hour: f64,
        coordinates: Coordinates,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            price_per_hour,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            rating: 0.0,
            reviews: Vec::new(),
        }
    }

    /// Replace the review list, re-deriving the rating
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.rating = derive_rating(&reviews);
        self.reviews = reviews;
        self
    }

    /// Copy of this location with `review` appended and the rating recomputed
    pub fn with_appended_review(&self, review: Review) -> Self {
        let mut reviews = Vec::with_capacity(self.reviews.len() + 1);
        reviews.extend_from_slice(&self.reviews);
        reviews.push(review);
        self.clone().with_reviews(reviews)
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    /// Reviews in the order they were appended
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Average review rating rounded to one decimal, half away from zero.
/// No reviews means a rating of 0.
pub fn derive_rating(reviews: &[Review]) -> f64 {
    if reviews.is_empty() {
        return 0.0;
    }
    let sum: f64 = reviews.iter().map(|r| r.rating).sum();
    // Scale before dividing so one-decimal inputs land on exact halves.
    (sum * 10.0 / reviews.len() as f64).round() / 10.0
}


#[cfg(test)]
mod tests {
    use super::fixtures::{location, review};
    use super::*;

    #[test]
    fn rating_is_zero_without_reviews() {
        assert_eq!(derive_rating(&[]), 0.0);
        assert_eq!(location("1", "Locker Center").rating(), 0.0);
    }

    #[test]
    fn rating_averages_and_rounds_to_one_decimal() {
        let spot = location("1", "Locker Center")
            .with_reviews(vec![review("r1", 5.0), review("r2", 4.0)]);
        assert_eq!(spot.rating(), 4.5);

        let spot = spot.with_appended_review(review("r3", 4.0));
        assert_eq!(spot.rating(), 4.3);
        assert_eq!(spot.review_count(), 3);
    }

    #[test]
    fn rating_rounds_half_away_from_zero() {
        // 17 / 4 = 4.25; half-to-even would give 4.2
        let reviews = vec![
            review("a", 5.0),
            review("b", 4.0),
            review("c", 4.0),
            review("d", 4.0),
        ];
        assert_eq!(derive_rating(&reviews), 4.3);

        let reviews = vec![review("a", 4.5), review("b", 4.0)];
        assert_eq!(derive_rating(&reviews), 4.3);
    }

    #[test]
    fn rating_does_not_depend_on_review_order() {
        let base = location("1", "Locker Center");
        let forward = base
            .with_appended_review(review("r1", 5.0))
            .with_appended_review(review("r2", 2.0));
        let backward = base
            .with_appended_review(review("r2", 2.0))
            .with_appended_review(review("r1", 5.0));
        assert_eq!(forward.rating(), backward.rating());
        assert_eq!(forward.reviews()[0].id, "r1");
        assert_eq!(backward.reviews()[0].id, "r2");
    }

    #[test]
    fn appending_leaves_the_original_untouched() {
        let spot = location("1", "Locker Center").with_reviews(vec![review("r1", 5.0)]);
        let extended = spot.with_appended_review(review("r2", 1.0));
        assert_eq!(spot.review_count(), 1);
        assert_eq!(spot.rating(), 5.0);
        assert_eq!(extended.rating(), 3.0);
    }

    #[test]
    fn distance_between_known_points() {
        let brickell = Coordinates::new(25.7617, -80.1918);
        let airport = Coordinates::new(25.7959, -80.2870);
        let d = brickell.distance_km(&airport);
        assert!((d - 10.2).abs() < 0.3, "got {d}");
        assert_eq!(brickell.distance_km(&brickell), 0.0);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let spot = location("1", "Locker Center").with_reviews(vec![review("r1", 5.0)]);
        let json = serde_json::to_value(&spot).unwrap();
        assert_eq!(json["pricePerHour"], 6.0);
        assert_eq!(json["rating"], 5.0);
        assert_eq!(json["reviews"][0]["createdAt"], "2025-10-15T10:12:00Z");
    }
}
