use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

use crate::models::{Coordinates, Location, Review};

/// Turn a raw catalog payload (a JSON array of location records) into
/// locations ready for the store.
///
/// Records that cannot be normalized are skipped and logged.
pub fn normalize_catalog(payload: &Value) -> Result<Vec<Location>> {
    let records = payload
        .as_array()
        .ok_or_else(|| anyhow!("catalog payload is not an array"))?;

    let mut locations = Vec::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        match normalize_location(record) {
            Ok(location) => locations.push(location),
            Err(e) => warn!("Skipping catalog record {}: {:#}", idx, e),
        }
    }
    Ok(locations)
}

/// Normalize one location record.
///
/// Numeric fields may arrive as numbers or numeric strings, ids as strings or
/// numbers. `lat`/`lng` and `price` are accepted as aliases. Any incoming
/// `rating` is ignored; the rating is derived from `reviews`, which default
/// to empty.
pub fn normalize_location(record: &Value) -> Result<Location> {
    let id = field(record, &["id"])
        .and_then(text)
        .context("missing id")?;
    let name = field(record, &["name"])
        .and_then(text)
        .with_context(|| format!("location {id}: missing name"))?;
    let address = field(record, &["address"]).and_then(text).unwrap_or_default();
    let price_per_hour = field(record, &["pricePerHour", "price"])
        .and_then(number)
        .with_context(|| format!("location {id}: missing or non-numeric pricePerHour"))?;
    let latitude = field(record, &["latitude", "lat"])
        .and_then(number)
        .with_context(|| format!("location {id}: missing or non-numeric latitude"))?;
    let longitude = field(record, &["longitude", "lng", "long"])
        .and_then(number)
        .with_context(|| format!("location {id}: missing or non-numeric longitude"))?;

    let reviews = match field(record, &["reviews"]) {
        Some(Value::Array(raw)) => raw
            .iter()
            .filter_map(|review| match normalize_review(review) {
                Ok(review) => Some(review),
                Err(e) => {
                    warn!("Location {}: skipping review: {:#}", id, e);
                    None
                }
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(Location::new(
        id,
        name,
        address,
        price_per_hour,
        Coordinates::new(latitude, longitude),
    )
    .with_reviews(reviews))
}

fn normalize_review(record: &Value) -> Result<Review> {
    let id = field(record, &["id"]).and_then(text).context("review missing id")?;
    let rating = field(record, &["rating"])
        .and_then(number)
        .with_context(|| format!("review {id}: missing or non-numeric rating"))?;
    let created_at = field(record, &["createdAt"])
        .and_then(Value::as_str)
        .with_context(|| format!("review {id}: missing createdAt"))?;
    let created_at = DateTime::parse_from_rfc3339(created_at)
        .with_context(|| format!("review {id}: bad createdAt {created_at:?}"))?
        .with_timezone(&Utc);

    Ok(Review {
        user: field(record, &["user"]).and_then(text).unwrap_or_default(),
        comment: field(record, &["comment"]).and_then(text).unwrap_or_default(),
        id,
        rating,
        created_at,
    })
}

/// First present, non-null value among `names`
fn field<'a>(record: &'a Value, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| record.get(name))
        .find(|value| !value.is_null())
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numeric_strings_and_aliases() {
        let location = normalize_location(&json!({
            "id": 42,
            "name": "Hotel Plaza",
            "address": "Downtown",
            "price": "8.50",
            "lat": "25.7736",
            "lng": -80.1937
        }))
        .unwrap();

        assert_eq!(location.id, "42");
        assert_eq!(location.price_per_hour, 8.5);
        assert_eq!(location.latitude, 25.7736);
        assert_eq!(location.longitude, -80.1937);
    }

    #[test]
    fn defaults_missing_reviews_and_ignores_incoming_rating() {
        let location = normalize_location(&json!({
            "id": "3",
            "name": "Cafe Storage",
            "pricePerHour": 5,
            "latitude": 25.8007,
            "longitude": -80.1994,
            "rating": 4.0
        }))
        .unwrap();

        assert_eq!(location.address, "");
        assert_eq!(location.review_count(), 0);
        assert_eq!(location.rating(), 0.0);
    }

    #[test]
    fn derives_rating_from_reviews() {
        let location = normalize_location(&json!({
            "id": "1",
            "name": "Locker Center",
            "pricePerHour": 6,
            "latitude": 25.7617,
            "longitude": -80.1918,
            "rating": 1.0,
            "reviews": [
                { "id": "r1", "user": "Alice", "comment": "Clean and safe lockers.", "rating": 5, "createdAt": "2025-10-15T10:12:00Z" },
                { "id": "r2", "user": "Mark", "comment": "Easy access.", "rating": "4", "createdAt": "2025-10-14T15:22:00Z" },
                { "id": "r3", "rating": 1 }
            ]
        }))
        .unwrap();

        assert_eq!(location.review_count(), 2);
        assert_eq!(location.rating(), 4.5);
        assert_eq!(location.reviews()[1].user, "Mark");
    }

    #[test]
    fn rejects_records_without_coordinates() {
        let err = normalize_location(&json!({
            "id": "7",
            "name": "Nowhere",
            "pricePerHour": 3,
            "latitude": "north"
        }))
        .unwrap_err();
        assert!(format!("{err:#}").contains("latitude"));
    }

    #[test]
    fn catalog_skips_bad_records() {
        let locations = normalize_catalog(&json!([
            { "id": "1", "name": "A", "pricePerHour": 1, "latitude": 0, "longitude": 0 },
            { "name": "no id" },
            null
        ]))
        .unwrap();
        assert_eq!(locations.len(), 1);
    }

    #[test]
    fn catalog_must_be_an_array() {
        assert!(normalize_catalog(&json!({ "spots": [] })).is_err());
    }
}
