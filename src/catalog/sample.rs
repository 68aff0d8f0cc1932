use crate::catalog::normalize::normalize_catalog;
use crate::catalog::traits::CatalogSource;
use crate::models::Location;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

/// Built-in Miami catalog, used offline or when the backend is unreachable
#[derive(Debug, Default)]
pub struct SampleCatalogSource;

impl SampleCatalogSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CatalogSource for SampleCatalogSource {
    async fn fetch(&self) -> Result<Vec<Location>> {
        info!("📋 Loading sample Miami catalog");
        normalize_catalog(&sample_payload())
    }

    fn source_name(&self) -> &'static str {
        "Sample"
    }
}

/// Raw records in the shape the backend serves them
fn sample_payload() -> Value {
    json!([
        {
            "id": "1",
            "name": "Locker Center",
            "pricePerHour": 6,
            "address": "Brickell Ave",
            "latitude": 25.7617,
            "longitude": -80.1918,
            "reviews": [
                { "id": "r1", "user": "Alice", "comment": "Clean and safe lockers.", "rating": 5, "createdAt": "2025-10-15T10:12:00Z" },
                { "id": "r2", "user": "Mark", "comment": "Easy access, great location.", "rating": 4, "createdAt": "2025-10-14T15:22:00Z" }
            ]
        },
        {
            "id": "2",
            "name": "Hotel Plaza",
            "pricePerHour": 8,
            "address": "Downtown",
            "latitude": 25.7736,
            "longitude": -80.1937,
            "reviews": [
                { "id": "r3", "user": "Laura", "comment": "Nice service!", "rating": 4, "createdAt": "2025-09-30T18:01:00Z" }
            ]
        },
        {
            "id": "3",
            "name": "Cafe Storage",
            "pricePerHour": 5,
            "address": "Wynwood",
            "latitude": 25.8007,
            "longitude": -80.1994
        },
        {
            "id": "4",
            "name": "Bayfront Lockers",
            "pricePerHour": 7,
            "address": "Biscayne Blvd",
            "latitude": 25.7825,
            "longitude": -80.1856
        },
        {
            "id": "5",
            "name": "Airport Storage Hub",
            "pricePerHour": 10,
            "address": "Miami International Airport",
            "latitude": 25.7959,
            "longitude": -80.2870
        }
    ])
}
