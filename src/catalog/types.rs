use serde::{Deserialize, Serialize};

use crate::models::Coordinates;

/// Area the catalog is fetched for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NearbyQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters
    pub radius_meters: u32,
}

impl NearbyQuery {
    pub fn center(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn radius_km(&self) -> f64 {
        f64::from(self.radius_meters) / 1000.0
    }
}

impl Default for NearbyQuery {
    fn default() -> Self {
        // Downtown Miami
        Self {
            latitude: 25.7617,
            longitude: -80.1918,
            radius_meters: 3000,
        }
    }
}
