use serde::Serialize;

use crate::models::Location;

/// Immutable view of the whole catalog at one point in time.
///
/// `version` goes up by one for every published mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogSnapshot {
    pub(crate) version: u64,
    pub(crate) locations: Vec<Location>,
}

impl CatalogSnapshot {
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Locations in the order the last `replace_all` supplied them
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn get(&self, id: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.id == id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

/// Result row of a radius lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyLocation {
    pub location: Location,
    pub distance_km: f64,
}
