use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::models::{Coordinates, Location, Review};
use crate::store::types::{CatalogSnapshot, NearbyLocation};

/// Shared handle passed to whatever builds the UI tree
pub type StoreHandle = Arc<LocationStore>;

/// Single source of truth for the location catalog.
///
/// Every mutation builds a new [`CatalogSnapshot`] and publishes it in one
/// step, so readers never see a review without its recomputed rating.
/// Subscribers always see the latest snapshot; snapshots published between
/// two reads are merged into the newest one.
#[derive(Debug)]
pub struct LocationStore {
    tx: watch::Sender<Arc<CatalogSnapshot>>,
}

impl LocationStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(CatalogSnapshot::default()));
        Self { tx }
    }

    /// Empty store behind a shareable handle
    pub fn handle() -> StoreHandle {
        Arc::new(Self::new())
    }

    /// Swap out the entire catalog. Nothing from the previous catalog is kept.
    pub fn replace_all(&self, locations: Vec<Location>) {
        let count = locations.len();
        self.tx.send_modify(move |snapshot| {
            *snapshot = Arc::new(CatalogSnapshot {
                version: snapshot.version + 1,
                locations,
            });
        });
        info!(count, version = self.version(), "catalog replaced");
    }

    /// Look up a location. Unknown or malformed ids give `None`.
    pub fn get_by_id(&self, id: &str) -> Option<Location> {
        self.tx.borrow().get(id).cloned()
    }

    /// Append `review` to a location and recompute its rating.
    ///
    /// Returns false without touching the store when no location has
    /// `location_id`.
    pub fn add_review(&self, location_id: &str, review: Review) -> bool {
        let review_id = review.id.clone();
        let applied = self.tx.send_if_modified(move |snapshot| {
            let Some(idx) = snapshot
                .locations
                .iter()
                .position(|location| location.id == location_id)
            else {
                return false;
            };
            let mut locations = snapshot.locations.clone();
            locations[idx] = snapshot.locations[idx].with_appended_review(review);
            *snapshot = Arc::new(CatalogSnapshot {
                version: snapshot.version + 1,
                locations,
            });
            true
        });

        if applied {
            debug!(location_id, review_id = %review_id, version = self.version(), "review added");
        } else {
            warn!(location_id, review_id = %review_id, "ignoring review for unknown location");
        }
        applied
    }

    /// Current catalog
    pub fn snapshot(&self) -> Arc<CatalogSnapshot> {
        Arc::clone(&self.tx.borrow())
    }

    pub fn version(&self) -> u64 {
        self.tx.borrow().version
    }

    /// Receiver of the latest snapshot. A slow reader skips intermediate
    /// snapshots but never misses the newest one.
    pub fn subscribe(&self) -> watch::Receiver<Arc<CatalogSnapshot>> {
        self.tx.subscribe()
    }

    /// Case-insensitive match on name or address, in catalog order.
    /// A blank query matches everything.
    pub fn search(&self, query: &str) -> Vec<Location> {
        let needle = query.trim().to_lowercase();
        self.tx
            .borrow()
            .locations
            .iter()
            .filter(|location| {
                needle.is_empty()
                    || location.name.to_lowercase().contains(&needle)
                    || location.address.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Locations within `radius_km` of `center`, nearest first
    pub fn nearby(&self, center: Coordinates, radius_km: f64) -> Vec<NearbyLocation> {
        let mut matches: Vec<NearbyLocation> = self
            .tx
            .borrow()
            .locations
            .iter()
            .map(|location| NearbyLocation {
                distance_km: center.distance_km(&location.coordinates()),
                location: location.clone(),
            })
            .filter(|found| found.distance_km <= radius_km)
            .collect();
        matches.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        matches
    }
}

impl Default for LocationStore {
    fn default() -> Self {
        Self::new()
    }
}
