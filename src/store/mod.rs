pub mod location_store;
pub mod types;

pub use location_store::{LocationStore, StoreHandle};
pub use types::{CatalogSnapshot, NearbyLocation};
