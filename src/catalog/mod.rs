pub mod http;
pub mod normalize;
pub mod sample;
pub mod traits;
pub mod types;

pub use http::HttpCatalogSource;
pub use sample::SampleCatalogSource;
pub use traits::CatalogSource;
pub use types::NearbyQuery;

use crate::store::LocationStore;
use anyhow::Result;
use tracing::info;

/// Fetch a catalog from `source` and publish it with a single `replace_all`.
/// On error the store keeps its current catalog.
pub async fn load_catalog(source: &dyn CatalogSource, store: &LocationStore) -> Result<usize> {
    let locations = source.fetch().await?;
    let count = locations.len();
    store.replace_all(locations);
    info!("Loaded {} locations from {} source", count, source.source_name());
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Location;
    use async_trait::async_trait;

    struct FailingSource;

    #[async_trait]
    impl CatalogSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<Location>> {
            anyhow::bail!("backend unreachable")
        }

        fn source_name(&self) -> &'static str {
            "Failing"
        }
    }

    #[tokio::test]
    async fn load_replaces_store_once() {
        let store = LocationStore::new();
        let count = load_catalog(&SampleCatalogSource::new(), &store).await.unwrap();
        assert_eq!(count, 5);
        assert_eq!(store.version(), 1);
        assert_eq!(store.get_by_id("4").unwrap().name, "Bayfront Lockers");
    }

    #[tokio::test]
    async fn failed_fetch_keeps_current_catalog() {
        let store = LocationStore::new();
        load_catalog(&SampleCatalogSource::new(), &store).await.unwrap();

        assert!(load_catalog(&FailingSource, &store).await.is_err());
        assert_eq!(store.version(), 1);
        assert_eq!(store.snapshot().len(), 5);
    }
}
