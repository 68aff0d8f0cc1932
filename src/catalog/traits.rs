use crate::models::Location;
use anyhow::Result;
use async_trait::async_trait;

/// Anything that can produce a normalized location catalog.
/// The result is meant to be handed to `LocationStore::replace_all` as a whole.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the full catalog
    async fn fetch(&self) -> Result<Vec<Location>>;

    /// Get the name of the catalog source
    fn source_name(&self) -> &'static str;
}
