use crate::catalog::normalize::normalize_catalog;
use crate::catalog::traits::CatalogSource;
use crate::catalog::types::NearbyQuery;
use crate::models::Location;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Request};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Catalog fetched from the booking backend's `/spots` endpoint
pub struct HttpCatalogSource {
    client: Client,
    api_base: String,
    query: NearbyQuery,
}

impl HttpCatalogSource {
    /// Create a source for `api_base` with the default search area
    pub fn new(api_base: impl Into<String>) -> Result<Self> {
        Self::with_query(api_base, NearbyQuery::default(), Duration::from_secs(30))
    }

    /// Create a source with a custom search area and request timeout
    pub fn with_query(
        api_base: impl Into<String>,
        query: NearbyQuery,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("locker-spots/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            query,
        })
    }

    fn build_request(&self) -> Result<Request> {
        self.client
            .get(format!("{}/spots", self.api_base))
            .query(&[
                ("lat", self.query.latitude.to_string()),
                ("lng", self.query.longitude.to_string()),
                ("radiusMeters", self.query.radius_meters.to_string()),
            ])
            .build()
            .context("Failed to build catalog request")
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Vec<Location>> {
        let request = self.build_request()?;
        info!("Fetching catalog from {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .context("Failed to fetch catalog")?;

        if !response.status().is_success() {
            warn!("Catalog endpoint returned status: {}", response.status());
            anyhow::bail!("Failed to fetch catalog: {}", response.status());
        }

        let payload: Value = response
            .json()
            .await
            .context("Failed to decode catalog response")?;
        debug!(
            "Received {} raw records",
            payload.as_array().map_or(0, Vec::len)
        );

        let locations = normalize_catalog(&payload)?;
        info!("Fetched {} locations", locations.len());
        Ok(locations)
    }

    fn source_name(&self) -> &'static str {
        "HTTP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_targets_spots_with_area_params() {
        let source = HttpCatalogSource::new("http://localhost:8081/").unwrap();
        let request = source.build_request().unwrap();
        assert_eq!(
            request.url().as_str(),
            "http://localhost:8081/spots?lat=25.7617&lng=-80.1918&radiusMeters=3000"
        );
    }

    #[test]
    fn custom_area_is_used() {
        let query = NearbyQuery {
            latitude: 1.5,
            longitude: -2.25,
            radius_meters: 500,
        };
        let source =
            HttpCatalogSource::with_query("http://10.0.2.2:8081", query, Duration::from_secs(5))
                .unwrap();
        let url = source.build_request().unwrap().url().clone();
        assert_eq!(url.path(), "/spots");
        assert_eq!(url.query(), Some("lat=1.5&lng=-2.25&radiusMeters=500"));
    }
}
