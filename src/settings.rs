use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::booking::PricingConfig;
use crate::catalog::NearbyQuery;

/// Runner configuration.
///
/// Read from an optional `locker-spots.toml`, then `LOCKER_*` environment
/// variables (`LOCKER_API_BASE`; `__` separates nested keys, e.g.
/// `LOCKER_NEARBY__RADIUS_METERS`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub use_sample_catalog: bool,
    #[serde(default)]
    pub nearby: NearbyQuery,
    #[serde(default)]
    pub pricing: PricingConfig,
}

fn default_api_base() -> String {
    "http://localhost:8081".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            request_timeout_secs: default_request_timeout_secs(),
            use_sample_catalog: false,
            nearby: NearbyQuery::default(),
            pricing: PricingConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with_env(None)
    }

    /// `env` replaces the process environment when given
    fn load_with_env(env: Option<HashMap<String, String>>) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("locker-spots").required(false))
            .add_source(
                Environment::with_prefix("LOCKER")
                    .prefix_separator("_")
                    .separator("__")
                    .source(env),
            )
            .build()?;
        let config: Self = settings.try_deserialize()?;
        if config.pricing.hours_per_day <= 0.0 {
            return Err(ConfigError::Message(
                "pricing.hours_per_day must be positive".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(text: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(text, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn empty_source_gives_defaults() {
        let config = from_toml("");
        assert_eq!(config.api_base, "http://localhost:8081");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.nearby.radius_meters, 3000);
        assert_eq!(config.pricing.hours_per_day, 24.0);
        assert!(!config.use_sample_catalog);
    }

    #[test]
    fn nested_sections_override_defaults() {
        let config = from_toml(
            r#"
            api_base = "http://10.0.2.2:8081"
            use_sample_catalog = true

            [nearby]
            latitude = 40.7
            longitude = -74.0
            radius_meters = 1500

            [pricing]
            hours_per_day = 10
            "#,
        );
        assert_eq!(config.api_base, "http://10.0.2.2:8081");
        assert!(config.use_sample_catalog);
        assert_eq!(config.nearby.radius_km(), 1.5);
        assert_eq!(config.pricing.hours_per_day, 10.0);
    }

    fn env(vars: &[(&str, &str)]) -> Option<HashMap<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn load_reads_single_underscore_prefix_and_nested_keys() {
        let config = AppConfig::load_with_env(env(&[
            ("LOCKER_API_BASE", "http://10.0.2.2:8081"),
            ("LOCKER_NEARBY__RADIUS_METERS", "1500"),
            ("LOCKER_USE_SAMPLE_CATALOG", "true"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "http://10.0.2.2:8081");
        assert_eq!(config.nearby.radius_meters, 1500);
        assert_eq!(config.nearby.latitude, 25.7617);
        assert!(config.use_sample_catalog);
    }

    #[test]
    fn load_ignores_unprefixed_variables() {
        let config = AppConfig::load_with_env(env(&[("API_BASE", "http://elsewhere")])).unwrap();
        assert_eq!(config.api_base, "http://localhost:8081");
    }

    #[test]
    fn load_rejects_non_positive_hours_per_day() {
        let err = AppConfig::load_with_env(env(&[("LOCKER_PRICING__HOURS_PER_DAY", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Message(ref msg) if msg.contains("hours_per_day")));
    }
}
