//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::OverlayConfig;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cdn_base_url cannot be empty")]
    EmptyCdnBaseUrl,

    #[error("SKU marker cannot be empty")]
    EmptySkuMarker,

    #[error("sku_id and raw_sku_id must differ: {0}")]
    DuplicateSkuMarkers(String),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. decor.yaml in the working directory
    /// 3. Environment variables (`DECOR_*` prefix, highest priority)
    pub fn load() -> Result<OverlayConfig> {
        let config: OverlayConfig = Figment::new()
            .merge(Serialized::defaults(OverlayConfig::default()))
            .merge(Yaml::file("decor.yaml"))
            .merge(Env::prefixed("DECOR_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        let config = Self::normalized(config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<OverlayConfig> {
        let config: OverlayConfig = Figment::new()
            .merge(Serialized::defaults(OverlayConfig::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        let config = Self::normalized(config);
        Self::validate(&config)?;
        Ok(config)
    }

    /// Strip decoration-URL construction pitfalls before validation.
    fn normalized(mut config: OverlayConfig) -> OverlayConfig {
        while config.cdn_base_url.ends_with('/') {
            config.cdn_base_url.pop();
        }
        config
    }

    /// Validate configuration after loading
    pub fn validate(config: &OverlayConfig) -> Result<(), ConfigError> {
        if config.cdn_base_url.is_empty() {
            return Err(ConfigError::EmptyCdnBaseUrl);
        }

        if config.sku_id.is_empty() || config.raw_sku_id.is_empty() {
            return Err(ConfigError::EmptySkuMarker);
        }

        // The URL override dispatches on the SKU; identical markers would
        // make raw passthrough unreachable.
        if config.sku_id == config.raw_sku_id {
            return Err(ConfigError::DuplicateSkuMarkers(config.sku_id.clone()));
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_pass_validation() {
        let config = OverlayConfig::default();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "cdn_base_url: https://cdn.example.test/\nsku_id: \"123\""
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        // Trailing slash normalized away.
        assert_eq!(config.cdn_base_url, "https://cdn.example.test");
        assert_eq!(config.sku_id, "123");
        // Untouched keys keep their defaults.
        assert_eq!(config.raw_sku_id, "11497119");
    }

    #[test]
    fn test_env_overrides_file_and_defaults() {
        temp_env::with_var("DECOR_CDN_BASE_URL", Some("https://env.example.test"), || {
            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.cdn_base_url, "https://env.example.test");
        });
    }

    #[test]
    fn test_empty_cdn_base_url_rejected() {
        let config = OverlayConfig {
            cdn_base_url: String::new(),
            ..OverlayConfig::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyCdnBaseUrl)
        ));
    }

    #[test]
    fn test_duplicate_sku_markers_rejected() {
        let config = OverlayConfig {
            sku_id: "42".to_string(),
            raw_sku_id: "42".to_string(),
            ..OverlayConfig::default()
        };
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::DuplicateSkuMarkers(_))
        ));
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = OverlayConfig::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }
}
