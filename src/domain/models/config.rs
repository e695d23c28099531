//! Overlay configuration.
//!
//! The core consumes these constants, it never computes them: the CDN base
//! under which overlay assets resolve, the marker SKU identifying this
//! system's decorations, and a second marker SKU for raw passthrough
//! decorations.

use serde::{Deserialize, Serialize};

use super::decoration::Platform;

/// Main configuration structure for the Decor overlay
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OverlayConfig {
    /// CDN base URL overlay asset identifiers resolve under
    #[serde(default = "default_cdn_base_url")]
    pub cdn_base_url: String,

    /// Marker SKU tagging this system's overlay decorations
    #[serde(default = "default_sku_id")]
    pub sku_id: String,

    /// Marker SKU tagging raw passthrough decorations
    #[serde(default = "default_raw_sku_id")]
    pub raw_sku_id: String,

    /// Host platform, consumed only by the animation override
    #[serde(default = "default_platform")]
    pub platform: Platform,

    /// Logging configuration
    #[serde(default)]
    pub logging: LogConfig,
}

fn default_cdn_base_url() -> String {
    "https://ugc.decor.fyi".to_string()
}

fn default_sku_id() -> String {
    "100101099111114".to_string()
}

fn default_raw_sku_id() -> String {
    "11497119".to_string()
}

const fn default_platform() -> Platform {
    Platform::Android
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            cdn_base_url: default_cdn_base_url(),
            sku_id: default_sku_id(),
            raw_sku_id: default_raw_sku_id(),
            platform: default_platform(),
            logging: LogConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LogConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format for log events
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// Structured JSON output
    Json,
}
