//! Asset URL resolution.
//!
//! Pure mapping from a decoration reference plus an animation-capability
//! flag to the final URL, with no host object in sight. Overlay assets
//! resolve under the CDN base; assets prefixed with the `a` segment are
//! the animated variant, and the prefix is dropped when the caller cannot
//! animate so the static frame is served instead.

use crate::domain::models::{AvatarDecoration, OverlayConfig};

/// Outcome of resolving one decoration reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlResolution {
    /// One of ours: the final CDN URL.
    Overlay(String),
    /// Raw passthrough decoration: the asset already is the URL.
    Raw(String),
    /// Not ours: the host's original resolver decides.
    Delegate,
}

/// Resolve a decoration reference against the overlay's SKU markers.
///
/// Order matters: the overlay SKU is checked first, then the raw
/// passthrough SKU; anything else delegates to the host.
pub fn resolve(
    config: &OverlayConfig,
    decoration: &AvatarDecoration,
    can_animate: bool,
) -> UrlResolution {
    if decoration.sku_id == config.sku_id {
        UrlResolution::Overlay(overlay_asset_url(
            &config.cdn_base_url,
            &decoration.asset,
            can_animate,
        ))
    } else if decoration.sku_id == config.raw_sku_id {
        UrlResolution::Raw(decoration.asset.clone())
    } else {
        UrlResolution::Delegate
    }
}

/// Build the CDN URL for an overlay asset.
pub fn overlay_asset_url(cdn_base_url: &str, asset: &str, can_animate: bool) -> String {
    let mut parts: Vec<&str> = asset.split('_').collect();
    if !can_animate && parts.first() == Some(&"a") {
        parts.remove(0);
    }
    format!("{cdn_base_url}/{}.png", parts.join("_"))
}
