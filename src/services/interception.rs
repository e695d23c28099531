//! Host function interception.
//!
//! Installs three overrides against host-supplied function references:
//! an after-hook augmenting resolved user records from the cache, a full
//! replacement of avatar-decoration URL resolution, and an after-hook on
//! animation detection. Each override is isolated - a failure to locate
//! or install one never prevents the others - and each is reversible
//! through the handle registry this layer owns.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::models::{AvatarDecoration, OverlayConfig, Platform, UserRecord};
use crate::domain::ports::{
    locate_animation_source, locate_url_source, locate_user_source, AnimationHook,
    DecorationUrlHook, DecorationUrlSource, HostFunction, HostModules, HostPatcher, OverrideSlot,
    PatchToken, UserRecordHook,
};

use super::asset_url::{self, UrlResolution};
use super::augmentation;
use super::decoration_cache::DecorationCache;

/// Asset prefix marking a local preview file.
const LOCAL_FILE_SCHEME: &str = "file://";

/// One installed override, reversible exactly once.
#[derive(Debug)]
pub struct PatchHandle {
    token: PatchToken,
    target: HostFunction,
}

/// Registry of every handle issued during installation.
///
/// Owned by the layer instance; shutdown drains it and attempts every
/// reversal regardless of individual failures.
#[derive(Debug, Default)]
pub struct PatchRegistry {
    handles: Vec<PatchHandle>,
}

impl PatchRegistry {
    fn record(&mut self, token: PatchToken, target: HostFunction) {
        self.handles.push(PatchHandle { token, target });
    }

    fn drain(&mut self) -> Vec<PatchHandle> {
        std::mem::take(&mut self.handles)
    }

    /// Number of handles currently held.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Whether no overrides are installed.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// After-hook on user-record resolution.
///
/// Reads whatever the cache has already resolved; a not-yet-resolved user
/// renders without the overlay until the subscriber notification triggers
/// a re-render.
struct UserAugmentationOverride {
    cache: Arc<DecorationCache>,
    sku_id: String,
}

impl UserRecordHook for UserAugmentationOverride {
    fn after_get_user(&self, user: &mut UserRecord) {
        let lookup = self.cache.lookup(&user.id);
        let action = augmentation::plan(&lookup, user.avatar_decoration.as_ref(), &self.sku_id);
        augmentation::apply(user, &action, &self.sku_id);
    }
}

/// Replacement for the host's URL resolution.
///
/// The original resolver is captured at install time so unrecognized SKUs
/// delegate to it with arguments unchanged.
struct UrlOverride {
    config: Arc<OverlayConfig>,
    original: Arc<dyn DecorationUrlSource>,
}

impl DecorationUrlHook for UrlOverride {
    fn resolve_url(&self, decoration: &AvatarDecoration, can_animate: bool) -> Option<String> {
        match asset_url::resolve(&self.config, decoration, can_animate) {
            UrlResolution::Overlay(url) | UrlResolution::Raw(url) => Some(url),
            UrlResolution::Delegate => self.original.avatar_decoration_url(decoration, can_animate),
        }
    }
}

/// After-hook on animation detection.
///
/// On iOS only, a local preview file is always animation-capable; every
/// other case keeps the host's own result.
struct AnimationOverride {
    platform: Platform,
}

impl AnimationHook for AnimationOverride {
    fn adjust(&self, decoration: &AvatarDecoration, host_result: bool) -> bool {
        if self.platform == Platform::Ios && decoration.asset.starts_with(LOCAL_FILE_SCHEME) {
            return true;
        }
        host_result
    }
}

/// Installs and reverses the three host overrides.
pub struct InterceptionLayer {
    patcher: Arc<dyn HostPatcher>,
    config: Arc<OverlayConfig>,
    cache: Arc<DecorationCache>,
    registry: PatchRegistry,
}

impl std::fmt::Debug for InterceptionLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptionLayer")
            .field("installed", &self.registry.len())
            .finish_non_exhaustive()
    }
}

impl InterceptionLayer {
    /// Create a layer with nothing installed.
    pub fn new(
        patcher: Arc<dyn HostPatcher>,
        config: Arc<OverlayConfig>,
        cache: Arc<DecorationCache>,
    ) -> Self {
        Self {
            patcher,
            config,
            cache,
            registry: PatchRegistry::default(),
        }
    }

    /// Install every override whose host function can be located.
    ///
    /// Absence of a host function is a degraded-but-running state, not an
    /// error: that one override is skipped with a warning and the rest
    /// still install. Returns the number installed.
    pub fn install_all(&mut self, modules: &dyn HostModules) -> usize {
        let before = self.registry.len();

        if locate_user_source(modules).is_some() {
            self.install_one(OverrideSlot::AfterGetUser(Arc::new(
                UserAugmentationOverride {
                    cache: Arc::clone(&self.cache),
                    sku_id: self.config.sku_id.clone(),
                },
            )));
        } else {
            warn!(target = %HostFunction::GetUser, "host function not located, override skipped");
        }

        if let Some(original) = locate_url_source(modules) {
            self.install_one(OverrideSlot::InsteadAvatarDecorationUrl(Arc::new(
                UrlOverride {
                    config: Arc::clone(&self.config),
                    original,
                },
            )));
        } else {
            warn!(
                target = %HostFunction::AvatarDecorationUrl,
                "host function not located, override skipped"
            );
        }

        if locate_animation_source(modules).is_some() {
            self.install_one(OverrideSlot::AfterIsAnimatedDecoration(Arc::new(
                AnimationOverride {
                    platform: self.config.platform,
                },
            )));
        } else {
            warn!(
                target = %HostFunction::IsAnimatedDecoration,
                "host function not located, override skipped"
            );
        }

        self.registry.len() - before
    }

    fn install_one(&mut self, slot: OverrideSlot) {
        let target = slot.target();
        match self.patcher.install(slot) {
            Ok(token) => {
                info!(%target, "override installed");
                self.registry.record(token, target);
            }
            Err(error) => {
                warn!(%target, %error, "override installation failed");
            }
        }
    }

    /// Reverse every installed override.
    ///
    /// Attempted for all handles even when some reversals fail; failures
    /// are logged individually. Returns the number reversed.
    pub fn remove_all(&mut self) -> usize {
        let mut removed = 0;
        for handle in self.registry.drain() {
            match self.patcher.remove(handle.token) {
                Ok(()) => {
                    info!(target = %handle.target, "override reversed");
                    removed += 1;
                }
                Err(error) => {
                    warn!(target = %handle.target, %error, "failed to reverse override");
                }
            }
        }
        removed
    }

    /// Number of overrides currently installed.
    pub fn installed_count(&self) -> usize {
        self.registry.len()
    }
}
