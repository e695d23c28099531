//! Application layer: overlay activation and deactivation.
//!
//! Both entry points are containment boundaries. Nothing here is allowed
//! to panic or propagate an error into the host: failures are logged and
//! the overlay keeps running in whatever degraded state resulted.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::models::OverlayConfig;
use crate::domain::ports::{
    locate_user_source, DecorationTransport, HostModules, HostPatcher, InvalidationSource,
};
use crate::services::{AuthorizationState, DecorationCache, InterceptionLayer};

/// Everything the overlay needs from its host and environment.
pub struct OverlayDeps {
    /// Consumed constants: CDN base, SKU markers, platform, logging.
    pub config: OverlayConfig,
    /// Capability probes for the host's live objects.
    pub modules: Arc<dyn HostModules>,
    /// Override installation/removal facility.
    pub patcher: Arc<dyn HostPatcher>,
    /// Decoration record transport.
    pub transport: Arc<dyn DecorationTransport>,
    /// Session/decoration change events.
    pub invalidation: Arc<dyn InvalidationSource>,
    /// Token/session context for fetches.
    pub auth: Arc<AuthorizationState>,
}

/// The assembled overlay: cache, interception layer, and lifecycle.
pub struct DecorOverlay {
    modules: Arc<dyn HostModules>,
    invalidation: Arc<dyn InvalidationSource>,
    auth: Arc<AuthorizationState>,
    cache: Arc<DecorationCache>,
    interception: InterceptionLayer,
    active: bool,
}

impl std::fmt::Debug for DecorOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecorOverlay")
            .field("active", &self.active)
            .field("installed", &self.interception.installed_count())
            .finish_non_exhaustive()
    }
}

impl DecorOverlay {
    /// Assemble the overlay. Nothing touches the host until
    /// [`activate`](Self::activate).
    pub fn new(deps: OverlayDeps) -> Self {
        let config = Arc::new(deps.config);
        let cache = DecorationCache::new(deps.transport, Arc::clone(&deps.auth));
        let interception = InterceptionLayer::new(deps.patcher, config, Arc::clone(&cache));
        Self {
            modules: deps.modules,
            invalidation: deps.invalidation,
            auth: deps.auth,
            cache,
            interception,
            active: false,
        }
    }

    /// Install all overrides, bind invalidation, and prime the cache for
    /// the current user.
    ///
    /// Must be called from within a tokio runtime. Never panics past this
    /// boundary; every failure is absorbed, logged, and leaves the overlay
    /// running degraded.
    pub fn activate(&mut self) {
        if self.active {
            debug!("overlay already active");
            return;
        }

        self.cache.bind_invalidation(self.invalidation.as_ref());
        let installed = self.interception.install_all(self.modules.as_ref());

        // Prime the cache so the active user's own profile decorates
        // without waiting for a first render miss.
        match locate_user_source(self.modules.as_ref()).and_then(|source| source.current_user_id())
        {
            Some(user_id) => {
                debug!(%user_id, "priming decoration cache");
                self.cache.spawn_fetch(user_id, true);
            }
            None => warn!("no current user located, cache not primed"),
        }

        self.active = true;
        info!(installed, "decoration overlay activated");
    }

    /// Reverse every installed override, release the cache's
    /// subscriptions, and tear down the authorization binding.
    ///
    /// Full cleanup is attempted even under partial failure. Idempotent.
    pub fn deactivate(&mut self) {
        if !self.active {
            debug!("overlay not active");
            return;
        }

        let reversed = self.interception.remove_all();
        self.cache.release_subscriptions();
        self.auth.teardown();

        self.active = false;
        info!(reversed, "decoration overlay deactivated");
    }

    /// Whether the overlay is currently active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The decoration cache, for hosts that re-render on cache events.
    pub fn cache(&self) -> &Arc<DecorationCache> {
        &self.cache
    }

    /// Number of overrides currently installed.
    pub fn installed_count(&self) -> usize {
        self.interception.installed_count()
    }
}
