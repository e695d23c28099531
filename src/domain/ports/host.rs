//! Host module lookup ports.
//!
//! The host exposes its live objects through capability probes. Each
//! lookup may legitimately return nothing; the overlay degrades that one
//! capability and keeps running. Locating a module is an ordered chain of
//! probes where the first success wins - absence is a valid terminal
//! outcome, not an error.

use std::sync::Arc;

use crate::domain::models::{AvatarDecoration, UserId};

/// The host object resolving users, used to prime the cache at startup.
pub trait UserSource: Send + Sync {
    /// Identifier of the currently signed-in user, if any.
    fn current_user_id(&self) -> Option<UserId>;
}

/// The host's own avatar-decoration URL resolver.
///
/// Captured at install time so the URL override can delegate unrecognized
/// SKUs to it with arguments unchanged.
pub trait DecorationUrlSource: Send + Sync {
    /// Resolve a decoration reference to a URL the host's native way.
    fn avatar_decoration_url(
        &self,
        decoration: &AvatarDecoration,
        can_animate: bool,
    ) -> Option<String>;
}

/// The host's animation-detection utility.
pub trait AnimationSource: Send + Sync {
    /// Whether the host considers this decoration animated.
    fn is_animated_decoration(&self, decoration: &AvatarDecoration) -> bool;
}

/// Capability probes exposing the host's live objects.
///
/// Every probe defaults to `None`; a host implements the ones it has.
/// The `*_fallback` probes mirror legacy lookup paths on older hosts.
pub trait HostModules: Send + Sync {
    /// Primary user store lookup.
    fn user_store(&self) -> Option<Arc<dyn UserSource>> {
        None
    }

    /// Legacy user lookup, probed when `user_store` comes up empty.
    fn user_lookup_fallback(&self) -> Option<Arc<dyn UserSource>> {
        None
    }

    /// Primary image resolver lookup.
    fn image_resolver(&self) -> Option<Arc<dyn DecorationUrlSource>> {
        None
    }

    /// Legacy image resolver lookup.
    fn image_resolver_fallback(&self) -> Option<Arc<dyn DecorationUrlSource>> {
        None
    }

    /// Animation-detection utilities lookup.
    fn decoration_utils(&self) -> Option<Arc<dyn AnimationSource>> {
        None
    }
}

/// Run an ordered probe chain; the first probe returning `Some` wins.
fn first_hit<T: ?Sized>(
    modules: &dyn HostModules,
    probes: &[fn(&dyn HostModules) -> Option<Arc<T>>],
) -> Option<Arc<T>> {
    probes.iter().find_map(|probe| probe(modules))
}

/// Locate the user source, preferring the primary store.
pub fn locate_user_source(modules: &dyn HostModules) -> Option<Arc<dyn UserSource>> {
    first_hit(modules, &[|m| m.user_store(), |m| m.user_lookup_fallback()])
}

/// Locate the host's URL resolver, preferring the primary probe.
pub fn locate_url_source(modules: &dyn HostModules) -> Option<Arc<dyn DecorationUrlSource>> {
    first_hit(
        modules,
        &[|m| m.image_resolver(), |m| m.image_resolver_fallback()],
    )
}

/// Locate the host's animation-detection utilities.
pub fn locate_animation_source(modules: &dyn HostModules) -> Option<Arc<dyn AnimationSource>> {
    first_hit(modules, &[|m| m.decoration_utils()])
}
