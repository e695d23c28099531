//! Override installation port.
//!
//! The interception layer hands the host an [`OverrideSlot`] carrying one
//! of three hook trait objects; the host wires the hook into the named
//! function and returns a [`PatchToken`] the layer can later reverse.

use std::sync::Arc;

use crate::domain::errors::OverlayResult;
use crate::domain::models::{AvatarDecoration, UserRecord};

/// The three host functions the overlay intercepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostFunction {
    /// User-record resolution (after-hook target).
    GetUser,
    /// Avatar-decoration URL resolution (replaced wholesale).
    AvatarDecorationUrl,
    /// Animation detection (after-hook target).
    IsAnimatedDecoration,
}

impl std::fmt::Display for HostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GetUser => write!(f, "get_user"),
            Self::AvatarDecorationUrl => write!(f, "avatar_decoration_url"),
            Self::IsAnimatedDecoration => write!(f, "is_animated_decoration"),
        }
    }
}

/// After-hook run on every user record the host resolves.
///
/// Mutates the record in place, per host convention. Must never panic
/// into the host; on any internal failure the record is left as-is.
pub trait UserRecordHook: Send + Sync {
    /// Apply the decoration overlay to a freshly resolved user record.
    fn after_get_user(&self, user: &mut UserRecord);
}

/// Replacement for the host's avatar-decoration URL resolution.
pub trait DecorationUrlHook: Send + Sync {
    /// Resolve a decoration reference to its final URL.
    fn resolve_url(&self, decoration: &AvatarDecoration, can_animate: bool) -> Option<String>;
}

/// After-hook supplementing the host's animation detection.
pub trait AnimationHook: Send + Sync {
    /// Given the host's own result, return the adjusted result.
    fn adjust(&self, decoration: &AvatarDecoration, host_result: bool) -> bool;
}

/// One override ready for installation, paired with its target function.
#[derive(Clone)]
pub enum OverrideSlot {
    /// After-hook on user-record resolution.
    AfterGetUser(Arc<dyn UserRecordHook>),
    /// Full replacement of URL resolution.
    InsteadAvatarDecorationUrl(Arc<dyn DecorationUrlHook>),
    /// After-hook on animation detection.
    AfterIsAnimatedDecoration(Arc<dyn AnimationHook>),
}

impl OverrideSlot {
    /// The host function this override targets.
    pub fn target(&self) -> HostFunction {
        match self {
            Self::AfterGetUser(_) => HostFunction::GetUser,
            Self::InsteadAvatarDecorationUrl(_) => HostFunction::AvatarDecorationUrl,
            Self::AfterIsAnimatedDecoration(_) => HostFunction::IsAnimatedDecoration,
        }
    }
}

impl std::fmt::Debug for OverrideSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("OverrideSlot").field(&self.target()).finish()
    }
}

/// Opaque identifier for one installed override, issued by the patcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PatchToken(pub u64);

/// Port through which overrides are installed on and removed from the
/// host's functions.
pub trait HostPatcher: Send + Sync {
    /// Wire an override into its target function.
    fn install(&self, slot: OverrideSlot) -> OverlayResult<PatchToken>;

    /// Reverse a previously installed override.
    fn remove(&self, token: PatchToken) -> OverlayResult<()>;
}
