//! User-record augmentation rules.
//!
//! The decision logic is pure so it can be unit-tested without a live
//! host object; the mutation of the host-owned record is a separate,
//! mechanical step. A user the cache has not resolved yet is left exactly
//! as the host produced it - no guess, no default.

use crate::domain::models::{AvatarDecoration, UserRecord};

use super::decoration_cache::CacheLookup;

/// What the augmentation override should do to one user record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AugmentationAction {
    /// Attach the overlay decoration and mirror it downstream.
    Overlay(String),
    /// Clear a stale overlay left from a previous state.
    Clear,
    /// Resolved, nothing to change; refresh the downstream mirror only.
    Refresh,
    /// Cache has no resolved entry; touch nothing.
    Keep,
}

/// Decide the augmentation for a user record.
///
/// `current` is the decoration presently on the record, `sku_id` the
/// overlay's marker SKU.
pub fn plan(
    lookup: &CacheLookup,
    current: Option<&AvatarDecoration>,
    sku_id: &str,
) -> AugmentationAction {
    match lookup {
        CacheLookup::Unresolved => AugmentationAction::Keep,
        CacheLookup::Resolved(Some(asset)) => {
            if current.is_none_or(|decoration| decoration.sku_id != sku_id) {
                AugmentationAction::Overlay(asset.clone())
            } else {
                AugmentationAction::Refresh
            }
        }
        CacheLookup::Resolved(None) => {
            if current.is_some_and(|decoration| decoration.sku_id == sku_id) {
                AugmentationAction::Clear
            } else {
                AugmentationAction::Refresh
            }
        }
    }
}

/// Apply a planned action to the host-owned record, in place.
pub fn apply(user: &mut UserRecord, action: &AugmentationAction, sku_id: &str) {
    match action {
        AugmentationAction::Overlay(asset) => {
            user.avatar_decoration = Some(AvatarDecoration::new(asset.clone(), sku_id));
            user.avatar_decoration_data = user.avatar_decoration.clone();
        }
        AugmentationAction::Clear => {
            user.avatar_decoration = None;
            user.avatar_decoration_data = None;
        }
        AugmentationAction::Refresh => {
            user.avatar_decoration_data = user.avatar_decoration.clone();
        }
        AugmentationAction::Keep => {}
    }
}
