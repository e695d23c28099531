//! Core decoration models.
//!
//! A decoration is an optional visual asset overlaid on a user's avatar,
//! identified by an asset string and a marker SKU. The SKU distinguishes
//! this system's overlay decorations from the host's native catalog.

use serde::{Deserialize, Serialize};

/// Opaque user identifier, the key into the decoration cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    /// Create a user id from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A decoration reference as the host carries it on a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarDecoration {
    /// Asset identifier. An `a_` prefix marks the animated variant.
    pub asset: String,
    /// Marker SKU identifying the decoration's catalog.
    pub sku_id: String,
}

impl AvatarDecoration {
    /// Create a decoration reference.
    pub fn new(asset: impl Into<String>, sku_id: impl Into<String>) -> Self {
        Self {
            asset: asset.into(),
            sku_id: sku_id.into(),
        }
    }
}

/// A fetched per-user decoration record.
///
/// `asset == None` is a valid "no decoration" result and is cached as
/// such; it is distinct from a user that has not been fetched yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationRecord {
    /// The user this record belongs to.
    pub user_id: UserId,
    /// The decoration asset, or `None` when the user has none.
    pub asset: Option<String>,
}

/// The host-owned user record the augmentation override mutates in place.
///
/// `avatar_decoration_data` is the field the host's rendering pipeline
/// reads downstream; the override keeps it mirrored with
/// `avatar_decoration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// The user's identifier.
    pub id: UserId,
    /// The decoration currently attached to the user.
    pub avatar_decoration: Option<AvatarDecoration>,
    /// Mirror of `avatar_decoration` consumed downstream by the host.
    pub avatar_decoration_data: Option<AvatarDecoration>,
}

impl UserRecord {
    /// Create a record with no decoration attached.
    pub fn new(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            avatar_decoration: None,
            avatar_decoration_data: None,
        }
    }
}

/// Host platform identifier, consumed only by the animation override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// iOS host.
    Ios,
    /// Android host.
    Android,
    /// Desktop host.
    Desktop,
    /// Browser host.
    Web,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ios => write!(f, "ios"),
            Self::Android => write!(f, "android"),
            Self::Desktop => write!(f, "desktop"),
            Self::Web => write!(f, "web"),
        }
    }
}
