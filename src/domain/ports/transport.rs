//! Decoration transport port.

use async_trait::async_trait;

use crate::domain::errors::OverlayResult;
use crate::domain::models::{DecorationRecord, UserId};

/// Fetches decoration records by user id.
///
/// The wire format is the host's business; the cache only depends on this
/// contract. A user with no decoration resolves to a record with
/// `asset: None` - that is a successful fetch, not an error.
#[async_trait]
pub trait DecorationTransport: Send + Sync {
    /// Fetch the decoration record for one user.
    ///
    /// `token` carries the bearer token from the authorization state when
    /// one is present.
    async fn fetch_decoration(
        &self,
        user_id: &UserId,
        token: Option<&str>,
    ) -> OverlayResult<DecorationRecord>;
}
