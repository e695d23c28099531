//! Invalidation event port.
//!
//! The host already emits change events for sessions and decorations, so
//! the cache invalidates on those instead of carrying a TTL.

use tokio::sync::broadcast;

use crate::domain::models::UserId;

/// A change notification relevant to cached decoration state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationEvent {
    /// One user's decoration changed upstream; drop that entry.
    DecorationChanged(UserId),
    /// The session switched; every cached entry is suspect.
    SessionChanged,
}

/// Event source the cache subscribes to for invalidation triggers.
pub trait InvalidationSource: Send + Sync {
    /// Open a new subscription to the event stream.
    fn subscribe(&self) -> broadcast::Receiver<InvalidationEvent>;
}
