//! Per-user decoration cache.
//!
//! Lazily fetches decoration records over the transport port, deduplicates
//! in-flight fetches per user, and invalidates on host change events
//! instead of carrying a TTL. Reads are synchronous - the interception
//! layer calls them from inside host callbacks - so the map sits behind a
//! sync lock that is never held across an await.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::models::UserId;
use crate::domain::ports::{DecorationTransport, InvalidationEvent, InvalidationSource};

use super::authorization::AuthorizationState;

/// Capacity of the subscriber notification channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Per-user entry state.
///
/// `Unknown` is the absence of an entry. `Refreshing` is a forced refetch
/// of an already resolved entry: the previous value stays visible until
/// the new fetch lands, so observers never see a hole.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CacheEntry {
    Pending,
    Resolved(Option<String>),
    Refreshing(Option<String>),
}

/// Result of a single-call cache read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheLookup {
    /// No resolved value yet (unknown or first fetch still in flight).
    Unresolved,
    /// Resolved; `None` is the cached "no decoration" result.
    Resolved(Option<String>),
}

/// Notification sent to cache subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A fetch resolved for this user.
    Updated(UserId),
    /// This user's entry was dropped back to unknown.
    Invalidated(UserId),
}

/// A live link from a host invalidation stream to this cache.
///
/// Holds the listener task; releasing the binding aborts it.
#[derive(Debug)]
pub struct SubscriptionBinding {
    task: JoinHandle<()>,
}

impl SubscriptionBinding {
    fn release(self) {
        self.task.abort();
    }
}

/// Keyed store of per-user decoration records.
///
/// The single owner of decoration state; the interception layer only
/// reads from it. Entries live for the process lifetime, bounded by the
/// distinct users encountered.
pub struct DecorationCache {
    entries: RwLock<HashMap<UserId, CacheEntry>>,
    transport: Arc<dyn DecorationTransport>,
    auth: Arc<AuthorizationState>,
    events: broadcast::Sender<CacheEvent>,
    bindings: Mutex<Vec<SubscriptionBinding>>,
}

impl std::fmt::Debug for DecorationCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecorationCache")
            .field("entries", &self.entries.read().len())
            .finish_non_exhaustive()
    }
}

impl DecorationCache {
    /// Create an empty cache over the given transport and auth state.
    pub fn new(transport: Arc<dyn DecorationTransport>, auth: Arc<AuthorizationState>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            entries: RwLock::new(HashMap::new()),
            transport,
            auth,
            events,
            bindings: Mutex::new(Vec::new()),
        })
    }

    /// Whether a resolved value exists for this user.
    ///
    /// True for the cached "no decoration" result as well, and while a
    /// forced refetch is in flight (the previous value stays visible).
    pub fn has(&self, user_id: &UserId) -> bool {
        matches!(self.lookup(user_id), CacheLookup::Resolved(_))
    }

    /// The resolved asset for this user.
    ///
    /// Callers check [`has`](Self::has) first; an unresolved user returns
    /// `None` just like a resolved "no decoration" does. Use
    /// [`lookup`](Self::lookup) to distinguish the two in one call.
    pub fn get(&self, user_id: &UserId) -> Option<String> {
        match self.lookup(user_id) {
            CacheLookup::Resolved(asset) => asset,
            CacheLookup::Unresolved => None,
        }
    }

    /// Read this user's entry, distinguishing unresolved from resolved.
    pub fn lookup(&self, user_id: &UserId) -> CacheLookup {
        match self.entries.read().get(user_id) {
            Some(CacheEntry::Resolved(asset) | CacheEntry::Refreshing(asset)) => {
                CacheLookup::Resolved(asset.clone())
            }
            Some(CacheEntry::Pending) | None => CacheLookup::Unresolved,
        }
    }

    /// Open a subscription to cache change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.events.subscribe()
    }

    /// Fire-and-forget form of [`fetch`](Self::fetch).
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn_fetch(self: &Arc<Self>, user_id: UserId, force: bool) {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            cache.fetch(user_id, force).await;
        });
    }

    /// Fetch the decoration record for one user.
    ///
    /// No-op when a resolved entry exists and `force` is false, and
    /// whenever a fetch for this user is already in flight - overlapping
    /// callers attach to the in-flight outcome instead of issuing a
    /// duplicate transport call. On success the entry resolves and
    /// subscribers are notified; on failure the entry reverts to unknown
    /// so a later call may retry. No retry happens here.
    pub async fn fetch(&self, user_id: UserId, force: bool) {
        if !self.begin_fetch(&user_id, force) {
            return;
        }

        let token = self.auth.token();
        match self
            .transport
            .fetch_decoration(&user_id, token.as_deref())
            .await
        {
            Ok(record) => {
                self.entries
                    .write()
                    .insert(user_id.clone(), CacheEntry::Resolved(record.asset));
                debug!(user_id = %user_id, "decoration resolved");
                let _ = self.events.send(CacheEvent::Updated(user_id));
            }
            Err(error) => {
                warn!(user_id = %user_id, %error, "decoration fetch failed");
                self.entries.write().remove(&user_id);
            }
        }
    }

    /// Transition the entry toward an in-flight fetch.
    ///
    /// Returns false when no transport call should be made.
    fn begin_fetch(&self, user_id: &UserId, force: bool) -> bool {
        let mut entries = self.entries.write();
        match entries.get(user_id) {
            // At most one in-flight fetch per user, forced or not.
            Some(CacheEntry::Pending | CacheEntry::Refreshing(_)) => false,
            Some(CacheEntry::Resolved(asset)) => {
                if force {
                    let previous = asset.clone();
                    entries.insert(user_id.clone(), CacheEntry::Refreshing(previous));
                    true
                } else {
                    false
                }
            }
            None => {
                entries.insert(user_id.clone(), CacheEntry::Pending);
                true
            }
        }
    }

    /// Drop one user's entry back to unknown.
    pub fn invalidate(&self, user_id: &UserId) {
        let removed = self.entries.write().remove(user_id).is_some();
        if removed {
            debug!(user_id = %user_id, "cache entry invalidated");
            let _ = self.events.send(CacheEvent::Invalidated(user_id.clone()));
        }
    }

    /// Drop every entry, e.g. on a session switch.
    pub fn invalidate_all(&self) {
        let drained: Vec<UserId> = self.entries.write().drain().map(|(id, _)| id).collect();
        debug!(count = drained.len(), "cache cleared");
        for user_id in drained {
            let _ = self.events.send(CacheEvent::Invalidated(user_id));
        }
    }

    /// Subscribe this cache to a host invalidation stream.
    ///
    /// The listener holds only a weak reference, so an orphaned cache is
    /// collectable; the binding is kept so
    /// [`release_subscriptions`](Self::release_subscriptions) can abort
    /// the listener on unload.
    pub fn bind_invalidation(self: &Arc<Self>, source: &dyn InvalidationSource) {
        let mut receiver = source.subscribe();
        let weak: Weak<Self> = Arc::downgrade(self);
        let task = tokio::spawn(async move {
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // Missed events could name any user; drop everything.
                        warn!(missed, "invalidation stream lagged");
                        InvalidationEvent::SessionChanged
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let Some(cache) = weak.upgrade() else { break };
                match event {
                    InvalidationEvent::DecorationChanged(user_id) => cache.invalidate(&user_id),
                    InvalidationEvent::SessionChanged => cache.invalidate_all(),
                }
            }
        });
        self.bindings.lock().push(SubscriptionBinding { task });
    }

    /// Abort every invalidation listener. Called on unload.
    pub fn release_subscriptions(&self) {
        let bindings: Vec<SubscriptionBinding> = self.bindings.lock().drain(..).collect();
        debug!(count = bindings.len(), "releasing cache subscriptions");
        for binding in bindings {
            binding.release();
        }
    }

    /// Number of entries currently held (any state).
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
