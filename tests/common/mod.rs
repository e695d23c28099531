//! Shared mock host for integration tests.
//!
//! The mock patcher both records installed overrides and plays the host:
//! its `get_user` / `avatar_decoration_url` / `is_animated` helpers invoke
//! whatever overrides are installed, the way the real host would.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::broadcast;

use decor_overlay::domain::errors::{OverlayError, OverlayResult};
use decor_overlay::domain::ports::{
    HostFunction, HostPatcher, OverrideSlot, PatchToken,
};
use decor_overlay::{
    AnimationSource, AvatarDecoration, DecorationRecord, DecorationTransport,
    DecorationUrlSource, HostModules, InvalidationEvent, InvalidationSource, UserId, UserRecord,
    UserSource,
};

/// Patcher that records overrides and routes simulated host calls
/// through them.
#[derive(Default)]
pub struct MockPatcher {
    next_token: AtomicU64,
    installed: Mutex<HashMap<u64, OverrideSlot>>,
}

impl MockPatcher {
    pub fn installed_count(&self) -> usize {
        self.installed.lock().unwrap().len()
    }

    /// Simulate the host resolving a user record through its patches.
    pub fn get_user(&self, record: &mut UserRecord) {
        let hooks: Vec<_> = self
            .installed
            .lock()
            .unwrap()
            .values()
            .filter_map(|slot| match slot {
                OverrideSlot::AfterGetUser(hook) => Some(Arc::clone(hook)),
                _ => None,
            })
            .collect();
        for hook in hooks {
            hook.after_get_user(record);
        }
    }

    /// Simulate the host resolving a decoration URL. `native` stands in
    /// for the host's own implementation when no override is installed.
    pub fn avatar_decoration_url(
        &self,
        decoration: &AvatarDecoration,
        can_animate: bool,
        native: impl Fn(&AvatarDecoration, bool) -> Option<String>,
    ) -> Option<String> {
        let hook = self
            .installed
            .lock()
            .unwrap()
            .values()
            .find_map(|slot| match slot {
                OverrideSlot::InsteadAvatarDecorationUrl(hook) => Some(Arc::clone(hook)),
                _ => None,
            });
        match hook {
            Some(hook) => hook.resolve_url(decoration, can_animate),
            None => native(decoration, can_animate),
        }
    }

    /// Simulate the host's animation check plus after-hooks.
    pub fn is_animated(&self, decoration: &AvatarDecoration, host_result: bool) -> bool {
        let hooks: Vec<_> = self
            .installed
            .lock()
            .unwrap()
            .values()
            .filter_map(|slot| match slot {
                OverrideSlot::AfterIsAnimatedDecoration(hook) => Some(Arc::clone(hook)),
                _ => None,
            })
            .collect();
        let mut result = host_result;
        for hook in hooks {
            result = hook.adjust(decoration, result);
        }
        result
    }
}

impl HostPatcher for MockPatcher {
    fn install(&self, slot: OverrideSlot) -> OverlayResult<PatchToken> {
        let token = self.next_token.fetch_add(1, Ordering::SeqCst);
        self.installed.lock().unwrap().insert(token, slot);
        Ok(PatchToken(token))
    }

    fn remove(&self, token: PatchToken) -> OverlayResult<()> {
        match self.installed.lock().unwrap().remove(&token.0) {
            Some(_) => Ok(()),
            None => Err(OverlayError::UnpatchFailure {
                target: HostFunction::GetUser,
                reason: "unknown token".to_string(),
            }),
        }
    }
}

pub struct MockUsers {
    pub current: Option<UserId>,
}

impl UserSource for MockUsers {
    fn current_user_id(&self) -> Option<UserId> {
        self.current.clone()
    }
}

pub struct NativeResolver;

impl DecorationUrlSource for NativeResolver {
    fn avatar_decoration_url(
        &self,
        decoration: &AvatarDecoration,
        _can_animate: bool,
    ) -> Option<String> {
        Some(format!("host://{}", decoration.asset))
    }
}

pub struct NativeAnimation;

impl AnimationSource for NativeAnimation {
    fn is_animated_decoration(&self, decoration: &AvatarDecoration) -> bool {
        decoration.asset.starts_with("a_")
    }
}

/// Host modules with configurable presence per capability.
pub struct MockModules {
    pub current_user: Option<UserId>,
    pub with_resolver: bool,
    pub with_animation: bool,
}

impl MockModules {
    pub fn full(current_user: &str) -> Self {
        Self {
            current_user: Some(UserId::new(current_user)),
            with_resolver: true,
            with_animation: true,
        }
    }
}

impl HostModules for MockModules {
    fn user_store(&self) -> Option<Arc<dyn UserSource>> {
        Some(Arc::new(MockUsers {
            current: self.current_user.clone(),
        }))
    }

    fn image_resolver(&self) -> Option<Arc<dyn DecorationUrlSource>> {
        self.with_resolver
            .then(|| Arc::new(NativeResolver) as Arc<dyn DecorationUrlSource>)
    }

    fn decoration_utils(&self) -> Option<Arc<dyn AnimationSource>> {
        self.with_animation
            .then(|| Arc::new(NativeAnimation) as Arc<dyn AnimationSource>)
    }
}

/// Transport answering from a fixed asset table.
pub struct MockTransport {
    assets: Mutex<HashMap<UserId, Option<String>>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            assets: Mutex::new(HashMap::new()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn insert(&self, user: &str, asset: Option<&str>) {
        self.assets
            .lock()
            .unwrap()
            .insert(UserId::new(user), asset.map(String::from));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DecorationTransport for MockTransport {
    async fn fetch_decoration(
        &self,
        user_id: &UserId,
        _token: Option<&str>,
    ) -> OverlayResult<DecorationRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let asset = self
            .assets
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or(None);
        Ok(DecorationRecord {
            user_id: user_id.clone(),
            asset,
        })
    }
}

/// Invalidation source backed by a broadcast channel the test drives.
pub struct MockInvalidation {
    sender: broadcast::Sender<InvalidationEvent>,
}

impl MockInvalidation {
    pub fn new() -> Arc<Self> {
        let (sender, _) = broadcast::channel(16);
        Arc::new(Self { sender })
    }

    pub fn emit(&self, event: InvalidationEvent) {
        let _ = self.sender.send(event);
    }
}

impl InvalidationSource for MockInvalidation {
    fn subscribe(&self) -> broadcast::Receiver<InvalidationEvent> {
        self.sender.subscribe()
    }
}
