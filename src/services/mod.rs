//! Service layer: the decoration cache, the interception layer, and the
//! pure logic both of them lean on.

pub mod asset_url;
pub mod augmentation;
pub mod authorization;
pub mod decoration_cache;
pub mod interception;

pub use asset_url::UrlResolution;
pub use augmentation::AugmentationAction;
pub use authorization::AuthorizationState;
pub use decoration_cache::{CacheEvent, CacheLookup, DecorationCache, SubscriptionBinding};
pub use interception::{InterceptionLayer, PatchHandle, PatchRegistry};
