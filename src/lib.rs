//! Decor Overlay - avatar decoration cache and host interception layer
//!
//! Decor augments a host application's user-profile rendering with an
//! externally sourced avatar decoration: a per-user visual asset the host's
//! native data model does not know about.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Models, errors, and the port traits the
//!   host application implements
//! - **Service Layer** (`services`): The decoration cache, the interception
//!   layer, and the pure URL/augmentation logic
//! - **Application Layer** (`application`): Overlay activation and
//!   deactivation entry points
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading and
//!   logging setup
//!
//! # Example
//!
//! ```ignore
//! use decor_overlay::application::{DecorOverlay, OverlayDeps};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut overlay = DecorOverlay::new(deps);
//!     overlay.activate().await;
//!     // ... host runs, overrides serve decorations from the cache ...
//!     overlay.deactivate().await;
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::{DecorOverlay, OverlayDeps};
pub use domain::models::{
    AvatarDecoration, DecorationRecord, OverlayConfig, Platform, UserId, UserRecord,
};
pub use domain::ports::{
    AnimationSource, DecorationTransport, DecorationUrlSource, HostModules, HostPatcher,
    InvalidationEvent, InvalidationSource, UserSource,
};
pub use domain::OverlayError;
pub use infrastructure::config::ConfigLoader;
pub use services::{AuthorizationState, DecorationCache, InterceptionLayer};
