//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the trait interfaces the host application provides
//! implementations for:
//! - `HostModules`: capability probes locating live host objects
//! - `HostPatcher`: override installation and removal
//! - `DecorationTransport`: fetching decoration records by user id
//! - `InvalidationSource`: session/decoration change events
//!
//! These traits define the contracts that allow the overlay core to be
//! independent of any specific host.

pub mod events;
pub mod host;
pub mod patcher;
pub mod transport;

pub use events::{InvalidationEvent, InvalidationSource};
pub use host::{
    locate_animation_source, locate_url_source, locate_user_source, AnimationSource,
    DecorationUrlSource, HostModules, UserSource,
};
pub use patcher::{
    AnimationHook, DecorationUrlHook, HostFunction, HostPatcher, OverrideSlot, PatchToken,
    UserRecordHook,
};
pub use transport::DecorationTransport;
