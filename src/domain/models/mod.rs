//! Domain models for the Decor overlay.

pub mod config;
pub mod decoration;

pub use config::{LogConfig, LogFormat, OverlayConfig};
pub use decoration::{AvatarDecoration, DecorationRecord, Platform, UserId, UserRecord};
