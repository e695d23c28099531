//! Domain layer for the Decor overlay
//!
//! This module contains core models, the error taxonomy, and the port
//! traits through which the host application is reached.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{OverlayError, OverlayResult};
