//! Domain errors for the Decor overlay.
//!
//! Nothing in this crate is allowed to propagate an error into the host's
//! call stack: every override boundary and both lifecycle entry points
//! catch these, log them, and degrade silently. The variants exist so the
//! containment boundaries have something structured to log.

use thiserror::Error;

use super::models::UserId;
use super::ports::HostFunction;

/// Errors that can occur inside the overlay.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// A required host function or object could not be located. Non-fatal:
    /// the corresponding override is skipped and activation continues.
    #[error("host function not found: {target}")]
    LookupFailure {
        /// Which host function the lookup was probing for.
        target: HostFunction,
    },

    /// The host patcher refused to install an override.
    #[error("failed to install override on {target}: {reason}")]
    PatchFailed {
        /// The host function the override targeted.
        target: HostFunction,
        /// Patcher-supplied reason.
        reason: String,
    },

    /// Reversing one override failed during shutdown. Logged per handle;
    /// never blocks reversal of the remaining handles.
    #[error("failed to remove override on {target}: {reason}")]
    UnpatchFailure {
        /// The host function the override targeted.
        target: HostFunction,
        /// Patcher-supplied reason.
        reason: String,
    },

    /// The decoration transport failed. The cache entry reverts to
    /// `Unknown`; readers see "not yet available" rather than an error.
    #[error("decoration fetch failed for {user_id}: {reason}")]
    FetchFailure {
        /// The user whose decoration was being fetched.
        user_id: UserId,
        /// Transport-supplied reason.
        reason: String,
    },

    /// A transport-level error with no user attribution.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Convenience alias used throughout the crate.
pub type OverlayResult<T> = Result<T, OverlayError>;
