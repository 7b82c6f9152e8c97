//! Error types for alcove-core.
//!
//! Guest-creation failure is deliberately not represented here: it is
//! reported through the `createfailed` container event and leaves the
//! controller ready for another attempt. `CoreError` covers only faults in
//! the controller's own setup and plumbing.

use crate::size::Extent;
use thiserror::Error;

/// Result type alias for alcove-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while setting up or driving a controller.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Construction-time size defaults violate `min <= max`.
    #[error("invalid size defaults: min {min} exceeds max {max}")]
    InvalidDefaults {
        /// Default minimum extent.
        min: Extent,
        /// Default maximum extent.
        max: Extent,
    },
}
