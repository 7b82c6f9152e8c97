//! Error types for alcove-host.

use alcove_core::CoreError;
use thiserror::Error;

/// Result type alias for alcove-host operations.
pub type Result<T> = std::result::Result<T, HostError>;

/// Errors that can occur while hosting a controller.
#[derive(Debug, Error)]
pub enum HostError {
    /// Error from alcove-core
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The controller task has already exited
    #[error("controller task is gone")]
    ControllerGone,

    /// The controller task panicked or was cancelled
    #[error("controller task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
