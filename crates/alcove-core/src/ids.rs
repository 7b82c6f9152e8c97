//! Identifier newtypes for guests, plugin-surface attachments, and views.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;
use uuid::Uuid;

/// Identity of a live guest.
///
/// The guest-lifecycle wire protocol reserves id 0 for "no guest"; that
/// sentinel maps to `Option<GuestId>` here, so a `GuestId` always names a
/// guest that existed at some point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuestId(NonZeroU32);

impl GuestId {
    /// Convert a raw wire id. Returns `None` for the zero sentinel.
    pub fn from_raw(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Get the raw wire id.
    pub fn as_u32(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier correlating a plugin surface instance with requests to
/// attach a guest to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(Uuid);

impl AttachmentId {
    /// Create a new random attachment ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for AttachmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AttachmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for AttachmentId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Identity of one controller instance, carried on attach requests so the
/// embedder can correlate guest notifications with the right container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ViewInstanceId(Uuid);

impl ViewInstanceId {
    /// Create a new random view instance ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ViewInstanceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
