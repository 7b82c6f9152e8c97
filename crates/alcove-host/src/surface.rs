//! A plugin surface that records what the controller asks of it.

use alcove_core::{AttachParams, AttachmentId, Extent, GuestId, PluginSurface};
use std::sync::{Arc, Mutex};

/// One recorded attach request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachCall {
    /// Surface instance the guest was attached to.
    pub attachment: AttachmentId,
    /// The attached guest.
    pub guest: GuestId,
    /// The size box and autosize flag supplied with the attach.
    pub params: AttachParams,
}

#[derive(Default)]
struct SurfaceState {
    extent: Option<Extent>,
    attach_calls: Vec<AttachCall>,
}

/// Recording stand-in for the local rendering surface.
///
/// Cheaply cloneable; all clones share one surface.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    inner: Arc<Mutex<SurfaceState>>,
}

impl RecordingSurface {
    /// Create a surface with no recorded activity.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rendered extent after the most recent resize, if any.
    pub fn extent(&self) -> Option<Extent> {
        self.inner.lock().expect("surface lock").extent
    }

    /// Every attach request issued so far.
    pub fn attach_calls(&self) -> Vec<AttachCall> {
        self.inner.lock().expect("surface lock").attach_calls.clone()
    }
}

impl PluginSurface for RecordingSurface {
    fn attach_guest(&mut self, attachment: AttachmentId, guest: GuestId, params: &AttachParams) {
        tracing::debug!(%attachment, %guest, "surface attach");
        self.inner
            .lock()
            .expect("surface lock")
            .attach_calls
            .push(AttachCall {
                attachment,
                guest,
                params: *params,
            });
    }

    fn set_extent(&mut self, extent: Extent) {
        tracing::debug!(%extent, "surface extent");
        self.inner.lock().expect("surface lock").extent = Some(extent);
    }
}
