//! The generic attachable, mutation-observing container capability.
//!
//! Any guest-view container kind shares the same document-attachment
//! bookkeeping; a specific kind (here, the embedding controller) holds a
//! [`ContainerBase`] by composition and implements [`ContainerHooks`] for
//! the signals the host environment delivers.

use crate::ids::AttachmentId;
use crate::size::Extent;

/// Attachment state of a host element within its document.
#[derive(Debug, Default)]
pub struct ContainerBase {
    attached: bool,
    attachment: Option<AttachmentId>,
}

impl ContainerBase {
    /// Create a base for an element that has not yet attached.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the host element is currently connected to its document.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// The plugin-surface attachment id, once the ready signal has arrived.
    pub fn attachment(&self) -> Option<AttachmentId> {
        self.attachment
    }

    /// Record the one-shot plugin-surface ready signal.
    ///
    /// Returns false, and changes nothing, if an attachment id was already
    /// recorded; the signal fires at most once per container.
    pub fn observe_attachment(&mut self, attachment: AttachmentId) -> bool {
        if self.attachment.is_some() {
            return false;
        }
        self.attachment = Some(attachment);
        self.attached = true;
        true
    }

    /// Record that the host element left the document.
    pub fn observe_detach(&mut self) {
        self.attached = false;
    }
}

/// Hooks a specific container kind implements.
///
/// The run loop and the host environment drive a container exclusively
/// through these; the container reacts and talks back through its
/// collaborators.
pub trait ContainerHooks {
    /// The document observed a mutation of one of the element's attributes.
    fn on_attribute_mutation(&mut self, name: &str, old: Option<&str>, new: Option<&str>);

    /// The plugin surface signalled readiness with its attachment id.
    fn on_attachment_signal(&mut self, attachment: AttachmentId);

    /// The guest reported a preferred-size change.
    fn on_size_changed(&mut self, new: Extent, old: Extent);

    /// The host element was detached from its document.
    fn on_detached(&mut self);
}
