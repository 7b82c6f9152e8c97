//! Inbound signals and outbound notifications of a controller.

use crate::container::ContainerHooks;
use crate::controller::EmbeddingController;
use crate::ids::AttachmentId;
use crate::size::Extent;

/// Notifications dispatched on the host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerEvent {
    /// Guest creation failed, either with an explicit zero id or because
    /// the element detached before the creation reply arrived.
    CreateFailed,
}

impl ContainerEvent {
    /// The DOM-facing event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateFailed => "createfailed",
        }
    }

    /// Whether the event bubbles up the host document.
    pub fn bubbles(&self) -> bool {
        match self {
            Self::CreateFailed => true,
        }
    }
}

/// External signals fed into a controller by its host environment.
#[derive(Debug, Clone)]
pub enum ControllerEvent {
    /// The document observed an attribute mutation on the host element.
    AttributeMutation {
        /// Raw attribute name; unrecognized names are ignored.
        name: String,
        /// Value before the mutation.
        old: Option<String>,
        /// Value after the mutation.
        new: Option<String>,
    },
    /// The plugin surface is ready to display a guest.
    AttachmentReady {
        /// Opaque id correlating this surface with attach requests.
        attachment: AttachmentId,
    },
    /// The guest reported a preferred-size change.
    SizeChanged {
        /// Proposed new extent.
        new: Extent,
        /// Previous extent, as reported by the guest layer.
        old: Extent,
    },
    /// The embedder toggled deferred autosize application.
    SetDeferAutoSize {
        /// True suspends application; false flushes and resumes.
        defer: bool,
    },
    /// The embedder asked for the buffered deferred resize to be applied.
    ResumeDeferredAutoSize,
    /// The host element left the document.
    Detached,
}

impl ControllerEvent {
    /// Dispatch this event to the matching container hook.
    pub fn apply(self, controller: &mut EmbeddingController) {
        match self {
            Self::AttributeMutation { name, old, new } => {
                controller.on_attribute_mutation(&name, old.as_deref(), new.as_deref());
            }
            Self::AttachmentReady { attachment } => controller.on_attachment_signal(attachment),
            Self::SizeChanged { new, old } => controller.on_size_changed(new, old),
            Self::SetDeferAutoSize { defer } => controller.set_defer_auto_size(defer),
            Self::ResumeDeferredAutoSize => controller.resume_deferred_auto_size(),
            Self::Detached => controller.on_detached(),
        }
    }
}
