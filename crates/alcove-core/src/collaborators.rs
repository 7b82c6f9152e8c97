//! Collaborator interfaces consumed by the embedding controller.
//!
//! The controller never talks to the document, the plugin surface, or the
//! guest transport directly; it holds one boxed implementation of each of
//! these traits, supplied by the host environment at construction.

use crate::events::ContainerEvent;
use crate::ids::{AttachmentId, GuestId, ViewInstanceId};
use crate::size::{AutoSizeRequest, Extent};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

/// Guest kind string carried on every creation request.
pub const GUEST_KIND: &str = "embedded-view";

/// Parameters of a guest creation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateParams {
    /// Which remote content the guest should load.
    pub target_id: String,
}

/// Parameters of the combined attach-and-size request.
///
/// Attachment and sizing travel together only here; every later constraint
/// change uses the lighter [`GuestLifecycle::set_auto_size`] instead of
/// re-attaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachParams {
    /// The controller instance the guest is being attached for.
    pub view_instance: ViewInstanceId,
    /// Current autosize flag and min/max box.
    pub auto_size: AutoSizeRequest,
}

/// A mutation observed by the attribute source after a write-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeMutation {
    /// Value before the write, if any.
    pub old: Option<String>,
    /// Value after the write, if any.
    pub new: Option<String>,
}

/// The host element's declarative attribute store.
///
/// Writes flow through here and come back to the controller as observed
/// mutations, mirroring how an element setter re-enters the document's
/// mutation observer.
pub trait AttributeSource {
    /// Write an attribute, returning the mutation the element observed.
    fn write(&mut self, name: &str, value: &str) -> AttributeMutation;

    /// Read an attribute's current value.
    fn read(&self, name: &str) -> Option<String>;
}

/// The local rendering surface that displays the guest's pixels.
pub trait PluginSurface {
    /// Attach a guest's rendered surface, supplying the initial size box.
    /// Fire-and-forget; no completion is tracked.
    fn attach_guest(&mut self, attachment: AttachmentId, guest: GuestId, params: &AttachParams);

    /// Set the rendered extent of the visible surface.
    fn set_extent(&mut self, extent: Extent);
}

/// Transport that creates, destroys, and resizes guest processes.
pub trait GuestLifecycle {
    /// Begin creating a guest.
    ///
    /// The returned receiver resolves exactly once; `None` is the wire's
    /// zero id and signals failure. A dropped sender is also treated as a
    /// failure by the run loop.
    fn create_guest(
        &mut self,
        kind: &str,
        params: &CreateParams,
    ) -> oneshot::Receiver<Option<GuestId>>;

    /// Tear down a guest. Fire-and-forget.
    fn destroy_guest(&mut self, guest: GuestId);

    /// Update the guest's autosize flag and min/max box. Fire-and-forget.
    fn set_auto_size(&mut self, guest: GuestId, request: &AutoSizeRequest);
}

/// Where outbound container events are dispatched (the host element).
pub trait EventSink {
    /// Dispatch an event on the host element.
    fn dispatch(&mut self, event: ContainerEvent);
}

/// The collaborator bundle a controller is constructed with.
pub struct Collaborators {
    /// The host element's attribute store.
    pub attributes: Box<dyn AttributeSource + Send>,
    /// The plugin surface displaying the guest.
    pub surface: Box<dyn PluginSurface + Send>,
    /// The guest-lifecycle transport.
    pub guests: Box<dyn GuestLifecycle + Send>,
    /// The host element as an event target.
    pub events: Box<dyn EventSink + Send>,
}
