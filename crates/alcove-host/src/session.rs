//! Wiring of one controller into a running host environment.

use crate::element::HostElement;
use crate::error::HostError;
use crate::guest::SimGuestService;
use crate::surface::RecordingSurface;
use alcove_core::{
    run, AttachmentId, Collaborators, ControllerEvent, EmbeddingController, Extent, SizeDefaults,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// A controller running on its own task, plus handles to the host-side
/// collaborators it was wired to.
///
/// The session mimics what a document embedder does: it forwards element
/// mutations, the surface-ready signal, and guest size reports into the
/// controller's event queue, and exposes the recorded outcomes.
pub struct EmbeddingSession {
    element: HostElement,
    surface: RecordingSurface,
    guests: SimGuestService,
    events: mpsc::UnboundedSender<ControllerEvent>,
    task: JoinHandle<EmbeddingController>,
}

impl EmbeddingSession {
    /// Build a controller around a fresh element and start its run loop.
    pub fn start(defaults: SizeDefaults, guests: SimGuestService) -> Result<Self, HostError> {
        Self::start_with_element(defaults, guests, HostElement::new())
    }

    /// Build a controller around an existing element, picking up any
    /// attributes already declared on it.
    pub fn start_with_element(
        defaults: SizeDefaults,
        guests: SimGuestService,
        element: HostElement,
    ) -> Result<Self, HostError> {
        let surface = RecordingSurface::new();
        let collab = Collaborators {
            attributes: Box::new(element.clone()),
            surface: Box::new(surface.clone()),
            guests: Box::new(guests.clone()),
            events: Box::new(element.clone()),
        };
        let controller = EmbeddingController::new(collab, defaults)?;
        tracing::info!(view = %controller.view_instance(), "embedding session started");

        let (events, queue) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(controller, queue));
        Ok(Self {
            element,
            surface,
            guests,
            events,
            task,
        })
    }

    /// The host element this session's controller is bound to.
    pub fn element(&self) -> &HostElement {
        &self.element
    }

    /// The plugin surface the controller renders through.
    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }

    /// The guest-lifecycle service backing this session.
    pub fn guests(&self) -> &SimGuestService {
        &self.guests
    }

    /// Set an element attribute and report the mutation to the controller.
    pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), HostError> {
        let mutation = self.element.set_attribute(name, value);
        self.send(ControllerEvent::AttributeMutation {
            name: name.to_string(),
            old: mutation.old,
            new: mutation.new,
        })
    }

    /// Remove an element attribute and report the mutation.
    pub fn remove_attribute(&self, name: &str) -> Result<(), HostError> {
        let mutation = self.element.remove_attribute(name);
        self.send(ControllerEvent::AttributeMutation {
            name: name.to_string(),
            old: mutation.old,
            new: mutation.new,
        })
    }

    /// Signal that the plugin surface is ready, returning its attachment id.
    pub fn attach(&self) -> Result<AttachmentId, HostError> {
        let attachment = AttachmentId::new();
        self.send(ControllerEvent::AttachmentReady { attachment })?;
        Ok(attachment)
    }

    /// Forward a guest size-change notification.
    pub fn report_size_changed(&self, new: Extent, old: Extent) -> Result<(), HostError> {
        self.send(ControllerEvent::SizeChanged { new, old })
    }

    /// Toggle deferred autosize application.
    pub fn set_defer_auto_size(&self, defer: bool) -> Result<(), HostError> {
        self.send(ControllerEvent::SetDeferAutoSize { defer })
    }

    /// Apply the buffered deferred resize, if any.
    pub fn resume_deferred_auto_size(&self) -> Result<(), HostError> {
        self.send(ControllerEvent::ResumeDeferredAutoSize)
    }

    /// Detach the host element from its document.
    pub fn detach(&self) -> Result<(), HostError> {
        self.send(ControllerEvent::Detached)
    }

    /// Wait for the run loop to finish and take the controller back for
    /// inspection. Closes the event queue, which tears down like a detach
    /// if the element never detached explicitly.
    pub async fn shutdown(self) -> Result<EmbeddingController, HostError> {
        drop(self.events);
        Ok(self.task.await?)
    }

    fn send(&self, event: ControllerEvent) -> Result<(), HostError> {
        self.events
            .send(event)
            .map_err(|_| HostError::ControllerGone)
    }
}
