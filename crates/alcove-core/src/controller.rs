//! The embedding controller: one guest-view binding for one host element.
//!
//! The controller is a single-threaded state machine reacting to three
//! asynchronous actors: the host document (attribute mutations), the plugin
//! surface (the one-shot ready signal), and the guest process (size-change
//! notifications). It guarantees at-most-one creation in flight, never
//! leaks a guest past element detach, and keeps the size-constraint
//! invariant after every mutation.

use crate::attributes::{parse_dimension, AttributeName};
use crate::collaborators::{AttachParams, Collaborators, CreateParams, GUEST_KIND};
use crate::container::{ContainerBase, ContainerHooks};
use crate::error::CoreError;
use crate::events::ContainerEvent;
use crate::ids::{AttachmentId, GuestId, ViewInstanceId};
use crate::size::{AutoSizeRequest, DeferredResize, Extent, SizeConstraints, SizeDefaults};
use std::fmt;
use tokio::sync::oneshot;

/// Where the guest binding currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuestBindingState {
    /// No guest exists and no creation is in flight.
    NoGuest,
    /// A creation request has been issued and not yet completed.
    Creating,
    /// A guest exists and has been handed to the plugin surface.
    Attached,
}

impl fmt::Display for GuestBindingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoGuest => write!(f, "no-guest"),
            Self::Creating => write!(f, "creating"),
            Self::Attached => write!(f, "attached"),
        }
    }
}

/// Controller for one guest view embedded in one host element.
pub struct EmbeddingController {
    collab: Collaborators,
    defaults: SizeDefaults,
    view_instance: ViewInstanceId,

    base: ContainerBase,
    target_id: Option<String>,
    autosize: bool,
    constraints: SizeConstraints,

    guest: Option<GuestId>,
    pending_creation: bool,
    creation_receiver: Option<oneshot::Receiver<Option<GuestId>>>,

    defer_autosize: bool,
    deferred: Option<DeferredResize>,
}

impl EmbeddingController {
    /// Create a controller for a freshly constructed host element.
    ///
    /// Size constraints and the target identity are seeded from any
    /// attributes already present on the element, then validated.
    pub fn new(collab: Collaborators, defaults: SizeDefaults) -> Result<Self, CoreError> {
        defaults.validate()?;
        let mut controller = Self {
            collab,
            defaults,
            view_instance: ViewInstanceId::new(),
            base: ContainerBase::new(),
            target_id: None,
            autosize: false,
            constraints: SizeConstraints::from_defaults(&defaults),
            guest: None,
            pending_creation: false,
            creation_receiver: None,
            defer_autosize: false,
            deferred: None,
        };
        controller.seed_from_attributes();
        tracing::debug!(
            view = %controller.view_instance,
            constraints = ?controller.constraints,
            "embedding controller created"
        );
        Ok(controller)
    }

    /// Seed state from attributes already declared on the host element.
    fn seed_from_attributes(&mut self) {
        let read = |collab: &Collaborators, name: AttributeName| {
            collab
                .attributes
                .read(name.as_str())
                .filter(|v| !v.is_empty())
        };

        for name in AttributeName::SIZE {
            let Some(value) = read(&self.collab, name) else {
                continue;
            };
            self.apply_size_attribute(name, Some(value.as_str()));
        }
        self.constraints.reset_if_invalid(&self.defaults);

        if let Some(target) = read(&self.collab, AttributeName::Target) {
            self.target_id = Some(target);
        }
    }

    /// The controller's own instance identity.
    pub fn view_instance(&self) -> ViewInstanceId {
        self.view_instance
    }

    /// The target identity, once set.
    pub fn target_id(&self) -> Option<&str> {
        self.target_id.as_deref()
    }

    /// Whether autosize is currently enabled.
    pub fn autosize_enabled(&self) -> bool {
        self.autosize
    }

    /// The current size-constraint box.
    pub fn constraints(&self) -> SizeConstraints {
        self.constraints
    }

    /// The live guest, if one is attached.
    pub fn guest(&self) -> Option<GuestId> {
        self.guest
    }

    /// Whether the host element is connected to its document.
    pub fn is_attached(&self) -> bool {
        self.base.is_attached()
    }

    /// Whether autosize application is currently suspended.
    pub fn defer_autosize(&self) -> bool {
        self.defer_autosize
    }

    /// The buffered deferred resize, if any.
    pub fn deferred(&self) -> Option<DeferredResize> {
        self.deferred
    }

    /// Current state of the guest-binding lifecycle.
    pub fn binding_state(&self) -> GuestBindingState {
        if self.guest.is_some() {
            GuestBindingState::Attached
        } else if self.pending_creation {
            GuestBindingState::Creating
        } else {
            GuestBindingState::NoGuest
        }
    }

    /// Whether a creation request is in flight.
    pub fn pending_creation(&self) -> bool {
        self.pending_creation
    }

    /// Take the completion receiver of the in-flight creation, if one has
    /// not been handed out yet. The run loop takes it once per creation and
    /// forwards the resolution to [`Self::handle_creation_complete`].
    pub fn take_creation_receiver(&mut self) -> Option<oneshot::Receiver<Option<GuestId>>> {
        self.creation_receiver.take()
    }

    /// Write one public attribute through the attribute source and handle
    /// the mutation it reports. This is what the embedder-facing setters in
    /// the accessor table do.
    pub fn set_attribute(&mut self, name: AttributeName, value: &str) {
        let mutation = self.collab.attributes.write(name.as_str(), value);
        self.on_attribute_mutation(
            name.as_str(),
            mutation.old.as_deref(),
            mutation.new.as_deref(),
        );
    }

    /// Create a guest if the preconditions hold: plugin surface ready, no
    /// creation already in flight, target known.
    ///
    /// With a live guest this re-issues the attach instead; the plugin
    /// surface may have been recreated under an unchanged guest.
    pub fn create_guest_if_necessary(&mut self) {
        if !self.base.is_attached() || self.pending_creation {
            return;
        }
        if let Some(guest) = self.guest {
            self.attach_guest(guest);
            return;
        }
        let Some(target_id) = self.target_id.clone() else {
            return;
        };
        let params = CreateParams { target_id };
        tracing::info!(
            view = %self.view_instance,
            target = %params.target_id,
            "creating guest"
        );
        let completion = self.collab.guests.create_guest(GUEST_KIND, &params);
        self.pending_creation = true;
        self.creation_receiver = Some(completion);
    }

    /// Complete a pending creation with the resolved guest id (`None` means
    /// failure). Called by the run loop when the lifecycle service replies.
    pub fn handle_creation_complete(&mut self, guest: Option<GuestId>) {
        self.pending_creation = false;
        self.creation_receiver = None;
        let guest = match guest {
            // Detach raced the reply; the fresh guest must not outlive the
            // host element.
            Some(id) if !self.base.is_attached() => {
                tracing::warn!(
                    view = %self.view_instance,
                    guest = %id,
                    "element detached during creation, destroying guest"
                );
                self.collab.guests.destroy_guest(id);
                None
            }
            other => other,
        };
        match guest {
            None => {
                tracing::warn!(view = %self.view_instance, "guest creation failed");
                self.collab.events.dispatch(ContainerEvent::CreateFailed);
            }
            Some(id) => {
                tracing::info!(view = %self.view_instance, guest = %id, "guest created");
                self.guest = Some(id);
                self.attach_guest(id);
            }
        }
    }

    /// Attach the guest's rendered surface and hand over the current size
    /// box in the same request. Later constraint changes go through
    /// `set_auto_size` alone; this is the only combined call.
    fn attach_guest(&mut self, guest: GuestId) {
        let Some(attachment) = self.base.attachment() else {
            return;
        };
        let params = AttachParams {
            view_instance: self.view_instance,
            auto_size: self.auto_size_request(),
        };
        tracing::info!(
            view = %self.view_instance,
            guest = %guest,
            attachment = %attachment,
            "attaching guest"
        );
        self.collab.surface.attach_guest(attachment, guest, &params);
    }

    /// Apply a new rendered extent and re-send the autosize box.
    ///
    /// The minimum bounds ratchet upward: once content has been observed at
    /// a size, the container never shrinks below it again for the rest of
    /// the controller's life, outside the invalid-constraint reset path.
    pub fn resize(&mut self, new: Extent, old: Extent) {
        tracing::debug!(
            view = %self.view_instance,
            new = %new,
            old = %old,
            "applying resize"
        );
        self.collab.surface.set_extent(new);

        if new.width > self.constraints.min.width {
            self.constraints.min.width = new.width;
        }
        if new.height > self.constraints.min.height {
            self.constraints.min.height = new.height;
        }

        if let Some(guest) = self.guest {
            let request = self.auto_size_request();
            self.collab.guests.set_auto_size(guest, &request);
        }
    }

    /// Suspend or resume immediate application of guest size changes.
    ///
    /// Disabling flushes any buffered resize before the flag flips, so the
    /// flag is observably false with no resize pending as soon as this
    /// returns.
    pub fn set_defer_auto_size(&mut self, defer: bool) {
        if !defer {
            self.resume_deferred_auto_size();
        }
        self.defer_autosize = defer;
    }

    /// Apply the buffered deferred resize, if any, and clear the buffer.
    pub fn resume_deferred_auto_size(&mut self) {
        if let Some(deferred) = self.deferred.take() {
            self.resize(deferred.new, deferred.old);
        }
    }

    fn auto_size_request(&self) -> AutoSizeRequest {
        AutoSizeRequest {
            enable: self.autosize,
            min: self.constraints.min,
            max: self.constraints.max,
        }
    }

    /// First assignment of the target attribute. Later writes to an
    /// already-set target are ignored; re-targeting is unsupported.
    fn handle_target_mutation(&mut self, old: Option<&str>, new: Option<&str>) {
        if old.is_some() || self.target_id.is_some() {
            return;
        }
        let Some(new) = new else {
            return;
        };
        self.target_id = Some(new.to_string());
        tracing::debug!(view = %self.view_instance, target = %new, "target recorded");

        // Creation waits for the plugin surface when it is not ready yet;
        // the attachment handler picks it up from there.
        if self.base.attachment().is_none() {
            return;
        }
        if self.guest.is_none() {
            self.create_guest_if_necessary();
        }
    }

    /// A size-constraint attribute changed: update the field, re-validate
    /// the box, and renegotiate with a live guest.
    fn handle_size_mutation(&mut self, name: AttributeName, new: Option<&str>) {
        self.apply_size_attribute(name, new);
        if self.constraints.reset_if_invalid(&self.defaults) {
            tracing::debug!(
                view = %self.view_instance,
                constraints = ?self.constraints,
                "size constraints reset to defaults"
            );
        }

        // Without a guest the box is simply re-sent on the next attach.
        let Some(guest) = self.guest else {
            return;
        };
        let request = self.auto_size_request();
        self.collab.guests.set_auto_size(guest, &request);
    }

    fn apply_size_attribute(&mut self, name: AttributeName, new: Option<&str>) {
        if matches!(name, AttributeName::Autosize) {
            self.autosize = new.is_some();
            return;
        }
        let parsed = parse_dimension(new);
        if parsed < 0 {
            // A negative bound invalidates the whole axis, the same way a
            // minimum above its maximum does.
            match name {
                AttributeName::MaxWidth | AttributeName::MinWidth => {
                    self.constraints.reset_width(&self.defaults)
                }
                _ => self.constraints.reset_height(&self.defaults),
            }
            return;
        }
        // Values beyond u32 saturate; a saturated minimum trips the axis
        // reset on validation.
        let value = u32::try_from(parsed).unwrap_or(u32::MAX);
        match name {
            AttributeName::MaxHeight => self.constraints.max.height = value,
            AttributeName::MaxWidth => self.constraints.max.width = value,
            AttributeName::MinHeight => self.constraints.min.height = value,
            AttributeName::MinWidth => self.constraints.min.width = value,
            AttributeName::Autosize | AttributeName::Target => {}
        }
    }
}

impl ContainerHooks for EmbeddingController {
    fn on_attribute_mutation(&mut self, name: &str, old: Option<&str>, new: Option<&str>) {
        let Some(name) = AttributeName::parse(name) else {
            return;
        };
        // An absent attribute and the empty string are one case.
        let old = old.filter(|v| !v.is_empty());
        let new = new.filter(|v| !v.is_empty());
        if old == new {
            return;
        }

        match name {
            AttributeName::Target => self.handle_target_mutation(old, new),
            // All five size attributes take the size path unconditionally.
            size => self.handle_size_mutation(size, new),
        }
    }

    fn on_attachment_signal(&mut self, attachment: AttachmentId) {
        if !self.base.observe_attachment(attachment) {
            return;
        }
        tracing::debug!(view = %self.view_instance, %attachment, "plugin surface ready");
        if self.target_id.is_some() {
            self.create_guest_if_necessary();
        }
    }

    fn on_size_changed(&mut self, new: Extent, old: Extent) {
        if self.defer_autosize {
            // Only the most recent pending resize survives.
            self.deferred = Some(DeferredResize { new, old });
            return;
        }
        self.resize(new, old);
    }

    fn on_detached(&mut self) {
        self.base.observe_detach();
        if let Some(guest) = self.guest.take() {
            tracing::info!(
                view = %self.view_instance,
                guest = %guest,
                "host element detached, destroying guest"
            );
            self.collab.guests.destroy_guest(guest);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::{
        AttributeMutation, AttributeSource, EventSink, GuestLifecycle, PluginSurface,
    };
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    /// Everything the mock collaborators observe, shared with the test.
    #[derive(Default)]
    struct Recording {
        attributes: HashMap<String, String>,
        attach_calls: Vec<(AttachmentId, GuestId, AttachParams)>,
        extents: Vec<Extent>,
        create_calls: Vec<(String, CreateParams)>,
        pending: VecDeque<oneshot::Sender<Option<GuestId>>>,
        destroyed: Vec<GuestId>,
        auto_size_calls: Vec<(GuestId, AutoSizeRequest)>,
        events: Vec<ContainerEvent>,
    }

    type Shared = Arc<Mutex<Recording>>;

    #[derive(Clone)]
    struct Mock(Shared);

    impl AttributeSource for Mock {
        fn write(&mut self, name: &str, value: &str) -> AttributeMutation {
            let mut rec = self.0.lock().unwrap();
            let old = rec.attributes.insert(name.to_string(), value.to_string());
            AttributeMutation {
                old,
                new: Some(value.to_string()),
            }
        }

        fn read(&self, name: &str) -> Option<String> {
            self.0.lock().unwrap().attributes.get(name).cloned()
        }
    }

    impl PluginSurface for Mock {
        fn attach_guest(
            &mut self,
            attachment: AttachmentId,
            guest: GuestId,
            params: &AttachParams,
        ) {
            self.0
                .lock()
                .unwrap()
                .attach_calls
                .push((attachment, guest, *params));
        }

        fn set_extent(&mut self, extent: Extent) {
            self.0.lock().unwrap().extents.push(extent);
        }
    }

    impl GuestLifecycle for Mock {
        fn create_guest(
            &mut self,
            kind: &str,
            params: &CreateParams,
        ) -> oneshot::Receiver<Option<GuestId>> {
            let (tx, rx) = oneshot::channel();
            let mut rec = self.0.lock().unwrap();
            rec.create_calls.push((kind.to_string(), params.clone()));
            rec.pending.push_back(tx);
            rx
        }

        fn destroy_guest(&mut self, guest: GuestId) {
            self.0.lock().unwrap().destroyed.push(guest);
        }

        fn set_auto_size(&mut self, guest: GuestId, request: &AutoSizeRequest) {
            self.0.lock().unwrap().auto_size_calls.push((guest, *request));
        }
    }

    impl EventSink for Mock {
        fn dispatch(&mut self, event: ContainerEvent) {
            self.0.lock().unwrap().events.push(event);
        }
    }

    const VIEWPORT: Extent = Extent::new(1024, 768);

    fn new_controller() -> (EmbeddingController, Shared) {
        new_controller_with_attributes(&[])
    }

    fn new_controller_with_attributes(attrs: &[(&str, &str)]) -> (EmbeddingController, Shared) {
        let shared: Shared = Arc::default();
        {
            let mut rec = shared.lock().unwrap();
            for (name, value) in attrs {
                rec.attributes.insert(name.to_string(), value.to_string());
            }
        }
        let collab = Collaborators {
            attributes: Box::new(Mock(shared.clone())),
            surface: Box::new(Mock(shared.clone())),
            guests: Box::new(Mock(shared.clone())),
            events: Box::new(Mock(shared.clone())),
        };
        let controller = EmbeddingController::new(collab, SizeDefaults::for_viewport(VIEWPORT))
            .expect("valid defaults");
        (controller, shared)
    }

    fn guest_id(raw: u32) -> GuestId {
        GuestId::from_raw(raw).expect("non-zero")
    }

    /// Attach the plugin surface and complete creation with the given id.
    fn attach_and_create(controller: &mut EmbeddingController, shared: &Shared, raw: u32) {
        controller.set_attribute(AttributeName::Target, "content-1");
        controller.on_attachment_signal(AttachmentId::new());
        assert_eq!(shared.lock().unwrap().create_calls.len(), 1);
        controller.handle_creation_complete(Some(guest_id(raw)));
    }

    #[test]
    fn test_initial_state() {
        let (controller, _) = new_controller();
        assert_eq!(controller.binding_state(), GuestBindingState::NoGuest);
        assert!(!controller.is_attached());
        assert!(controller.target_id().is_none());
        assert_eq!(controller.constraints().min, Extent::new(32, 32));
        assert_eq!(controller.constraints().max, VIEWPORT);
    }

    #[test]
    fn test_seed_from_declared_attributes() {
        let (controller, _) = new_controller_with_attributes(&[
            ("autosize", "on"),
            ("minwidth", "64"),
            ("maxwidth", "800"),
            ("target", "content-9"),
        ]);
        assert!(controller.autosize_enabled());
        assert_eq!(controller.constraints().min.width, 64);
        assert_eq!(controller.constraints().max.width, 800);
        assert_eq!(controller.target_id(), Some("content-9"));
        // No surface yet, so no creation either.
        assert_eq!(controller.binding_state(), GuestBindingState::NoGuest);
    }

    #[test]
    fn test_seed_resets_invalid_constraints() {
        let (controller, _) = new_controller_with_attributes(&[
            ("minwidth", "900"),
            ("maxwidth", "100"),
            ("minheight", "-3"),
        ]);
        assert_eq!(controller.constraints().min.width, 32);
        assert_eq!(controller.constraints().max.width, VIEWPORT.width);
        // The negative seed resets the height axis instead of clamping.
        assert_eq!(controller.constraints().min.height, 32);
        assert_eq!(controller.constraints().max.height, VIEWPORT.height);
    }

    #[test]
    fn test_target_before_attachment_defers_creation() {
        let (mut controller, shared) = new_controller();
        controller.set_attribute(AttributeName::Target, "content-1");
        assert_eq!(controller.binding_state(), GuestBindingState::NoGuest);
        assert!(shared.lock().unwrap().create_calls.is_empty());

        controller.on_attachment_signal(AttachmentId::new());
        assert_eq!(controller.binding_state(), GuestBindingState::Creating);
        let rec = shared.lock().unwrap();
        assert_eq!(rec.create_calls.len(), 1);
        assert_eq!(rec.create_calls[0].0, GUEST_KIND);
        assert_eq!(rec.create_calls[0].1.target_id, "content-1");
    }

    #[test]
    fn test_attachment_before_target_defers_creation() {
        let (mut controller, shared) = new_controller();
        controller.on_attachment_signal(AttachmentId::new());
        assert!(shared.lock().unwrap().create_calls.is_empty());

        controller.set_attribute(AttributeName::Target, "content-1");
        assert_eq!(controller.binding_state(), GuestBindingState::Creating);
        assert_eq!(shared.lock().unwrap().create_calls.len(), 1);
    }

    #[test]
    fn test_creation_is_at_most_once_in_flight() {
        let (mut controller, shared) = new_controller();
        controller.on_attachment_signal(AttachmentId::new());
        controller.set_attribute(AttributeName::Target, "content-1");
        // Second target write and a duplicate ready signal while creation
        // is pending must not issue another create.
        controller.set_attribute(AttributeName::Target, "content-2");
        controller.on_attachment_signal(AttachmentId::new());
        controller.create_guest_if_necessary();
        assert_eq!(shared.lock().unwrap().create_calls.len(), 1);
    }

    #[test]
    fn test_target_is_set_once() {
        let (mut controller, _) = new_controller();
        controller.set_attribute(AttributeName::Target, "content-1");
        controller.set_attribute(AttributeName::Target, "content-2");
        assert_eq!(controller.target_id(), Some("content-1"));
    }

    #[test]
    fn test_creation_success_attaches_with_current_box() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 7);

        assert_eq!(controller.binding_state(), GuestBindingState::Attached);
        assert_eq!(controller.guest(), Some(guest_id(7)));
        let rec = shared.lock().unwrap();
        assert_eq!(rec.attach_calls.len(), 1);
        let (_, guest, params) = rec.attach_calls[0];
        assert_eq!(guest, guest_id(7));
        assert_eq!(params.auto_size.min, Extent::new(32, 32));
        assert_eq!(params.auto_size.max, VIEWPORT);
    }

    #[test]
    fn test_creation_failure_fires_createfailed() {
        let (mut controller, shared) = new_controller();
        controller.on_attachment_signal(AttachmentId::new());
        controller.set_attribute(AttributeName::Target, "content-1");
        controller.handle_creation_complete(None);

        assert_eq!(controller.binding_state(), GuestBindingState::NoGuest);
        let rec = shared.lock().unwrap();
        assert_eq!(rec.events, vec![ContainerEvent::CreateFailed]);
        assert!(rec.attach_calls.is_empty());
    }

    #[test]
    fn test_detach_during_creation_destroys_orphan() {
        let (mut controller, shared) = new_controller();
        controller.on_attachment_signal(AttachmentId::new());
        controller.set_attribute(AttributeName::Target, "content-1");
        assert_eq!(controller.binding_state(), GuestBindingState::Creating);

        controller.on_detached();
        controller.handle_creation_complete(Some(guest_id(9)));

        assert_eq!(controller.binding_state(), GuestBindingState::NoGuest);
        assert!(controller.guest().is_none());
        let rec = shared.lock().unwrap();
        assert_eq!(rec.destroyed, vec![guest_id(9)]);
        assert_eq!(rec.events, vec![ContainerEvent::CreateFailed]);
        assert!(rec.attach_calls.is_empty());
    }

    #[test]
    fn test_detach_destroys_live_guest() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 4);

        controller.on_detached();
        assert_eq!(controller.binding_state(), GuestBindingState::NoGuest);
        assert_eq!(shared.lock().unwrap().destroyed, vec![guest_id(4)]);
    }

    #[test]
    fn test_reattach_when_guest_exists() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 4);

        // Surface recreated, guest unchanged: re-issue the attach only.
        controller.create_guest_if_necessary();
        let rec = shared.lock().unwrap();
        assert_eq!(rec.create_calls.len(), 1);
        assert_eq!(rec.attach_calls.len(), 2);
    }

    #[test]
    fn test_size_mutation_renegotiates_without_reattach() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 7);

        controller.set_attribute(AttributeName::MaxWidth, "500");
        let rec = shared.lock().unwrap();
        assert_eq!(rec.attach_calls.len(), 1);
        assert_eq!(rec.auto_size_calls.len(), 1);
        let (guest, request) = rec.auto_size_calls[0];
        assert_eq!(guest, guest_id(7));
        assert_eq!(request.max.width, 500);
    }

    #[test]
    fn test_size_mutation_without_guest_updates_only() {
        let (mut controller, shared) = new_controller();
        controller.set_attribute(AttributeName::MaxWidth, "500");
        assert_eq!(controller.constraints().max.width, 500);
        assert!(shared.lock().unwrap().auto_size_calls.is_empty());
    }

    #[test]
    fn test_invalid_bounds_reset_not_clamp() {
        let (mut controller, _) = new_controller();
        controller.set_attribute(AttributeName::MinWidth, "2000");
        // 2000 > viewport width: the whole width axis is back at defaults,
        // not clamped to the old max.
        assert_eq!(controller.constraints().min.width, 32);
        assert_eq!(controller.constraints().max.width, VIEWPORT.width);
    }

    #[test]
    fn test_negative_bound_resets_axis() {
        let (mut controller, _) = new_controller();
        controller.set_attribute(AttributeName::MinWidth, "-5");
        // Reset to defaults, not clamped to zero.
        assert_eq!(controller.constraints().min.width, 32);
        assert_eq!(controller.constraints().max.width, VIEWPORT.width);

        controller.set_attribute(AttributeName::MaxHeight, "-1");
        assert_eq!(controller.constraints().min.height, 32);
        assert_eq!(controller.constraints().max.height, VIEWPORT.height);
    }

    #[test]
    fn test_autosize_flag_follows_presence() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 7);

        controller.set_attribute(AttributeName::Autosize, "on");
        assert!(controller.autosize_enabled());
        let rec = shared.lock().unwrap();
        assert!(rec.auto_size_calls.last().unwrap().1.enable);
    }

    #[test]
    fn test_autosize_removal_renegotiates_disabled() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 7);
        controller.set_attribute(AttributeName::Autosize, "on");
        assert!(controller.autosize_enabled());

        // The attribute disappearing from the element flows back as a
        // mutation with no new value.
        controller.on_attribute_mutation("autosize", Some("on"), None);
        assert!(!controller.autosize_enabled());
        let rec = shared.lock().unwrap();
        assert_eq!(rec.auto_size_calls.len(), 2);
        let (guest, request) = *rec.auto_size_calls.last().unwrap();
        assert_eq!(guest, guest_id(7));
        assert!(!request.enable);
    }

    #[test]
    fn test_unknown_attribute_ignored() {
        let (mut controller, shared) = new_controller();
        controller.on_attribute_mutation("src", None, Some("x"));
        assert_eq!(controller.binding_state(), GuestBindingState::NoGuest);
        assert!(shared.lock().unwrap().create_calls.is_empty());
    }

    #[test]
    fn test_empty_and_absent_are_one_case() {
        let (mut controller, _) = new_controller();
        controller.on_attribute_mutation("target", Some(""), Some("content-1"));
        assert_eq!(controller.target_id(), Some("content-1"));
        // Empty new value is not a first assignment.
        let (mut other, _) = new_controller();
        other.on_attribute_mutation("target", None, Some(""));
        assert!(other.target_id().is_none());
    }

    #[test]
    fn test_resize_ratchets_minimum() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 7);

        controller.resize(Extent::new(50, 60), Extent::new(10, 10));
        assert_eq!(controller.constraints().min, Extent::new(50, 60));

        // Shrinking below the ratcheted minimum does not lower it.
        controller.resize(Extent::new(20, 20), Extent::new(50, 60));
        assert_eq!(controller.constraints().min, Extent::new(50, 60));

        let rec = shared.lock().unwrap();
        assert_eq!(rec.extents, vec![Extent::new(50, 60), Extent::new(20, 20)]);
        // Each resize re-sends the box.
        assert_eq!(rec.auto_size_calls.len(), 2);
        assert_eq!(rec.auto_size_calls[1].1.min, Extent::new(50, 60));
    }

    #[test]
    fn test_deferred_resize_keeps_only_latest() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 7);

        controller.set_defer_auto_size(true);
        controller.on_size_changed(Extent::new(100, 100), Extent::new(0, 0));
        controller.on_size_changed(Extent::new(200, 200), Extent::new(100, 100));
        assert!(shared.lock().unwrap().extents.is_empty());
        assert_eq!(
            controller.deferred(),
            Some(DeferredResize {
                new: Extent::new(200, 200),
                old: Extent::new(100, 100),
            })
        );

        controller.resume_deferred_auto_size();
        assert!(controller.deferred().is_none());
        assert_eq!(shared.lock().unwrap().extents, vec![Extent::new(200, 200)]);

        // A second resume is a no-op.
        controller.resume_deferred_auto_size();
        assert_eq!(shared.lock().unwrap().extents.len(), 1);
    }

    #[test]
    fn test_disable_defer_flushes_first() {
        let (mut controller, shared) = new_controller();
        attach_and_create(&mut controller, &shared, 7);

        controller.set_defer_auto_size(true);
        controller.on_size_changed(Extent::new(300, 150), Extent::new(0, 0));
        controller.set_defer_auto_size(false);

        assert!(!controller.defer_autosize());
        assert!(controller.deferred().is_none());
        assert_eq!(shared.lock().unwrap().extents, vec![Extent::new(300, 150)]);

        // Notifications now apply immediately again.
        controller.on_size_changed(Extent::new(310, 160), Extent::new(300, 150));
        assert_eq!(shared.lock().unwrap().extents.len(), 2);
    }

    #[test]
    fn test_accessor_table_round_trip() {
        let (mut controller, _) = new_controller();
        let max_width = crate::attributes::accessor(AttributeName::MaxWidth);
        (max_width.write)(&mut controller, "640");
        assert_eq!((max_width.read)(&controller), Some("640".to_string()));

        let target = crate::attributes::accessor(AttributeName::Target);
        assert_eq!((target.read)(&controller), None);
        (target.write)(&mut controller, "content-1");
        assert_eq!((target.read)(&controller), Some("content-1".to_string()));

        let autosize = crate::attributes::accessor(AttributeName::Autosize);
        assert_eq!((autosize.read)(&controller), None);
        (autosize.write)(&mut controller, "on");
        assert_eq!((autosize.read)(&controller), Some("on".to_string()));
    }

    #[test]
    fn test_invalid_defaults_rejected() {
        let shared: Shared = Arc::default();
        let collab = Collaborators {
            attributes: Box::new(Mock(shared.clone())),
            surface: Box::new(Mock(shared.clone())),
            guests: Box::new(Mock(shared.clone())),
            events: Box::new(Mock(shared)),
        };
        let defaults = SizeDefaults {
            min: Extent::new(64, 64),
            max: Extent::new(16, 16),
        };
        assert!(matches!(
            EmbeddingController::new(collab, defaults),
            Err(CoreError::InvalidDefaults { .. })
        ));
    }
}
