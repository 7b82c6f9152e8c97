//! The host element: attribute store and event target.

use alcove_core::{AttributeMutation, AttributeSource, ContainerEvent, EventSink};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

type Listener = Box<dyn FnMut(ContainerEvent) + Send>;

#[derive(Default)]
struct ElementState {
    attributes: HashMap<String, String>,
    dispatched: Vec<ContainerEvent>,
    listeners: Vec<Listener>,
}

/// The declarative container element that owns a controller.
///
/// Holds the attribute map the controller's accessor table writes through,
/// and receives the `createfailed` events the controller dispatches.
/// Cheaply cloneable; all clones share one element.
#[derive(Clone, Default)]
pub struct HostElement {
    inner: Arc<Mutex<ElementState>>,
}

impl HostElement {
    /// Create an element with no attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an element with attributes already declared, as markup would.
    pub fn with_attributes(attrs: &[(&str, &str)]) -> Self {
        let element = Self::new();
        {
            let mut state = element.inner.lock().expect("element lock");
            for (name, value) in attrs {
                state.attributes.insert(name.to_string(), value.to_string());
            }
        }
        element
    }

    /// Set an attribute, returning the mutation an observer would report.
    pub fn set_attribute(&self, name: &str, value: &str) -> AttributeMutation {
        let mut state = self.inner.lock().expect("element lock");
        let old = state.attributes.insert(name.to_string(), value.to_string());
        tracing::trace!(name, value, "attribute set");
        AttributeMutation {
            old,
            new: Some(value.to_string()),
        }
    }

    /// Remove an attribute, returning the mutation an observer would report.
    pub fn remove_attribute(&self, name: &str) -> AttributeMutation {
        let mut state = self.inner.lock().expect("element lock");
        let old = state.attributes.remove(name);
        tracing::trace!(name, "attribute removed");
        AttributeMutation { old, new: None }
    }

    /// Read an attribute's current value.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.inner
            .lock()
            .expect("element lock")
            .attributes
            .get(name)
            .cloned()
    }

    /// Register a listener for `createfailed`.
    pub fn on_create_failed(&self, mut listener: impl FnMut() + Send + 'static) {
        self.inner
            .lock()
            .expect("element lock")
            .listeners
            .push(Box::new(move |event| {
                if event == ContainerEvent::CreateFailed {
                    listener();
                }
            }));
    }

    /// Every event dispatched on this element so far.
    pub fn dispatched_events(&self) -> Vec<ContainerEvent> {
        self.inner.lock().expect("element lock").dispatched.clone()
    }
}

impl AttributeSource for HostElement {
    fn write(&mut self, name: &str, value: &str) -> AttributeMutation {
        HostElement::set_attribute(self, name, value)
    }

    fn read(&self, name: &str) -> Option<String> {
        self.attribute(name)
    }
}

impl EventSink for HostElement {
    fn dispatch(&mut self, event: ContainerEvent) {
        let mut state = self.inner.lock().expect("element lock");
        tracing::debug!(event = event.name(), bubbles = event.bubbles(), "event dispatched");
        state.dispatched.push(event);
        let mut listeners = std::mem::take(&mut state.listeners);
        drop(state);
        for listener in &mut listeners {
            listener(event);
        }
        self.inner
            .lock()
            .expect("element lock")
            .listeners
            .extend(listeners);
    }
}
