//! # alcove-core
//!
//! Embedding controller for remote, out-of-process guest views.
//!
//! One [`EmbeddingController`] manages the guest-view binding of one host
//! element: it reacts to attribute mutations, the plugin surface's ready
//! signal, and guest size-change notifications, and in turn drives guest
//! creation, attachment, destruction, and the autosize negotiation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  host environment                        │
//! │  attribute mutations · attachment signal · size changes  │
//! └──────────────┬───────────────────────────────────────────┘
//!                │ ControllerEvent (mpsc, FIFO per controller)
//!                ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │  run loop (one task)                                     │
//! │  ┌────────────────────┐    pending creation (oneshot)    │
//! │  │ EmbeddingController│◀───────────────────────────────┐ │
//! │  │  - target id       │                                │ │
//! │  │  - size constraints│    ┌─────────────────────────┐ │ │
//! │  │  - guest binding   │───▶│ Collaborators           │─┘ │
//! │  └────────────────────┘    │  AttributeSource        │   │
//! │                            │  PluginSurface          │   │
//! │                            │  GuestLifecycle         │   │
//! │                            │  EventSink (createfailed)│  │
//! │                            └─────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//!
//! - At most one guest creation in flight per controller; duplicate
//!   triggers are no-ops.
//! - A guest never outlives its host element: a creation completing after
//!   detach is destroyed on the spot and reported as `createfailed`.
//! - `min <= max` holds on both constraint axes after every mutation; a
//!   violating update resets the whole axis to the defaults.
//! - The minimum bounds only ratchet upward from observed content sizes.

mod attributes;
mod collaborators;
mod container;
mod controller;
mod error;
mod events;
mod ids;
mod run;
mod size;

pub use attributes::{accessor, Accessor, AttributeName, ACCESSORS};
pub use collaborators::{
    AttachParams, AttributeMutation, AttributeSource, Collaborators, CreateParams, EventSink,
    GuestLifecycle, PluginSurface, GUEST_KIND,
};
pub use container::{ContainerBase, ContainerHooks};
pub use controller::{EmbeddingController, GuestBindingState};
pub use error::{CoreError, Result};
pub use events::{ContainerEvent, ControllerEvent};
pub use ids::{AttachmentId, GuestId, ViewInstanceId};
pub use run::run;
pub use size::{
    AutoSizeRequest, DeferredResize, Extent, SizeConstraints, SizeDefaults, DEFAULT_MIN_EXTENT,
};
