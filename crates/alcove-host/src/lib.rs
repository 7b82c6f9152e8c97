//! # alcove-host
//!
//! In-process host environment for alcove embedding controllers.
//!
//! Provides concrete collaborators a controller can be wired to without a
//! real document or guest transport:
//!
//! - [`HostElement`]: attribute store and `createfailed` event target
//! - [`RecordingSurface`]: plugin surface recording attach/resize calls
//! - [`SimGuestService`]: guest lifecycle with delayed, scriptable
//!   creation completions
//! - [`EmbeddingSession`]: one controller wired up and running on its
//!   own task
//!
//! ## Quick Start
//!
//! ```ignore
//! use alcove_core::{Extent, SizeDefaults};
//! use alcove_host::{EmbeddingSession, SimGuestService};
//! use std::time::Duration;
//!
//! # async fn example() -> alcove_host::Result<()> {
//! let guests = SimGuestService::new(Duration::from_millis(20));
//! let session = EmbeddingSession::start(
//!     SizeDefaults::for_viewport(Extent::new(1280, 800)),
//!     guests.clone(),
//! )?;
//!
//! session.set_attribute("target", "settings-pane")?;
//! session.attach()?;
//! // ... the controller creates and attaches a guest asynchronously.
//!
//! session.detach()?;
//! let controller = session.shutdown().await?;
//! assert!(controller.guest().is_none());
//! # Ok(())
//! # }
//! ```

mod element;
mod error;
mod guest;
mod session;
mod surface;

pub use element::HostElement;
pub use error::{HostError, Result};
pub use guest::{GuestRecord, SimGuestService};
pub use session::EmbeddingSession;
pub use surface::{AttachCall, RecordingSurface};
