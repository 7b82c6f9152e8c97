//! The single-task event loop driving one controller.
//!
//! All mutations of a controller happen on this one task; the only
//! suspension point besides the event channel is the pending guest-creation
//! completion, and at most one of those exists at a time, so ordering is
//! first-in-first-out per controller.

use crate::container::ContainerHooks;
use crate::controller::EmbeddingController;
use crate::events::ControllerEvent;
use tokio::sync::mpsc;

/// Drive a controller from a stream of external events.
///
/// Runs until the host element detaches or the event source closes, with
/// one exception: an in-flight creation is always awaited first, so a guest
/// created after detach is reclaimed and `createfailed` is dispatched
/// rather than leaked. Closing the channel tears down like a detach.
///
/// Returns the controller for post-run inspection.
pub async fn run(
    mut controller: EmbeddingController,
    mut events: mpsc::UnboundedReceiver<ControllerEvent>,
) -> EmbeddingController {
    // Creation completions come back through an internal queue so the
    // select below only ever borrows local channels.
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();
    let mut open = true;
    loop {
        if let Some(receiver) = controller.take_creation_receiver() {
            let done_tx = done_tx.clone();
            tokio::spawn(async move {
                // A dropped sender means the lifecycle service went away;
                // that counts as a failed creation.
                let _ = done_tx.send(receiver.await.unwrap_or(None));
            });
        }

        tokio::select! {
            Some(guest) = done_rx.recv() => {
                controller.handle_creation_complete(guest);
                if !controller.is_attached() {
                    break;
                }
            }
            event = events.recv(), if open => {
                match event {
                    Some(ControllerEvent::Detached) => {
                        controller.on_detached();
                        // Hold on for the in-flight creation so its guest
                        // can be reclaimed.
                        if !controller.pending_creation() {
                            break;
                        }
                    }
                    Some(event) => event.apply(&mut controller),
                    None => {
                        open = false;
                        controller.on_detached();
                        if !controller.pending_creation() {
                            break;
                        }
                    }
                }
            }
        }
    }
    controller
}
