//! Simulated guest-lifecycle service.
//!
//! Stands in for the transport that creates, destroys, and resizes guest
//! processes: creations resolve asynchronously on a spawned task after a
//! configurable delay, and failures can be scripted. Guests live as records
//! in a registry so tests and the demo can observe them.

use alcove_core::{AutoSizeRequest, CreateParams, GuestId, GuestLifecycle};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

/// A live simulated guest.
#[derive(Debug, Clone)]
pub struct GuestRecord {
    /// Parameters the guest was created with.
    pub params: CreateParams,
    /// When the creation completed.
    pub created_at: DateTime<Utc>,
    /// The most recent autosize box, once one has been sent.
    pub auto_size: Option<AutoSizeRequest>,
}

#[derive(Default)]
struct SimState {
    next_id: u32,
    scripted_failures: u32,
    create_calls: u32,
    guests: HashMap<GuestId, GuestRecord>,
    destroyed: Vec<GuestId>,
    auto_size_log: Vec<(GuestId, AutoSizeRequest)>,
}

/// In-process guest-lifecycle service.
///
/// Cheaply cloneable; all clones share one registry.
#[derive(Clone)]
pub struct SimGuestService {
    inner: Arc<Mutex<SimState>>,
    delay: Duration,
}

impl SimGuestService {
    /// Create a service whose creations complete after `delay`.
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(SimState {
                next_id: 1,
                ..SimState::default()
            })),
            delay,
        }
    }

    /// Make the next `count` creations fail with the zero-id result.
    pub fn fail_next(&self, count: u32) {
        self.inner.lock().expect("service lock").scripted_failures = count;
    }

    /// How many creation requests have been issued.
    pub fn create_calls(&self) -> u32 {
        self.inner.lock().expect("service lock").create_calls
    }

    /// Number of currently live guests.
    pub fn live_guests(&self) -> usize {
        self.inner.lock().expect("service lock").guests.len()
    }

    /// Snapshot of a live guest's record.
    pub fn record(&self, guest: GuestId) -> Option<GuestRecord> {
        self.inner
            .lock()
            .expect("service lock")
            .guests
            .get(&guest)
            .cloned()
    }

    /// Guests destroyed so far, in order.
    pub fn destroyed(&self) -> Vec<GuestId> {
        self.inner.lock().expect("service lock").destroyed.clone()
    }

    /// Every autosize update received, in order.
    pub fn auto_size_log(&self) -> Vec<(GuestId, AutoSizeRequest)> {
        self.inner.lock().expect("service lock").auto_size_log.clone()
    }
}

impl GuestLifecycle for SimGuestService {
    fn create_guest(
        &mut self,
        kind: &str,
        params: &CreateParams,
    ) -> oneshot::Receiver<Option<GuestId>> {
        let (tx, rx) = oneshot::channel();
        let (id, fail) = {
            let mut state = self.inner.lock().expect("service lock");
            state.create_calls += 1;
            let fail = state.scripted_failures > 0;
            if fail {
                state.scripted_failures -= 1;
            }
            let id = GuestId::from_raw(state.next_id);
            state.next_id += 1;
            (id, fail)
        };
        tracing::debug!(kind, target = %params.target_id, fail, "guest creation requested");

        let inner = self.inner.clone();
        let delay = self.delay;
        let params = params.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let result = if fail { None } else { id };
            if let Some(id) = result {
                let mut state = inner.lock().expect("service lock");
                state.guests.insert(
                    id,
                    GuestRecord {
                        params,
                        created_at: Utc::now(),
                        auto_size: None,
                    },
                );
            }
            // The controller may already be gone; a dead receiver is fine.
            let _ = tx.send(result);
        });
        rx
    }

    fn destroy_guest(&mut self, guest: GuestId) {
        let mut state = self.inner.lock().expect("service lock");
        if state.guests.remove(&guest).is_none() {
            tracing::warn!(%guest, "destroy for unknown guest ignored");
            return;
        }
        tracing::debug!(%guest, "guest destroyed");
        state.destroyed.push(guest);
    }

    fn set_auto_size(&mut self, guest: GuestId, request: &AutoSizeRequest) {
        let mut state = self.inner.lock().expect("service lock");
        state.auto_size_log.push((guest, *request));
        match state.guests.get_mut(&guest) {
            Some(record) => record.auto_size = Some(*request),
            None => tracing::warn!(%guest, "autosize for unknown guest ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_creation_resolves_with_sequential_ids() {
        let mut service = SimGuestService::new(Duration::from_millis(10));
        let params = CreateParams {
            target_id: "content-1".into(),
        };
        let first = service.create_guest("embedded-view", &params);
        let second = service.create_guest("embedded-view", &params);

        assert_eq!(first.await.unwrap().unwrap().as_u32(), 1);
        assert_eq!(second.await.unwrap().unwrap().as_u32(), 2);
        assert_eq!(service.create_calls(), 2);
        assert_eq!(service.live_guests(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_scripted_failure_still_consumes_an_id() {
        let mut service = SimGuestService::new(Duration::from_millis(10));
        service.fail_next(1);
        let params = CreateParams {
            target_id: "content-1".into(),
        };
        let failed = service.create_guest("embedded-view", &params);
        assert_eq!(failed.await.unwrap(), None);
        assert_eq!(service.live_guests(), 0);

        let ok = service.create_guest("embedded-view", &params);
        assert!(ok.await.unwrap().is_some());
        assert_eq!(service.live_guests(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_destroy_and_auto_size() {
        let mut service = SimGuestService::new(Duration::from_millis(1));
        let params = CreateParams {
            target_id: "content-1".into(),
        };
        let rx = service.create_guest("embedded-view", &params);
        let id = rx.await.unwrap().unwrap();

        let request = AutoSizeRequest {
            enable: true,
            min: alcove_core::Extent::new(32, 32),
            max: alcove_core::Extent::new(800, 600),
        };
        service.set_auto_size(id, &request);
        assert_eq!(service.record(id).unwrap().auto_size, Some(request));

        service.destroy_guest(id);
        assert_eq!(service.live_guests(), 0);
        assert_eq!(service.destroyed(), vec![id]);

        // Destroying again is a tolerated no-op.
        service.destroy_guest(id);
        assert_eq!(service.destroyed(), vec![id]);
    }
}
