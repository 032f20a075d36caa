//! Async driver for the sync core
//!
//! Owns the HTTP client and turns mutation intents into spawned requests.
//! Each request runs as an independent tokio task and reports its outcome
//! as a [`Transition`] over an unbounded channel; the presentation loop is
//! the single consumer and applies them to the state container in arrival
//! order (last response to arrive wins).
//!
//! Requests are never cancelled: once sent, a task always delivers its
//! transition when it resolves.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;
use uuid::Uuid;

use super::state::Transition;
use crate::client::PersonClient;

/// How long a notification stays on screen
pub const NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

/// Async driver for the Client Sync Core
pub struct SyncHandle {
    client: PersonClient,
    event_tx: mpsc::UnboundedSender<Transition>,
    event_rx: Option<mpsc::UnboundedReceiver<Transition>>,
    clear_delay: Duration,
}

impl SyncHandle {
    /// Create a driver over an API client
    pub fn new(client: PersonClient) -> Self {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Self {
            client,
            event_tx,
            event_rx: Some(event_rx),
            clear_delay: NOTIFICATION_TTL,
        }
    }

    /// Override the notification display window (for tests)
    pub fn with_clear_delay(mut self, delay: Duration) -> Self {
        self.clear_delay = delay;
        self
    }

    /// Take the event receiver (can only be called once)
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<Transition>> {
        self.event_rx.take()
    }

    /// Fetch the whole collection once (startup load)
    pub fn load(&self) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let transition = match client.list().await {
                Ok(persons) => Transition::Loaded(persons),
                Err(e) => Transition::LoadFailed(e.to_string()),
            };
            let _ = tx.send(transition);
        });
    }

    /// Create a new contact
    pub fn create(&self, name: String, number: String) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let transition = match client.create(&name, &number).await {
                Ok(person) => Transition::CreateSucceeded(person),
                Err(e) => Transition::CreateFailed {
                    name,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(transition);
        });
    }

    /// Replace the number (and name) of an existing contact
    pub fn replace(&self, id: Uuid, name: String, number: String) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let transition = match client.update(id, &name, &number).await {
                Ok(person) => Transition::ReplaceSucceeded(person),
                Err(e) => Transition::ReplaceFailed {
                    id,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(transition);
        });
    }

    /// Delete a contact; `name` is carried for the notification text
    pub fn delete(&self, id: Uuid, name: String) {
        let client = self.client.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let transition = match client.delete(id).await {
                Ok(()) => Transition::DeleteSucceeded { id, name },
                Err(e) => Transition::DeleteFailed {
                    id,
                    message: e.to_string(),
                },
            };
            let _ = tx.send(transition);
        });
    }

    /// Schedule the auto-clear for the notification with the given seq
    ///
    /// Fire-and-forget; the reducer ignores the clear if a newer
    /// notification has replaced the one this timer belongs to.
    pub fn schedule_clear(&self, seq: u64) {
        let tx = self.event_tx.clone();
        let delay = self.clear_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            debug!(seq, "notification clear timer fired");
            let _ = tx.send(Transition::ClearNotification(seq));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_take_events_is_one_shot() {
        let mut handle = SyncHandle::new(PersonClient::new("http://127.0.0.1:1"));
        assert!(handle.take_events().is_some());
        assert!(handle.take_events().is_none());
    }

    #[tokio::test]
    async fn test_schedule_clear_emits_after_delay() {
        let mut handle = SyncHandle::new(PersonClient::new("http://127.0.0.1:1"))
            .with_clear_delay(Duration::from_millis(10));
        let mut events = handle.take_events().unwrap();

        handle.schedule_clear(7);

        let transition = events.recv().await.unwrap();
        assert!(matches!(transition, Transition::ClearNotification(7)));
    }

    #[tokio::test]
    async fn test_load_failure_reports_transition() {
        // Nothing listens on this port, so the load fails and the failure
        // arrives as a transition instead of being swallowed.
        let mut handle = SyncHandle::new(PersonClient::new("http://127.0.0.1:1"));
        let mut events = handle.take_events().unwrap();

        handle.load();

        let transition = events.recv().await.unwrap();
        assert!(matches!(transition, Transition::LoadFailed(_)));
    }
}
