//! Async event loop around the survey store
//!
//! Intents are applied one at a time in arrival order. The only background
//! work is the alert auto-hide timer: each shown alert replaces the pending
//! timer, and an expiry only hides the alert generation it was scheduled for.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::store::{Effect, Intent, SurveyStore};

/// Events sent from handles to the runtime
#[derive(Debug)]
pub enum StoreEvent {
    Intent(Intent),
    /// Stop the loop and hand the store back
    Shutdown,
}

/// Handle to feed the runtime
#[derive(Clone)]
pub struct EditorHandle {
    event_tx: mpsc::UnboundedSender<StoreEvent>,
}

impl EditorHandle {
    /// Queue an intent for the store
    pub fn dispatch(&self, intent: Intent) {
        let _ = self.event_tx.send(StoreEvent::Intent(intent));
    }

    /// Shutdown the runtime
    pub fn shutdown(&self) {
        let _ = self.event_tx.send(StoreEvent::Shutdown);
    }
}

/// Owns the store while it runs
pub struct EditorRuntime {
    store: SurveyStore,
    event_rx: mpsc::UnboundedReceiver<StoreEvent>,
    /// Alert generations whose hide delay elapsed
    expiry_tx: mpsc::UnboundedSender<u64>,
    expiry_rx: mpsc::UnboundedReceiver<u64>,
    alert_timer: Option<JoinHandle<()>>,
}

impl EditorRuntime {
    pub fn new(store: SurveyStore) -> (Self, EditorHandle) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();

        let runtime = Self {
            store,
            event_rx,
            expiry_tx,
            expiry_rx,
            alert_timer: None,
        };

        (runtime, EditorHandle { event_tx })
    }

    /// Register observers before the loop starts
    pub fn store_mut(&mut self) -> &mut SurveyStore {
        &mut self.store
    }

    /// Main loop. Runs until shutdown or until every handle is dropped.
    pub async fn run(mut self) -> SurveyStore {
        self.run_effects();

        loop {
            tokio::select! {
                event = self.event_rx.recv() => match event {
                    Some(StoreEvent::Intent(intent)) => {
                        // Failures already surfaced as an alert by the store
                        let _ = self.store.dispatch(intent);
                        self.run_effects();
                    }
                    Some(StoreEvent::Shutdown) | None => break,
                },
                Some(generation) = self.expiry_rx.recv() => {
                    if self.store.expire_alert(generation) {
                        tracing::debug!(generation, "Alert hidden");
                    }
                }
            }
        }

        if let Some(timer) = self.alert_timer.take() {
            timer.abort();
        }
        tracing::debug!("Editor runtime stopped");
        self.store
    }

    fn run_effects(&mut self) {
        for effect in self.store.drain_effects() {
            match effect {
                Effect::ScheduleAlertHide { generation, after } => {
                    if let Some(previous) = self.alert_timer.take() {
                        previous.abort();
                    }
                    let expiry_tx = self.expiry_tx.clone();
                    self.alert_timer = Some(tokio::spawn(async move {
                        tokio::time::sleep(after).await;
                        let _ = expiry_tx.send(generation);
                    }));
                }
            }
        }
    }
}
