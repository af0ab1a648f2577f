//! Registered listeners for aggregate state changes.

use super::AppState;

/// Subscription handle returned by `subscribe`.
pub type SubscriptionId = usize;

/// Callback invoked synchronously with the state after each dispatch.
pub type Observer = Box<dyn Fn(&AppState) + Send>;

/// Observers in subscription order.
#[derive(Default)]
pub struct Observers {
    next_id: SubscriptionId,
    entries: Vec<(SubscriptionId, Observer)>,
}

impl Observers {
    pub fn subscribe(&mut self, observer: Observer) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    /// Returns false if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn notify(&self, state: &AppState) {
        for (_, observer) in &self.entries {
            observer(state);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for Observers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Observers")
            .field("count", &self.entries.len())
            .finish()
    }
}
