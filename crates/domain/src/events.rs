//! Bundle lifecycle events.

use std::sync::Arc;

use alloy_primitives::{Address, B256};
use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use parking_lot::Mutex;

use crate::ActionId;

/// Events emitted by the execution ledger as bundles move through their
/// lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BundleEvent {
    /// A new bundle commitment was approved.
    BundleApproved {
        /// Committed Merkle root.
        root: B256,
        /// Committed action count.
        size: u64,
    },
    /// One action of the active bundle was executed.
    ActionExecuted {
        /// Leaf index of the executed action.
        index: u64,
        /// Identifier of the executed action.
        id: ActionId,
    },
    /// The active bundle reached full execution and auto-cleared.
    BundleCompleted {
        /// Root of the completed bundle.
        root: B256,
    },
    /// The active bundle was canceled; already-applied effects persist.
    BundleCanceled {
        /// Root of the canceled bundle.
        root: B256,
        /// Number of actions that had executed before cancellation.
        executed: u64,
    },
    /// Ownership moved to a new authority.
    OwnerChanged {
        /// Previous owner.
        previous: Address,
        /// New owner.
        new: Address,
    },
}

/// Pub-sub registry for bundle events.
#[derive(Clone, Debug)]
pub struct BundleEvents {
    listeners: Arc<Mutex<Vec<UnboundedSender<BundleEvent>>>>,
}

impl BundleEvents {
    /// Create a new, empty event registry.
    #[must_use]
    pub fn new() -> Self {
        Self { listeners: Arc::new(Mutex::new(Vec::new())) }
    }

    /// Publish an event to all current subscribers, dropping closed channels.
    pub fn publish(&self, event: BundleEvent) {
        let mut guard = self.listeners.lock();
        guard.retain(|sender| sender.unbounded_send(event.clone()).is_ok());
    }

    /// Subscribe to bundle events and receive a stream of updates.
    pub fn subscribe(&self) -> UnboundedReceiver<BundleEvent> {
        let (sender, receiver) = unbounded();
        self.listeners.lock().push(sender);
        receiver
    }
}

impl Default for BundleEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_events_new() {
        let events = BundleEvents::new();
        assert_eq!(events.listeners.lock().len(), 0);
    }

    #[test]
    fn bundle_events_default() {
        let events = BundleEvents::default();
        assert_eq!(events.listeners.lock().len(), 0);
    }

    #[test]
    fn bundle_events_subscribe_adds_listener() {
        let events = BundleEvents::new();
        let _receiver = events.subscribe();
        assert_eq!(events.listeners.lock().len(), 1);
    }

    #[test]
    fn bundle_events_publish_to_subscriber() {
        let events = BundleEvents::new();
        let mut receiver = events.subscribe();

        events.publish(BundleEvent::BundleApproved { root: B256::repeat_byte(0x42), size: 3 });

        let received = receiver.try_next().expect("channel open").expect("should receive event");
        assert_eq!(received, BundleEvent::BundleApproved { root: B256::repeat_byte(0x42), size: 3 });
    }

    #[test]
    fn bundle_events_publish_to_multiple_subscribers() {
        let events = BundleEvents::new();
        let mut r1 = events.subscribe();
        let mut r2 = events.subscribe();

        events.publish(BundleEvent::BundleCompleted { root: B256::repeat_byte(0x01) });

        let e1 = r1.try_next().expect("channel open").expect("r1 should receive");
        let e2 = r2.try_next().expect("channel open").expect("r2 should receive");

        assert!(matches!(e1, BundleEvent::BundleCompleted { .. }));
        assert!(matches!(e2, BundleEvent::BundleCompleted { .. }));
    }

    #[test]
    fn bundle_events_removes_closed_channels() {
        let events = BundleEvents::new();
        let receiver = events.subscribe();
        assert_eq!(events.listeners.lock().len(), 1);

        drop(receiver);

        events.publish(BundleEvent::BundleCanceled { root: B256::ZERO, executed: 0 });
        assert_eq!(events.listeners.lock().len(), 0);
    }

    #[test]
    fn bundle_events_preserve_order() {
        let events = BundleEvents::new();
        let mut receiver = events.subscribe();

        events.publish(BundleEvent::ActionExecuted {
            index: 0,
            id: ActionId(B256::repeat_byte(0x0A)),
        });
        events.publish(BundleEvent::ActionExecuted {
            index: 1,
            id: ActionId(B256::repeat_byte(0x0B)),
        });

        let first = receiver.try_next().expect("channel open").expect("first event");
        let second = receiver.try_next().expect("channel open").expect("second event");
        assert!(matches!(first, BundleEvent::ActionExecuted { index: 0, .. }));
        assert!(matches!(second, BundleEvent::ActionExecuted { index: 1, .. }));
    }
}
