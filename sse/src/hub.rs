use crate::message::Message;
use crate::registry::{SubscriberId, SubscriberRegistry};
use crate::subscription::Subscription;
use log::*;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Default number of pending messages a subscriber may buffer before new
/// messages are dropped for it.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 100;

/// Outcome of a single publish, for observability only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Subscribers whose mailbox accepted the message
    pub delivered: usize,
    /// Subscribers whose mailbox was full (or already closed)
    pub dropped: usize,
}

/// Fans published messages out to every registered subscriber.
///
/// Each subscriber owns a bounded mailbox. Publishing never waits on a slow
/// subscriber: when its mailbox is full the message is dropped for that
/// subscriber alone. Cloning a `Hub` yields another handle to the same
/// registry.
#[derive(Clone)]
pub struct Hub {
    registry: Arc<SubscriberRegistry>,
    capacity: NonZeroUsize,
    dropped: Arc<AtomicU64>,
}

impl Hub {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            registry: Arc::new(SubscriberRegistry::new()),
            capacity,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Allocate a mailbox, add it to the registry and hand back the
    /// subscription that owns it.
    pub fn register(&self) -> Subscription {
        let id = SubscriberId::new();
        let (sender, mailbox) = mpsc::channel(self.capacity.get());

        self.registry.insert(id.clone(), sender);
        debug!(
            "Registered subscriber {} (active={})",
            id.as_str(),
            self.registry.len()
        );

        Subscription::new(id, mailbox, self.clone())
    }

    /// Remove a subscriber's mailbox from the registry.
    ///
    /// Idempotent: returns `false` when the subscriber was already removed.
    pub fn unregister(&self, id: &SubscriberId) -> bool {
        let removed = self.registry.remove(id);
        if removed {
            debug!(
                "Unregistered subscriber {} (active={})",
                id.as_str(),
                self.registry.len()
            );
        }
        removed
    }

    /// Offer `message` to every registered mailbox without blocking.
    pub fn publish(&self, message: Message) -> Delivery {
        let mut delivery = Delivery::default();

        for (id, sender) in self.registry.snapshot() {
            match sender.try_send(message.clone()) {
                Ok(()) => delivery.delivered += 1,
                Err(TrySendError::Full(_)) => {
                    delivery.dropped += 1;
                    debug!("Mailbox full, dropping message for subscriber {}", id.as_str());
                }
                Err(TrySendError::Closed(_)) => {
                    // Subscription is mid-close; it unregisters itself.
                    delivery.dropped += 1;
                    trace!("Mailbox closed for subscriber {}", id.as_str());
                }
            }
        }

        if delivery.dropped > 0 {
            self.dropped
                .fetch_add(delivery.dropped as u64, Ordering::Relaxed);
        }

        debug!(
            "Published message (delivered={}, dropped={})",
            delivery.delivered, delivery.dropped
        );

        delivery
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_registered(&self, id: &SubscriberId) -> bool {
        self.registry.contains(id)
    }

    /// Total messages dropped across all subscribers since the hub was created.
    pub fn dropped_total(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_MAILBOX_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn hub_with_capacity(capacity: usize) -> Hub {
        Hub::new(NonZeroUsize::new(capacity).unwrap())
    }

    fn msg(text: &str) -> Message {
        Message::new(text).unwrap()
    }

    #[test]
    fn test_default_capacity() {
        assert_eq!(Hub::default().capacity().get(), DEFAULT_MAILBOX_CAPACITY);
    }

    #[test]
    fn test_register_then_unregister_restores_registry_size() {
        let hub = Hub::default();
        let _existing = hub.register();
        let before = hub.subscriber_count();

        let subscription = hub.register();
        assert_eq!(hub.subscriber_count(), before + 1);

        assert!(hub.unregister(subscription.id()));
        assert_eq!(hub.subscriber_count(), before);
    }

    #[test]
    fn test_unregister_is_idempotent() {
        let hub = Hub::default();
        let subscription = hub.register();
        let id = subscription.id().clone();

        assert!(hub.unregister(&id));
        assert!(!hub.unregister(&id));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let hub = Hub::default();
        assert_eq!(hub.publish(msg("nobody")), Delivery::default());
        assert_eq!(hub.dropped_total(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_single_subscriber_receives_in_order_then_ends_on_cancel() {
        let hub = hub_with_capacity(3);
        let mut s1 = hub.register();
        let cancel = CancellationToken::new();

        hub.publish(msg("hello 1"));
        hub.publish(msg("hello 2"));

        assert_eq!(s1.next(&cancel).await, Ok(Some(msg("hello 1"))));
        assert_eq!(s1.next(&cancel).await, Ok(Some(msg("hello 2"))));

        // Nothing pending: next suspends
        let pending = tokio::time::timeout(Duration::from_millis(50), s1.next(&cancel)).await;
        assert!(pending.is_err());

        cancel.cancel();
        assert_eq!(s1.next(&cancel).await, Ok(None));
    }

    #[tokio::test]
    async fn test_every_subscriber_receives_each_message() {
        let hub = Hub::default();
        let mut s1 = hub.register();
        let mut s2 = hub.register();
        let cancel = CancellationToken::new();

        let delivery = hub.publish(msg("x"));
        assert_eq!(
            delivery,
            Delivery {
                delivered: 2,
                dropped: 0
            }
        );

        assert_eq!(s1.next(&cancel).await, Ok(Some(msg("x"))));
        assert_eq!(s2.next(&cancel).await, Ok(Some(msg("x"))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_mailbox_drops_only_for_slow_subscriber() {
        let hub = hub_with_capacity(1);
        let mut slow = hub.register();
        let mut fast = hub.register();
        let cancel = CancellationToken::new();

        assert_eq!(hub.publish(msg("a")).delivered, 2);
        assert_eq!(fast.next(&cancel).await, Ok(Some(msg("a"))));

        let delivery = hub.publish(msg("b"));
        assert_eq!(
            delivery,
            Delivery {
                delivered: 1,
                dropped: 1
            }
        );
        assert_eq!(hub.dropped_total(), 1);

        assert_eq!(fast.next(&cancel).await, Ok(Some(msg("b"))));
        assert_eq!(slow.next(&cancel).await, Ok(Some(msg("a"))));

        let pending = tokio::time::timeout(Duration::from_millis(50), slow.next(&cancel)).await;
        assert!(pending.is_err(), "\"b\" should have been dropped for the slow subscriber");
    }

    #[tokio::test]
    async fn test_concurrent_subscribers_receive_all_messages_in_publish_order() {
        const MESSAGES: usize = 50;
        const SUBSCRIBERS: usize = 8;

        let hub = hub_with_capacity(MESSAGES);
        let cancel = CancellationToken::new();

        let mut consumers = Vec::new();
        for _ in 0..SUBSCRIBERS {
            let mut subscription = hub.register();
            let cancel = cancel.clone();
            consumers.push(tokio::spawn(async move {
                let mut received = Vec::with_capacity(MESSAGES);
                while received.len() < MESSAGES {
                    match subscription.next(&cancel).await {
                        Ok(Some(message)) => received.push(message.to_string()),
                        _ => break,
                    }
                }
                received
            }));
        }

        let publisher = {
            let hub = hub.clone();
            tokio::spawn(async move {
                for i in 1..=MESSAGES {
                    hub.publish(Message::new(format!("hello {i}")).unwrap());
                    tokio::task::yield_now().await;
                }
            })
        };
        publisher.await.unwrap();

        let expected: Vec<String> = (1..=MESSAGES).map(|i| format!("hello {i}")).collect();
        for consumer in consumers {
            assert_eq!(consumer.await.unwrap(), expected);
        }
        assert_eq!(hub.dropped_total(), 0);
        assert_eq!(hub.subscriber_count(), 0);
    }
}
