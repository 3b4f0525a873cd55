use crate::message::Message;
use dashmap::DashMap;
use tokio::sync::mpsc::Sender;

/// Unique identifier for one registered subscriber (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(String);

impl SubscriberId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SubscriberId {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half of a subscriber's bounded mailbox
pub type MailboxSender = Sender<Message>;

/// Registry of live subscriber mailboxes keyed by subscriber id.
///
/// The registry only holds the sending half of each mailbox; the receiving
/// half is owned by the subscription.
pub struct SubscriberRegistry {
    mailboxes: DashMap<SubscriberId, MailboxSender>,
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            mailboxes: DashMap::new(),
        }
    }

    /// Register a mailbox - O(1)
    pub fn insert(&self, id: SubscriberId, sender: MailboxSender) {
        self.mailboxes.insert(id, sender);
    }

    /// Remove a mailbox - O(1). Returns false if it was already gone.
    pub fn remove(&self, id: &SubscriberId) -> bool {
        self.mailboxes.remove(id).is_some()
    }

    pub fn contains(&self, id: &SubscriberId) -> bool {
        self.mailboxes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.mailboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mailboxes.is_empty()
    }

    /// Clone out every registered sender.
    ///
    /// Shard locks are released before this returns, so callers can enqueue
    /// without holding any registry lock.
    pub fn snapshot(&self) -> Vec<(SubscriberId, MailboxSender)> {
        self.mailboxes
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}
