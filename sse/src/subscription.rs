use crate::error::{Error, Result};
use crate::hub::Hub;
use crate::message::Message;
use crate::registry::SubscriberId;
use async_stream::stream;
use futures::Stream;
use log::*;
use tokio::sync::mpsc::Receiver;
use tokio_util::sync::CancellationToken;

/// One client's view of the hub.
///
/// Created by [`Hub::register`], active immediately, and closed exactly once
/// either by [`Subscription::close`] or when dropped. Closing removes the
/// mailbox from the hub's registry.
pub struct Subscription {
    id: SubscriberId,
    mailbox: Receiver<Message>,
    hub: Hub,
    closed: bool,
}

impl Subscription {
    pub(crate) fn new(id: SubscriberId, mailbox: Receiver<Message>, hub: Hub) -> Self {
        Self {
            id,
            mailbox,
            hub,
            closed: false,
        }
    }

    pub fn id(&self) -> &SubscriberId {
        &self.id
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Wait for the next message or for `cancel` to fire.
    ///
    /// Returns `Ok(None)` once cancelled; cancellation takes priority over a
    /// pending message. Fails with [`Error::InvalidState`] after `close`.
    pub async fn next(&mut self, cancel: &CancellationToken) -> Result<Option<Message>> {
        if self.closed {
            error!(
                "next() called on closed subscription {}",
                self.id.as_str()
            );
            return Err(Error::InvalidState);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Ok(None),
            message = self.mailbox.recv() => Ok(message),
        }
    }

    /// Unregister from the hub and close the mailbox. Safe to call repeatedly.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        self.mailbox.close();
        self.hub.unregister(&self.id);
    }

    /// Turn the subscription into a lazy message stream that ends when
    /// `cancel` fires. The subscription is closed when the stream finishes or
    /// is dropped.
    pub fn into_stream(mut self, cancel: CancellationToken) -> impl Stream<Item = Message> {
        stream! {
            while let Ok(Some(message)) = self.next(&cancel).await {
                yield message;
            }

            debug!("Subscription {} reached end of stream", self.id.as_str());
            self.close();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.close();
    }
}
