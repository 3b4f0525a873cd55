//! Server-Sent Events (SSE) broadcast infrastructure.
//!
//! This crate owns the in-memory fan-out of text messages to every connected
//! SSE client. It knows nothing about HTTP; the web layer registers a
//! subscription per stream request and writes what it yields.
//!
//! # Architecture
//!
//! - **Per-subscriber mailboxes**: every connection gets its own bounded
//!   mailbox, so a message published once reaches every listener instead of
//!   whichever one dequeues it first.
//! - **Non-blocking publish**: a full mailbox drops the message for that one
//!   slow subscriber; the publisher and other subscribers are unaffected.
//! - **Scoped registration**: a `Subscription` unregisters itself when closed
//!   or dropped, so the registry never keeps a stale mailbox.
//! - **Cancel-aware reads**: `Subscription::next` suspends on the mailbox and
//!   a `CancellationToken` together; there is no polling.
//! - **Ephemeral messages**: nothing is persisted or replayed.
//!
//! # Example
//!
//! ```rust
//! use sse::{Hub, Message};
//! use tokio_util::sync::CancellationToken;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let hub = Hub::default();
//! let mut subscription = hub.register();
//! let cancel = CancellationToken::new();
//!
//! hub.publish(Message::new("hello 1").unwrap());
//!
//! let message = subscription.next(&cancel).await.unwrap();
//! assert_eq!(message.as_deref(), Some("hello 1"));
//! # }
//! ```
//!
//! # Modules
//!
//! - `hub`: registration and publish/fan-out
//! - `subscription`: per-connection handle and message stream
//! - `registry`: concurrent map of live mailboxes and `SubscriberId`
//! - `message`: validated single-line message payload
//! - `error`: crate error type

pub mod error;
pub mod hub;
pub mod message;
pub mod registry;
pub mod subscription;

pub use error::Error;
pub use hub::{Delivery, Hub, DEFAULT_MAILBOX_CAPACITY};
pub use message::Message;
pub use registry::SubscriberId;
pub use subscription::Subscription;
