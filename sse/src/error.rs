//! Error types for the `sse` crate.

use std::fmt;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by the hub and its subscriptions.
///
/// A full mailbox is not an error: the message is dropped for that one
/// subscriber and counted by the hub.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The message text contains a line break and cannot be framed as a
    /// single SSE `data:` line.
    InvalidMessage(String),

    /// `Subscription::next` was called after the subscription was closed.
    InvalidState,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMessage(reason) => write!(f, "Invalid message: {reason}"),
            Error::InvalidState => write!(f, "Subscription is already closed"),
        }
    }
}

impl std::error::Error for Error {}
