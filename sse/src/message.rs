use crate::error::{Error, Result};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// An immutable, single-line text payload delivered to every subscriber.
///
/// Cloning is a reference count bump, so fan-out does not copy the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Message(Arc<str>);

impl Message {
    /// Builds a message, rejecting text that would break SSE `data:` framing.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();

        if text.contains(['\n', '\r']) {
            return Err(Error::InvalidMessage(
                "message must not contain line breaks".to_string(),
            ));
        }

        Ok(Self(Arc::from(text)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Message {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Message {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Message {
    type Error = Error;

    fn try_from(text: String) -> Result<Self> {
        Message::new(text)
    }
}

impl TryFrom<&str> for Message {
    type Error = Error;

    fn try_from(text: &str) -> Result<Self> {
        Message::new(text)
    }
}
