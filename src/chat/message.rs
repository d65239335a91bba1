//! Relay frames sent to connected participants.

use std::fmt;

/// A text frame delivered by the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    /// A participant's message, forwarded to everyone else in the room.
    Chat {
        /// Username the sender attached with.
        sender: String,
        /// Raw text as received.
        content: String,
    },
    /// Departure notice sent after a connection closes.
    Left {
        /// Username of the departed connection.
        username: String,
    },
}

impl RelayMessage {
    /// Create a chat message.
    pub fn chat(sender: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Chat {
            sender: sender.into(),
            content: content.into(),
        }
    }

    /// Create a departure notice.
    pub fn left(username: impl Into<String>) -> Self {
        Self::Left {
            username: username.into(),
        }
    }

    /// Format the message as the wire text frame.
    pub fn format(&self) -> String {
        match self {
            RelayMessage::Chat { sender, content } => format!("{sender}: {content}"),
            RelayMessage::Left { username } => format!("{username} left the chat"),
        }
    }
}

impl fmt::Display for RelayMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}
