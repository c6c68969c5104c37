//! Chat message type.

use crate::Role;
use serde::{Deserialize, Serialize};

/// One entry of the `messages` array of a chat-completion request.
///
/// # Examples
///
/// ```
/// use shortscript_core::{ChatMessage, Role};
///
/// let message = ChatMessage::new(Role::User, "Hello!");
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.content, "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the message sender
    pub role: Role,
    /// Plain text content
    pub content: String,
}

impl ChatMessage {
    /// Create a message with the given role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}
