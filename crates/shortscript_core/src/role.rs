//! Role types for chat participants.

use serde::{Deserialize, Serialize};

/// Author of a chat message.
///
/// Serialized in lower case, as chat-completion APIs expect.
///
/// # Examples
///
/// ```
/// use shortscript_core::Role;
///
/// assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
/// assert_eq!(format!("{}", Role::User), "User");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages carry the persona
    System,
    /// User messages carry the task
    User,
    /// Assistant messages are model replies
    Assistant,
}
