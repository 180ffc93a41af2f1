//! Use case for loading a conversation's recent history.

use crate::domain::events::ConversationSourceError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadConversationError {
    NotAuthenticated,
    TemporarilyUnavailable,
    DataContractViolation,
}

impl LoadConversationError {
    /// Inline message shown in the conversation panel when the initial load
    /// fails. Background poll failures never reach the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "Sign in to view this conversation.",
            Self::TemporarilyUnavailable => "Could not load the conversation. Reopen to retry.",
            Self::DataContractViolation => "The server returned an unreadable conversation.",
        }
    }
}

pub fn map_source_error(error: ConversationSourceError) -> LoadConversationError {
    match error {
        ConversationSourceError::NotAuthenticated => LoadConversationError::NotAuthenticated,
        ConversationSourceError::Unavailable => LoadConversationError::TemporarilyUnavailable,
        ConversationSourceError::InvalidData => LoadConversationError::DataContractViolation,
    }
}
