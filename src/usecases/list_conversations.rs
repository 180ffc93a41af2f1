//! Use case for loading the conversation roster.

use std::collections::HashSet;

use crate::domain::conversation_list::ConversationSummary;
use crate::domain::events::ConversationsSourceError;

#[cfg_attr(not(test), allow(dead_code))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListConversationsError {
    NotAuthenticated,
    TemporarilyUnavailable,
    DataContractViolation,
}

#[cfg_attr(not(test), allow(dead_code))]
pub fn map_source_error(error: ConversationsSourceError) -> ListConversationsError {
    match error {
        ConversationsSourceError::NotAuthenticated => ListConversationsError::NotAuthenticated,
        ConversationsSourceError::Unavailable => ListConversationsError::TemporarilyUnavailable,
        ConversationsSourceError::InvalidData => ListConversationsError::DataContractViolation,
    }
}

/// Drops duplicate roster entries, keeping the first occurrence per peer.
pub fn normalize_roster(conversations: Vec<ConversationSummary>) -> Vec<ConversationSummary> {
    let mut seen: HashSet<String> = HashSet::new();
    conversations
        .into_iter()
        .filter(|summary| seen.insert(summary.peer_id.clone()))
        .collect()
}
