//! Events consumed by the shell loop and notifications it emits.
//!
//! Network completions are delivered as [`AppEvent`]s tagged with the peer id
//! they were issued for, so a completion that arrives after the user switched
//! conversations can be recognized as stale and discarded.

use super::conversation_list::ConversationSummary;
use super::message::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyInput {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    Up,
    Down,
    PageUp,
    PageDown,
    Tab,
    Esc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Idle heartbeat from the event source; drives the poll scheduler.
    Tick,
    QuitRequested,
    Input(KeyInput),
    /// Terminal gained or lost focus; stands in for page visibility.
    FocusChanged(bool),
    ConversationFetched {
        peer_id: String,
        outcome: Result<Vec<Message>, ConversationSourceError>,
    },
    ConversationsListed {
        outcome: Result<Vec<ConversationSummary>, ConversationsSourceError>,
    },
    SendFinished {
        peer_id: String,
        outcome: Result<Option<Message>, SendSourceError>,
    },
    /// Mark-read acknowledgements; failed mark-reads never produce an event.
    MarkReadFinished {
        peer_id: String,
        receipt: MarkReadReceipt,
    },
    UnreadCountFetched {
        count: u32,
    },
    IdentityResolved {
        user_id: String,
    },
    PeerProfileResolved {
        peer_id: String,
        display_name: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationSourceError {
    NotAuthenticated,
    Unavailable,
    InvalidData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationsSourceError {
    NotAuthenticated,
    Unavailable,
    InvalidData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendSourceError {
    NotAuthenticated,
    Unavailable,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkReadReceipt {
    pub marked: u32,
}

/// Cross-component notification published after read-state or send activity,
/// so badge displays outside the engine can refresh without refetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationUpdate {
    /// Messages up to some id were marked read on the server.
    Marked { peer_id: String, marked: u32 },
    /// Authoritative total unread count across all conversations.
    UnreadTotal { count: u32 },
    /// A message was sent in this conversation.
    Sent { peer_id: String },
    /// The conversation became visible again but was not marked read
    /// because the user is scrolled away from the bottom.
    SeenWithoutMarking { peer_id: String },
}
