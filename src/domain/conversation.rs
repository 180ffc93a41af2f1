//! State of the currently open two-party conversation.

use std::collections::HashSet;

use super::message::Message;
use super::reconcile::{reconcile, ReconcileOutcome};

/// Messages retained per conversation; older entries are dropped from the head.
pub const DEFAULT_WINDOW_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationUiState {
    Loading,
    Ready,
    Error,
}

/// Ordered, deduplicated view of one conversation, plus the read-tracking
/// bookkeeping that drives the unread counter.
///
/// `known_server_ids` records every server id whose shape this client has
/// already accounted for. It is what distinguishes "freshly arrived since the
/// last known state" from "re-fetched history" — a plain set difference
/// against the display list would recount entries that fell out of the
/// retention window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationState {
    peer_id: String,
    messages: Vec<Message>,
    known_server_ids: HashSet<String>,
    unread_count: u32,
    is_at_bottom: bool,
    window_limit: usize,
    ui_state: ConversationUiState,
}

impl ConversationState {
    pub fn new(peer_id: impl Into<String>, window_limit: usize) -> Self {
        Self {
            peer_id: peer_id.into(),
            messages: Vec::new(),
            known_server_ids: HashSet::new(),
            unread_count: 0,
            is_at_bottom: true,
            window_limit,
            ui_state: ConversationUiState::Loading,
        }
    }

    pub fn peer_id(&self) -> &str {
        &self.peer_id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn ui_state(&self) -> ConversationUiState {
        self.ui_state.clone()
    }

    pub fn unread_count(&self) -> u32 {
        self.unread_count
    }

    pub fn is_at_bottom(&self) -> bool {
        self.is_at_bottom
    }

    pub fn last_message_id(&self) -> Option<&str> {
        self.messages.last().map(|m| m.id.as_str())
    }

    pub fn knows_server_id(&self, id: &str) -> bool {
        self.known_server_ids.contains(id)
    }

    /// Seeds the conversation from the initial history fetch: keeps the most
    /// recent window and records every server id as already seen.
    pub fn set_ready(&mut self, history: Vec<Message>) {
        let overflow = history.len().saturating_sub(self.window_limit);
        self.messages = history.into_iter().skip(overflow).collect();
        self.known_server_ids = self
            .messages
            .iter()
            .filter(|m| !m.is_placeholder())
            .map(|m| m.id.clone())
            .collect();
        self.unread_count = 0;
        self.ui_state = ConversationUiState::Ready;
    }

    pub fn set_error(&mut self) {
        self.ui_state = ConversationUiState::Error;
    }

    /// Merges a polled server batch and reports what the pass did.
    pub fn apply_batch(&mut self, incoming: &[Message]) -> ReconcileOutcome {
        let outcome = reconcile(&self.messages, incoming, self.window_limit);
        self.messages = outcome.messages.clone();
        outcome
    }

    /// Appends a single message (optimistic placeholder or confirmed send),
    /// trimming the head if the window overflows.
    pub fn append_message(&mut self, message: Message) {
        if !message.is_placeholder() {
            self.known_server_ids.insert(message.id.clone());
        }
        self.messages.push(message);
        if self.messages.len() > self.window_limit {
            let overflow = self.messages.len() - self.window_limit;
            self.messages.drain(..overflow);
        }
    }

    pub fn note_known_server_ids<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.known_server_ids.extend(ids);
    }

    /// Counts newly arrived messages while the user is scrolled away.
    /// Ignored at the bottom anchor, where arrivals are marked read instead.
    pub fn add_unread(&mut self, count: u32) {
        if self.is_at_bottom {
            return;
        }
        self.unread_count += count;
    }

    /// Updates the bottom-anchor flag; reaching the bottom clears the counter.
    pub fn set_at_bottom(&mut self, at_bottom: bool) {
        self.is_at_bottom = at_bottom;
        if at_bottom {
            self.unread_count = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::LOCAL_ID_PREFIX;

    fn server(id: &str, body: &str) -> Message {
        Message {
            id: id.to_owned(),
            sender_id: "peer".to_owned(),
            recipient_id: "me".to_owned(),
            body: body.to_owned(),
            created_at_unix_ms: 1000,
        }
    }

    #[test]
    fn starts_loading_and_anchored_to_bottom() {
        let state = ConversationState::new("peer", DEFAULT_WINDOW_LIMIT);

        assert_eq!(state.ui_state(), ConversationUiState::Loading);
        assert!(state.is_at_bottom());
        assert_eq!(state.unread_count(), 0);
        assert!(state.messages().is_empty());
    }

    #[test]
    fn set_ready_seeds_known_server_ids() {
        let mut state = ConversationState::new("peer", DEFAULT_WINDOW_LIMIT);

        state.set_ready(vec![server("s1", "hi"), server("s2", "yo")]);

        assert_eq!(state.ui_state(), ConversationUiState::Ready);
        assert!(state.knows_server_id("s1"));
        assert!(state.knows_server_id("s2"));
        assert_eq!(state.last_message_id(), Some("s2"));
    }

    #[test]
    fn set_ready_keeps_only_the_most_recent_window() {
        let mut state = ConversationState::new("peer", 3);

        state.set_ready((0..5).map(|i| server(&format!("s{i}"), "x")).collect());

        assert_eq!(state.messages().len(), 3);
        assert_eq!(state.messages()[0].id, "s2");
        assert!(!state.knows_server_id("s0"));
    }

    #[test]
    fn set_ready_does_not_record_placeholder_ids_as_known() {
        let mut state = ConversationState::new("peer", DEFAULT_WINDOW_LIMIT);
        let local = Message::local_placeholder(None, "peer", "draft", 7);

        state.set_ready(vec![server("s1", "hi"), local.clone()]);

        assert!(!state.knows_server_id(&local.id));
        assert!(state.knows_server_id("s1"));
    }

    #[test]
    fn append_message_trims_head_at_window_limit() {
        let mut state = ConversationState::new("peer", 2);
        state.set_ready(vec![server("s1", "a"), server("s2", "b")]);

        state.append_message(server("s3", "c"));

        assert_eq!(state.messages().len(), 2);
        assert_eq!(state.messages()[0].id, "s2");
    }

    #[test]
    fn appending_a_confirmed_message_marks_it_known() {
        let mut state = ConversationState::new("peer", DEFAULT_WINDOW_LIMIT);
        state.set_ready(vec![]);

        state.append_message(server("s9", "sent"));

        assert!(state.knows_server_id("s9"));
    }

    #[test]
    fn appending_a_placeholder_does_not_mark_it_known() {
        let mut state = ConversationState::new("peer", DEFAULT_WINDOW_LIMIT);
        state.set_ready(vec![]);

        state.append_message(Message::local_placeholder(None, "peer", "draft", 7));

        assert!(!state.knows_server_id(&format!("{LOCAL_ID_PREFIX}7")));
    }

    #[test]
    fn unread_only_accumulates_away_from_bottom() {
        let mut state = ConversationState::new("peer", DEFAULT_WINDOW_LIMIT);
        state.set_ready(vec![]);

        state.add_unread(2);
        assert_eq!(state.unread_count(), 0);

        state.set_at_bottom(false);
        state.add_unread(2);
        state.add_unread(1);
        assert_eq!(state.unread_count(), 3);
    }

    #[test]
    fn returning_to_bottom_clears_the_counter() {
        let mut state = ConversationState::new("peer", DEFAULT_WINDOW_LIMIT);
        state.set_ready(vec![]);
        state.set_at_bottom(false);
        state.add_unread(4);

        state.set_at_bottom(true);

        assert_eq!(state.unread_count(), 0);
    }

    #[test]
    fn apply_batch_merges_and_reports_fresh_ids() {
        let mut state = ConversationState::new("peer", DEFAULT_WINDOW_LIMIT);
        state.set_ready(vec![server("s1", "hi")]);

        let outcome = state.apply_batch(&[server("s1", "hi"), server("s2", "yo")]);

        assert_eq!(outcome.fresh_server_ids, vec!["s2"]);
        assert_eq!(state.last_message_id(), Some("s2"));
    }
}
