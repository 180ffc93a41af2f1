//! Conversation roster shown in the sidebar, with per-peer unread badges.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSummary {
    pub peer_id: String,
    pub display_name: Option<String>,
    pub last_message_preview: Option<String>,
    pub unread: u32,
}

impl ConversationSummary {
    pub fn display_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.peer_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationListUiState {
    Loading,
    Ready,
    Empty,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationListState {
    ui_state: ConversationListUiState,
    conversations: Vec<ConversationSummary>,
    selected_index: Option<usize>,
}

impl Default for ConversationListState {
    fn default() -> Self {
        Self {
            ui_state: ConversationListUiState::Loading,
            conversations: Vec::new(),
            selected_index: None,
        }
    }
}

impl ConversationListState {
    pub fn ui_state(&self) -> ConversationListUiState {
        self.ui_state.clone()
    }

    pub fn conversations(&self) -> &[ConversationSummary] {
        &self.conversations
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn selected_conversation(&self) -> Option<&ConversationSummary> {
        self.selected_index
            .and_then(|index| self.conversations.get(index))
    }

    /// Replaces the roster, keeping the selection on the same peer when it
    /// is still present after a refresh.
    pub fn set_ready(&mut self, conversations: Vec<ConversationSummary>) {
        if conversations.is_empty() {
            self.set_empty();
            return;
        }

        let previous_peer = self
            .selected_conversation()
            .map(|summary| summary.peer_id.clone());
        self.ui_state = ConversationListUiState::Ready;
        self.conversations = conversations;
        self.selected_index = resolve_selection_index(&self.conversations, previous_peer.as_deref());
    }

    pub fn set_empty(&mut self) {
        self.ui_state = ConversationListUiState::Empty;
        self.conversations.clear();
        self.selected_index = None;
    }

    pub fn set_error(&mut self) {
        self.ui_state = ConversationListUiState::Error;
        self.conversations.clear();
        self.selected_index = None;
    }

    pub fn select_next(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        let last_index = self.conversations.len().saturating_sub(1);
        self.selected_index = Some(std::cmp::min(index.saturating_add(1), last_index));
    }

    pub fn select_previous(&mut self) {
        let Some(index) = self.selected_index else {
            return;
        };

        self.selected_index = Some(index.saturating_sub(1));
    }
}

fn resolve_selection_index(
    conversations: &[ConversationSummary],
    previous_peer: Option<&str>,
) -> Option<usize> {
    if conversations.is_empty() {
        return None;
    }

    previous_peer
        .and_then(|peer_id| {
            conversations
                .iter()
                .position(|summary| summary.peer_id == peer_id)
        })
        .or(Some(0))
}
