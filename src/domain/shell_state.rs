//! Top-level state of the TUI shell.

use super::compose_state::ComposeState;
use super::conversation_list::ConversationListState;
use super::viewport::{MessageViewport, DEFAULT_AT_BOTTOM_THRESHOLD_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Conversations,
    Messages,
    Compose,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellState {
    running: bool,
    active_pane: ActivePane,
    viewport: MessageViewport,
    compose: ComposeState,
    conversation_list: ConversationListState,
    unread_total: Option<u32>,
    status_notice: Option<String>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self::new(DEFAULT_AT_BOTTOM_THRESHOLD_ROWS)
    }
}

impl ShellState {
    pub fn new(at_bottom_threshold_rows: usize) -> Self {
        Self {
            running: true,
            active_pane: ActivePane::Conversations,
            viewport: MessageViewport::new(at_bottom_threshold_rows),
            compose: ComposeState::default(),
            conversation_list: ConversationListState::default(),
            unread_total: None,
            status_notice: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn active_pane(&self) -> ActivePane {
        self.active_pane
    }

    pub fn set_active_pane(&mut self, pane: ActivePane) {
        self.active_pane = pane;
    }

    pub fn viewport(&self) -> &MessageViewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut MessageViewport {
        &mut self.viewport
    }

    pub fn compose(&self) -> &ComposeState {
        &self.compose
    }

    pub fn compose_mut(&mut self) -> &mut ComposeState {
        &mut self.compose
    }

    pub fn conversation_list(&self) -> &ConversationListState {
        &self.conversation_list
    }

    pub fn conversation_list_mut(&mut self) -> &mut ConversationListState {
        &mut self.conversation_list
    }

    pub fn unread_total(&self) -> Option<u32> {
        self.unread_total
    }

    pub fn set_unread_total(&mut self, count: u32) {
        self.unread_total = Some(count);
    }

    pub fn status_notice(&self) -> Option<&str> {
        self.status_notice.as_deref()
    }

    pub fn set_status_notice(&mut self, notice: impl Into<String>) {
        self.status_notice = Some(notice.into());
    }

    pub fn clear_status_notice(&mut self) {
        self.status_notice = None;
    }
}
