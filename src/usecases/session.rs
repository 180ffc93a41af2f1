//! One open conversation and every flag that governs its synchronization.
//!
//! The session gathers what would otherwise be free-floating mutable state —
//! the poll scheduler with its in-flight and pause flags, the sending guard,
//! the pending optimistic body — into a single object mutated only on the
//! shell thread. Network completions are accepted only when their origin
//! peer id matches this session, so completions racing a conversation switch
//! are discarded instead of corrupting the new thread.

use crate::domain::conversation::{ConversationState, ConversationUiState};
use crate::domain::message::Message;
use crate::domain::viewport::ViewportObserver;

use super::poll_scheduler::{PollScheduler, TickDecision};
use super::read_tracker::{self, MarkReadRequest, ReadDirective};
use super::send_message::{prepare_send, SendMessageCommand, SendMessageError};

/// Knobs the session takes from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTunables {
    pub window_limit: usize,
    pub poll_interval_ms: i64,
    pub post_send_pause_ms: i64,
}

impl Default for SessionTunables {
    fn default() -> Self {
        Self {
            window_limit: crate::domain::conversation::DEFAULT_WINDOW_LIMIT,
            poll_interval_ms: super::poll_scheduler::DEFAULT_POLL_INTERVAL_MS,
            post_send_pause_ms: super::poll_scheduler::DEFAULT_POST_SEND_PAUSE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationSession {
    state: ConversationState,
    scheduler: PollScheduler,
    sending: bool,
    pending_send_body: Option<String>,
    self_user_id: Option<String>,
    peer_display_name: Option<String>,
    post_send_pause_ms: i64,
}

impl ConversationSession {
    pub fn open(peer_id: impl Into<String>, tunables: SessionTunables, now_ms: i64) -> Self {
        Self {
            state: ConversationState::new(peer_id, tunables.window_limit),
            scheduler: PollScheduler::new(tunables.poll_interval_ms, now_ms),
            sending: false,
            pending_send_body: None,
            self_user_id: None,
            peer_display_name: None,
            post_send_pause_ms: tunables.post_send_pause_ms,
        }
    }

    pub fn peer_id(&self) -> &str {
        self.state.peer_id()
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn sending(&self) -> bool {
        self.sending
    }

    pub fn self_user_id(&self) -> Option<&str> {
        self.self_user_id.as_deref()
    }

    pub fn set_self_user_id(&mut self, user_id: impl Into<String>) {
        self.self_user_id = Some(user_id.into());
    }

    pub fn peer_display_name(&self) -> Option<&str> {
        self.peer_display_name.as_deref()
    }

    pub fn set_peer_display_name(&mut self, display_name: Option<String>) {
        self.peer_display_name = display_name;
    }

    /// Whether a completion that was issued for `peer_id` belongs to this
    /// session, or is a stale leftover from before a conversation switch.
    pub fn accepts_completion_for(&self, peer_id: &str) -> bool {
        peer_id == self.peer_id()
    }

    pub fn awaiting_initial_load(&self) -> bool {
        self.state.ui_state() == ConversationUiState::Loading
    }

    /// Marks the initial history fetch in flight so poll ticks cannot
    /// overlap it.
    pub fn begin_initial_fetch(&mut self) {
        self.scheduler.begin_fetch();
    }

    pub fn on_tick(&mut self, now_ms: i64, page_visible: bool) -> TickDecision {
        self.scheduler.on_tick(now_ms, page_visible)
    }

    /// Seeds the conversation from the initial fetch and asks for everything
    /// loaded to be marked read.
    pub fn apply_initial_load(&mut self, history: Vec<Message>) -> MarkReadRequest {
        self.scheduler.finish_fetch();
        self.state.set_ready(history);
        read_tracker::after_initial_load(&self.state)
    }

    pub fn fail_initial_load(&mut self) {
        self.scheduler.finish_fetch();
        self.state.set_error();
    }

    /// Merges a polled batch. Away from the bottom the unread counter and
    /// known-id set are updated in place; at the bottom the returned
    /// mark-read request is handed back for dispatch.
    pub fn apply_poll_batch(&mut self, incoming: &[Message]) -> Option<MarkReadRequest> {
        self.scheduler.finish_fetch();
        let outcome = self.state.apply_batch(incoming);

        match read_tracker::after_poll(&self.state, &outcome) {
            Some(ReadDirective::MarkRead(request)) => Some(request),
            Some(ReadDirective::AccumulateUnread { fresh_ids }) => {
                self.state.add_unread(fresh_ids.len() as u32);
                self.state.note_known_server_ids(fresh_ids);
                None
            }
            None => None,
        }
    }

    /// A failed poll retries on the next due tick; nothing is surfaced.
    pub fn poll_failed(&mut self) {
        self.scheduler.finish_fetch();
    }

    /// Mirrors the viewport anchor into the conversation state. Returns the
    /// mark-read request for a scroll back down to the newest message.
    pub fn sync_anchor(&mut self, viewport: &dyn ViewportObserver) -> Option<MarkReadRequest> {
        let at_bottom = viewport.at_bottom();
        if at_bottom == self.state.is_at_bottom() {
            return None;
        }

        self.state.set_at_bottom(at_bottom);
        if at_bottom {
            read_tracker::on_return_to_bottom(&self.state)
        } else {
            None
        }
    }

    /// Read-state decision when the host surface regains visibility.
    pub fn on_visibility_regained(
        &mut self,
        viewport: &dyn ViewportObserver,
    ) -> Option<MarkReadRequest> {
        if !viewport.visible() {
            return None;
        }

        read_tracker::on_visibility_regained(&self.state)
    }

    /// Validates a send and takes the sending guard. The guard also absorbs
    /// the Enter-key shortcut firing twice.
    pub fn begin_send(&mut self, body: &str) -> Result<SendMessageCommand, SendMessageError> {
        if self.sending {
            return Err(SendMessageError::SendInFlight);
        }

        let command = prepare_send(SendMessageCommand {
            peer_id: self.peer_id().to_owned(),
            body: body.to_owned(),
        })?;

        self.sending = true;
        self.pending_send_body = Some(command.body.clone());
        Ok(command)
    }

    /// Applies a successful send: the confirmed record when the server
    /// returned one, otherwise an optimistic placeholder the next poll will
    /// replace. The view snaps back to the bottom and polling pauses briefly
    /// so the entry does not flicker against its own echo.
    pub fn complete_send(&mut self, inserted: Option<Message>, now_ms: i64) {
        let body = self.pending_send_body.take().unwrap_or_default();
        self.sending = false;

        let message = inserted.unwrap_or_else(|| {
            Message::local_placeholder(
                self.self_user_id.as_deref(),
                self.state.peer_id(),
                &body,
                now_ms,
            )
        });

        self.state.append_message(message);
        self.state.set_at_bottom(true);
        self.scheduler.pause_for(now_ms, self.post_send_pause_ms);
    }

    /// Releases the sending guard after a failed send. The composed text is
    /// kept by the caller so the user can retry.
    pub fn fail_send(&mut self) {
        self.pending_send_body = None;
        self.sending = false;
    }
}
