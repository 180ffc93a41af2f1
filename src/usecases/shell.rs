//! Shell orchestration: routes events between the terminal, the open
//! conversation session, and the messaging gateway.

use anyhow::Result;

use crate::domain::clock;
use crate::domain::events::{
    AppEvent, ConversationSourceError, ConversationUpdate, KeyInput, SendSourceError,
};
use crate::domain::message::Message;
use crate::domain::shell_state::{ActivePane, ShellState};
use crate::domain::viewport::ViewportObserver;

use super::contracts::{MessagingGateway, ShellOrchestrator, UpdateListener};
use super::list_conversations::normalize_roster;
use super::load_conversation::{self, LoadConversationError};
use super::list_refresh::{
    ListRefreshPlanner, DEFAULT_LIST_REFRESH_DEBOUNCE_MS, DEFAULT_LIST_REFRESH_INTERVAL_MS,
};
use super::poll_scheduler::TickDecision;
use super::read_tracker::MarkReadRequest;
use super::send_message::{self, SendMessageError};
use super::session::{ConversationSession, SessionTunables};

const STALE_COMPLETION_DISCARDED: &str = "SYNC_STALE_COMPLETION_DISCARDED";
const POLL_FETCH_FAILED: &str = "SYNC_POLL_FETCH_FAILED";
const INITIAL_LOAD_FAILED: &str = "SYNC_INITIAL_LOAD_FAILED";

const SCROLL_STEP_ROWS: usize = 1;
const SCROLL_PAGE_ROWS: usize = 10;

/// Engine knobs taken from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineTunables {
    pub session: SessionTunables,
    pub at_bottom_threshold_rows: usize,
    pub list_refresh_interval_ms: i64,
    pub list_refresh_debounce_ms: i64,
}

impl Default for EngineTunables {
    fn default() -> Self {
        Self {
            session: SessionTunables::default(),
            at_bottom_threshold_rows: crate::domain::viewport::DEFAULT_AT_BOTTOM_THRESHOLD_ROWS,
            list_refresh_interval_ms: DEFAULT_LIST_REFRESH_INTERVAL_MS,
            list_refresh_debounce_ms: DEFAULT_LIST_REFRESH_DEBOUNCE_MS,
        }
    }
}

pub struct DefaultShellOrchestrator<G, L>
where
    G: MessagingGateway,
    L: UpdateListener,
{
    state: ShellState,
    session: Option<ConversationSession>,
    gateway: G,
    listener: L,
    planner: ListRefreshPlanner,
    tunables: EngineTunables,
    self_user_id: Option<String>,
}

impl<G, L> DefaultShellOrchestrator<G, L>
where
    G: MessagingGateway,
    L: UpdateListener,
{
    pub fn new(gateway: G, listener: L, tunables: EngineTunables, now_ms: i64) -> Self {
        Self {
            state: ShellState::new(tunables.at_bottom_threshold_rows),
            session: None,
            gateway,
            listener,
            planner: ListRefreshPlanner::new(
                tunables.list_refresh_interval_ms,
                tunables.list_refresh_debounce_ms,
                now_ms,
            ),
            tunables,
            self_user_id: None,
        }
    }

    /// Issues the startup requests: identity, the conversation roster, and
    /// optionally a conversation to open straight away.
    pub fn start(&mut self, peer_id: Option<&str>, now_ms: i64) {
        self.gateway.request_identity();
        self.planner.begin_refresh(now_ms);
        self.gateway.request_conversations();

        if let Some(peer_id) = peer_id {
            self.open_conversation(peer_id, now_ms);
        }
    }

    pub fn handle_event_at(&mut self, event: AppEvent, now_ms: i64) -> Result<()> {
        match event {
            AppEvent::Tick => self.handle_tick(now_ms),
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::Input(key) => self.handle_key(key, now_ms),
            AppEvent::FocusChanged(focused) => self.handle_focus_change(focused, now_ms),
            AppEvent::ConversationFetched { peer_id, outcome } => {
                self.handle_conversation_fetched(&peer_id, outcome, now_ms);
            }
            AppEvent::ConversationsListed { outcome } => {
                self.planner.finish_refresh();
                match outcome {
                    Ok(items) => self
                        .state
                        .conversation_list_mut()
                        .set_ready(normalize_roster(items)),
                    Err(error) => {
                        // A failed refresh keeps the stale roster; only the
                        // first load has nothing to fall back to.
                        tracing::debug!(error = ?error, "conversation roster fetch failed");
                        if self.state.conversation_list().conversations().is_empty() {
                            self.state.conversation_list_mut().set_error();
                        }
                    }
                }
            }
            AppEvent::SendFinished { peer_id, outcome } => {
                self.handle_send_finished(&peer_id, outcome, now_ms);
            }
            AppEvent::MarkReadFinished { peer_id, receipt } => {
                let update = ConversationUpdate::Marked {
                    peer_id,
                    marked: receipt.marked,
                };
                self.listener.conversations_updated(&update, now_ms);
                self.planner.conversations_updated(&update, now_ms);
            }
            AppEvent::UnreadCountFetched { count } => {
                self.state.set_unread_total(count);
                self.listener
                    .conversations_updated(&ConversationUpdate::UnreadTotal { count }, now_ms);
            }
            AppEvent::IdentityResolved { user_id } => {
                self.self_user_id = Some(user_id.clone());
                if let Some(session) = self.session.as_mut() {
                    session.set_self_user_id(user_id);
                }
            }
            AppEvent::PeerProfileResolved {
                peer_id,
                display_name,
            } => {
                if let Some(session) = self.session.as_mut() {
                    if session.accepts_completion_for(&peer_id) {
                        session.set_peer_display_name(display_name);
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_tick(&mut self, now_ms: i64) {
        let fetch_peer = match self.session.as_mut() {
            Some(session) => {
                let visible = self.state.viewport().visible();
                match session.on_tick(now_ms, visible) {
                    TickDecision::Fetch => Some(session.peer_id().to_owned()),
                    TickDecision::Skip(_) => None,
                }
            }
            None => None,
        };

        if let Some(peer_id) = fetch_peer {
            self.gateway.request_conversation(&peer_id);
        }

        if self.planner.should_refresh(now_ms) {
            self.gateway.request_conversations();
        }
    }

    fn handle_focus_change(&mut self, focused: bool, now_ms: i64) {
        self.state.viewport_mut().set_focus(focused);
        if !focused {
            return;
        }

        let mut mark = None;
        let mut seen_without_marking = None;
        if let Some(session) = self.session.as_mut() {
            mark = session
                .on_visibility_regained(self.state.viewport())
                .map(|request| (session.peer_id().to_owned(), request));
            if mark.is_none() {
                seen_without_marking = Some(ConversationUpdate::SeenWithoutMarking {
                    peer_id: session.peer_id().to_owned(),
                });
            }
        }

        if let Some((peer_id, request)) = mark {
            self.execute_mark_read(&peer_id, request);
        } else if let Some(update) = seen_without_marking {
            self.listener.conversations_updated(&update, now_ms);
            self.planner.conversations_updated(&update, now_ms);
        }
    }

    fn handle_conversation_fetched(
        &mut self,
        peer_id: &str,
        outcome: Result<Vec<Message>, ConversationSourceError>,
        _now_ms: i64,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if !session.accepts_completion_for(peer_id) {
            tracing::debug!(
                code = STALE_COMPLETION_DISCARDED,
                stale_peer = peer_id,
                active_peer = session.peer_id(),
                "discarding conversation fetch for a closed conversation"
            );
            return;
        }

        if session.awaiting_initial_load() {
            match outcome {
                Ok(items) => {
                    let request = session.apply_initial_load(items);
                    let peer_id = peer_id.to_owned();
                    self.state.viewport_mut().jump_to_latest();
                    self.execute_mark_read(&peer_id, request);
                }
                Err(error) => {
                    session.fail_initial_load();
                    let mapped = load_conversation::map_source_error(error);
                    tracing::warn!(
                        code = INITIAL_LOAD_FAILED,
                        peer_id,
                        error = ?error,
                        "initial conversation load failed"
                    );
                    if mapped == LoadConversationError::NotAuthenticated {
                        self.state.set_status_notice(mapped.user_message());
                    }
                }
            }
            return;
        }

        match outcome {
            Ok(items) => {
                let request = session.apply_poll_batch(&items);
                if let Some(request) = request {
                    let peer_id = peer_id.to_owned();
                    self.execute_mark_read(&peer_id, request);
                }
            }
            Err(error) => {
                session.poll_failed();
                tracing::debug!(
                    code = POLL_FETCH_FAILED,
                    peer_id,
                    error = ?error,
                    "poll fetch failed; retrying on the next tick"
                );
            }
        }
    }

    fn handle_send_finished(
        &mut self,
        peer_id: &str,
        outcome: Result<Option<Message>, SendSourceError>,
        now_ms: i64,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if !session.accepts_completion_for(peer_id) {
            tracing::debug!(
                code = STALE_COMPLETION_DISCARDED,
                stale_peer = peer_id,
                active_peer = session.peer_id(),
                "discarding send completion for a closed conversation"
            );
            return;
        }

        match outcome {
            Ok(inserted) => {
                session.complete_send(inserted, now_ms);
                self.state.viewport_mut().jump_to_latest();
                self.state.compose_mut().clear();
                self.state.clear_status_notice();
                self.state.set_active_pane(ActivePane::Compose);

                let update = ConversationUpdate::Sent {
                    peer_id: peer_id.to_owned(),
                };
                self.listener.conversations_updated(&update, now_ms);
                self.planner.conversations_updated(&update, now_ms);
            }
            Err(error) => {
                session.fail_send();
                let mapped = send_message::map_source_error(error);
                self.state.set_status_notice(mapped.user_message());
                self.state.set_active_pane(ActivePane::Compose);
            }
        }
    }

    fn handle_key(&mut self, key: KeyInput, now_ms: i64) {
        match self.state.active_pane() {
            ActivePane::Conversations => self.handle_conversations_key(key, now_ms),
            ActivePane::Messages => self.handle_messages_key(key),
            ActivePane::Compose => self.handle_compose_key(key, now_ms),
        }
    }

    fn handle_conversations_key(&mut self, key: KeyInput, now_ms: i64) {
        match key {
            KeyInput::Up | KeyInput::Char('k') => {
                self.state.conversation_list_mut().select_previous();
            }
            KeyInput::Down | KeyInput::Char('j') => {
                self.state.conversation_list_mut().select_next();
            }
            KeyInput::Enter => {
                let selected = self
                    .state
                    .conversation_list()
                    .selected_conversation()
                    .map(|summary| summary.peer_id.clone());
                if let Some(peer_id) = selected {
                    self.open_conversation(&peer_id, now_ms);
                }
            }
            KeyInput::Tab => self.state.set_active_pane(ActivePane::Messages),
            KeyInput::Char('q') => self.state.stop(),
            _ => {}
        }
    }

    fn handle_messages_key(&mut self, key: KeyInput) {
        let content_rows = self
            .session
            .as_ref()
            .map(|session| session.state().messages().len().saturating_mul(2))
            .unwrap_or(0);

        match key {
            KeyInput::Up | KeyInput::Char('k') => {
                self.state.viewport_mut().scroll_up(SCROLL_STEP_ROWS, content_rows);
            }
            KeyInput::Down | KeyInput::Char('j') => {
                self.state.viewport_mut().scroll_down(SCROLL_STEP_ROWS);
            }
            KeyInput::PageUp => {
                self.state.viewport_mut().scroll_up(SCROLL_PAGE_ROWS, content_rows);
            }
            KeyInput::PageDown => self.state.viewport_mut().scroll_down(SCROLL_PAGE_ROWS),
            KeyInput::End | KeyInput::Char('G') => self.state.viewport_mut().jump_to_latest(),
            KeyInput::Char('i') => {
                self.state.set_active_pane(ActivePane::Compose);
                return;
            }
            KeyInput::Tab => {
                self.state.set_active_pane(ActivePane::Compose);
                return;
            }
            KeyInput::Char('q') => {
                self.state.stop();
                return;
            }
            _ => return,
        }

        self.sync_anchor();
    }

    fn handle_compose_key(&mut self, key: KeyInput, now_ms: i64) {
        match key {
            KeyInput::Enter => self.submit_compose(now_ms),
            KeyInput::Char(ch) => {
                self.state.compose_mut().insert_char(ch);
            }
            KeyInput::Backspace => self.state.compose_mut().delete_char_before(),
            KeyInput::Delete => self.state.compose_mut().delete_char_at(),
            KeyInput::Left => self.state.compose_mut().move_cursor_left(),
            KeyInput::Right => self.state.compose_mut().move_cursor_right(),
            KeyInput::Home => self.state.compose_mut().move_cursor_home(),
            KeyInput::End => self.state.compose_mut().move_cursor_end(),
            KeyInput::Esc => self.state.set_active_pane(ActivePane::Messages),
            KeyInput::Tab => self.state.set_active_pane(ActivePane::Conversations),
            _ => {}
        }
    }

    fn submit_compose(&mut self, _now_ms: i64) {
        let body = self.state.compose().text().to_owned();
        let command = match self.session.as_mut() {
            Some(session) => match session.begin_send(&body) {
                Ok(command) => Some(command),
                // Empty input and double-Enter are absorbed silently.
                Err(SendMessageError::EmptyMessage | SendMessageError::SendInFlight) => None,
                Err(error) => {
                    self.state.set_status_notice(error.user_message());
                    None
                }
            },
            None => None,
        };

        if let Some(command) = command {
            self.gateway.dispatch_send(&command.peer_id, &command.body);
        }
    }

    /// Mirrors the viewport anchor into the session and dispatches the
    /// mark-read produced by a return to the bottom.
    fn sync_anchor(&mut self) {
        let mark = match self.session.as_mut() {
            Some(session) => session
                .sync_anchor(self.state.viewport())
                .map(|request| (session.peer_id().to_owned(), request)),
            None => None,
        };

        if let Some((peer_id, request)) = mark {
            self.execute_mark_read(&peer_id, request);
        }
    }

    fn execute_mark_read(&mut self, peer_id: &str, request: MarkReadRequest) {
        self.gateway
            .dispatch_mark_read(peer_id, request.last_seen_id.as_deref());
        if request.refresh_unread_total {
            self.gateway.request_unread_count();
        }
    }

    fn open_conversation(&mut self, peer_id: &str, now_ms: i64) {
        let mut session = ConversationSession::open(peer_id, self.tunables.session, now_ms);
        if let Some(user_id) = &self.self_user_id {
            session.set_self_user_id(user_id.clone());
        }
        session.begin_initial_fetch();
        self.session = Some(session);

        self.state.viewport_mut().jump_to_latest();
        self.state.compose_mut().clear();
        self.state.clear_status_notice();
        self.state.set_active_pane(ActivePane::Messages);

        self.gateway.request_conversation(peer_id);
        self.gateway.request_peer_profile(peer_id);
    }
}

impl<G, L> ShellOrchestrator for DefaultShellOrchestrator<G, L>
where
    G: MessagingGateway,
    L: UpdateListener,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn session(&self) -> Option<&ConversationSession> {
        self.session.as_ref()
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        self.handle_event_at(event, clock::now_unix_ms())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::conversation::ConversationUiState;
    use crate::domain::conversation_list::ConversationSummary;
    use crate::domain::events::MarkReadReceipt;
    use crate::infra::stubs::{GatewayCall, RecordingListener, StubGateway};

    const T0: i64 = 1_000_000;

    fn server(id: &str, body: &str) -> Message {
        Message {
            id: id.to_owned(),
            sender_id: "peer".to_owned(),
            recipient_id: "me".to_owned(),
            body: body.to_owned(),
            created_at_unix_ms: 1000,
        }
    }

    fn orchestrator() -> DefaultShellOrchestrator<StubGateway, RecordingListener> {
        DefaultShellOrchestrator::new(
            StubGateway::default(),
            RecordingListener::default(),
            EngineTunables::default(),
            T0,
        )
    }

    fn opened(peer: &str) -> DefaultShellOrchestrator<StubGateway, RecordingListener> {
        let mut orchestrator = orchestrator();
        orchestrator.start(Some(peer), T0);
        orchestrator
    }

    fn loaded(peer: &str) -> DefaultShellOrchestrator<StubGateway, RecordingListener> {
        let mut orchestrator = opened(peer);
        orchestrator
            .handle_event_at(
                AppEvent::ConversationFetched {
                    peer_id: peer.to_owned(),
                    outcome: Ok(vec![
                        server("s1", "hi"),
                        server("s2", "there"),
                        server("s3", "ok"),
                    ]),
                },
                T0 + 10,
            )
            .expect("load event should be handled");
        orchestrator.gateway.clear();
        orchestrator
    }

    #[test]
    fn startup_requests_identity_roster_and_conversation() {
        let orchestrator = opened("peer");

        let calls = orchestrator.gateway.calls();
        assert!(calls.contains(&GatewayCall::Identity));
        assert!(calls.contains(&GatewayCall::Conversations));
        assert!(calls.contains(&GatewayCall::Conversation("peer".to_owned())));
        assert!(calls.contains(&GatewayCall::PeerProfile("peer".to_owned())));
    }

    #[test]
    fn initial_load_marks_read_and_refreshes_unread_total() {
        let mut orchestrator = opened("peer");
        orchestrator.gateway.clear();

        orchestrator
            .handle_event_at(
                AppEvent::ConversationFetched {
                    peer_id: "peer".to_owned(),
                    outcome: Ok(vec![server("s1", "hi")]),
                },
                T0 + 10,
            )
            .expect("event should be handled");

        let session = orchestrator.session().expect("session should be open");
        assert_eq!(session.state().ui_state(), ConversationUiState::Ready);
        assert!(session.state().knows_server_id("s1"));

        let calls = orchestrator.gateway.calls();
        assert!(calls.contains(&GatewayCall::MarkRead {
            peer_id: "peer".to_owned(),
            last_seen_id: Some("s1".to_owned()),
        }));
        assert!(calls.contains(&GatewayCall::UnreadCount));
    }

    #[test]
    fn failed_initial_load_shows_inline_error_state() {
        let mut orchestrator = opened("peer");

        orchestrator
            .handle_event_at(
                AppEvent::ConversationFetched {
                    peer_id: "peer".to_owned(),
                    outcome: Err(ConversationSourceError::Unavailable),
                },
                T0 + 10,
            )
            .expect("event should be handled");

        let session = orchestrator.session().expect("session should be open");
        assert_eq!(session.state().ui_state(), ConversationUiState::Error);
    }

    #[test]
    fn due_tick_dispatches_a_poll_fetch() {
        let mut orchestrator = loaded("peer");

        orchestrator
            .handle_event_at(AppEvent::Tick, T0 + 5_000)
            .expect("tick should be handled");

        assert!(orchestrator
            .gateway
            .calls()
            .contains(&GatewayCall::Conversation("peer".to_owned())));
    }

    #[test]
    fn early_tick_does_not_poll() {
        let mut orchestrator = loaded("peer");

        orchestrator
            .handle_event_at(AppEvent::Tick, T0 + 1_000)
            .expect("tick should be handled");

        assert!(!orchestrator
            .gateway
            .calls()
            .iter()
            .any(|call| matches!(call, GatewayCall::Conversation(_))));
    }

    #[test]
    fn stale_fetch_completion_does_not_touch_the_new_conversation() {
        let mut orchestrator = loaded("a");
        orchestrator.state.set_active_pane(ActivePane::Conversations);
        orchestrator.open_conversation("b", T0 + 100);

        orchestrator
            .handle_event_at(
                AppEvent::ConversationFetched {
                    peer_id: "a".to_owned(),
                    outcome: Ok(vec![server("s9", "stale")]),
                },
                T0 + 200,
            )
            .expect("event should be handled");

        let session = orchestrator.session().expect("session should be open");
        assert_eq!(session.peer_id(), "b");
        assert_eq!(session.state().ui_state(), ConversationUiState::Loading);
        assert!(session.state().messages().is_empty());
    }

    #[test]
    fn enter_in_compose_dispatches_the_send() {
        let mut orchestrator = loaded("peer");
        orchestrator.state.set_active_pane(ActivePane::Compose);
        for ch in "yo".chars() {
            orchestrator
                .handle_event_at(AppEvent::Input(KeyInput::Char(ch)), T0 + 100)
                .expect("key should be handled");
        }

        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Enter), T0 + 200)
            .expect("enter should be handled");

        assert!(orchestrator.gateway.calls().contains(&GatewayCall::Send {
            peer_id: "peer".to_owned(),
            body: "yo".to_owned(),
        }));
    }

    #[test]
    fn second_enter_while_sending_is_absorbed() {
        let mut orchestrator = loaded("peer");
        orchestrator.state.set_active_pane(ActivePane::Compose);
        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Char('y')), T0 + 100)
            .expect("key should be handled");

        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Enter), T0 + 200)
            .expect("enter should be handled");
        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Enter), T0 + 210)
            .expect("enter should be handled");

        let sends = orchestrator
            .gateway
            .calls()
            .iter()
            .filter(|call| matches!(call, GatewayCall::Send { .. }))
            .count();
        assert_eq!(sends, 1);
    }

    #[test]
    fn send_without_confirmed_record_appends_a_placeholder() {
        let mut orchestrator = loaded("peer");
        orchestrator.state.set_active_pane(ActivePane::Compose);
        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Char('y')), T0 + 100)
            .expect("key should be handled");
        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Enter), T0 + 200)
            .expect("enter should be handled");

        orchestrator
            .handle_event_at(
                AppEvent::SendFinished {
                    peer_id: "peer".to_owned(),
                    outcome: Ok(None),
                },
                T0 + 300,
            )
            .expect("send completion should be handled");

        let session = orchestrator.session().expect("session should be open");
        let last = session.state().messages().last().expect("message appended");
        assert!(last.is_placeholder());
        assert_eq!(last.body, "y");
        assert!(orchestrator.state().compose().is_empty());
        assert!(orchestrator
            .listener
            .updates
            .iter()
            .any(|(update, _)| matches!(update, ConversationUpdate::Sent { .. })));
    }

    #[test]
    fn auth_failure_on_send_prompts_for_login_and_keeps_the_draft() {
        let mut orchestrator = loaded("peer");
        orchestrator.state.set_active_pane(ActivePane::Compose);
        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Char('y')), T0 + 100)
            .expect("key should be handled");
        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Enter), T0 + 200)
            .expect("enter should be handled");

        orchestrator
            .handle_event_at(
                AppEvent::SendFinished {
                    peer_id: "peer".to_owned(),
                    outcome: Err(SendSourceError::NotAuthenticated),
                },
                T0 + 300,
            )
            .expect("send completion should be handled");

        assert_eq!(
            orchestrator.state().status_notice(),
            Some("Sign in to send messages.")
        );
        assert_eq!(orchestrator.state().compose().text(), "y");
        assert!(!orchestrator.session().expect("session").sending());
    }

    #[test]
    fn scrolling_back_to_bottom_marks_read() {
        let mut orchestrator = loaded("peer");
        orchestrator.state.set_active_pane(ActivePane::Messages);

        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::PageUp), T0 + 100)
            .expect("scroll should be handled");
        assert!(!orchestrator.session().expect("session").state().is_at_bottom());

        orchestrator
            .handle_event_at(
                AppEvent::ConversationFetched {
                    peer_id: "peer".to_owned(),
                    outcome: Ok(vec![
                        server("s1", "hi"),
                        server("s2", "there"),
                        server("s3", "ok"),
                        server("s4", "new"),
                    ]),
                },
                T0 + 5_000,
            )
            .expect("poll should be handled");
        assert_eq!(
            orchestrator.session().expect("session").state().unread_count(),
            1
        );
        orchestrator.gateway.clear();

        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::End), T0 + 6_000)
            .expect("jump should be handled");

        assert_eq!(
            orchestrator.session().expect("session").state().unread_count(),
            0
        );
        assert_eq!(
            orchestrator.gateway.calls(),
            vec![GatewayCall::MarkRead {
                peer_id: "peer".to_owned(),
                last_seen_id: Some("s4".to_owned()),
            }]
        );
    }

    #[test]
    fn focus_regain_away_from_bottom_notifies_without_marking() {
        let mut orchestrator = loaded("peer");
        orchestrator.state.set_active_pane(ActivePane::Messages);
        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::PageUp), T0 + 100)
            .expect("scroll should be handled");
        orchestrator.gateway.clear();

        orchestrator
            .handle_event_at(AppEvent::FocusChanged(false), T0 + 200)
            .expect("focus loss should be handled");
        orchestrator
            .handle_event_at(AppEvent::FocusChanged(true), T0 + 300)
            .expect("focus gain should be handled");

        assert!(orchestrator.gateway.calls().is_empty());
        assert!(orchestrator
            .listener
            .updates
            .iter()
            .any(|(update, _)| matches!(update, ConversationUpdate::SeenWithoutMarking { .. })));
    }

    #[test]
    fn hidden_shell_skips_poll_ticks() {
        let mut orchestrator = loaded("peer");

        orchestrator
            .handle_event_at(AppEvent::FocusChanged(false), T0 + 100)
            .expect("focus loss should be handled");
        orchestrator
            .handle_event_at(AppEvent::Tick, T0 + 6_000)
            .expect("tick should be handled");

        assert!(!orchestrator
            .gateway
            .calls()
            .iter()
            .any(|call| matches!(call, GatewayCall::Conversation(_))));
    }

    #[test]
    fn roster_listing_populates_the_sidebar() {
        let mut orchestrator = orchestrator();
        orchestrator.start(None, T0);

        orchestrator
            .handle_event_at(
                AppEvent::ConversationsListed {
                    outcome: Ok(vec![ConversationSummary {
                        peer_id: "peer".to_owned(),
                        display_name: Some("Ada".to_owned()),
                        last_message_preview: Some("hi".to_owned()),
                        unread: 2,
                    }]),
                },
                T0 + 100,
            )
            .expect("roster should be handled");

        let list = orchestrator.state().conversation_list();
        assert_eq!(list.conversations().len(), 1);
        assert_eq!(list.selected_index(), Some(0));
    }

    #[test]
    fn mark_read_receipt_reaches_the_listener() {
        let mut orchestrator = loaded("peer");

        orchestrator
            .handle_event_at(
                AppEvent::MarkReadFinished {
                    peer_id: "peer".to_owned(),
                    receipt: MarkReadReceipt { marked: 3 },
                },
                T0 + 100,
            )
            .expect("receipt should be handled");

        assert!(orchestrator.listener.updates.iter().any(|(update, _)| {
            matches!(update, ConversationUpdate::Marked { marked: 3, .. })
        }));
    }

    #[test]
    fn unread_total_updates_the_badge() {
        let mut orchestrator = loaded("peer");

        orchestrator
            .handle_event_at(AppEvent::UnreadCountFetched { count: 7 }, T0 + 100)
            .expect("count should be handled");

        assert_eq!(orchestrator.state().unread_total(), Some(7));
    }

    #[test]
    fn identity_resolution_reaches_the_open_session() {
        let mut orchestrator = loaded("peer");

        orchestrator
            .handle_event_at(
                AppEvent::IdentityResolved {
                    user_id: "me-1".to_owned(),
                },
                T0 + 100,
            )
            .expect("identity should be handled");

        assert_eq!(
            orchestrator.session().expect("session").self_user_id(),
            Some("me-1")
        );
    }

    #[test]
    fn opening_from_the_roster_switches_conversations() {
        let mut orchestrator = orchestrator();
        orchestrator.start(None, T0);
        orchestrator
            .handle_event_at(
                AppEvent::ConversationsListed {
                    outcome: Ok(vec![ConversationSummary {
                        peer_id: "friend".to_owned(),
                        display_name: None,
                        last_message_preview: None,
                        unread: 0,
                    }]),
                },
                T0 + 100,
            )
            .expect("roster should be handled");

        orchestrator
            .handle_event_at(AppEvent::Input(KeyInput::Enter), T0 + 200)
            .expect("enter should be handled");

        assert_eq!(
            orchestrator.session().expect("session").peer_id(),
            "friend"
        );
        assert!(orchestrator
            .gateway
            .calls()
            .contains(&GatewayCall::Conversation("friend".to_owned())));
    }
}
