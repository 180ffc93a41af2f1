use anyhow::Result;

use crate::domain::events::{AppEvent, ConversationUpdate};
use crate::domain::shell_state::ShellState;

use super::session::ConversationSession;

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn session(&self) -> Option<&ConversationSession>;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}

/// Fire-and-forget dispatch of server operations. Completions come back to
/// the shell loop as [`AppEvent`]s tagged with the peer id they were issued
/// for; nothing here blocks the event loop.
pub trait MessagingGateway {
    fn request_conversation(&self, peer_id: &str);
    fn request_conversations(&self);
    fn dispatch_send(&self, peer_id: &str, body: &str);
    /// Best-effort: failures are swallowed by the adapter and produce no event.
    fn dispatch_mark_read(&self, peer_id: &str, last_seen_id: Option<&str>);
    fn request_unread_count(&self);
    fn request_identity(&self);
    fn request_peer_profile(&self, peer_id: &str);
}

impl<T: MessagingGateway + ?Sized> MessagingGateway for &T {
    fn request_conversation(&self, peer_id: &str) {
        (*self).request_conversation(peer_id);
    }

    fn request_conversations(&self) {
        (*self).request_conversations();
    }

    fn dispatch_send(&self, peer_id: &str, body: &str) {
        (*self).dispatch_send(peer_id, body);
    }

    fn dispatch_mark_read(&self, peer_id: &str, last_seen_id: Option<&str>) {
        (*self).dispatch_mark_read(peer_id, last_seen_id);
    }

    fn request_unread_count(&self) {
        (*self).request_unread_count();
    }

    fn request_identity(&self) {
        (*self).request_identity();
    }

    fn request_peer_profile(&self, peer_id: &str) {
        (*self).request_peer_profile(peer_id);
    }
}

/// Subscription interface for read/send notifications, replacing a global
/// broadcast channel: components interested in badge state are handed in
/// explicitly.
pub trait UpdateListener {
    fn conversations_updated(&mut self, update: &ConversationUpdate, now_unix_ms: i64);
}

/// Listener for hosts with no badge display outside the shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopListener;

impl UpdateListener for NoopListener {
    fn conversations_updated(&mut self, _update: &ConversationUpdate, _now_unix_ms: i64) {}
}
