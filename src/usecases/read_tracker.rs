//! Read-state decisions: when to mark a conversation read on the server and
//! when to count arrivals into the unread badge instead.
//!
//! These are pure functions over the conversation state; the session executes
//! the returned directives by dispatching gateway calls.

use crate::domain::conversation::ConversationState;
use crate::domain::reconcile::ReconcileOutcome;

/// A mark-read call the session should dispatch, best-effort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkReadRequest {
    pub last_seen_id: Option<String>,
    /// Also fetch the authoritative unread total so the badge cannot drift.
    pub refresh_unread_total: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadDirective {
    MarkRead(MarkReadRequest),
    /// Newly arrived server ids to count into the unread badge and record
    /// as known so the next poll does not count them again.
    AccumulateUnread { fresh_ids: Vec<String> },
}

/// After the initial history load: mark everything loaded as read, up to the
/// newest message when there is one.
pub fn after_initial_load(state: &ConversationState) -> MarkReadRequest {
    MarkReadRequest {
        last_seen_id: state.last_message_id().map(str::to_owned),
        refresh_unread_total: true,
    }
}

/// After a poll batch has been merged into `state`.
///
/// At the bottom anchor, new content is marked read immediately. Scrolled
/// away, only ids that are genuinely new — never observed from the server
/// before and not absorbed by a pending placeholder — count as unread.
pub fn after_poll(state: &ConversationState, outcome: &ReconcileOutcome) -> Option<ReadDirective> {
    if !outcome.changed {
        return None;
    }

    if state.is_at_bottom() {
        return Some(ReadDirective::MarkRead(MarkReadRequest {
            last_seen_id: state.last_message_id().map(str::to_owned),
            refresh_unread_total: true,
        }));
    }

    let fresh_ids: Vec<String> = outcome
        .fresh_server_ids
        .iter()
        .filter(|id| !state.knows_server_id(id))
        .cloned()
        .collect();

    if fresh_ids.is_empty() {
        return None;
    }

    Some(ReadDirective::AccumulateUnread { fresh_ids })
}

/// When the user scrolls back down to the newest message.
pub fn on_return_to_bottom(state: &ConversationState) -> Option<MarkReadRequest> {
    state.last_message_id().map(|last| MarkReadRequest {
        last_seen_id: Some(last.to_owned()),
        refresh_unread_total: false,
    })
}

/// When the host surface becomes visible again. Marks read only while the
/// anchor is at the bottom; a user scrolled into history keeps their unread
/// state even though the page is visible.
pub fn on_visibility_regained(state: &ConversationState) -> Option<MarkReadRequest> {
    if !state.is_at_bottom() {
        return None;
    }

    on_return_to_bottom(state)
}
