//! Refresh planning for the conversation roster.
//!
//! The roster refreshes on a slow fallback interval and, debounced, shortly
//! after any read/send notification, so a burst of updates causes one
//! refetch instead of one per event.

use crate::domain::events::ConversationUpdate;

use super::contracts::UpdateListener;

pub const DEFAULT_LIST_REFRESH_INTERVAL_MS: i64 = 10_000;
pub const DEFAULT_LIST_REFRESH_DEBOUNCE_MS: i64 = 500;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRefreshPlanner {
    interval_ms: i64,
    debounce_ms: i64,
    last_refresh_at_ms: i64,
    refresh_in_flight: bool,
    dirty_at_ms: Option<i64>,
}

impl ListRefreshPlanner {
    pub fn new(interval_ms: i64, debounce_ms: i64, now_ms: i64) -> Self {
        Self {
            interval_ms,
            debounce_ms,
            last_refresh_at_ms: now_ms,
            refresh_in_flight: false,
            dirty_at_ms: None,
        }
    }

    /// Records a conversations-updated notification; the refresh fires once
    /// the debounce window passes without further updates.
    pub fn note_update(&mut self, now_ms: i64) {
        self.dirty_at_ms = Some(now_ms);
    }

    /// Decides whether this tick should refetch the roster. A positive
    /// decision marks the refresh in flight until [`Self::finish_refresh`].
    pub fn should_refresh(&mut self, now_ms: i64) -> bool {
        if self.refresh_in_flight {
            return false;
        }

        let due = match self.dirty_at_ms {
            Some(dirty_at) => now_ms >= dirty_at + self.debounce_ms,
            None => now_ms >= self.last_refresh_at_ms + self.interval_ms,
        };

        if !due {
            return false;
        }

        self.dirty_at_ms = None;
        self.last_refresh_at_ms = now_ms;
        self.refresh_in_flight = true;
        true
    }

    /// Accounts for a refresh dispatched outside the tick cadence (the
    /// startup fetch).
    pub fn begin_refresh(&mut self, now_ms: i64) {
        self.dirty_at_ms = None;
        self.last_refresh_at_ms = now_ms;
        self.refresh_in_flight = true;
    }

    pub fn finish_refresh(&mut self) {
        self.refresh_in_flight = false;
    }
}

impl UpdateListener for ListRefreshPlanner {
    fn conversations_updated(&mut self, _update: &ConversationUpdate, now_unix_ms: i64) {
        self.note_update(now_unix_ms);
    }
}
