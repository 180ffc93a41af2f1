//! Fixed-interval polling decisions for the open conversation.
//!
//! The scheduler owns no timer. The shell's idle tick feeds it timestamps and
//! it answers whether a conversation fetch should be issued now, so tests
//! drive it with virtual time instead of waiting on real intervals.

/// Seconds-scale refresh cadence for the open conversation.
pub const DEFAULT_POLL_INTERVAL_MS: i64 = 5_000;

/// How long polling stays quiet after a local send, so the optimistic entry
/// is not seen flickering against a lagging server echo.
pub const DEFAULT_POST_SEND_PAUSE_MS: i64 = 1_500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickDecision {
    Fetch,
    Skip(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    FetchInFlight,
    Paused,
    Hidden,
    NotDue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollScheduler {
    interval_ms: i64,
    next_due_at_ms: i64,
    paused_until_ms: Option<i64>,
    fetch_in_flight: bool,
}

impl PollScheduler {
    /// The first poll becomes due one interval after creation; the initial
    /// history load is issued separately through [`Self::begin_fetch`].
    pub fn new(interval_ms: i64, now_ms: i64) -> Self {
        Self {
            interval_ms,
            next_due_at_ms: now_ms + interval_ms,
            paused_until_ms: None,
            fetch_in_flight: false,
        }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn fetch_in_flight(&self) -> bool {
        self.fetch_in_flight
    }

    /// Decides whether this tick should fetch. A positive decision marks the
    /// fetch in flight and schedules the next due time; the caller must
    /// report completion through [`Self::finish_fetch`].
    pub fn on_tick(&mut self, now_ms: i64, page_visible: bool) -> TickDecision {
        if self.fetch_in_flight {
            return TickDecision::Skip(SkipReason::FetchInFlight);
        }

        if let Some(until) = self.paused_until_ms {
            if now_ms < until {
                return TickDecision::Skip(SkipReason::Paused);
            }
            self.paused_until_ms = None;
        }

        if !page_visible {
            return TickDecision::Skip(SkipReason::Hidden);
        }

        if now_ms < self.next_due_at_ms {
            return TickDecision::Skip(SkipReason::NotDue);
        }

        self.next_due_at_ms = now_ms + self.interval_ms;
        self.fetch_in_flight = true;
        TickDecision::Fetch
    }

    /// Marks an externally issued fetch (the initial history load) in flight
    /// so ticks cannot overlap it.
    pub fn begin_fetch(&mut self) {
        self.fetch_in_flight = true;
    }

    /// Clears the in-flight flag after a completion, successful or not.
    pub fn finish_fetch(&mut self) {
        self.fetch_in_flight = false;
    }

    /// Suppresses ticks until `now + pause_ms`.
    pub fn pause_for(&mut self, now_ms: i64, pause_ms: i64) {
        self.paused_until_ms = Some(now_ms + pause_ms);
    }
}
