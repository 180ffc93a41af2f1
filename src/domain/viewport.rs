//! Scroll-anchor and visibility sensing for the message list.
//!
//! The engine never touches the terminal directly; it reads anchor and
//! visibility through [`ViewportObserver`], so a headless harness can supply
//! a fake implementation.

/// Rows from the true bottom that still count as "at bottom". Mirrors the
/// near-bottom threshold of the scroll container in the web client.
pub const DEFAULT_AT_BOTTOM_THRESHOLD_ROWS: usize = 2;

/// Read-only sensor for scroll anchor and host visibility.
pub trait ViewportObserver {
    /// Whether the list is scrolled to (or within the threshold of) the
    /// newest message.
    fn at_bottom(&self) -> bool;

    /// Whether the host surface is visible at all (terminal not suspended).
    fn visible(&self) -> bool;

    /// Whether the host surface currently holds input focus.
    fn focused(&self) -> bool;
}

/// Anchor check over raw scroll metrics: the viewport is at the bottom when
/// the content remaining below the visible window fits inside `threshold`.
#[cfg_attr(not(test), allow(dead_code))]
pub fn is_scrolled_to_bottom(
    scroll_top: usize,
    viewport_rows: usize,
    content_rows: usize,
    threshold: usize,
) -> bool {
    content_rows.saturating_sub(scroll_top + viewport_rows) <= threshold
}

/// First visible row for a window pinned `offset_from_latest` rows above the
/// newest content.
pub fn visible_window_start(
    content_rows: usize,
    viewport_rows: usize,
    offset_from_latest: usize,
) -> usize {
    content_rows.saturating_sub(viewport_rows + offset_from_latest)
}

/// Terminal-backed viewport: scroll position is tracked as a row offset from
/// the newest content (0 = pinned to the latest message), and visibility
/// follows terminal focus events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageViewport {
    offset_from_latest: usize,
    threshold_rows: usize,
    visible: bool,
    focused: bool,
}

impl MessageViewport {
    pub fn new(threshold_rows: usize) -> Self {
        Self {
            offset_from_latest: 0,
            threshold_rows,
            visible: true,
            focused: true,
        }
    }

    pub fn offset_from_latest(&self) -> usize {
        self.offset_from_latest
    }

    pub fn scroll_up(&mut self, rows: usize, content_rows: usize) {
        let max_offset = content_rows.saturating_sub(1);
        self.offset_from_latest = (self.offset_from_latest + rows).min(max_offset);
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.offset_from_latest = self.offset_from_latest.saturating_sub(rows);
    }

    pub fn jump_to_latest(&mut self) {
        self.offset_from_latest = 0;
    }

    pub fn set_focus(&mut self, focused: bool) {
        self.focused = focused;
        self.visible = focused;
    }
}

impl ViewportObserver for MessageViewport {
    fn at_bottom(&self) -> bool {
        self.offset_from_latest <= self.threshold_rows
    }

    fn visible(&self) -> bool {
        self.visible
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
