//! Message list rendering: wraps bodies to the panel width, groups
//! consecutive messages from the same side, and inserts date separators.

use chrono::{Local, NaiveDate, TimeZone};
use ratatui::{
    layout::Alignment,
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use crate::domain::message::Message;

use super::styles;

/// Indent for body lines, aligning them under the header's time column.
const BODY_INDENT: &str = "      ";

/// Label for the current user's side of the conversation.
const OWN_SENDER_LABEL: &str = "you";

const PENDING_SUFFIX: &str = " (sending...)";

/// Builds the full list of renderable lines for the messages panel.
pub fn build_message_lines(
    messages: &[Message],
    self_user_id: Option<&str>,
    peer_label: &str,
    width: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut prev_date: Option<NaiveDate> = None;
    let mut prev_outgoing: Option<bool> = None;

    for message in messages {
        let date = timestamp_to_date(message.created_at_unix_ms);
        if prev_date != Some(date) {
            lines.push(date_separator_line(&format_date(date)));
            prev_outgoing = None;
        }

        let outgoing = message.is_outgoing(self_user_id);
        if prev_outgoing != Some(outgoing) {
            lines.push(header_line(
                &format_time(message.created_at_unix_ms),
                outgoing,
                peer_label,
            ));
        }

        let body_width = width.saturating_sub(BODY_INDENT.len());
        let pending = message.is_placeholder();
        for (index, chunk) in wrap_to_width(&message.body, body_width).into_iter().enumerate() {
            lines.push(body_line(chunk, pending && index == 0, pending));
        }

        prev_date = Some(date);
        prev_outgoing = Some(outgoing);
    }

    lines
}

fn date_separator_line(date: &str) -> Line<'static> {
    Line::from(vec![Span::styled(
        format!("——— {} ———", date),
        styles::date_separator_style(),
    )])
    .alignment(Alignment::Center)
}

fn header_line(time: &str, outgoing: bool, peer_label: &str) -> Line<'static> {
    let (label, style) = if outgoing {
        (OWN_SENDER_LABEL.to_owned(), styles::own_sender_style())
    } else {
        (peer_label.to_owned(), styles::message_sender_style())
    };

    Line::from(vec![
        Span::styled(format!("{time} "), styles::message_time_style()),
        Span::styled(label, style),
    ])
}

fn body_line(chunk: String, mark_pending: bool, pending: bool) -> Line<'static> {
    let text_style = if pending {
        styles::pending_message_style()
    } else {
        styles::message_text_style()
    };

    let mut spans = vec![
        Span::raw(BODY_INDENT.to_owned()),
        Span::styled(chunk, text_style),
    ];
    if mark_pending {
        spans.push(Span::styled(
            PENDING_SUFFIX.to_owned(),
            styles::pending_message_style(),
        ));
    }

    Line::from(spans)
}

/// Greedy word wrap by display width. Words longer than the width are split
/// hard so they cannot push the line past the panel edge.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_owned()];
    }

    let mut wrapped = Vec::new();
    for raw_line in text.lines() {
        let mut current = String::new();
        for word in raw_line.split_whitespace() {
            let candidate_width = if current.is_empty() {
                word.width()
            } else {
                current.width() + 1 + word.width()
            };

            if candidate_width <= width {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                continue;
            }

            if !current.is_empty() {
                wrapped.push(std::mem::take(&mut current));
            }

            if word.width() <= width {
                current.push_str(word);
            } else {
                let mut chunk = String::new();
                for ch in word.chars() {
                    if !chunk.is_empty() && chunk.width() + ch.to_string().width() > width {
                        wrapped.push(std::mem::take(&mut chunk));
                    }
                    chunk.push(ch);
                }
                current = chunk;
            }
        }
        wrapped.push(current);
    }

    if wrapped.is_empty() {
        wrapped.push(String::new());
    }

    wrapped
}

fn timestamp_to_date(timestamp_ms: i64) -> NaiveDate {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|timestamp| timestamp.date_naive())
        .unwrap_or_default()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

fn format_time(timestamp_ms: i64) -> String {
    Local
        .timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|timestamp| timestamp.format("%H:%M").to_string())
        .unwrap_or_else(|| "--:--".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: &str, sender: &str, body: &str, ts: i64) -> Message {
        Message {
            id: id.to_owned(),
            sender_id: sender.to_owned(),
            recipient_id: "other".to_owned(),
            body: body.to_owned(),
            created_at_unix_ms: ts,
        }
    }

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(
            wrap_to_width("the quick brown fox", 9),
            vec!["the quick", "brown fox"]
        );
    }

    #[test]
    fn splits_words_longer_than_the_width() {
        assert_eq!(wrap_to_width("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn preserves_explicit_line_breaks() {
        assert_eq!(wrap_to_width("one\ntwo", 20), vec!["one", "two"]);
    }

    #[test]
    fn empty_body_still_produces_one_line() {
        assert_eq!(wrap_to_width("", 20), vec![""]);
    }

    #[test]
    fn inserts_date_separator_between_days() {
        let messages = vec![
            message("s1", "peer", "hi", 1_700_000_000_000),
            message("s2", "peer", "yo", 1_700_000_000_000 + DAY_MS),
        ];

        let lines = build_message_lines(&messages, Some("me"), "Ada", 40);
        let separators = lines
            .iter()
            .filter(|line| line_text(line).contains("———"))
            .count();

        assert_eq!(separators, 2);
    }

    #[test]
    fn groups_consecutive_messages_from_the_same_side() {
        let messages = vec![
            message("s1", "peer", "one", 1_700_000_000_000),
            message("s2", "peer", "two", 1_700_000_001_000),
        ];

        let lines = build_message_lines(&messages, Some("me"), "Ada", 40);
        let headers = lines
            .iter()
            .filter(|line| line_text(line).contains("Ada"))
            .count();

        assert_eq!(headers, 1);
    }

    #[test]
    fn own_messages_are_labelled_you() {
        let messages = vec![message("s1", "me", "mine", 1_700_000_000_000)];

        let lines = build_message_lines(&messages, Some("me"), "Ada", 40);

        assert!(lines.iter().any(|line| line_text(line).contains("you")));
        assert!(!lines.iter().any(|line| line_text(line).contains("Ada ")));
    }

    #[test]
    fn placeholder_body_carries_the_pending_marker() {
        let pending = Message::local_placeholder(None, "peer", "yo", 1_700_000_000_000);

        let lines = build_message_lines(&[pending], None, "Ada", 40);

        assert!(lines
            .iter()
            .any(|line| line_text(line).contains("(sending...)")));
    }
}
